//! Batch scenarios over the shared router and listing fixtures

use pretty_assertions::assert_eq;
use weave_core::{Integrator, RecordStatus, SkipReason, TargetTexts, WeaveConfig};
use weave_test_utils::{assert_in_order, count, listing_text, router_text, ModuleXml, LISTING};

fn integrator() -> Integrator {
    Integrator::new(WeaveConfig::default()).unwrap()
}

/// Router fixture without the fallback comment, leaving only the wildcard route
fn wildcard_router() -> String {
    router_text().replace("        {/* 404 Fallback */}\n", "")
}

#[test]
fn single_module_is_spliced_into_both_texts() {
    let input = ModuleXml::new("Widget Demo", "widget-demo").build();

    let result = integrator().run(&[input], TargetTexts::new(wildcard_router(), listing_text()));

    assert_eq!((result.processed, result.skipped, result.error_count()), (1, 0, 0));
    assert!(result.success);
    assert!(result.fully_spliced());

    let expected_router = wildcard_router()
        .replace(
            "import Home from \"@modules/home\";\n",
            "import Home from \"@modules/home\";\nimport WidgetDemo from \"@modules/widget-demo\";\n",
        )
        .replace(
            "        <Route path=\"*\"",
            "        <Route path=\"/widget-demo\" element={<WidgetDemo />} />\n\n        <Route path=\"*\"",
        );
    assert_eq!(result.router_text, expected_router);

    let expected_listing = LISTING
        .replace("{ Film }", "{ Film, Star }")
        .replace(
            "const modules: Module[] = [];",
            "const modules: Module[] = [\n  {\n    path: \"/widget-demo\",\n    title: \"Widget Demo\",\n    icon: Star,\n  }\n];",
        );
    assert_eq!(result.listing_text, expected_listing);

    let report = result.record(1).unwrap();
    assert_eq!(report.status, RecordStatus::Processed);
    assert_eq!(report.component.as_deref(), Some("WidgetDemo"));
    assert_eq!(report.path.as_deref(), Some("/widget-demo"));
    assert_eq!(report.icon.as_deref(), Some("Star"));
}

#[test]
fn existing_module_is_skipped_and_texts_unchanged() {
    let router = router_text().replace(
        "        {/* 404 Fallback */}",
        "        <Route path=\"/widget-demo\" element={<WidgetDemo />} />\n\n        {/* 404 Fallback */}",
    );
    let input = ModuleXml::new("Widget Demo", "widget-demo").build();

    let result = integrator().run(&[input], TargetTexts::new(router.clone(), listing_text()));

    assert_eq!((result.processed, result.skipped), (0, 1));
    assert_eq!(result.record(1).unwrap().skip_reason().unwrap().to_string(), "already exists");
    assert_eq!(result.router_text, router);
    assert_eq!(result.listing_text, listing_text());
}

#[test]
fn module_without_component_name_is_skipped() {
    let input = ModuleXml::new("Widget Demo", "widget-demo")
        .with_import("import \"@modules/widget-demo\";")
        .build();

    let result = integrator().run(&[input], TargetTexts::new(router_text(), listing_text()));

    assert_eq!(result.skipped, 1);
    assert_eq!(
        result.record(1).unwrap().skip_reason(),
        Some(&SkipReason::NoComponentName)
    );
    assert_eq!(result.router_text, router_text());
    assert_eq!(result.listing_text, listing_text());
}

#[test]
fn malformed_document_is_isolated() {
    let mut inputs: Vec<String> = ["alpha", "beta", "gamma", "delta", "epsilon"]
        .iter()
        .map(|slug| ModuleXml::new(slug, slug).build())
        .collect();
    inputs[2] = inputs[2].replace("</slug>", "</slg>");

    let result = integrator().run(&inputs, TargetTexts::new(router_text(), listing_text()));

    assert_eq!((result.processed, result.error_count()), (4, 1));
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("module 3: "));
    assert!(matches!(result.record(3).unwrap().status, RecordStatus::Error { .. }));
    assert!(result.fully_spliced());

    for component in ["Alpha", "Beta", "Delta", "Epsilon"] {
        assert_eq!(count(&result.router_text, &format!("import {component} from")), 1);
        assert_eq!(count(&result.router_text, &format!("<{component} />")), 1);
    }
    assert!(!result.router_text.contains("Gamma"));
    assert!(!result.listing_text.contains("/gamma"));
}

#[test]
fn missing_slug_is_a_record_error() {
    let input = "<module><module_name>No Slug</module_name></module>";

    let result = integrator().run(&[input], TargetTexts::new(router_text(), listing_text()));

    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors, vec!["module 1: missing required field: slug"]);
}

#[test]
fn second_run_over_patched_texts_processes_nothing() {
    let inputs: Vec<String> = ["orders", "billing", "reports"]
        .iter()
        .map(|slug| ModuleXml::new(slug, slug).with_icon("Receipt").build())
        .collect();

    let first = integrator().run(&inputs, TargetTexts::new(router_text(), listing_text()));
    assert_eq!(first.processed, 3);
    assert_eq!(count(&first.listing_text, "Receipt"), 4);

    let second = integrator().run(
        &inputs,
        TargetTexts::new(first.router_text.clone(), first.listing_text.clone()),
    );

    assert_eq!((second.processed, second.skipped), (0, 3));
    assert_eq!(second.router_text, first.router_text);
    assert_eq!(second.listing_text, first.listing_text);
}

#[test]
fn accepted_records_keep_input_order() {
    let slugs = ["zeta", "alpha", "mu", "beta"];
    let inputs: Vec<String> = slugs.iter().map(|s| ModuleXml::new(s, s).build()).collect();

    let result = integrator().run(&inputs, TargetTexts::new(router_text(), listing_text()));

    assert_in_order(
        &result.router_text,
        &[
            "import Zeta from",
            "import Alpha from",
            "import Mu from",
            "import Beta from",
            "path=\"/zeta\"",
            "path=\"/alpha\"",
            "path=\"/mu\"",
            "path=\"/beta\"",
            "{/* 404 Fallback */}",
        ],
    );
    assert_in_order(
        &result.listing_text,
        &["path: \"/zeta\"", "path: \"/alpha\"", "path: \"/mu\"", "path: \"/beta\""],
    );
    assert_eq!(count(&result.listing_text, "Star"), 5);
    assert!(result.listing_text.contains("{ Film, Star }"));
}

#[test]
fn batch_of_nothing() {
    let result = integrator().run::<&str>(&[], TargetTexts::new(router_text(), listing_text()));
    assert!(result.success);
    assert_eq!((result.total, result.processed, result.skipped), (0, 0, 0));
    assert_eq!(result.router_text, router_text());
}

#[test]
fn any_root_element_without_declaration_is_accepted() {
    let input = ModuleXml::new("Widget Demo", "widget-demo")
        .build()
        .replace("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n", "")
        .replace("<module>", "<response>")
        .replace("</module>", "</response>");
    let fenced = format!("Here you go:\n```xml\n{input}```\n");

    let result = integrator().run(&[input, fenced], TargetTexts::new(router_text(), listing_text()));

    assert_eq!(result.errors, Vec::<String>::new());
    assert_eq!(result.record(1).unwrap().status, RecordStatus::Processed);
    assert_eq!(result.record(2).unwrap().skip_reason().unwrap().to_string(), "already exists");
    assert_eq!(count(&result.router_text, "import WidgetDemo from"), 1);
}
