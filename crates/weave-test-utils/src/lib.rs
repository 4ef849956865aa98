//! Testing utilities for modweave workspace
//!
//! Shared target texts, a module document builder, and small assertions.

#![allow(missing_docs)]

use weave_record::{parse_document, IntegrationRecord};

/// Router text with one module import, a router-library import and a
/// wildcard fallback route
pub const ROUTER: &str = r#"import { BrowserRouter, Routes, Route } from "react-router-dom";
import Home from "@modules/home";
import NotFound from "./NotFound";

export default function App() {
  return (
    <BrowserRouter>
      <Routes>
        <Route path="/" element={<Home />} />

        {/* 404 Fallback */}
        <Route path="*" element={<NotFound />} />
      </Routes>
    </BrowserRouter>
  );
}
"#;

/// Listing text with one icon import and an empty typed array
pub const LISTING: &str = r#"import { Link } from "react-router-dom";
import { Film } from "lucide-react";

interface Module {
  path: string;
  title: string;
  icon: React.ComponentType;
}

const modules: Module[] = [];

export default function Home() {
  return <ul>{modules.map((m) => <li key={m.path}><Link to={m.path}>{m.title}</Link></li>)}</ul>;
}
"#;

pub fn router_text() -> String {
    ROUTER.to_string()
}

pub fn listing_text() -> String {
    LISTING.to_string()
}

/// `"widget demo"` → `"WidgetDemo"`
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect()
}

/// Builder for module documents
///
/// Snippets default to the conventional shapes derived from the module
/// name and slug: `import <Pascal> from "@modules/<slug>";`, a route on
/// `/<slug>` and a listing entry on `/<slug>` with icon `Star`.
#[derive(Debug, Clone)]
pub struct ModuleXml {
    pub module_name: String,
    pub slug: String,
    pub plan: Option<String>,
    pub files: Vec<(String, String)>,
    pub import: Option<String>,
    pub route: Option<String>,
    pub home_card: Option<String>,
    pub integration: bool,
}

impl ModuleXml {
    pub fn new(module_name: &str, slug: &str) -> Self {
        let component = pascal_case(module_name);
        Self {
            module_name: module_name.to_string(),
            slug: slug.to_string(),
            plan: None,
            files: Vec::new(),
            import: Some(format!("import {component} from \"@modules/{slug}\";")),
            route: Some(format!(
                "<Route path=\"/{slug}\" element={{<{component} />}} />"
            )),
            home_card: Some(format!(
                "{{\n  path: \"/{slug}\",\n  title: \"{module_name}\",\n  icon: Star,\n}}"
            )),
            integration: true,
        }
    }

    pub fn with_import(mut self, import: &str) -> Self {
        self.import = Some(import.to_string());
        self
    }

    pub fn with_route(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }

    pub fn with_home_card(mut self, home_card: &str) -> Self {
        self.home_card = Some(home_card.to_string());
        self
    }

    /// Replace the icon of the default listing entry
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.home_card = Some(format!(
            "{{\n  path: \"/{}\",\n  title: \"{}\",\n  icon: {icon},\n}}",
            self.slug, self.module_name
        ));
        self
    }

    pub fn without_route(mut self) -> Self {
        self.route = None;
        self
    }

    pub fn without_integration(mut self) -> Self {
        self.integration = false;
        self
    }

    pub fn with_plan(mut self, plan: &str) -> Self {
        self.plan = Some(plan.to_string());
        self
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    /// Render the document; snippets go into CDATA sections
    pub fn build(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<module>\n");
        xml.push_str(&format!("  <module_name>{}</module_name>\n", self.module_name));
        xml.push_str(&format!("  <slug>{}</slug>\n", self.slug));

        if let Some(plan) = &self.plan {
            xml.push_str(&format!("  <plan><![CDATA[{plan}]]></plan>\n"));
        }

        if !self.files.is_empty() {
            xml.push_str("  <files>\n");
            for (path, content) in &self.files {
                xml.push_str(&format!(
                    "    <file>\n      <path>{path}</path>\n      <content><![CDATA[{content}]]></content>\n    </file>\n"
                ));
            }
            xml.push_str("  </files>\n");
        }

        if self.integration {
            xml.push_str("  <integration>\n");
            for (tag, text) in [
                ("import", &self.import),
                ("route", &self.route),
                ("home_card", &self.home_card),
            ] {
                if let Some(text) = text {
                    xml.push_str(&format!("    <{tag}><![CDATA[{text}]]></{tag}>\n"));
                }
            }
            xml.push_str("  </integration>\n");
        }

        xml.push_str("</module>\n");
        xml
    }

    /// Parse the rendered document into the record at `index`
    pub fn record(&self, index: usize) -> IntegrationRecord {
        let doc = parse_document(&self.build()).unwrap();
        IntegrationRecord::from_document(index, &doc)
    }
}

/// Assert `needles` occur in `text` in the given order
pub fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let Some(pos) = text[from..].find(needle) else {
            panic!("{needle:?} not found after byte {from} in:\n{text}");
        };
        from += pos + needle.len();
    }
}

/// Number of non-overlapping occurrences of `needle` in `text`
pub fn count(text: &str, needle: &str) -> usize {
    text.matches(needle).count()
}
