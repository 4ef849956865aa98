//! Duplicate detection
//!
//! A record is a duplicate when any of three textual rules matches:
//!
//! 1. its component name occurs in the router text and its route path is
//!    rendered there as `path="..."`;
//! 2. its listing entry path is rendered in the listing text as
//!    `path: "..."` or `path: '...'`;
//! 3. its route path is rendered in a route staged earlier in the batch.
//!
//! The check is a pure predicate over snapshots. It errs towards reporting
//! a duplicate: inserting an existing entry corrupts the listing file,
//! skipping a new one only costs a re-run.

use serde::Serialize;
use weave_record::metadata::{render_entry_keys, render_route_attribute};
use weave_record::IntegrationRecord;

/// Which duplicate rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateRule {
    /// Component and route path already in the router text
    InRouter,
    /// Entry path already in the listing text
    InListing,
    /// Route path already staged in this batch
    StagedInBatch,
}

impl std::fmt::Display for DuplicateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InRouter => "component and route already in router",
            Self::InListing => "entry path already in listing",
            Self::StagedInBatch => "route path staged earlier in batch",
        })
    }
}

/// First duplicate rule the record matches, if any
///
/// `staged_routes` are the route snippets accepted earlier in the batch.
#[must_use]
pub fn find_duplicate(
    record: &IntegrationRecord,
    router_text: &str,
    listing_text: &str,
    staged_routes: &[&str],
) -> Option<DuplicateRule> {
    let route_attr = record.route_path.as_deref().map(render_route_attribute);

    if let (Some(component), Some(attr)) = (record.component_name.as_deref(), &route_attr) {
        if router_text.contains(component) && router_text.contains(attr.as_str()) {
            return Some(DuplicateRule::InRouter);
        }
    }

    if let Some(entry_path) = record.list_entry_path.as_deref() {
        if render_entry_keys(entry_path)
            .iter()
            .any(|key| listing_text.contains(key.as_str()))
        {
            return Some(DuplicateRule::InListing);
        }
    }

    if let Some(attr) = &route_attr {
        if staged_routes.iter().any(|route| route.contains(attr.as_str())) {
            return Some(DuplicateRule::StagedInBatch);
        }
    }

    None
}

/// True when the record already exists in either text or in the batch
#[inline]
#[must_use]
pub fn is_duplicate(
    record: &IntegrationRecord,
    router_text: &str,
    listing_text: &str,
    staged_routes: &[&str],
) -> bool {
    find_duplicate(record, router_text, listing_text, staged_routes).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(import: &str, route: &str, entry: &str) -> IntegrationRecord {
        IntegrationRecord::new(1, Some(import.into()), Some(route.into()), Some(entry.into()))
    }

    fn widget() -> IntegrationRecord {
        record(
            r#"import WidgetDemo from "@modules/widget-demo";"#,
            r#"<Route path="/widget-demo" element={<WidgetDemo />} />"#,
            r#"{ path: "/widget-demo", icon: Star }"#,
        )
    }

    #[test]
    fn new_record_is_not_duplicate() {
        assert!(!is_duplicate(&widget(), "import Home from '@modules/home';", "", &[]));
    }

    #[test]
    fn router_needs_component_and_path() {
        let rec = widget();
        let only_component = "import WidgetDemo from \"@modules/widget-demo\";";
        let only_path = "<Route path=\"/widget-demo\" element={<Other />} />";
        let both = format!("{only_component}\n{only_path}");

        assert_eq!(find_duplicate(&rec, only_component, "", &[]), None);
        assert_eq!(find_duplicate(&rec, only_path, "", &[]), None);
        assert_eq!(find_duplicate(&rec, &both, "", &[]), Some(DuplicateRule::InRouter));
    }

    #[test]
    fn router_rule_needs_a_route_path() {
        let rec = record(
            "import WidgetDemo from \"@modules/widget-demo\";",
            "<Route element={<WidgetDemo />} />",
            "{ icon: Star }",
        );
        assert_eq!(find_duplicate(&rec, "WidgetDemo", "", &[]), None);
    }

    #[test]
    fn listing_matches_either_quote_style() {
        let rec = widget();
        assert_eq!(
            find_duplicate(&rec, "", "{ path: '/widget-demo' }", &[]),
            Some(DuplicateRule::InListing)
        );
        assert_eq!(
            find_duplicate(&rec, "", "{ path: \"/widget-demo\" }", &[]),
            Some(DuplicateRule::InListing)
        );
        assert_eq!(find_duplicate(&rec, "", "{ path: `/widget-demo` }", &[]), None);
    }

    #[test]
    fn staged_route_in_same_batch() {
        let rec = widget();
        let staged = ["<Route path=\"/widget-demo\" element={<Other />} />"];
        assert_eq!(
            find_duplicate(&rec, "", "", &staged),
            Some(DuplicateRule::StagedInBatch)
        );
    }

    #[test]
    fn path_prefix_is_not_a_match() {
        let rec = widget();
        let router = "WidgetDemo <Route path=\"/widget-demo-v2\" />";
        assert!(!is_duplicate(&rec, router, "path: \"/widget-demo-v2\"", &[]));
    }
}
