//! Metadata derivation from raw snippets
//!
//! Each function pulls one identifying token out of free-form snippet text by
//! anchor-pattern matching. None of them parse the snippet; each returns
//! `None` when its pattern is absent.

use once_cell::sync::Lazy;
use regex::Regex;

static COMPONENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bimport\s+([A-Za-z_$][\w$]*)\s+from\b").expect("component pattern compiles")
});

static ROUTE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bpath="([^"]+)""#).expect("route path pattern compiles"));

static ENTRY_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bpath:\s*["']([^"']+)["']"#).expect("entry path pattern compiles")
});

static ICON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bicon:\s*([A-Za-z_$][\w$]*)").expect("icon pattern compiles")
});

/// First default-import identifier of an `import X from ...` statement
#[must_use]
pub fn component_name(import_snippet: &str) -> Option<String> {
    capture(&COMPONENT_NAME, import_snippet)
}

/// Value of the `path="..."` attribute of a route element
#[must_use]
pub fn route_path(route_snippet: &str) -> Option<String> {
    capture(&ROUTE_PATH, route_snippet)
}

/// Value of the `path: "..."` key of a listing entry object
#[must_use]
pub fn list_entry_path(entry_snippet: &str) -> Option<String> {
    capture(&ENTRY_PATH, entry_snippet)
}

/// Identifier bound to the `icon:` key of a listing entry object
#[must_use]
pub fn icon_name(entry_snippet: &str) -> Option<String> {
    capture(&ICON_NAME, entry_snippet)
}

/// `path="<route_path>"` exactly as a route element renders it
#[must_use]
pub fn render_route_attribute(route_path: &str) -> String {
    format!(r#"path="{route_path}""#)
}

/// Both quoting styles of `path: "<entry_path>"` in a listing entry
#[must_use]
pub fn render_entry_keys(entry_path: &str) -> [String; 2] {
    [
        format!(r#"path: "{entry_path}""#),
        format!("path: '{entry_path}'"),
    ]
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
