//! Route insertion
//!
//! Routes go immediately before the catch-all route: either its marker
//! comment or, failing that, the route element whose path is the wildcard.

use crate::config::AnchorConfig;
use crate::strategy::{Anchor, AnchorKind, InsertionError, InsertionStrategy, SnippetKind, Splice};
use crate::text::{indent_block, is_blank_indent, line_start};

const WILDCARD_PATH: &str = r#"path="*""#;
const ROUTE_OPEN: &str = "<Route";

/// Inserts route elements into the router text
#[derive(Debug, Clone)]
pub struct RouteStrategy {
    fallback_marker: String,
    default_indent: String,
}

impl RouteStrategy {
    /// Build from anchor configuration
    ///
    /// # Errors
    /// Returns `InsertionError::EmptySetting` if the fallback marker is empty.
    pub fn new(config: &AnchorConfig) -> Result<Self, InsertionError> {
        if config.fallback_marker.is_empty() {
            return Err(InsertionError::EmptySetting("fallback_marker"));
        }
        Ok(Self {
            fallback_marker: config.fallback_marker.clone(),
            default_indent: config.route_indent.clone(),
        })
    }

    fn anchor_at(&self, text: &str, kind: AnchorKind, pos: usize) -> Anchor {
        let start = line_start(text, pos);
        let prefix = &text[start..pos];

        if is_blank_indent(prefix) {
            let indent = if prefix.is_empty() {
                self.default_indent.as_str()
            } else {
                prefix
            };
            Anchor::at(kind, start, indent)
        } else {
            // Anchor shares its line with other code; insert right before it.
            Anchor::at(kind, pos, self.default_indent.as_str())
        }
    }
}

impl InsertionStrategy for RouteStrategy {
    fn kind(&self) -> SnippetKind {
        SnippetKind::Route
    }

    fn name(&self) -> &'static str {
        "routes"
    }

    fn find_anchor(&self, text: &str) -> Option<Anchor> {
        if let Some(pos) = text.find(&self.fallback_marker) {
            return Some(self.anchor_at(text, AnchorKind::FallbackMarker, pos));
        }

        let wildcard = text.find(WILDCARD_PATH)?;
        let open = text[..wildcard].rfind(ROUTE_OPEN)?;
        Some(self.anchor_at(text, AnchorKind::WildcardRoute, open))
    }

    fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice {
        let pos = anchor.position();
        let at_line_start = pos == line_start(text, pos);

        let mut block = String::new();
        if !at_line_start {
            block.push('\n');
        }
        for route in snippets {
            block.push_str(&indent_block(route, &anchor.indent));
            block.push_str("\n\n");
        }
        if !at_line_start {
            block.push_str(&anchor.indent);
        }

        let mut out = String::with_capacity(text.len() + block.len());
        out.push_str(&text[..pos]);
        out.push_str(&block);
        out.push_str(&text[pos..]);

        Splice {
            text: out,
            inserted: snippets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strategy() -> RouteStrategy {
        RouteStrategy::new(&AnchorConfig::default()).unwrap()
    }

    const ROUTER: &str = r#"      <Routes>
        <Route path="/" element={<Home />} />

        {/* 404 Fallback */}
        <Route path="*" element={<NotFound />} />
      </Routes>
"#;

    #[test]
    fn inserts_before_fallback_marker() {
        let route = "<Route\n  path=\"/a\"\n  element={<A />}\n/>";
        let result = strategy().apply(ROUTER, &[route]);

        assert_eq!(
            result.text,
            r#"      <Routes>
        <Route path="/" element={<Home />} />

        <Route
          path="/a"
          element={<A />}
        />

        {/* 404 Fallback */}
        <Route path="*" element={<NotFound />} />
      </Routes>
"#
        );
    }

    #[test]
    fn indented_route_is_realigned() {
        let route = "<Route\n          path=\"/a\"\n          element={<A />}\n        />";
        let result = strategy().apply(ROUTER, &[route]);

        assert!(result.text.contains(
            "        <Route\n          path=\"/a\"\n          element={<A />}\n        />\n\n        {/* 404 Fallback */}"
        ));
    }

    #[test]
    fn falls_back_to_wildcard_route() {
        let text = "<Routes>\n    <Route path=\"/\" />\n    <Route path=\"*\" element={<X />} />\n</Routes>\n";
        let result = strategy().apply(text, &["<Route path=\"/b\" />"]);

        assert_eq!(
            result.text,
            "<Routes>\n    <Route path=\"/\" />\n    <Route path=\"/b\" />\n\n    <Route path=\"*\" element={<X />} />\n</Routes>\n"
        );
        assert_eq!(strategy().find_anchor(text).unwrap().kind, AnchorKind::WildcardRoute);
    }

    #[test]
    fn column_zero_anchor_uses_default_indent() {
        let text = "{/* 404 Fallback */}\n";
        let result = strategy().apply(text, &["<Route path=\"/a\" />"]);
        assert_eq!(
            result.text,
            "        <Route path=\"/a\" />\n\n{/* 404 Fallback */}\n"
        );
    }

    #[test]
    fn mid_line_anchor() {
        let text = "<Routes>{/* 404 Fallback */}</Routes>";
        let result = strategy().apply(text, &["<Route path=\"/a\" />"]);
        assert_eq!(
            result.text,
            "<Routes>\n        <Route path=\"/a\" />\n\n        {/* 404 Fallback */}</Routes>"
        );
    }

    #[test]
    fn missing_anchor_leaves_text_unchanged() {
        let text = "<Routes>\n  <Route path=\"/\" />\n</Routes>\n";
        let result = strategy().apply(text, &["<Route path=\"/a\" />"]);
        assert_eq!(result.text, text);
        assert!(result.outcome.is_anchor_missing());
    }

    #[test]
    fn original_bytes_survive_around_insertion() {
        let result = strategy().apply(ROUTER, &["<Route path=\"/a\" />", "<Route path=\"/b\" />"]);
        let marker = ROUTER.find("        {/* 404").unwrap();

        assert!(result.text.starts_with(&ROUTER[..marker]));
        assert!(result.text.ends_with(&ROUTER[marker..]));
        assert!(result.text.find("/a").unwrap() < result.text.find("/b").unwrap());
    }
}
