//! Listing array insertion
//!
//! Entries are appended to the body of `const <name>: <Type>[] = [ ... ];`,
//! each re-indented by a fixed offset and separated from its neighbour by a
//! blank line. The closing `];` and everything after it are left as found.

use crate::config::AnchorConfig;
use crate::strategy::{Anchor, AnchorKind, InsertionError, InsertionStrategy, SnippetKind, Splice};
use crate::text::{code_end, indent_block};
use regex::Regex;

/// Appends entry objects to the typed array of the listing text
#[derive(Debug, Clone)]
pub struct ListEntryStrategy {
    declaration: Regex,
    indent: String,
}

impl ListEntryStrategy {
    /// Build from anchor configuration
    ///
    /// # Errors
    /// Returns `InsertionError` if the array name or type is empty or the
    /// pattern fails to compile.
    pub fn new(config: &AnchorConfig) -> Result<Self, InsertionError> {
        if config.list_name.is_empty() {
            return Err(InsertionError::EmptySetting("list_name"));
        }
        if config.list_type.is_empty() {
            return Err(InsertionError::EmptySetting("list_type"));
        }

        let declaration = Regex::new(&format!(
            r"(?s)const\s+{}\s*:\s*{}\[\]\s*=\s*\[(.*?)\];",
            regex::escape(&config.list_name),
            regex::escape(&config.list_type)
        ))
        .map_err(|e| InsertionError::invalid_pattern("list", e))?;

        Ok(Self {
            declaration,
            indent: config.list_indent.clone(),
        })
    }
}

impl InsertionStrategy for ListEntryStrategy {
    fn kind(&self) -> SnippetKind {
        SnippetKind::ListEntry
    }

    fn name(&self) -> &'static str {
        "list"
    }

    fn find_anchor(&self, text: &str) -> Option<Anchor> {
        let body = self.declaration.captures(text)?.get(1)?;
        Some(Anchor::over(
            AnchorKind::ListDeclaration,
            body.range(),
            self.indent.as_str(),
        ))
    }

    fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice {
        let body = &text[anchor.span.clone()];
        let existing = body.trim_end();

        let entries: Vec<String> = snippets
            .iter()
            .map(|entry| indent_block(entry, &anchor.indent))
            .collect();
        let added = entries.join(",\n\n");

        // A separating comma goes after the last code, ahead of any line comment
        let new_body = match code_end(existing) {
            _ if existing.trim().is_empty() => format!("\n{added}\n"),
            None => format!("{existing}\n{added}\n"),
            Some(end) if existing[..end].ends_with(',') => format!("{existing}\n\n{added},\n"),
            Some(end) => format!("{},{}\n\n{added}\n", &existing[..end], &existing[end..]),
        };

        let mut out = String::with_capacity(text.len() + new_body.len());
        out.push_str(&text[..anchor.span.start]);
        out.push_str(&new_body);
        out.push_str(&text[anchor.span.end..]);

        Splice {
            text: out,
            inserted: snippets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::InsertionOutcome;
    use pretty_assertions::assert_eq;

    fn strategy() -> ListEntryStrategy {
        ListEntryStrategy::new(&AnchorConfig::default()).unwrap()
    }

    #[test]
    fn appends_after_existing_entries() {
        let text = r#"const modules: Module[] = [
  {
    path: "/a",
    icon: Film,
  },
];

export default Home;
"#;
        let result = strategy().apply(text, &["{\n  path: \"/b\",\n  icon: Star,\n}"]);

        assert_eq!(
            result.text,
            r#"const modules: Module[] = [
  {
    path: "/a",
    icon: Film,
  },

  {
    path: "/b",
    icon: Star,
  },
];

export default Home;
"#
        );
    }

    #[test]
    fn appends_without_trailing_comma() {
        let text = "const modules: Module[] = [\n  { path: \"/a\" }\n];\n";
        let result = strategy().apply(text, &["{ path: \"/b\" }", "{ path: \"/c\" }"]);
        assert_eq!(
            result.text,
            "const modules: Module[] = [\n  { path: \"/a\" },\n\n  { path: \"/b\" },\n\n  { path: \"/c\" }\n];\n"
        );
    }

    #[test]
    fn fills_empty_array_without_leading_separator() {
        let text = "const modules: Module[] = [];\n";
        let result = strategy().apply(text, &["{ path: \"/a\" }"]);
        assert_eq!(result.text, "const modules: Module[] = [\n  { path: \"/a\" }\n];\n");
    }

    #[test]
    fn comma_goes_before_trailing_comment() {
        let text = "const modules: Module[] = [\n  { path: \"/a\" } // first\n];\n";
        let result = strategy().apply(text, &["{ path: \"/b\" }"]);
        assert_eq!(
            result.text,
            "const modules: Module[] = [\n  { path: \"/a\" }, // first\n\n  { path: \"/b\" }\n];\n"
        );
    }

    #[test]
    fn comment_only_last_line_is_kept_after_the_comma() {
        let text = "const modules: Module[] = [\n  { url: \"http://a\" }\n  // more soon\n];\n";
        let result = strategy().apply(text, &["{ url: \"http://b\" }"]);
        assert_eq!(
            result.text,
            "const modules: Module[] = [\n  { url: \"http://a\" },\n  // more soon\n\n  { url: \"http://b\" }\n];\n"
        );
    }

    #[test]
    fn comment_only_body_gets_no_comma() {
        let text = "const modules: Module[] = [\n  // none yet\n];\n";
        let result = strategy().apply(text, &["{ path: \"/a\" }"]);
        assert_eq!(
            result.text,
            "const modules: Module[] = [\n  // none yet\n  { path: \"/a\" }\n];\n"
        );
    }

    #[test]
    fn untyped_array_is_not_an_anchor() {
        let text = "const modules = [];\n";
        let result = strategy().apply(text, &["{ path: \"/a\" }"]);
        assert_eq!(result.text, text);
        assert_eq!(result.outcome, InsertionOutcome::AnchorMissing);
    }

    #[test]
    fn nested_arrays_inside_entries_survive() {
        let text = "const modules: Module[] = [\n  { tags: [\"x\"] },\n];\nconst other = [1];\n";
        let result = strategy().apply(text, &["{ tags: [] }"]);
        assert_eq!(
            result.text,
            "const modules: Module[] = [\n  { tags: [\"x\"] },\n\n  { tags: [] },\n];\nconst other = [1];\n"
        );
    }

    #[test]
    fn custom_declaration_shape() {
        let config = AnchorConfig::default().with_list("pages", "Page");
        let strategy = ListEntryStrategy::new(&config).unwrap();
        let text = "export const pages: Page[] = [\n];";
        let result = strategy.apply(text, &["{ id: 1 }"]);
        assert_eq!(result.text, "export const pages: Page[] = [\n  { id: 1 }\n];");
    }
}
