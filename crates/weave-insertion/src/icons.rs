//! Icon import merging
//!
//! Icon identifiers are merged into the named-import list of the icon
//! library's import statement. Unlike the other strategies this one filters
//! its own input: identifiers already imported, or repeated within the
//! batch, are dropped (exact, case-sensitive comparison).

use crate::config::AnchorConfig;
use crate::strategy::{Anchor, AnchorKind, InsertionError, InsertionStrategy, SnippetKind, Splice};
use crate::text::leading_whitespace;
use regex::Regex;
use std::collections::HashSet;

/// Merges icon identifiers into the icon library import of the listing text
#[derive(Debug, Clone)]
pub struct IconStrategy {
    icon_import: Regex,
}

impl IconStrategy {
    /// Build from anchor configuration
    ///
    /// # Errors
    /// Returns `InsertionError` if the icon library is empty or the pattern
    /// fails to compile.
    pub fn new(config: &AnchorConfig) -> Result<Self, InsertionError> {
        if config.icon_library.is_empty() {
            return Err(InsertionError::EmptySetting("icon_library"));
        }

        let icon_import = Regex::new(&format!(
            r#"import\s*\{{([^}}]*)\}}\s*from\s*["']{}["'];?"#,
            regex::escape(&config.icon_library)
        ))
        .map_err(|e| InsertionError::invalid_pattern("icons", e))?;

        Ok(Self { icon_import })
    }
}

/// Imported binding names of a named-import list (`A, B as C` → `A`, `B`)
fn imported_names(list: &str) -> HashSet<&str> {
    list.split(',')
        .filter_map(|item| item.split_whitespace().next())
        .collect()
}

impl InsertionStrategy for IconStrategy {
    fn kind(&self) -> SnippetKind {
        SnippetKind::Icon
    }

    fn name(&self) -> &'static str {
        "icons"
    }

    fn find_anchor(&self, text: &str) -> Option<Anchor> {
        let list = self.icon_import.captures(text)?.get(1)?;
        let body = list.as_str();

        // Multi-line lists: reuse the indentation of the last entry line.
        let indent = body
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .filter(|_| body.contains('\n'))
            .map(leading_whitespace)
            .unwrap_or_default();

        Some(Anchor::over(AnchorKind::IconImport, list.range(), indent))
    }

    fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice {
        let body = &text[anchor.span.clone()];
        let mut seen = imported_names(body);

        let new_icons: Vec<&str> = snippets
            .iter()
            .map(|icon| icon.trim())
            .filter(|icon| !icon.is_empty() && seen.insert(*icon))
            .collect();

        if new_icons.is_empty() {
            return Splice {
                text: text.to_string(),
                inserted: 0,
            };
        }

        let existing = body.trim_end();
        let trailing_comma = existing.ends_with(',');
        let multiline = body.contains('\n');

        let new_body = if existing.trim().is_empty() {
            format!(" {} ", new_icons.join(", "))
        } else if multiline {
            let indent = &anchor.indent;
            let added = if trailing_comma {
                new_icons
                    .iter()
                    .map(|icon| format!("\n{indent}{icon},"))
                    .collect::<String>()
            } else {
                let items: Vec<String> =
                    new_icons.iter().map(|icon| format!("\n{indent}{icon}")).collect();
                format!(",{}", items.join(","))
            };
            format!("{existing}{added}{}", &body[existing.len()..])
        } else {
            let sep = if trailing_comma { " " } else { ", " };
            let tail = if trailing_comma { "," } else { "" };
            format!(
                "{existing}{sep}{}{tail}{}",
                new_icons.join(", "),
                &body[existing.len()..]
            )
        };

        let mut out = String::with_capacity(text.len() + new_body.len());
        out.push_str(&text[..anchor.span.start]);
        out.push_str(&new_body);
        out.push_str(&text[anchor.span.end..]);

        Splice {
            text: out,
            inserted: new_icons.len(),
        }
    }
}
