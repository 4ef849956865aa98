//! Module import insertion
//!
//! New import lines go after the last existing module import. Until the
//! first module is integrated there is none, so two fallbacks are tried in
//! order: the imports marker comment, then the end of the router library's
//! import statement.

use crate::config::AnchorConfig;
use crate::strategy::{Anchor, AnchorKind, InsertionError, InsertionStrategy, SnippetKind, Splice};
use crate::text::next_line_start;
use regex::Regex;

/// Inserts component import statements into the router text
#[derive(Debug, Clone)]
pub struct ImportStrategy {
    module_import: Regex,
    router_import: Regex,
    marker: String,
}

impl ImportStrategy {
    /// Build from anchor configuration
    ///
    /// # Errors
    /// Returns `InsertionError` if the configured prefix is empty or a
    /// pattern fails to compile.
    pub fn new(config: &AnchorConfig) -> Result<Self, InsertionError> {
        if config.module_import_prefix.is_empty() {
            return Err(InsertionError::EmptySetting("module_import_prefix"));
        }

        let module_import = Regex::new(&format!(
            r#"(?m)^[ \t]*import\s+[A-Za-z_$][\w$]*\s+from\s+["']{}[^"']*["'];?[ \t]*(?:\r?\n|$)"#,
            regex::escape(&config.module_import_prefix)
        ))
        .map_err(|e| InsertionError::invalid_pattern("imports", e))?;

        let router_import = Regex::new(&format!(
            r#"\}}\s*from\s*["']{}["'];?"#,
            regex::escape(&config.router_library)
        ))
        .map_err(|e| InsertionError::invalid_pattern("imports", e))?;

        Ok(Self {
            module_import,
            router_import,
            marker: config.imports_marker.clone(),
        })
    }

    fn after_marker(&self, text: &str) -> Option<usize> {
        if self.marker.is_empty() {
            return None;
        }
        text.find(&self.marker)
            .map(|i| next_line_start(text, i + self.marker.len()))
    }
}

/// Ensure a statement terminator
fn terminated(statement: &str) -> String {
    let line = statement.trim();
    if line.ends_with(';') {
        line.to_string()
    } else {
        format!("{line};")
    }
}

impl InsertionStrategy for ImportStrategy {
    fn kind(&self) -> SnippetKind {
        SnippetKind::Import
    }

    fn name(&self) -> &'static str {
        "imports"
    }

    fn find_anchor(&self, text: &str) -> Option<Anchor> {
        if let Some(last) = self.module_import.find_iter(text).last() {
            return Some(Anchor::at(AnchorKind::ModuleImport, last.end(), ""));
        }

        if let Some(pos) = self.after_marker(text) {
            return Some(Anchor::at(AnchorKind::ImportsMarker, pos, ""));
        }

        self.router_import
            .find(text)
            .map(|m| Anchor::at(AnchorKind::RouterImport, next_line_start(text, m.end()), ""))
    }

    fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice {
        let pos = anchor.position();
        let mut block = String::new();

        // Anchor on an unterminated last line.
        if pos == text.len() && !text.is_empty() && !text.ends_with('\n') {
            block.push('\n');
        }
        for snippet in snippets {
            block.push_str(&terminated(snippet));
            block.push('\n');
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
