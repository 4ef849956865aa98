//! Module documents
//!
//! A module document is the XML envelope a code generator emits for one UI
//! module:
//!
//! ```text
//! <module>
//!   <module_name>..</module_name>      required
//!   <slug>..</slug>                    required
//!   <plan>..</plan>                    optional
//!   <files>                            optional
//!     <file><path>..</path><content>..</content></file>
//!   </files>
//!   <integration>                      optional
//!     <import>..</import> <route>..</route> <home_card>..</home_card>
//!   </integration>
//! </module>
//! ```

use crate::error::{ExtractError, ExtractResult};
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

/// One generated source file carried by a module document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    /// Relative path, as written by the generator (e.g. `src/modules/x/index.tsx`)
    pub path: String,
    /// File content, whitespace-trimmed
    pub content: String,
}

/// The raw integration snippets of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSnippets {
    /// Import statement for the module component
    pub import: Option<String>,
    /// Route element for the router file
    pub route: Option<String>,
    /// Entry object for the listing array
    pub home_card: Option<String>,
}

impl IntegrationSnippets {
    /// True when no snippet is present at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.import.is_none() && self.route.is_none() && self.home_card.is_none()
    }

    /// Iterate `(element name, text)` over the present snippets
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("import", self.import.as_deref()),
            ("route", self.route.as_deref()),
            ("home_card", self.home_card.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, text)| text.map(|t| (name, t)))
    }
}

/// A parsed module document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocument {
    /// Human-readable module name
    pub module_name: String,
    /// URL-safe identifier
    pub slug: String,
    /// Implementation plan, if the generator emitted one
    pub plan: Option<String>,
    /// Generated source files
    pub files: Vec<ModuleFile>,
    /// Integration snippets
    pub integration: IntegrationSnippets,
}

impl ModuleDocument {
    /// Whether the slug matches `[a-z0-9-]+`
    ///
    /// Reported only; nothing downstream rejects a non-canonical slug.
    #[must_use]
    pub fn slug_is_canonical(&self) -> bool {
        !self.slug.is_empty()
            && self
                .slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    }
}

/// Parse one module document
///
/// # Errors
/// - `ExtractError::Empty` if the input is blank
/// - `ExtractError::Xml` if the document is not well-formed
/// - `ExtractError::MissingField` if `module_name` or `slug` is absent
pub fn parse_document(xml: &str) -> ExtractResult<ModuleDocument> {
    if xml.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    let doc = Document::parse(xml).map_err(|e| ExtractError::xml(&e))?;
    let root = doc.root_element();

    let module_name = child_text(root, "module_name").ok_or(ExtractError::MissingField("module_name"))?;
    let slug = child_text(root, "slug").ok_or(ExtractError::MissingField("slug"))?;
    let plan = child_text(root, "plan");
    let files = child(root, "files").map(parse_files).unwrap_or_default();
    let integration = child(root, "integration")
        .map(parse_integration)
        .unwrap_or_default();

    tracing::debug!(
        slug = %slug,
        files = files.len(),
        snippets = integration.iter().count(),
        "parsed module document"
    );

    Ok(ModuleDocument {
        module_name,
        slug,
        plan,
        files,
        integration,
    })
}

fn parse_files(files: Node<'_, '_>) -> Vec<ModuleFile> {
    files
        .children()
        .filter(|n| n.has_tag_name("file"))
        .filter_map(|file| {
            let path = child_text(file, "path");
            // Content may legitimately be empty; only the element is required.
            let content = child(file, "content").map(|c| element_text(c).trim().to_string());

            match (path, content) {
                (Some(path), Some(content)) => Some(ModuleFile { path, content }),
                _ => {
                    tracing::warn!("skipping file entry with missing path or content");
                    None
                }
            }
        })
        .collect()
}

fn parse_integration(integration: Node<'_, '_>) -> IntegrationSnippets {
    IntegrationSnippets {
        import: child_text(integration, "import"),
        route: child_text(integration, "route"),
        home_card: child_text(integration, "home_card"),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Trimmed text of a direct child element; empty text counts as absent
fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    let text = element_text(child(node, name)?);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Concatenated text and CDATA directly inside an element
fn element_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}
