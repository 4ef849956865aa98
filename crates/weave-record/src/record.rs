//! Integration records
//!
//! An [`IntegrationRecord`] is the normalized, immutable view of one input
//! document that the duplicate detector and the insertion engine consume.

use crate::document::ModuleDocument;
use crate::metadata;
use serde::{Deserialize, Serialize};

/// The three snippet fields a record must carry to be spliced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetField {
    /// `<import>`
    Import,
    /// `<route>`
    Route,
    /// `<home_card>`
    HomeCard,
}

impl SnippetField {
    /// Element name in the module document
    #[inline]
    #[must_use]
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Route => "route",
            Self::HomeCard => "home_card",
        }
    }
}

impl std::fmt::Display for SnippetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_name())
    }
}

/// One record per input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationRecord {
    /// 1-based position in the batch
    pub index: usize,
    /// Import statement snippet
    pub import_snippet: Option<String>,
    /// Route element snippet
    pub route_snippet: Option<String>,
    /// Listing entry object snippet
    pub list_entry_snippet: Option<String>,
    /// Derived from `import_snippet`
    pub component_name: Option<String>,
    /// Derived from `route_snippet`
    pub route_path: Option<String>,
    /// Derived from `list_entry_snippet`
    pub list_entry_path: Option<String>,
    /// Derived from `list_entry_snippet`
    pub icon_name: Option<String>,
}

/// Borrowed view of a record whose three snippets are all present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteSnippets<'a> {
    /// Import statement
    pub import: &'a str,
    /// Route element
    pub route: &'a str,
    /// Listing entry object
    pub list_entry: &'a str,
}

/// The snippet fields a record lacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSnippets(pub Vec<SnippetField>);

impl std::fmt::Display for MissingSnippets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|s| s.element_name()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl IntegrationRecord {
    /// Build a record from raw snippets, deriving all metadata
    #[must_use]
    pub fn new(
        index: usize,
        import_snippet: Option<String>,
        route_snippet: Option<String>,
        list_entry_snippet: Option<String>,
    ) -> Self {
        let component_name = import_snippet.as_deref().and_then(metadata::component_name);
        let route_path = route_snippet.as_deref().and_then(metadata::route_path);
        let list_entry_path = list_entry_snippet
            .as_deref()
            .and_then(metadata::list_entry_path);
        let icon_name = list_entry_snippet.as_deref().and_then(metadata::icon_name);

        Self {
            index,
            import_snippet,
            route_snippet,
            list_entry_snippet,
            component_name,
            route_path,
            list_entry_path,
            icon_name,
        }
    }

    /// Build the record for the `index`-th document of a batch
    #[must_use]
    pub fn from_document(index: usize, doc: &ModuleDocument) -> Self {
        let snippets = &doc.integration;
        Self::new(
            index,
            snippets.import.clone(),
            snippets.route.clone(),
            snippets.home_card.clone(),
        )
    }

    /// True when the document carried no integration snippets at all
    #[inline]
    #[must_use]
    pub fn has_no_snippets(&self) -> bool {
        self.import_snippet.is_none()
            && self.route_snippet.is_none()
            && self.list_entry_snippet.is_none()
    }

    /// All three snippets, or the list of missing fields
    ///
    /// # Errors
    /// Returns `MissingSnippets` naming every absent field, in document order.
    pub fn snippets(&self) -> Result<CompleteSnippets<'_>, MissingSnippets> {
        match (
            self.import_snippet.as_deref(),
            self.route_snippet.as_deref(),
            self.list_entry_snippet.as_deref(),
        ) {
            (Some(import), Some(route), Some(list_entry)) => Ok(CompleteSnippets {
                import,
                route,
                list_entry,
            }),
            (import, route, list_entry) => {
                let missing = [
                    (import.is_none(), SnippetField::Import),
                    (route.is_none(), SnippetField::Route),
                    (list_entry.is_none(), SnippetField::HomeCard),
                ]
                .into_iter()
                .filter_map(|(absent, field)| absent.then_some(field))
                .collect();
                Err(MissingSnippets(missing))
            }
        }
    }
}
