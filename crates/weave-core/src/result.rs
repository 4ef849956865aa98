//! Batch results
//!
//! A [`BatchResult`] is built while a batch runs and handed to the caller
//! once it reaches `done`; nothing mutates it afterwards. It serializes to
//! the JSON summary printed by `modweave integrate --json`.

use crate::duplicate::DuplicateRule;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use weave_insertion::SnippetKind;
use weave_record::MissingSnippets;

/// Why a record was not staged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document has no integration block
    NoIntegration,
    /// Some of the three snippets are absent
    MissingFields(MissingSnippets),
    /// No component name could be derived from the import snippet
    NoComponentName,
    /// A duplicate rule matched
    AlreadyExists(DuplicateRule),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoIntegration => f.write_str("no integration section found"),
            Self::MissingFields(missing) => write!(f, "missing required fields: {missing}"),
            Self::NoComponentName => f.write_str("could not extract component name"),
            Self::AlreadyExists(_) => f.write_str("already exists"),
        }
    }
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-record status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Accepted and staged
    Processed,
    /// Not staged
    Skipped {
        /// Why
        reason: SkipReason,
    },
    /// Document could not be read
    Error {
        /// Extraction error message
        reason: String,
    },
}

/// Outcome of one input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    /// 1-based batch position
    pub index: usize,
    /// Status and reason
    #[serde(flatten)]
    pub status: RecordStatus,
    /// Component name, when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Route path, when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Icon identifier, when derivable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Snippet kinds staged for this record that found no anchor
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unspliced: Vec<SnippetKind>,
}

impl RecordReport {
    /// Report for a document that failed extraction
    #[must_use]
    pub fn error(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            status: RecordStatus::Error {
                reason: message.into(),
            },
            component: None,
            path: None,
            icon: None,
            unspliced: Vec::new(),
        }
    }

    /// Check if the record was staged
    #[inline]
    #[must_use]
    pub fn is_processed(&self) -> bool {
        matches!(self.status, RecordStatus::Processed)
    }

    /// Check if the record was skipped
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, RecordStatus::Skipped { .. })
    }

    /// Skip reason, if skipped
    #[must_use]
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            RecordStatus::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}

/// An insertion strategy found no anchor for snippets staged in this batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorWarning {
    /// Snippet kind that was not spliced
    pub kind: SnippetKind,
    /// Strategy name
    pub strategy: String,
    /// Indices of the records whose snippets did not land
    pub affected: Vec<usize>,
}

impl std::fmt::Display for AnchorWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indices: Vec<String> = self.affected.iter().map(ToString::to_string).collect();
        write!(
            f,
            "no {} anchor found by '{}' strategy; records {} not spliced",
            self.kind,
            self.strategy,
            indices.join(", ")
        )
    }
}

/// Where the patched texts were written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFiles {
    /// Patched router file
    pub router: PathBuf,
    /// Patched listing file
    pub listing: PathBuf,
}

/// Structured outcome of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// False only when the batch was aborted
    pub success: bool,
    /// Number of input documents
    pub total: usize,
    /// Records staged
    pub processed: usize,
    /// Records skipped
    pub skipped: usize,
    /// Error messages, one per failed document (or the abort reason)
    pub errors: Vec<String>,
    /// One report per input document, in input order
    pub per_record: Vec<RecordReport>,
    /// Anchor misses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnchorWarning>,
    /// Final router text
    #[serde(skip)]
    pub router_text: String,
    /// Final listing text
    #[serde(skip)]
    pub listing_text: String,
    /// Written file locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_files: Option<OutputFiles>,
}

impl BatchResult {
    /// Result of a batch that was refused before any record was read
    #[must_use]
    pub fn aborted(total: usize, error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            total,
            processed: 0,
            skipped: 0,
            errors: vec![error.to_string()],
            per_record: Vec::new(),
            warnings: Vec::new(),
            router_text: String::new(),
            listing_text: String::new(),
            output_files: None,
        }
    }

    /// Number of documents that failed extraction
    #[inline]
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.per_record
            .iter()
            .filter(|r| matches!(r.status, RecordStatus::Error { .. }))
            .count()
    }

    /// True when every staged snippet landed in its target text
    #[inline]
    #[must_use]
    pub fn fully_spliced(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Report for the record at 1-based `index`
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&RecordReport> {
        self.per_record.iter().find(|r| r.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weave_record::SnippetField;

    fn skipped(index: usize, reason: SkipReason) -> RecordReport {
        RecordReport {
            index,
            status: RecordStatus::Skipped { reason },
            component: None,
            path: None,
            icon: None,
            unspliced: Vec::new(),
        }
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoIntegration.to_string(), "no integration section found");
        assert_eq!(
            SkipReason::MissingFields(MissingSnippets(vec![SnippetField::Route])).to_string(),
            "missing required fields: route"
        );
        assert_eq!(
            SkipReason::NoComponentName.to_string(),
            "could not extract component name"
        );
        assert_eq!(
            SkipReason::AlreadyExists(DuplicateRule::InListing).to_string(),
            "already exists"
        );
    }

    #[test]
    fn record_report_json_shape() {
        let report = skipped(2, SkipReason::AlreadyExists(DuplicateRule::InRouter));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"index": 2, "status": "skipped", "reason": "already exists"})
        );

        let mut processed = RecordReport::error(1, "x");
        processed.status = RecordStatus::Processed;
        processed.component = Some("A".into());
        processed.unspliced = vec![SnippetKind::Icon];
        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"index": 1, "status": "processed", "component": "A", "unspliced": ["icon"]})
        );
    }

    #[test]
    fn aborted_batch() {
        let result = BatchResult::aborted(3, "router file not found: App.tsx");
        assert!(!result.success);
        assert_eq!(result.total, 3);
        assert_eq!(result.errors, vec!["router file not found: App.tsx"]);
        assert_eq!(result.error_count(), 0);
        assert!(result.fully_spliced());
    }

    #[test]
    fn anchor_warning_display() {
        let warning = AnchorWarning {
            kind: SnippetKind::Route,
            strategy: "routes".into(),
            affected: vec![1, 3],
        };
        assert_eq!(
            warning.to_string(),
            "no route anchor found by 'routes' strategy; records 1, 3 not spliced"
        );
    }
}
