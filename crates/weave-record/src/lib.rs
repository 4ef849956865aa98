//! modweave Record Extraction
//!
//! Turns generator output (one XML envelope per UI module) into normalized
//! [`IntegrationRecord`]s.
//!
//! # Pipeline
//!
//! ```text
//! raw text → clean_xml → parse_document → ModuleDocument → IntegrationRecord
//!                              ↓ (on failure)
//!                           diagnose
//! ```
//!
//! # Example
//!
//! ```rust
//! use weave_record::{clean_xml, parse_document, IntegrationRecord};
//!
//! let raw = "```xml\n<module><module_name>W</module_name><slug>w</slug></module>\n```";
//! let doc = parse_document(&clean_xml(raw)).unwrap();
//! let record = IntegrationRecord::from_document(1, &doc);
//! assert!(record.has_no_snippets());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod diagnose;
pub mod document;
pub mod error;
pub mod metadata;
pub mod record;
pub mod sanitize;

// Re-exports
pub use diagnose::{diagnose, Diagnosis, IssueFlags, ParseFailure};
pub use document::{parse_document, IntegrationSnippets, ModuleDocument, ModuleFile};
pub use error::{ExtractError, ExtractResult};
pub use record::{CompleteSnippets, IntegrationRecord, MissingSnippets, SnippetField};
pub use sanitize::clean_xml;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
