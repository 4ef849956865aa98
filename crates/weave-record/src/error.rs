//! Error types for document extraction
//!
//! Every error here is local to one input document: the batch orchestrator
//! records it against that document's index and moves on.

/// Errors while turning one XML document into a [`crate::ModuleDocument`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The document is not well-formed XML
    #[error("xml parsing error at {line}:{column}: {message}")]
    Xml {
        /// Parser message
        message: String,
        /// 1-based line of the failure
        line: u32,
        /// 1-based column of the failure
        column: u32,
    },

    /// A required top-level element is absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The input was empty after sanitising
    #[error("empty document")]
    Empty,
}

impl ExtractError {
    /// Build an XML error from the parser's error value
    #[must_use]
    pub fn xml(err: &roxmltree::Error) -> Self {
        let pos = err.pos();
        Self::Xml {
            message: err.to_string(),
            line: pos.row,
            column: pos.col,
        }
    }

    /// Check if this is a well-formedness failure
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Xml { .. } | Self::Empty)
    }
}

/// Result alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;
