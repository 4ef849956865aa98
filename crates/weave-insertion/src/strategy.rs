//! Insertion strategy trait and core types
//!
//! Provides the [`InsertionStrategy`] capability trait: one implementation per
//! snippet kind, each split into anchor finding and splicing so a
//! syntax-aware implementation can replace a heuristic one without the
//! orchestrator noticing.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Insertion strategy for one snippet kind
///
/// # Contract
/// - `apply` never fails for a missing anchor: the text comes back unchanged
///   with [`InsertionOutcome::AnchorMissing`].
/// - Snippets are inserted in slice order.
/// - Bytes outside the anchor's insertion region are never altered.
/// - Duplicate suppression is the caller's job; a strategy trusts that every
///   snippet it receives is new (the icon strategy is the exception, since
///   merging into an existing list is its whole purpose).
pub trait InsertionStrategy: Send + Sync + std::fmt::Debug {
    /// Snippet kind this strategy handles
    fn kind(&self) -> SnippetKind;

    /// Strategy name (for logging)
    fn name(&self) -> &'static str;

    /// Locate the insertion anchor
    fn find_anchor(&self, text: &str) -> Option<Anchor>;

    /// Splice `snippets` into `text` at `anchor`
    ///
    /// # Preconditions
    /// `anchor` was produced by `find_anchor` on this same `text`.
    fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice;

    /// Find the anchor once and splice every snippet in one pass
    fn apply(&self, text: &str, snippets: &[&str]) -> Insertion {
        if snippets.is_empty() {
            return Insertion::unchanged(self.name(), text, InsertionOutcome::Empty);
        }

        let Some(anchor) = self.find_anchor(text) else {
            tracing::warn!(
                strategy = self.name(),
                snippets = snippets.len(),
                "anchor not found, text left unchanged"
            );
            return Insertion::unchanged(self.name(), text, InsertionOutcome::AnchorMissing);
        };

        let splice = self.splice(text, &anchor, snippets);
        let outcome = if splice.inserted == 0 {
            InsertionOutcome::NothingNew { anchor: anchor.kind }
        } else {
            tracing::debug!(
                strategy = self.name(),
                anchor = ?anchor.kind,
                inserted = splice.inserted,
                "snippets spliced"
            );
            InsertionOutcome::Spliced {
                anchor: anchor.kind,
                inserted: splice.inserted,
            }
        };

        Insertion {
            strategy: self.name(),
            text: splice.text,
            outcome,
        }
    }
}

/// Snippet kinds, one per insertion strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetKind {
    /// Component import lines in the router file
    Import,
    /// Route elements in the router file
    Route,
    /// Icon identifiers in the listing file's icon import
    Icon,
    /// Entry objects in the listing file's typed array
    ListEntry,
}

impl SnippetKind {
    /// All kinds, in patching order
    pub const ALL: [SnippetKind; 4] = [Self::Import, Self::Route, Self::Icon, Self::ListEntry];

    /// Which target text this kind is spliced into
    #[inline]
    #[must_use]
    pub fn target(self) -> TargetRole {
        match self {
            Self::Import | Self::Route => TargetRole::Router,
            Self::Icon | Self::ListEntry => TargetRole::Listing,
        }
    }
}

impl std::fmt::Display for SnippetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Import => "import",
            Self::Route => "route",
            Self::Icon => "icon",
            Self::ListEntry => "list_entry",
        })
    }
}

/// The two managed target texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    /// Application router file
    Router,
    /// Module listing (home) file
    Listing,
}

impl std::fmt::Display for TargetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Router => "router",
            Self::Listing => "listing",
        })
    }
}

/// Which pattern produced an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    /// Last `import X from "<modules prefix>..."` line
    ModuleImport,
    /// The "imports start here" marker comment
    ImportsMarker,
    /// End of the router library's multi-line import statement
    RouterImport,
    /// The fallback-route marker comment
    FallbackMarker,
    /// The route element carrying the wildcard path
    WildcardRoute,
    /// The icon library's named-import list
    IconImport,
    /// The typed array literal's body
    ListDeclaration,
}

/// A located insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Pattern that matched
    pub kind: AnchorKind,
    /// Region the splice may rewrite; empty for pure insertion points
    pub span: Range<usize>,
    /// Indentation to apply to inserted lines
    pub indent: String,
}

impl Anchor {
    /// Zero-width anchor at `position`
    #[inline]
    #[must_use]
    pub fn at(kind: AnchorKind, position: usize, indent: impl Into<String>) -> Self {
        Self {
            kind,
            span: position..position,
            indent: indent.into(),
        }
    }

    /// Anchor covering `span`
    #[inline]
    #[must_use]
    pub fn over(kind: AnchorKind, span: Range<usize>, indent: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            indent: indent.into(),
        }
    }

    /// Insertion position (start of the span)
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// Output of [`InsertionStrategy::splice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Rewritten text
    pub text: String,
    /// Number of snippets that actually landed
    pub inserted: usize,
}

/// What happened to one kind's snippets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertionOutcome {
    /// Snippets landed at the anchor
    Spliced {
        /// Anchor used
        anchor: AnchorKind,
        /// Snippets inserted
        inserted: usize,
    },
    /// Anchor found but every snippet was already present
    NothingNew {
        /// Anchor used
        anchor: AnchorKind,
    },
    /// No anchor; text returned unchanged
    AnchorMissing,
    /// No snippets were supplied
    Empty,
}

impl InsertionOutcome {
    /// True when the anchor could not be found
    #[inline]
    #[must_use]
    pub fn is_anchor_missing(&self) -> bool {
        matches!(self, Self::AnchorMissing)
    }

    /// Snippets inserted (zero unless spliced)
    #[inline]
    #[must_use]
    pub fn inserted(&self) -> usize {
        match self {
            Self::Spliced { inserted, .. } => *inserted,
            _ => 0,
        }
    }
}

/// Text plus outcome from [`InsertionStrategy::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Name of the strategy that ran
    pub strategy: &'static str,
    /// Resulting text
    pub text: String,
    /// Outcome
    pub outcome: InsertionOutcome,
}

impl Insertion {
    /// Text returned as-is
    #[inline]
    #[must_use]
    pub fn unchanged(strategy: &'static str, text: &str, outcome: InsertionOutcome) -> Self {
        Self {
            strategy,
            text: text.to_string(),
            outcome,
        }
    }
}

/// Insertion engine errors
///
/// A missing anchor is never an error; these cover misconfiguration only.
#[derive(Debug, thiserror::Error)]
pub enum InsertionError {
    /// An anchor pattern built from configuration failed to compile
    #[error("invalid anchor pattern for {strategy}: {source}")]
    InvalidPattern {
        /// Strategy being built
        strategy: &'static str,
        /// Regex error
        #[source]
        source: regex::Error,
    },

    /// A configuration value that anchors depend on is empty
    #[error("empty anchor setting: {0}")]
    EmptySetting(&'static str),

    /// No strategy registered for a kind
    #[error("no strategy registered for {0}")]
    NoStrategy(SnippetKind),
}

impl InsertionError {
    /// Create invalid pattern error
    #[inline]
    #[must_use]
    pub fn invalid_pattern(strategy: &'static str, source: regex::Error) -> Self {
        Self::InvalidPattern { strategy, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AppendStrategy;

    impl InsertionStrategy for AppendStrategy {
        fn kind(&self) -> SnippetKind {
            SnippetKind::Import
        }

        fn name(&self) -> &'static str {
            "append"
        }

        fn find_anchor(&self, text: &str) -> Option<Anchor> {
            text.find("@@").map(|i| Anchor::at(AnchorKind::ImportsMarker, i, ""))
        }

        fn splice(&self, text: &str, anchor: &Anchor, snippets: &[&str]) -> Splice {
            let mut out = text.to_string();
            out.insert_str(anchor.position(), &snippets.concat());
            Splice {
                text: out,
                inserted: snippets.len(),
            }
        }
    }

    #[test]
    fn apply_empty_snippets() {
        let result = AppendStrategy.apply("a@@b", &[]);
        assert_eq!(result.text, "a@@b");
        assert_eq!(result.outcome, InsertionOutcome::Empty);
    }

    #[test]
    fn apply_missing_anchor_is_soft() {
        let result = AppendStrategy.apply("ab", &["x"]);
        assert_eq!(result.text, "ab");
        assert_eq!(result.strategy, "append");
        assert!(result.outcome.is_anchor_missing());
        assert_eq!(result.outcome.inserted(), 0);
    }

    #[test]
    fn apply_splices_at_anchor() {
        let result = AppendStrategy.apply("a@@b", &["x", "y"]);
        assert_eq!(result.text, "axy@@b");
        assert_eq!(result.outcome.inserted(), 2);
    }

    #[test]
    fn kind_targets() {
        assert_eq!(SnippetKind::Import.target(), TargetRole::Router);
        assert_eq!(SnippetKind::Route.target(), TargetRole::Router);
        assert_eq!(SnippetKind::Icon.target(), TargetRole::Listing);
        assert_eq!(SnippetKind::ListEntry.target(), TargetRole::Listing);
    }

    #[test]
    fn kind_display() {
        assert_eq!(SnippetKind::ListEntry.to_string(), "list_entry");
        assert_eq!(TargetRole::Router.to_string(), "router");
    }
}
