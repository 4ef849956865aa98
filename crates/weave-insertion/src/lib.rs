//! modweave Insertion Engine
//!
//! Position-aware splicing of code snippets into target texts without a
//! parser for the target language: every strategy works from structural
//! anchors (import shapes, marker comments, bracket boundaries).
//!
//! # Core Concepts
//!
//! - [`InsertionStrategy`]: Capability trait, `find_anchor` + `splice`
//! - [`ImportStrategy`]: Component imports after the last module import
//! - [`RouteStrategy`]: Route elements before the catch-all route
//! - [`IconStrategy`]: Icon identifiers merged into the icon library import
//! - [`ListEntryStrategy`]: Entry objects appended to the typed listing array
//! - [`InsertionEngine`]: Registry holding one strategy per [`SnippetKind`]
//!
//! # Example
//!
//! ```rust
//! use weave_insertion::{AnchorConfig, InsertionEngine, SnippetKind};
//!
//! let engine = InsertionEngine::from_config(&AnchorConfig::default()).unwrap();
//! let router = "import Home from \"@modules/home\";\n";
//!
//! let result = engine
//!     .apply(SnippetKind::Import, router, &["import Demo from \"@modules/demo\""])
//!     .unwrap();
//! assert!(result.text.ends_with("import Demo from \"@modules/demo\";\n"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod engine;
mod icons;
mod imports;
mod list;
mod routes;
mod strategy;
mod text;

// Re-exports
pub use config::AnchorConfig;
pub use engine::InsertionEngine;
pub use icons::IconStrategy;
pub use imports::ImportStrategy;
pub use list::ListEntryStrategy;
pub use routes::RouteStrategy;
pub use strategy::{
    Anchor, AnchorKind, Insertion, InsertionError, InsertionOutcome, InsertionStrategy,
    SnippetKind, Splice, TargetRole,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
