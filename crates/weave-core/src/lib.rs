//! modweave Core
//!
//! Merges generated UI modules into a router text and a listing text,
//! idempotently and in input order.
//!
//! # Core Concepts
//!
//! - [`Integrator`]: Drives one batch through its phases
//! - [`find_duplicate`]: Pure duplicate predicate over text snapshots
//! - [`BatchResult`]: Per-record outcomes, counts, anchor warnings, final texts
//! - [`WeaveConfig`]: Anchor shapes, output names, input sanitising
//! - [`write_targets`] / [`write_module`]: The only file-system writers
//!
//! # Example
//!
//! ```rust
//! use weave_core::{Integrator, TargetTexts, WeaveConfig};
//!
//! let router = "import Home from \"@modules/home\";\n\n{/* 404 Fallback */}\n";
//! let listing = "import { Film } from \"lucide-react\";\nconst modules: Module[] = [];\n";
//! let xml = r#"<module>
//!   <module_name>Widget Demo</module_name>
//!   <slug>widget-demo</slug>
//!   <integration>
//!     <import>import WidgetDemo from "@modules/widget-demo";</import>
//!     <route><![CDATA[<Route path="/widget-demo" element={<WidgetDemo />} />]]></route>
//!     <home_card>{ path: "/widget-demo", icon: Star }</home_card>
//!   </integration>
//! </module>"#;
//!
//! let integrator = Integrator::new(WeaveConfig::default()).unwrap();
//! let result = integrator.run(&[xml], TargetTexts::new(router, listing));
//!
//! assert_eq!(result.processed, 1);
//! assert!(result.listing_text.contains("{ Film, Star }"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod duplicate;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod result;

// Re-exports
pub use config::{ConfigError, OutputConfig, WeaveConfig};
pub use duplicate::{find_duplicate, is_duplicate, DuplicateRule};
pub use error::{IntegrateError, OutputError};
pub use orchestrator::{BatchPhase, Integrator, TargetPaths, TargetTexts};
pub use output::{
    write_module, write_targets, ModuleWriteOptions, ModuleWriteReport, OutputTarget,
};
pub use result::{
    AnchorWarning, BatchResult, OutputFiles, RecordReport, RecordStatus, SkipReason,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
