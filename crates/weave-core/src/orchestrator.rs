//! Batch orchestration
//!
//! [`Integrator`] drives one batch through its phases:
//!
//! ```text
//! reading inputs → filtering → staging → patching → writing → done
//!        ↓                                                ↓
//!      failed                                          failed
//! ```
//!
//! Records are filtered strictly in input order, since the in-batch
//! duplicate rule depends on earlier staging decisions. Accepted snippets
//! are staged per kind and each strategy runs once over its whole list:
//! import then route on the router text, icon then list entry on the
//! listing text.

use crate::config::WeaveConfig;
use crate::duplicate::find_duplicate;
use crate::error::IntegrateError;
use crate::output::{write_targets, OutputTarget};
use crate::result::{AnchorWarning, BatchResult, RecordReport, RecordStatus, SkipReason};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use weave_insertion::{InsertionEngine, InsertionError, SnippetKind, TargetRole};
use weave_record::{clean_xml, parse_document, ExtractError, IntegrationRecord};

/// Phases of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchPhase {
    /// Loading the two target texts
    ReadingInputs,
    /// Extracting records and running duplicate detection
    Filtering,
    /// Accumulating accepted snippets per kind
    Staging,
    /// Applying the insertion strategies
    Patching,
    /// Persisting the patched texts
    Writing,
    /// Terminal: result handed to the caller
    Done,
    /// Terminal: batch aborted
    Failed,
}

impl BatchPhase {
    /// Check if phase is terminal
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ReadingInputs => "reading inputs",
            Self::Filtering => "filtering",
            Self::Staging => "staging",
            Self::Patching => "patching",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug)]
struct PhaseTracker {
    phase: BatchPhase,
}

impl PhaseTracker {
    fn start(phase: BatchPhase) -> Self {
        tracing::info!(%phase, "batch started");
        Self { phase }
    }

    fn advance(&mut self, next: BatchPhase) {
        tracing::info!(from = %self.phase, to = %next, "batch phase");
        self.phase = next;
    }

    fn fail(&mut self, error: &IntegrateError) {
        tracing::error!(phase = %self.phase, %error, "batch failed");
        self.phase = BatchPhase::Failed;
    }
}

/// The two target texts of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTexts {
    /// Router file text
    pub router: String,
    /// Listing file text
    pub listing: String,
}

impl TargetTexts {
    /// Create from the two texts
    #[inline]
    #[must_use]
    pub fn new(router: impl Into<String>, listing: impl Into<String>) -> Self {
        Self {
            router: router.into(),
            listing: listing.into(),
        }
    }
}

/// Locations of the two target files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    /// Router file
    pub router: PathBuf,
    /// Listing file
    pub listing: PathBuf,
}

impl TargetPaths {
    /// Create from the two paths
    #[inline]
    #[must_use]
    pub fn new(router: impl Into<PathBuf>, listing: impl Into<PathBuf>) -> Self {
        Self {
            router: router.into(),
            listing: listing.into(),
        }
    }

    /// Read both targets, checking that both exist before reading either
    ///
    /// # Errors
    /// Returns `IntegrateError::TargetMissing` if either file is absent and
    /// `IntegrateError::Io` if one cannot be read.
    pub fn read(&self) -> Result<TargetTexts, IntegrateError> {
        for (role, path) in [(TargetRole::Router, &self.router), (TargetRole::Listing, &self.listing)] {
            if !path.is_file() {
                return Err(IntegrateError::target_missing(role, path.clone()));
            }
        }

        Ok(TargetTexts {
            router: read_target(&self.router)?,
            listing: read_target(&self.listing)?,
        })
    }
}

fn read_target(path: &Path) -> Result<String, IntegrateError> {
    std::fs::read_to_string(path).map_err(|source| IntegrateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Snippets of one accepted record
#[derive(Debug)]
struct Staged {
    index: usize,
    import: String,
    route: String,
    list_entry: String,
    icon: Option<String>,
}

impl Staged {
    fn snippet(&self, kind: SnippetKind) -> Option<&str> {
        match kind {
            SnippetKind::Import => Some(self.import.as_str()),
            SnippetKind::Route => Some(self.route.as_str()),
            SnippetKind::Icon => self.icon.as_deref(),
            SnippetKind::ListEntry => Some(self.list_entry.as_str()),
        }
    }
}

/// Runs batches of module documents against a router and a listing text
#[derive(Debug)]
pub struct Integrator {
    config: WeaveConfig,
    engine: InsertionEngine,
}

impl Integrator {
    /// Create with the built-in strategies for `config.anchors`
    ///
    /// # Errors
    /// Returns `IntegrateError::Insertion` if the anchor configuration is unusable.
    pub fn new(config: WeaveConfig) -> Result<Self, IntegrateError> {
        let engine = InsertionEngine::from_config(&config.anchors)?;
        Ok(Self { config, engine })
    }

    /// Create with a custom engine
    ///
    /// # Errors
    /// Returns `IntegrateError::Insertion` if the engine lacks a strategy
    /// for any snippet kind.
    pub fn with_engine(config: WeaveConfig, engine: InsertionEngine) -> Result<Self, IntegrateError> {
        if let Some(kind) = SnippetKind::ALL.into_iter().find(|k| !engine.contains(*k)) {
            return Err(InsertionError::NoStrategy(kind).into());
        }
        Ok(Self { config, engine })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WeaveConfig {
        &self.config
    }

    /// Run one batch over in-memory texts
    ///
    /// Never fails: record-level problems and anchor misses are reported in
    /// the returned [`BatchResult`], which carries the patched texts.
    #[must_use]
    pub fn run<S: AsRef<str>>(&self, inputs: &[S], targets: TargetTexts) -> BatchResult {
        let mut tracker = PhaseTracker::start(BatchPhase::Filtering);
        let result = self.run_batch(inputs, targets, &mut tracker);
        tracker.advance(BatchPhase::Done);
        result
    }

    /// Run one batch against target files and write the patched texts
    ///
    /// Nothing is written when no record was processed.
    ///
    /// # Errors
    /// Returns `IntegrateError` if a target is missing or unreadable, or
    /// if the output cannot be written.
    pub fn run_files<S: AsRef<str>>(
        &self,
        inputs: &[S],
        paths: &TargetPaths,
        output: &OutputTarget,
    ) -> Result<BatchResult, IntegrateError> {
        let mut tracker = PhaseTracker::start(BatchPhase::ReadingInputs);

        let targets = match paths.read() {
            Ok(targets) => targets,
            Err(e) => {
                tracker.fail(&e);
                return Err(e);
            }
        };
        tracker.advance(BatchPhase::Filtering);
        let mut result = self.run_batch(inputs, targets, &mut tracker);

        if result.processed == 0 {
            tracing::info!("no new modules to integrate, targets not written");
        } else {
            tracker.advance(BatchPhase::Writing);
            match write_targets(&result, &self.config.output, output) {
                Ok(files) => result.output_files = Some(files),
                Err(e) => {
                    let e = IntegrateError::from(e);
                    tracker.fail(&e);
                    return Err(e);
                }
            }
        }

        tracker.advance(BatchPhase::Done);
        Ok(result)
    }

    fn run_batch<S: AsRef<str>>(
        &self,
        inputs: &[S],
        targets: TargetTexts,
        tracker: &mut PhaseTracker,
    ) -> BatchResult {
        let total = inputs.len();
        let mut per_record = Vec::with_capacity(total);
        let mut errors = Vec::new();
        let mut staged: Vec<Staged> = Vec::new();

        for (offset, raw) in inputs.iter().enumerate() {
            let index = offset + 1;

            let record = match self.extract(index, raw.as_ref()) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(index, error = %e, "module document rejected");
                    errors.push(format!("module {index}: {e}"));
                    per_record.push(RecordReport::error(index, e.to_string()));
                    continue;
                }
            };

            let status = match accept(&record, &targets, &staged) {
                Ok(accepted) => {
                    tracing::debug!(index, component = ?record.component_name, path = ?record.route_path, "staged");
                    staged.push(accepted);
                    RecordStatus::Processed
                }
                Err(reason) => {
                    tracing::debug!(index, component = ?record.component_name, ?reason, "skipped");
                    RecordStatus::Skipped { reason }
                }
            };

            per_record.push(RecordReport {
                index,
                status,
                component: record.component_name,
                path: record.route_path,
                icon: record.icon_name,
                unspliced: Vec::new(),
            });
        }

        tracker.advance(BatchPhase::Staging);
        tracing::info!(total, staged = staged.len(), "records filtered");

        tracker.advance(BatchPhase::Patching);
        let mut warnings = Vec::new();
        let TargetTexts { mut router, mut listing } = targets;
        router = self.patch(SnippetKind::Import, router, &staged, &mut warnings);
        router = self.patch(SnippetKind::Route, router, &staged, &mut warnings);
        listing = self.patch(SnippetKind::Icon, listing, &staged, &mut warnings);
        listing = self.patch(SnippetKind::ListEntry, listing, &staged, &mut warnings);

        for warning in &warnings {
            for report in per_record.iter_mut().filter(|r| warning.affected.contains(&r.index)) {
                report.unspliced.push(warning.kind);
            }
        }

        let processed = per_record.iter().filter(|r| r.is_processed()).count();
        let skipped = per_record.iter().filter(|r| r.is_skipped()).count();

        BatchResult {
            success: true,
            total,
            processed,
            skipped,
            errors,
            per_record,
            warnings,
            router_text: router,
            listing_text: listing,
            output_files: None,
        }
    }

    fn extract(&self, index: usize, raw: &str) -> Result<IntegrationRecord, ExtractError> {
        let xml: Cow<'_, str> = if self.config.sanitize_input {
            Cow::Owned(clean_xml(raw))
        } else {
            Cow::Borrowed(raw)
        };
        let doc = parse_document(&xml)?;
        Ok(IntegrationRecord::from_document(index, &doc))
    }

    /// Apply one strategy to all staged snippets of `kind`
    fn patch(
        &self,
        kind: SnippetKind,
        text: String,
        staged: &[Staged],
        warnings: &mut Vec<AnchorWarning>,
    ) -> String {
        let (affected, snippets): (Vec<usize>, Vec<&str>) = staged
            .iter()
            .filter_map(|s| s.snippet(kind).map(|snippet| (s.index, snippet)))
            .unzip();

        if snippets.is_empty() {
            return text;
        }

        // with_engine guarantees a strategy per kind
        let insertion = match self.engine.apply(kind, &text, &snippets) {
            Ok(insertion) => insertion,
            Err(err) => {
                tracing::error!(%kind, error = %err, "patch skipped");
                return text;
            }
        };
        tracing::info!(
            %kind,
            role = %kind.target(),
            strategy = insertion.strategy,
            outcome = ?insertion.outcome,
            "patched"
        );

        if insertion.outcome.is_anchor_missing() {
            warnings.push(AnchorWarning {
                kind,
                strategy: insertion.strategy.to_string(),
                affected,
            });
        }
        insertion.text
    }
}

/// Stage the record, or say why not
fn accept(
    record: &IntegrationRecord,
    targets: &TargetTexts,
    staged: &[Staged],
) -> Result<Staged, SkipReason> {
    if record.has_no_snippets() {
        return Err(SkipReason::NoIntegration);
    }
    let snippets = record.snippets().map_err(SkipReason::MissingFields)?;
    if record.component_name.is_none() {
        return Err(SkipReason::NoComponentName);
    }

    let staged_routes: Vec<&str> = staged.iter().map(|s| s.route.as_str()).collect();
    if let Some(rule) = find_duplicate(record, &targets.router, &targets.listing, &staged_routes) {
        return Err(SkipReason::AlreadyExists(rule));
    }

    Ok(Staged {
        index: record.index,
        import: snippets.import.to_string(),
        route: snippets.route.to_string(),
        list_entry: snippets.list_entry.to_string(),
        icon: record.icon_name.clone(),
    })
}
