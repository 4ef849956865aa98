//! Output writer
//!
//! The only part of modweave that touches the file system for writing:
//! - [`write_targets`] persists the two patched texts of a batch.
//! - [`write_module`] materialises the source files a module document
//!   carries, optionally with its snippets and plan for reference.
//!
//! Both honour a dry-run flag that reports the would-be paths and writes
//! nothing.

use crate::config::OutputConfig;
use crate::error::OutputError;
use crate::result::{BatchResult, OutputFiles};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use weave_record::ModuleDocument;

/// Destination of the patched target texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Output directory, created if missing
    pub dir: PathBuf,
    /// Report paths without writing
    pub dry_run: bool,
}

impl OutputTarget {
    /// Write into `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dry_run: false,
        }
    }

    /// With dry-run mode
    #[inline]
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Write the final router and listing texts of `result`
///
/// # Errors
/// Returns `OutputError::Io` if the directory or either file cannot be written.
pub fn write_targets(
    result: &BatchResult,
    config: &OutputConfig,
    target: &OutputTarget,
) -> Result<OutputFiles, OutputError> {
    let files = OutputFiles {
        router: target.dir.join(&config.router_file_name),
        listing: target.dir.join(&config.listing_file_name),
    };

    if target.dry_run {
        info!(router = %files.router.display(), listing = %files.listing.display(), "dry run, targets not written");
        return Ok(files);
    }

    std::fs::create_dir_all(&target.dir).map_err(|e| OutputError::io(&target.dir, e))?;
    write_file(&files.router, &result.router_text)?;
    write_file(&files.listing, &result.listing_text)?;

    info!(dir = %target.dir.display(), "targets written");
    Ok(files)
}

/// Options for [`write_module`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleWriteOptions {
    /// Output directory, normally the project's `src` tree
    pub dir: PathBuf,
    /// Report paths without writing
    pub dry_run: bool,
    /// Also save each snippet to `modules/<slug>/integration/<kind>.txt`
    pub save_snippets: bool,
    /// Also save the plan to `modules/<slug>/PLAN.md`
    pub save_plan: bool,
}

impl ModuleWriteOptions {
    /// Write module files into `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dry_run: false,
            save_snippets: false,
            save_plan: false,
        }
    }

    /// With dry-run mode
    #[inline]
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// With snippet files
    #[inline]
    #[must_use]
    pub fn with_snippets(mut self, save: bool) -> Self {
        self.save_snippets = save;
        self
    }

    /// With plan file
    #[inline]
    #[must_use]
    pub fn with_plan(mut self, save: bool) -> Self {
        self.save_plan = save;
        self
    }
}

/// Paths produced by [`write_module`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleWriteReport {
    /// Module source files
    pub files: Vec<PathBuf>,
    /// Snippet reference files
    pub snippets: Vec<PathBuf>,
    /// Plan file
    pub plan: Option<PathBuf>,
    /// Nothing was written
    pub dry_run: bool,
}

impl ModuleWriteReport {
    /// Total number of paths
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len() + self.snippets.len() + usize::from(self.plan.is_some())
    }

    /// Check if no path was produced
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write the source files of a module document
///
/// A leading `src/` component of each file path is dropped, since the
/// output directory is the project's `src` tree. Every path is validated
/// before anything is written.
///
/// # Errors
/// Returns `OutputError::UnsafePath` for absolute paths, `..` components or
/// a slug that is not a single path component; `OutputError::Io` on write
/// failure.
pub fn write_module(
    doc: &ModuleDocument,
    options: &ModuleWriteOptions,
) -> Result<ModuleWriteReport, OutputError> {
    let mut planned: Vec<(PathBuf, &str)> = Vec::new();
    let mut report = ModuleWriteReport {
        dry_run: options.dry_run,
        ..ModuleWriteReport::default()
    };

    for file in &doc.files {
        let path = options.dir.join(relative_module_path(&file.path)?);
        report.files.push(path.clone());
        planned.push((path, file.content.as_str()));
    }

    if options.save_snippets || options.save_plan {
        let module_dir = options.dir.join("modules").join(slug_component(&doc.slug)?);

        if options.save_snippets {
            for (name, text) in doc.integration.iter() {
                let path = module_dir.join("integration").join(format!("{name}.txt"));
                report.snippets.push(path.clone());
                planned.push((path, text));
            }
        }
        if let (true, Some(plan)) = (options.save_plan, doc.plan.as_deref()) {
            let path = module_dir.join("PLAN.md");
            report.plan = Some(path.clone());
            planned.push((path, plan));
        }
    }

    if options.dry_run {
        for (path, _) in &planned {
            debug!(path = %path.display(), "would write");
        }
        return Ok(report);
    }

    for (path, content) in &planned {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))?;
        }
        write_file(path, content)?;
    }

    info!(module = %doc.module_name, written = report.len(), "module files written");
    Ok(report)
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    std::fs::write(path, content).map_err(|e| OutputError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "written");
    Ok(())
}

/// Validated relative path with any leading `src` component removed
fn relative_module_path(raw: &str) -> Result<PathBuf, OutputError> {
    let mut components = Path::new(raw).components().peekable();
    if components.peek() == Some(&Component::Normal("src".as_ref())) {
        components.next();
    }

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(OutputError::UnsafePath(PathBuf::from(raw)));
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(OutputError::UnsafePath(PathBuf::from(raw)));
    }
    Ok(relative)
}

fn slug_component(slug: &str) -> Result<&Path, OutputError> {
    let path = Path::new(slug);
    match path.components().collect::<Vec<_>>().as_slice() {
        [Component::Normal(_)] => Ok(path),
        _ => Err(OutputError::UnsafePath(PathBuf::from(slug))),
    }
}
