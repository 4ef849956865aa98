//! Subcommand implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use weave_core::{
    write_module, BatchResult, Integrator, ModuleWriteOptions, OutputTarget, RecordStatus,
    TargetPaths, WeaveConfig,
};
use weave_record::{clean_xml, diagnose, parse_document};

/// Arguments of `modweave integrate`
#[derive(Debug)]
pub(crate) struct IntegrateArgs {
    pub(crate) router: PathBuf,
    pub(crate) listing: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) dry_run: bool,
    pub(crate) json: bool,
    pub(crate) inputs: Vec<PathBuf>,
}

/// Arguments of `modweave extract`
#[derive(Debug)]
pub(crate) struct ExtractArgs {
    pub(crate) input: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) dry_run: bool,
    pub(crate) save_snippets: bool,
    pub(crate) save_plan: bool,
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub(crate) fn integrate(config: WeaveConfig, args: &IntegrateArgs) -> Result<ExitCode> {
    let inputs = args
        .inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>>>()?;

    let integrator = Integrator::new(config).context("invalid anchor configuration")?;
    let paths = TargetPaths::new(&args.router, &args.listing);
    let target = OutputTarget::new(&args.output_dir).with_dry_run(args.dry_run);

    let result = match integrator.run_files(&inputs, &paths, &target) {
        Ok(result) => result,
        Err(e) if e.is_precondition() => BatchResult::aborted(inputs.len(), &e),
        Err(e) => return Err(e).context("integration failed"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, args.dry_run);
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_summary(result: &BatchResult, dry_run: bool) {
    for report in &result.per_record {
        let component = report.component.as_deref().unwrap_or("-");
        match &report.status {
            RecordStatus::Processed => {
                println!(
                    "[{}/{}] processed {component} (path: {}, icon: {})",
                    report.index,
                    result.total,
                    report.path.as_deref().unwrap_or("-"),
                    report.icon.as_deref().unwrap_or("-"),
                );
            }
            RecordStatus::Skipped { reason } => {
                println!("[{}/{}] skipped {component}: {reason}", report.index, result.total);
            }
            RecordStatus::Error { reason } => {
                println!("[{}/{}] error: {reason}", report.index, result.total);
            }
        }
    }

    println!();
    println!("Integration summary");
    println!("  total:     {}", result.total);
    println!("  processed: {}", result.processed);
    println!("  skipped:   {}", result.skipped);
    println!("  errors:    {}", result.errors.len());

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &result.errors {
            println!("  - {error}");
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }

    if let Some(files) = &result.output_files {
        println!();
        let verb = if dry_run { "Would write" } else { "Written" };
        println!("{verb}:");
        println!("  {}", files.router.display());
        println!("  {}", files.listing.display());
    }
}

pub(crate) fn extract(config: &WeaveConfig, args: &ExtractArgs) -> Result<ExitCode> {
    let raw = read_input(&args.input)?;
    let xml = if config.sanitize_input {
        clean_xml(&raw)
    } else {
        raw
    };

    let doc = match parse_document(&xml) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {e}", args.input.display());
            eprintln!("{}", diagnose(&xml));
            return Ok(ExitCode::FAILURE);
        }
    };

    if !doc.slug_is_canonical() {
        tracing::warn!(slug = %doc.slug, "slug is not lowercase kebab-case");
    }

    let options = ModuleWriteOptions::new(&args.output_dir)
        .with_dry_run(args.dry_run)
        .with_snippets(args.save_snippets)
        .with_plan(args.save_plan);
    let report = write_module(&doc, &options)
        .with_context(|| format!("failed to write module {}", doc.slug))?;

    println!("Module: {} ({})", doc.module_name, doc.slug);
    let verb = if report.dry_run { "would write" } else { "wrote" };
    for path in report.files.iter().chain(&report.snippets).chain(&report.plan) {
        println!("  {verb} {}", path.display());
    }
    println!("{} file(s)", report.len());

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn diagnose_inputs(inputs: &[PathBuf]) -> Result<ExitCode> {
    let mut all_parse = true;

    for (i, path) in inputs.iter().enumerate() {
        let xml = clean_xml(&read_input(path)?);
        let diagnosis = diagnose(&xml);

        if i > 0 {
            println!();
        }
        println!("== {} ==", path.display());
        println!("{diagnosis}");

        all_parse &= diagnosis.parses();
    }

    Ok(if all_parse {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
