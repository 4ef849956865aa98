//! `modweave`: merge generated UI modules into a router and a listing file

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::{ExtractArgs, IntegrateArgs};
use std::path::PathBuf;
use std::process::ExitCode;
use weave_core::WeaveConfig;

fn cli() -> Command {
    Command::new("modweave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Idempotent integration of generated UI modules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug-level logging"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("integrate")
                .about("Merge module documents into the router and listing files")
                .arg(
                    Arg::new("router")
                        .long("router")
                        .visible_alias("app-tsx")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Current router file (App.tsx)"),
                )
                .arg(
                    Arg::new("listing")
                        .long("listing")
                        .visible_alias("home-tsx")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Current listing file (modules/home/index.tsx)"),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .default_value("./output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory for the patched files"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Report without writing"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the batch result as JSON"),
                )
                .arg(
                    Arg::new("inputs")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Module documents (XML)"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Write the source files carried by one module document")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Module document (XML)"),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .default_value("./src")
                        .value_parser(value_parser!(PathBuf))
                        .help("Project src directory"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Report without writing"),
                )
                .arg(
                    Arg::new("save-snippets")
                        .long("save-snippets")
                        .action(ArgAction::SetTrue)
                        .help("Also save integration snippets under modules/<slug>/integration"),
                )
                .arg(
                    Arg::new("save-plan")
                        .long("save-plan")
                        .action(ArgAction::SetTrue)
                        .help("Also save the plan to modules/<slug>/PLAN.md"),
                ),
        )
        .subcommand(
            Command::new("diagnose")
                .about("Explain why module documents fail to parse")
                .arg(
                    Arg::new("inputs")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Module documents (XML)"),
                ),
        )
}

fn path_arg(args: &ArgMatches, name: &str) -> Result<PathBuf> {
    args.get_one::<PathBuf>(name)
        .cloned()
        .with_context(|| format!("missing argument: {name}"))
}

fn paths_arg(args: &ArgMatches, name: &str) -> Vec<PathBuf> {
    args.get_many::<PathBuf>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => WeaveConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => WeaveConfig::default(),
    };

    match matches.subcommand() {
        Some(("integrate", args)) => {
            let args = IntegrateArgs {
                router: path_arg(args, "router")?,
                listing: path_arg(args, "listing")?,
                output_dir: path_arg(args, "output-dir")?,
                dry_run: args.get_flag("dry-run"),
                json: args.get_flag("json"),
                inputs: paths_arg(args, "inputs"),
            };
            commands::integrate(config, &args)
        }
        Some(("extract", args)) => {
            let args = ExtractArgs {
                input: path_arg(args, "input")?,
                output_dir: path_arg(args, "output-dir")?,
                dry_run: args.get_flag("dry-run"),
                save_snippets: args.get_flag("save-snippets"),
                save_plan: args.get_flag("save-plan"),
            };
            commands::extract(&config, &args)
        }
        Some(("diagnose", args)) => commands::diagnose_inputs(&paths_arg(args, "inputs")),
        _ => Ok(ExitCode::FAILURE),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::init(matches.get_flag("verbose"), matches.get_flag("log-json"));

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
