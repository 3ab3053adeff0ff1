//! Team Cohort command line
//!
//! Loads a JSON workspace file and runs one of:
//! - `capacity`: how many groups a template can form
//! - `validate`: the feasibility gate only
//! - `allocate`: a full randomized run, optionally exported as CSV

use clap::{Args, Parser, Subcommand};
use cohort_cli::{
    commands::{self, RunOptions},
    config::Config,
    input::load_workspace,
    logging, Result, TraceFormat,
};
use cohort_allocator::RunOutcome;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Build evenly structured groups from a role-tagged roster
#[derive(Parser)]
#[command(name = "cohort")]
#[command(about = "Assign a roster into groups according to a composition template")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report the maximum number of groups a template can form
    Capacity {
        #[command(flatten)]
        target: Target,
    },
    /// Check a request without allocating
    Validate {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        request: Request,
    },
    /// Validate and allocate groups
    Allocate {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        request: Request,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Write the groups as CSV to this file or directory
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Trace log output
        #[arg(long, value_enum, default_value = "text")]
        trace: TraceFormat,
    },
}

#[derive(Args)]
struct Target {
    /// JSON workspace file with roles, members and templates
    #[arg(long, short = 'w')]
    workspace: PathBuf,
    /// Template name (case-insensitive)
    #[arg(long, short = 't')]
    template: String,
}

#[derive(Args)]
struct Request {
    /// Number of groups; defaults to the template's capacity
    #[arg(long, short = 'g')]
    groups: Option<u32>,
    /// Reject counts above capacity instead of clamping them
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging);

    match execute(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Returns whether the request was feasible
async fn execute(command: Command, config: &Config) -> Result<bool> {
    match command {
        Command::Capacity { target } => {
            let workspace = load_workspace(&target.workspace)?;
            print!("{}", commands::capacity_report(&workspace, &target.template)?);
            Ok(true)
        }
        Command::Validate { target, request } => {
            let workspace = load_workspace(&target.workspace)?;
            let options = RunOptions {
                template: target.template,
                groups: request.groups,
                seed: None,
                strict: request.strict || config.allocation.strict_group_count,
            };
            let feasibility = commands::check(&workspace, &options);
            match feasibility.message() {
                None => println!("Request is feasible."),
                Some(message) => println!("{}", message),
            }
            Ok(feasibility.is_valid())
        }
        Command::Allocate {
            target,
            request,
            seed,
            csv,
            trace,
        } => {
            let workspace = load_workspace(&target.workspace)?;
            let options = RunOptions {
                template: target.template,
                groups: request.groups,
                seed,
                strict: request.strict,
            };
            let outcome = commands::allocate(&workspace, config, &options).await;

            match trace {
                TraceFormat::Text => print!("{}", outcome.trace()),
                TraceFormat::Json => println!("{}", outcome.trace().to_json()?),
                TraceFormat::Off => {}
            }

            match outcome {
                RunOutcome::Rejected { .. } => Ok(false),
                RunOutcome::Done(result) => {
                    println!();
                    print!("{}", commands::render_groups(&result));
                    if let Some(path) = csv {
                        let written = commands::export_csv(&result, &path)?;
                        info!("Groups exported to {}", written.display());
                    }
                    Ok(true)
                }
            }
        }
    }
}
