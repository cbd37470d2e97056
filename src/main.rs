mod model;
mod plugin;
mod readme;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use model::config::BuilderConfig;
use readme::{BuildOutcome, CheckOutcome, ReadmeBuilder};

#[derive(Parser)]
#[command(name = "build-readme")]
#[command(about = "Regenerate the root README from plugin READMEs", long_about = None)]
struct Cli {
    /// Repository root containing the README and the plugins directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config overlay (defaults to <root>/build-readme.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit non-zero if the README is out of date instead of rewriting it
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only the confirmation line.
    let default_filter = if cli.verbose {
        "build_readme=debug"
    } else {
        "build_readme=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!("build-readme starting in {}", cli.root.display());

    let config = BuilderConfig::load(&cli.root, cli.config.as_deref())?;
    let builder = ReadmeBuilder::new(cli.root, config);
    let readme = builder.readme_name();

    let report = if cli.check {
        check_report(builder.check()?, &readme)
    } else {
        update_report(builder.update()?, &readme)
    };

    Ok(report.emit())
}

/// What a finished run prints and how it exits.
#[derive(Debug, PartialEq, Eq)]
struct Report {
    line: String,
    success: bool,
}

impl Report {
    fn emit(self) -> ExitCode {
        if self.success {
            println!("{}", self.line);
            ExitCode::SUCCESS
        } else {
            tracing::error!("{}", self.line);
            ExitCode::FAILURE
        }
    }
}

fn update_report(outcome: BuildOutcome, readme: &str) -> Report {
    match outcome {
        BuildOutcome::Updated { plugins } | BuildOutcome::Unchanged { plugins } => {
            tracing::debug!("{plugins} plugins rendered");
        }
    }

    Report {
        line: format!("✓ {readme} updated"),
        success: true,
    }
}

fn check_report(outcome: CheckOutcome, readme: &str) -> Report {
    match outcome {
        CheckOutcome::UpToDate { plugins } => {
            tracing::debug!("{plugins} plugins checked");
            Report {
                line: format!("✓ {readme} is up to date"),
                success: true,
            }
        }
        CheckOutcome::Stale { plugins } => Report {
            line: format!("{readme} is out of date ({plugins} plugins); run build-readme"),
            success: false,
        },
    }
}
