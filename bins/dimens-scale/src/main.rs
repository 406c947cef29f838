//! dimens-scale
//!
//! Scales Android dimension resources into `values-<qualifier>` folders.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dimens_android::{DimensionScaler, TaskConfig, TracingReporter};
use dimens_cli::output::{format_count, format_duration, Status};
use dimens_core::config::{Config, ScaleEntry};
use dimens_core::error::exit_codes;
use dimens_telemetry::{TelemetryConfig, Timer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dimens-scale")]
#[command(about = "Scale Android dimension resources into qualifier-specific folders")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Scale factor as NAME=FACTOR, replaces the configured scales (repeatable)
    #[arg(long = "scale", value_name = "NAME=FACTOR", value_parser = parse_scale, global = true)]
    scales: Vec<ScaleEntry>,

    /// Source file or directory, replaces the configured sources (repeatable)
    #[arg(long = "from", value_name = "PATH", global = true)]
    sources: Vec<PathBuf>,

    /// Destination root, replaces the configured destination
    #[arg(long = "to", value_name = "DIR", global = true)]
    destination: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scaled resource files
    Scale {
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the files that would be generated, without writing anything
    Plan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration
    Check,
}

fn parse_scale(s: &str) -> std::result::Result<ScaleEntry, String> {
    let (name, factor) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FACTOR, got `{}`", s))?;
    let factor = factor
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid factor `{}`: {}", factor, e))?;
    Ok(ScaleEntry {
        name: name.trim().to_string(),
        factor,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    dimens_telemetry::init_with_config(TelemetryConfig::from_flags(
        cli.verbose,
        cli.quiet,
        cli.json_logs,
    ))?;

    let scaler = match load_task_config(&cli).and_then(DimensionScaler::new) {
        Ok(scaler) => scaler,
        Err(e) => {
            report_config_error(&e, cli.command.json())?;
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let exit_code = match cli.command {
        Commands::Scale { json } => run_scale(&scaler, json, cli.quiet)?,
        Commands::Plan { json } => run_plan(&scaler, json)?,
        Commands::Check => run_check(&scaler, cli.config.as_deref()),
    };

    std::process::exit(exit_code);
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::Scale { json } | Commands::Plan { json } => *json,
            Commands::Check => false,
        }
    }
}

fn report_config_error(error: &dimens_core::Error, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&error.to_report())?);
    } else {
        Status::error(&error.to_string());
    }
    Ok(())
}

/// Config file values with command-line overrides applied
fn load_task_config(cli: &Cli) -> dimens_core::Result<TaskConfig> {
    let config = Config::load(cli.config.as_deref())?;
    let mut schema = config.schema.clone();
    let cwd = std::env::current_dir()?;

    if !cli.scales.is_empty() {
        schema.scales = cli.scales.clone();
    }
    if !cli.sources.is_empty() {
        schema.sources = cli.sources.iter().map(|p| cwd.join(p)).collect();
    }
    if let Some(destination) = &cli.destination {
        schema.destination = cwd.join(destination);
    }

    TaskConfig::from_schema(&schema, &config.base_dir())
}

fn run_scale(scaler: &DimensionScaler, json: bool, quiet: bool) -> Result<i32> {
    let timer = Timer::start("scale");
    let report = scaler.run(&mut TracingReporter);
    let elapsed = timer.stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for failure in &report.failures {
            let scale = failure
                .scale
                .as_deref()
                .map(|s| format!(" [{}]", s))
                .unwrap_or_default();
            Status::error(&format!("{}{}: {}", failure.code, scale, failure.message));
        }

        let summary = format!(
            "Generated {} from {} in {}",
            format_count(report.outputs.len(), "file", "files"),
            format_count(report.files_scanned, "source", "sources"),
            format_duration(elapsed)
        );

        if report.is_success() {
            if !quiet {
                Status::success(&summary);
            }
        } else {
            Status::warning(&format!(
                "{} ({})",
                summary,
                format_count(report.failure_count(), "failure", "failures")
            ));
        }
    }

    Ok(if report.is_success() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    })
}

fn run_plan(scaler: &DimensionScaler, json: bool) -> Result<i32> {
    let plan = scaler.plan();

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        Status::header("Planned outputs");
        for output in &plan.outputs {
            Status::mapping(&output.source, &output.path);
        }
        for failure in &plan.failures {
            Status::error(&format!(
                "{}: {}",
                failure.source.display(),
                failure.message
            ));
        }
        println!();
        Status::info(&format!(
            "{}, {}",
            format_count(plan.sources.len(), "source", "sources"),
            format_count(plan.outputs.len(), "output", "outputs")
        ));
    }

    Ok(if plan.failures.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    })
}

fn run_check(scaler: &DimensionScaler, config_path: Option<&Path>) -> i32 {
    let config = scaler.config();

    Status::header("Configuration");
    Status::field(
        "config",
        &config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults and standard locations)".to_string()),
    );
    Status::field("destination", &config.destination().display().to_string());
    for source in config.sources() {
        Status::field("source", &source.display().to_string());
    }
    for spec in config.scales() {
        Status::field("scale", &format!("{} → {}", spec, spec.dir_name()));
    }

    for name in config.duplicate_scale_names() {
        Status::warning(&format!(
            "Scale `{}` is configured more than once; the last one wins",
            name
        ));
    }

    if config.scales().is_empty() {
        Status::warning("No scales configured; nothing will be generated");
    }
    if config.sources().is_empty() {
        Status::warning("No sources configured; nothing will be generated");
    }

    Status::success("Configuration is valid");
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        let entry = parse_scale("sw600dp=1.5").unwrap();
        assert_eq!(entry.name, "sw600dp");
        assert_eq!(entry.factor, 1.5);
    }

    #[test]
    fn test_parse_scale_rejects_malformed() {
        assert!(parse_scale("sw600dp").is_err());
        assert!(parse_scale("sw600dp=big").is_err());
    }
}
