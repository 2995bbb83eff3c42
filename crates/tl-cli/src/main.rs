use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tl_cli::{Cli, Config, ingest, output};

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also land here; only real errors fail
            let _ = err.print();
            return Ok(ExitCode::from(u8::from(err.use_stderr())));
        }
    };

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    tracing::debug!(?config, "loaded configuration");

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::from(1));
    }

    let Some(input) = cli.input.as_deref() else {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::from(1));
    };

    let workload = ingest::read_workload(input, &config.input)?;
    tracing::info!(
        events = workload.event_count(),
        instructors = workload.instructors().len(),
        modules = workload.modules().len(),
        "schedule aggregated"
    );

    for path in output::write_all(&workload, input, &config)? {
        println!("wrote {}", path.display());
    }

    if cli.json {
        println!("{}", output::format_summaries_json(&workload)?);
    }

    Ok(ExitCode::SUCCESS)
}
