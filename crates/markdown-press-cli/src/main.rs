use anyhow::{Context, Result};
use clap::Parser;
use markdown_press_config::Config;
use markdown_press_engine::{ConvertJob, convert};
use std::process;

mod cli;
mod server;

use cli::Cli;
use server::FileServer;

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())
        .context("Failed to load config file")?
        .merge(cli.overrides());
    log::debug!("Effective config: {config:?}");

    if let Some(path) = &cli.save_config {
        config
            .save_to_path(path)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let job = ConvertJob {
        input: config.input.clone(),
        output: config.output.clone(),
        template: config.template.clone(),
        title: config.title.clone(),
    };
    let report = convert(&job)?;
    log::info!(
        "{} bytes of Markdown became {} bytes of HTML",
        report.markdown_bytes,
        report.html_bytes
    );
    println!(
        "✅ Converted {} to {}",
        report.input.display(),
        report.output.display()
    );

    if config.serve {
        let server = FileServer::bind(("0.0.0.0", config.port), &config.output)?;
        println!("Serving at {}", config.serve_url());
        server.serve_forever();
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", report_fatal(&e));
        process::exit(1);
    }
}

/// Logs a fatal error and returns its one-line cause chain.
fn report_fatal(e: &anyhow::Error) -> String {
    let message = format!("{e:#}");
    log::error!("{message}");
    log::debug!("Fatal: {e:?}");
    message
}
