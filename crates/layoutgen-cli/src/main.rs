//! Command line entry point.
//!
//! With a prompt argument, generates one layout and exits. Without one,
//! starts the interactive loop.

mod output;
mod repl;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use layoutgen::{FigmaClient, FigmaSettings, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about = "Generate Figma-compatible UI layouts from natural language")]
struct CliArgs {
    /// Layout description, e.g. "a simple login form"
    prompt: Option<String>,

    /// Print the full result as JSON
    #[clap(long)]
    json: bool,

    /// Write the result as pretty JSON to this file instead of printing it
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Check access to the configured Figma file and exit (needs only FIGMA_* variables)
    #[clap(long)]
    check_figma: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    if args.check_figma {
        let figma = FigmaSettings::from_env();
        setup_logging();
        return check_figma(&figma).await;
    }

    let settings = Settings::from_env()?;
    setup_logging();
    let engine = layoutgen::bootstrap(&settings);
    let opts = output::OutputOptions {
        json: args.json,
        output: args.output,
    };

    match args.prompt {
        Some(prompt) => {
            let summary = engine.generate(&prompt).await;
            output::emit(&summary, &opts)
        }
        None => repl::run(&engine, &opts).await,
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();
}

async fn check_figma(settings: &FigmaSettings) -> Result<()> {
    let figma = FigmaClient::new(settings, false);
    let file = figma.get_file().await?;
    let name = file.get("name").and_then(|n| n.as_str()).unwrap_or("(unnamed)");
    println!("Figma file accessible: {}", name);
    Ok(())
}
