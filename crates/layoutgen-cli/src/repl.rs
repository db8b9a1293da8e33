//! Interactive prompt loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use layoutgen::PipelineEngine;
use tracing::error;

use crate::output::{self, OutputOptions};

enum Line<'a> {
    Exit,
    Skip,
    Prompt(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Skip
    } else if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        Line::Exit
    } else {
        Line::Prompt(trimmed)
    }
}

/// Reads prompts from stdin until `quit`, `exit` or end of input.
pub async fn run(engine: &PipelineEngine, opts: &OutputOptions) -> Result<()> {
    println!("Interactive mode. Describe a UI layout, or type 'quit' to exit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nPrompt> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match classify(&line) {
            Line::Exit => break,
            Line::Skip => continue,
            Line::Prompt(prompt) => {
                let summary = engine.generate(prompt).await;
                if let Err(e) = output::emit(&summary, opts) {
                    error!("Failed to write result: {:#}", e);
                    println!("Error: {:#}", e);
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
