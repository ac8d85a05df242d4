/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! euldoc - pandoc JSON filter entry point

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use euldoc_core::{Mode, NativeRuntime, PipelineOptions, process};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "euldoc")]
#[command(version, about = "Prepare a pandoc document for HTML or PDF output", long_about = None)]
struct Cli {
    /// Prepare the document for PDF instead of HTML
    #[arg(long)]
    pdf: bool,

    /// Read the pandoc JSON document from FILE ('-' for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Write the result to FILE instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Level of headers made from bold paragraph lead-ins
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=6))]
    section_level: u8,
}

impl Cli {
    fn options(&self) -> PipelineOptions {
        PipelineOptions {
            mode: if self.pdf { Mode::Pdf } else { Mode::Html },
            section_level: usize::from(self.section_level),
        }
    }
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if input == "-" {
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read document from stdin")?;
    } else {
        bytes = fs::read(input).with_context(|| format!("Failed to read {}", input))?;
    }
    Ok(bytes)
}

fn run(cli: &Cli) -> Result<()> {
    let input = read_input(&cli.input)?;
    let doc = euldoc_json::read(&mut input.as_slice()).context("Failed to decode pandoc JSON")?;

    let options = cli.options();
    let doc = process(doc, &options, &NativeRuntime::new())
        .with_context(|| format!("Failed to prepare document for {:?}", options.mode))?;

    // Encode fully before writing so a failure never leaves partial output.
    let mut buf = Vec::new();
    euldoc_json::write(&doc, &mut buf).context("Failed to encode pandoc JSON")?;

    match &cli.output {
        Some(path) => fs::write(path, &buf)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&buf).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "euldoc=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Starting");
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
