//! Command-line entry point — Voice Notes.
//!
//! Reads a raw transcript (file argument or stdin), normalizes it, and
//! prints the result. The full app drives [`voice_notes::session`] from a
//! live recognizer; this binary exposes the same engine for scripts and
//! debugging.
//!
//! # Usage
//!
//! ```text
//! voice-notes [FILE] [--format markdown|text|json] [--count]
//!
//!   FILE       transcript to read (stdin when omitted)
//!   --format   render the block model instead of normalized text
//!   --count    print the distinct-speaker count and exit
//! ```

use std::io::Read;

use anyhow::{bail, Context};
use voice_notes::config::AppConfig;
use voice_notes::export::{render, ExportFormat};
use voice_notes::structure::TranscriptStructurer;

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

struct Args {
    input: Option<String>,
    format: Option<ExportFormat>,
    count: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        input: None,
        format: None,
        count: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                let name = iter
                    .next()
                    .context("--format requires a value (markdown, text or json)")?;
                args.format = Some(name.parse()?);
            }
            "--count" => args.count = true,
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            other => {
                if args.input.is_some() {
                    bail!("only one input file may be given");
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    let raw = match &args.input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let engine = TranscriptStructurer::new(config.markers);
    let normalized = engine.normalize(&raw);

    if args.count {
        println!("{}", engine.speaker_count(&normalized));
        return Ok(());
    }

    match args.format {
        Some(format) => {
            let blocks = engine.parse_blocks(&normalized);
            println!("{}", render(&blocks, format)?);
        }
        None => println!("{normalized}"),
    }

    Ok(())
}
