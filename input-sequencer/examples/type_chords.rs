//! Play a hotkey string through the platform backend, or record it when
//! `--dry-run` is given.
//!
//! cargo run --example type_chords -- "ctrl+a ctrl+c" --dry-run

use anyhow::{Context, Result};
use input_sequencer::{KeyTable, RecordingBackend, Sequencer, TimingPolicy};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut args = std::env::args().skip(1);
    let strokes_text = args
        .next()
        .context("usage: type_chords <strokes> [--dry-run]")?;
    let dry_run = args.any(|arg| arg == "--dry-run");

    let keys = KeyTable::windows()?;
    let strokes = keys
        .parse_strokes(&strokes_text)
        .with_context(|| format!("failed to parse strokes {strokes_text:?}"))?;

    if dry_run {
        let backend = Arc::new(RecordingBackend::new());
        let sequencer = Sequencer::new(backend.clone(), TimingPolicy::default())?;
        sequencer.send_strokes(&strokes)?;
        println!("{}", backend.to_json()?);
    } else {
        let sequencer = Sequencer::for_current_platform(TimingPolicy::default())?;
        sequencer.send_strokes(&strokes)?;
    }

    info!(count = strokes.len(), dry_run, "Done");
    Ok(())
}
