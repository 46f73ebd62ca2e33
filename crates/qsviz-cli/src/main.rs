//! qsviz command-line driver.
//!
//! Generate, inspect, validate, and play back instrumented quicksort traces.

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qsviz_core::{
    generator::generate_values,
    io::{read_trace_auto, write_trace_auto},
    io_jsonl::write_events_jsonl,
    replay::validate_trace,
    sort::sort,
    Trace, Value,
};
use qsviz_player::{frame, PlayerState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "qsviz",
    about = "Instrumented quicksort tracer",
    long_about = "Instrumented quicksort tracer.\n\nUse this tool to sort integer arrays while recording a replayable event trace, validate traces, and play them back in the terminal at any speed.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Sort values and record the trace.
    /// If --out ends with `.jsonl`, writes the event stream as NDJSON.
    Sort {
        /// Values to sort, inline (e.g. `qsviz sort 3 6 2 9 1`)
        #[arg(value_name = "VALUE", num_args = 0.., allow_negative_numbers = true)]
        values: Vec<Value>,

        /// Read values from a file instead (whitespace/comma separated integers)
        #[arg(long, conflicts_with = "values")]
        input: Option<PathBuf>,

        /// Output path for the trace (JSON/CBOR/JSONL by extension)
        #[arg(long, default_value = "trace.json")]
        out: PathBuf,
    },

    /// Generate a synthetic input, sort it, and record the trace
    Generate {
        /// Number of values (>0)
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,

        /// Upper bound of the value range [0, max]
        #[arg(long, default_value_t = 100)]
        max: Value,

        /// RNG seed (fixed seed, fixed trace)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output path for the trace (JSON/CBOR/JSONL by extension)
        #[arg(long, default_value = "trace.json")]
        out: PathBuf,
    },

    /// Check that a trace is internally consistent and replays to the
    /// sorted input
    Verify {
        /// Input trace path (JSON/CBOR)
        #[arg(long)]
        trace: PathBuf,
    },

    /// Convert a trace's events (JSON/CBOR) -> JSON Lines (NDJSON)
    ExportJsonl {
        /// Input trace path (JSON/CBOR)
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL path
        #[arg(long)]
        output: PathBuf,
    },

    /// Replay a trace in the terminal, one event per tick
    Play {
        /// Input trace path (JSON/CBOR)
        #[arg(long)]
        trace: PathBuf,

        /// Delay between events, in milliseconds (0 = as fast as possible)
        #[arg(long, default_value_t = 200)]
        tick_ms: u64,

        /// Only print every Nth frame (1 = every event)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        every: u32,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Sort { values, input, out } => run_sort(values, input, out),
        Cmd::Generate { n, max, seed, out } => generate(n as usize, max, seed, out),
        Cmd::Verify { trace } => verify(trace),
        Cmd::ExportJsonl { input, output } => export_jsonl(input, output),
        Cmd::Play {
            trace,
            tick_ms,
            every,
        } => play(trace, tick_ms, every),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Parse whitespace/comma separated integers. All-or-nothing: any malformed
/// token rejects the whole input before a trace is produced.
fn parse_values(text: &str) -> Result<Vec<Value>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<Value>()
                .with_context(|| format!("invalid input: {tok:?} is not an integer"))
        })
        .collect()
}

/// Write a trace honoring the `.jsonl` convention (events-only NDJSON).
fn write_trace(out: &Path, trace: &Trace) -> Result<()> {
    ensure_parent_dir(out)?;

    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());

    if matches!(ext.as_deref(), Some("jsonl" | "ndjson")) {
        let n = write_events_jsonl(out, &trace.events)
            .with_context(|| format!("writing event stream to {}", out.display()))?;
        info!(events = n, "wrote NDJSON event stream");
    } else {
        write_trace_auto(out, trace)
            .with_context(|| format!("writing trace to {}", out.display()))?;
    }
    Ok(())
}

fn run_sort(values: Vec<Value>, input: Option<PathBuf>, out: PathBuf) -> Result<()> {
    let mut values = match input {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_values(&text)?
        }
        None => values,
    };
    if values.is_empty() {
        bail!("no values given (pass them inline or via --input)");
    }

    info!(n = values.len(), "sorting");
    let trace = sort(&mut values);
    write_trace(&out, &trace)?;

    println!(
        "Sorted {} values, {} events → {}",
        trace.input.len(),
        trace.len(),
        out.display()
    );
    Ok(())
}

fn generate(n: usize, max: Value, seed: u64, out: PathBuf) -> Result<()> {
    info!(n, max, seed, "generating synthetic input");
    let mut values = generate_values(n, max, seed);
    let mut trace = sort(&mut values);
    trace.meta = Some(serde_json::json!({ "n": n, "max": max, "seed": seed }));

    write_trace(&out, &trace)?;

    println!(
        "Generated n={n} (seed {seed}) → {} events → {}",
        trace.len(),
        out.display()
    );
    Ok(())
}

fn verify(path: PathBuf) -> Result<()> {
    info!(trace=%path.display(), "verifying trace");
    let trace = read_trace_auto(&path)
        .with_context(|| format!("reading trace from {}", path.display()))?;
    validate_trace(&trace)
        .with_context(|| format!("trace {} failed validation", path.display()))?;

    println!(
        "OK: {} ({} values, {} events)",
        path.display(),
        trace.input.len(),
        trace.len()
    );
    Ok(())
}

fn export_jsonl(input: PathBuf, output: PathBuf) -> Result<()> {
    info!(infile=%input.display(), outfile=%output.display(), "export to jsonl");
    let trace = read_trace_auto(&input)
        .with_context(|| format!("reading trace from {}", input.display()))?;

    ensure_parent_dir(&output)?;
    let n = write_events_jsonl(&output, &trace.events)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Exported {n} events → {}", output.display());
    Ok(())
}

fn play(path: PathBuf, tick_ms: u64, every: u32) -> Result<()> {
    info!(trace=%path.display(), tick_ms, "playback");
    let trace = read_trace_auto(&path)
        .with_context(|| format!("reading trace from {}", path.display()))?;
    validate_trace(&trace).context("refusing to play an inconsistent trace")?;

    // Fresh player per playback; nothing persists across runs.
    let mut player = PlayerState::new(&trace.input);
    let tick = Duration::from_millis(tick_ms);

    println!("{}", frame(&player));
    for (idx, ev) in trace.events.iter().enumerate() {
        player.apply(ev).with_context(|| format!("applying event {idx}"))?;
        if idx % every as usize == 0 {
            println!("── event {idx}: {ev:?}");
            print!("{}", frame(&player));
        }
        // Strictly sequential: the next event waits out this one's tick.
        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }

    println!("Done: {} events replayed.", trace.len());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_values_accepts_mixed_separators() {
        let v = parse_values("3, 6 2\n9,1").unwrap();
        assert_eq!(v, vec![3, 6, 2, 9, 1]);
    }

    #[test]
    fn parse_values_rejects_the_whole_input_on_one_bad_token() {
        assert!(parse_values("1 2 three 4").is_err());
    }
}
