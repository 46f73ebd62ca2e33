//! qsviz-bench-harness
//!
//! Run small end-to-end benchmarks (generate -> sort -> validate) and append
//! CSV rows into `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p qsviz-bench-harness -- --profile configs/profiles/small.toml
//!   cargo run -p qsviz-bench-harness -- --profile configs/profiles/large.toml

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use qsviz_core::{generator::generate_values, replay::validate_trace, sort::sort};

#[derive(Debug, Deserialize)]
struct Profile {
    /// Number of values in the synthetic input
    n: usize,
    /// Upper bound of the value range [0, max]
    max: i64,
    /// RNG seed
    seed: u64,
    /// Repetitions of the whole pipeline
    repeats: u32,
}

fn parse_args() -> Result<PathBuf> {
    let mut profile: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--profile" => {
                let v = args.next().context("--profile needs a path")?;
                profile = Some(PathBuf::from(v));
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    profile.context("missing --profile <path.toml>")
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn main() -> Result<()> {
    let profile_path = parse_args()?;
    let text = fs::read_to_string(&profile_path)
        .with_context(|| format!("reading profile {}", profile_path.display()))?;
    let p: Profile = toml::from_str(&text).context("parsing profile TOML")?;

    let reports = PathBuf::from("benchmarks/reports");
    fs::create_dir_all(&reports).context("creating reports dir")?;
    let unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("clock before epoch")?
        .as_secs();
    let out_path = reports.join(format!("bench-{unix}.csv"));
    let mut out = fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    writeln!(out, "run,n,max,seed,events,sort_ms,validate_ms")?;

    for run in 0..p.repeats {
        // Vary the seed per run so repeats are not byte-identical.
        let seed = p.seed.wrapping_add(u64::from(run));
        let mut values = generate_values(p.n, p.max, seed);

        let t0 = Instant::now();
        let trace = sort(&mut values);
        let sort_ms = ms(t0.elapsed());

        let t1 = Instant::now();
        validate_trace(&trace).context("generated trace failed validation")?;
        let validate_ms = ms(t1.elapsed());

        writeln!(
            out,
            "{run},{},{},{seed},{},{sort_ms:.3},{validate_ms:.3}",
            p.n,
            p.max,
            trace.len()
        )?;
        println!(
            "run {run}: n={} events={} sort={sort_ms:.3}ms validate={validate_ms:.3}ms",
            p.n,
            trace.len()
        );
    }

    println!("Wrote {}", out_path.display());
    Ok(())
}
