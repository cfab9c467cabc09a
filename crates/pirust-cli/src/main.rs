//! PiRust CLI - driver for the P2 prime-counting engine.
//!
//! Computes P2(x, y), the number of integers <= x with exactly two prime
//! factors each greater than y. When `-y` is omitted it is derived from the
//! cube root of x, the threshold the combinatorial prime-counting
//! algorithms feed this subroutine with.

use std::time::Instant;

use anyhow::{ensure, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pirust_core::imath::{in_between, iroot, isqrt};
use pirust_core::{status_precision, try_p2_with_progress, ProgressReporter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments structure.
#[derive(Parser)]
#[command(
    name = "pirust",
    version,
    about = "Computation of the 2nd partial sieve function P2(x, y)",
    long_about = None,
    allow_negative_numbers = true
)]
struct Cli {
    /// Upper bound x.
    x: i128,

    /// Select the P2 computation (the default; accepted for drivers that
    /// always pass the selector explicitly).
    #[arg(long = "p2")]
    _p2: bool,

    /// Prime threshold y. Defaults to alpha * ⌊x^(1/3)⌋.
    #[arg(short, long)]
    y: Option<i64>,

    /// Tuning factor applied to the default y.
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Worker threads per round (default: all logical processors).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Show a status line, optionally with a fixed number of decimal digits
    /// (default: scaled to the size of x).
    #[arg(long, value_name = "DIGITS", num_args = 0..=1, require_equals = true)]
    status: Option<Option<usize>>,

    /// Force the 128-bit accumulator even when x fits 64 bits.
    #[arg(long)]
    wide: bool,
}

/// Default threshold: alpha * ⌊x^(1/3)⌋, clamped into [1, ⌊√x⌋].
fn default_y(x: i128, alpha: f64) -> i64 {
    let y = (iroot::<3, i128>(x) as f64 * alpha) as i128;
    in_between(1, y, isqrt(x)).min(i64::MAX as i128) as i64
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    ensure!(cli.x >= 0, "x must be non-negative");
    ensure!(cli.alpha > 0.0, "alpha must be positive");

    let threads = cli
        .threads
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        });
    ensure!(threads >= 1, "at least one thread is required");

    let x = cli.x;
    let y = match cli.y {
        Some(y) => y,
        None => default_y(x, cli.alpha),
    };
    ensure!(y >= 0, "y must be non-negative");

    println!("=== P2(x, y) ===");
    println!("pirust v{}", VERSION);
    println!("x = {}", x);
    println!("y = {}", y);
    println!("threads = {}", threads);

    let status = cli.status.map(|digits| {
        let digits = digits.unwrap_or_else(|| status_precision(x));
        let bar = ProgressBar::new(100).with_style(
            ProgressStyle::with_template("Status: {msg}").expect("static template"),
        );
        (bar, digits)
    });

    let reporter: Option<ProgressReporter> = status.as_ref().map(|(bar, digits)| {
        let bar = bar.clone();
        let digits = *digits;
        Box::new(move |pct: f64| {
            bar.set_message(format!("{:.prec$}%", pct, prec = digits));
        }) as ProgressReporter
    });

    let time = Instant::now();
    let result: i128 = if cli.wide || x > i64::MAX as i128 {
        try_p2_with_progress(x, y, threads, reporter.as_ref())?
    } else {
        try_p2_with_progress(x as i64, y, threads, reporter.as_ref())? as i128
    };
    let seconds = time.elapsed().as_secs_f64();

    if let Some((bar, _)) = &status {
        bar.finish_and_clear();
    }

    println!("P2 = {}", result);
    println!("Seconds: {:.3}", seconds);

    Ok(())
}
