//! Newton's method square root next to the standard library's.
//!
//! Run with: cargo run --bin sqrt_demo -- 3
//! Every step as a log line: RUST_LOG=tour_flowcontrol=trace cargo run --bin sqrt_demo

use anyhow::Context;
use clap::Parser;

use tour_flowcontrol::newton::{
    CompositeObserver, DEFAULT_ITERATIONS, GuessObserver, NewtonConfig, NoOpObserver,
    PrintObserver, TraceObserver, sqrt_with, try_sqrt_with,
};

#[derive(Parser)]
#[command(version, about = "Approximate a square root with Newton's method")]
struct Args {
    /// Number to take the square root of
    #[arg(default_value_t = 3.0, allow_negative_numbers = true)]
    x: f64,

    /// Number of Newton updates
    #[arg(long, short = 'n', default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Starting guess
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    initial_guess: f64,

    /// Stop once an update moves the guess by less than this
    #[arg(long, allow_negative_numbers = true)]
    tolerance: Option<f64>,

    /// Reject negative input and invalid settings instead of iterating
    #[arg(long)]
    strict: bool,

    /// Do not print intermediate guesses
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tour_common::init_tracing().context("failed to initialise logging")?;
    let args = Args::parse();

    let mut config = NewtonConfig::new()
        .with_max_iterations(args.iterations)
        .with_initial_guess(args.initial_guess);
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }

    let estimate = if args.quiet {
        let mut observer = CompositeObserver::new(NoOpObserver, TraceObserver);
        refine(args.x, &config, args.strict, &mut observer)?
    } else {
        let mut observer = CompositeObserver::new(PrintObserver, TraceObserver);
        refine(args.x, &config, args.strict, &mut observer)?
    };

    println!("My sqrt({}) is {}", args.x, estimate);
    println!("std sqrt({}) is {}", args.x, args.x.sqrt());
    Ok(())
}

fn refine<O>(
    x: f64,
    config: &NewtonConfig<f64>,
    strict: bool,
    observer: &mut O,
) -> anyhow::Result<f64>
where
    O: GuessObserver<f64>,
{
    if strict {
        let estimate = try_sqrt_with(x, config, observer)
            .with_context(|| format!("cannot refine sqrt({x})"))?;
        Ok(estimate.value)
    } else {
        Ok(sqrt_with(x, config, observer).value)
    }
}
