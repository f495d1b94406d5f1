//! Prints the first Fibonacci sums produced by a closure.
//!
//! Run with: cargo run --bin fibonacci_demo -- --count 10

use anyhow::Context;
use clap::Parser;

use tour_moretypes::closures::fibonacci_line;

#[derive(Parser)]
#[command(version, about = "Fibonacci numbers from a closure")]
struct Args {
    /// How many values to print
    #[arg(long, short, default_value_t = 10)]
    count: usize,
}

fn main() -> anyhow::Result<()> {
    tour_common::init_tracing().context("failed to initialise logging")?;
    let args = Args::parse();

    println!("{}", fibonacci_line(args.count));
    Ok(())
}
