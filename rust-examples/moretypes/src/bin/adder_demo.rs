//! Two independent running-sum closures side by side.
//!
//! Run with: cargo run --bin adder_demo
//! With the lesson's narration: cargo run --bin adder_demo -- --narrate
//! Each closure call as a log line: RUST_LOG=tour_moretypes=debug cargo run --bin adder_demo

use anyhow::Context;
use clap::Parser;

use tour_moretypes::closures::{adder_table, adder_transcript};

#[derive(Parser)]
#[command(version, about = "Running sums kept by closures")]
struct Args {
    /// Number of rows
    #[arg(long, short, default_value_t = 10)]
    count: u32,

    /// Also print what the adders say when created and called
    #[arg(long)]
    narrate: bool,
}

fn main() -> anyhow::Result<()> {
    tour_common::init_tracing().context("failed to initialise logging")?;
    let args = Args::parse();

    if args.narrate {
        print!("{}", adder_transcript(args.count));
    } else {
        for (pos, neg) in adder_table(args.count) {
            println!("{pos} {neg}");
        }
    }
    Ok(())
}
