//! Prints the lesson's variables as `type(value)`.
//!
//! Run with: cargo run --bin types_demo

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    tour_common::init_tracing().context("failed to initialise logging")?;

    for line in tour_basics::types::demo_lines() {
        println!("{line}");
    }
    Ok(())
}
