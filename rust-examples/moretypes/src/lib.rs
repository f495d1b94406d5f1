//! More types: function values and closures.
//!
//! Closures capture their environment by move here, so each returned closure
//! owns its own state. Two adders never share a sum.

pub mod closures;

pub use closures::{FibonacciSums, RunningSum, adder, fibonacci};
