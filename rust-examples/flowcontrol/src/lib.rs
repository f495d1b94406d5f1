//! Flow control: loops and functions.
//!
//! The lesson's exercise is a square root computed with a `for` loop that
//! refines a guess by Newton's method. See [`newton`].

pub mod newton;

pub use newton::{
    Estimate, GuessObserver, NewtonConfig, SqrtError, compare_with_std, sqrt, sqrt_with, try_sqrt,
    try_sqrt_with,
};
