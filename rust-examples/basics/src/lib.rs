//! Basics: variables, basic types and printing them.
//!
//! - [`types`]: `%T(%v)`-style descriptions of a value's type and contents
//! - [`complex`]: a small rectangular complex number, the one basic type
//!   Rust leaves to libraries

pub mod complex;
pub mod types;

pub use complex::Complex;
pub use types::{describe, type_name_of};
