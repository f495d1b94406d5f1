//! Printing a value together with its type, the way `%T(%v)` does.
//!
//! [`std::any::type_name`] returns fully qualified paths
//! (`alloc::vec::Vec<u8>`); [`short_type_name`] strips the module paths so the
//! output reads like the type was written in source.

use std::any;
use std::fmt;

use crate::complex::Complex;

/// The lesson's package-level variable `ToBe`.
pub const TO_BE: bool = false;

/// The lesson's package-level variable `MaxInt`.
pub const MAX_INT: u64 = u64::MAX;

/// Removes module paths from every path inside a type name, keeping generic
/// arguments, references, tuples and arrays as they are.
///
/// # Examples
/// ```
/// use tour_basics::types::short_type_name;
/// assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec<u8>");
/// assert_eq!(
///     short_type_name("core::option::Option<alloc::string::String>"),
///     "Option<String>"
/// );
/// ```
#[must_use]
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
        } else {
            out.push(c);
            if !(c.is_alphanumeric() || c == '_') {
                segment_start = out.len();
            }
        }
    }
    out
}

/// Short type name of `value`'s static type.
///
/// # Examples
/// ```
/// use tour_basics::type_name_of;
/// assert_eq!(type_name_of(&1.5_f32), "f32");
/// assert_eq!(type_name_of(&vec![1_u8]), "Vec<u8>");
/// ```
#[must_use]
pub fn type_name_of<T: ?Sized>(_value: &T) -> String {
    short_type_name(any::type_name::<T>())
}

/// `type(value)` using the value's `Display` form.
///
/// # Examples
/// ```
/// use tour_basics::describe;
/// assert_eq!(describe(&false), "bool(false)");
/// assert_eq!(describe(&u64::MAX), "u64(18446744073709551615)");
/// ```
#[must_use]
pub fn describe<T: fmt::Display + ?Sized>(value: &T) -> String {
    let type_name = type_name_of(value);
    tracing::trace!(type_name = %type_name, "describing value");
    format!("{type_name}({value})")
}

/// `type(value)` using the value's `Debug` form, for types without `Display`.
#[must_use]
pub fn describe_debug<T: fmt::Debug + ?Sized>(value: &T) -> String {
    format!("{}({value:?})", type_name_of(value))
}

/// The lesson's package-level variable `z`: `√(-5+12i)`.
#[must_use]
pub fn lesson_complex() -> Complex {
    Complex::new(-5.0, 12.0).sqrt()
}

/// The three lines the lesson prints.
#[must_use]
pub fn demo_lines() -> Vec<String> {
    vec![
        describe(&TO_BE),
        describe(&MAX_INT),
        describe(&lesson_complex()),
    ]
}
