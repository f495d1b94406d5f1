//! Closures over local state: a Fibonacci generator and a running-sum adder.
//!
//! | Closure             | Iterator / struct form   |
//! |---------------------|--------------------------|
//! | [`fibonacci`]       | [`FibonacciSums`]        |
//! | [`adder`]           | [`RunningSum`]           |

// ============================================================================
// Fibonacci generator
// ============================================================================

/// Returns a closure yielding successive Fibonacci sums: 1, 2, 3, 5, 8, ...
///
/// Each call returns the sum of the two previous values, starting from the
/// pair (0, 1). Once the next value would overflow `u64` every further call
/// returns `None`.
///
/// # Examples
/// ```
/// use tour_moretypes::fibonacci;
/// let mut f = fibonacci();
/// assert_eq!(f(), Some(1));
/// assert_eq!(f(), Some(2));
/// assert_eq!(f(), Some(3));
/// assert_eq!(f(), Some(5));
/// ```
pub fn fibonacci() -> impl FnMut() -> Option<u64> {
    let (mut x1, mut x2) = (0_u64, 1_u64);

    move || {
        let sum = x1.checked_add(x2)?;
        x1 = x2;
        x2 = sum;
        Some(sum)
    }
}

/// The [`fibonacci`] sequence as an iterator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciSums {
    x1: u64,
    x2: u64,
}

impl FibonacciSums {
    #[must_use]
    pub fn new() -> Self {
        FibonacciSums { x1: 0, x2: 1 }
    }
}

impl Default for FibonacciSums {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibonacciSums {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let sum = self.x1.checked_add(self.x2)?;
        self.x1 = self.x2;
        self.x2 = sum;
        Some(sum)
    }
}

/// The first `count` values joined as `1,2,3,`, followed by `...`.
///
/// # Examples
/// ```
/// use tour_moretypes::closures::fibonacci_line;
/// assert_eq!(fibonacci_line(4), "1,2,3,5,...");
/// ```
#[must_use]
pub fn fibonacci_line(count: usize) -> String {
    let mut f = fibonacci();
    let mut line = String::new();
    for _ in 0..count {
        let Some(value) = f() else {
            tracing::warn!(count, "fibonacci sequence overflowed u64");
            break;
        };
        line.push_str(&value.to_string());
        line.push(',');
    }
    line.push_str("...");
    line
}

// ============================================================================
// Running-sum adder
// ============================================================================

/// Labels the lesson prints when an adder is created and when it is called.
pub const OUTER_LABEL: &str = "外边的sum";
pub const INNER_LABEL: &str = "里边的x";

/// State behind an adder: the wrapped running total and how many values went
/// into it. Updating returns a new value and leaves the old one intact.
///
/// # Example
///
/// ```
/// use tour_moretypes::RunningSum;
///
/// let start = RunningSum::starting_at(5);
/// let next = start.plus(10).plus(-3);
/// assert_eq!(next.total(), 12);
/// assert_eq!(next.calls(), 2);
/// assert_eq!(start.total(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningSum {
    total: i64,
    calls: u32,
}

impl RunningSum {
    #[must_use]
    pub const fn starting_at(total: i64) -> Self {
        RunningSum { total, calls: 0 }
    }

    #[must_use]
    pub fn plus(self, x: i64) -> Self {
        RunningSum {
            total: self.total.wrapping_add(x),
            calls: self.calls.saturating_add(1),
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

/// Returns a closure that adds its argument to a private running sum and
/// returns the new sum. The sum wraps on overflow.
///
/// # Examples
/// ```
/// use tour_moretypes::adder;
/// let mut pos = adder();
/// let mut neg = adder();
/// assert_eq!(pos(3), 3);
/// assert_eq!(pos(4), 7);
/// assert_eq!(neg(-2), -2);
/// ```
pub fn adder() -> impl FnMut(i64) -> i64 {
    adder_from(0)
}

/// Like [`adder`], starting from `initial`.
pub fn adder_from(initial: i64) -> impl FnMut(i64) -> i64 {
    let mut state = RunningSum::starting_at(initial);
    tracing::debug!(sum = state.total(), "adder created");

    move |x| {
        state = state.plus(x);
        tracing::debug!(x, sum = state.total(), calls = state.calls(), "adder called");
        state.total()
    }
}

/// `(pos(i), neg(-2 * i))` for `i` in `0..count`, with one fresh adder for
/// each column.
#[must_use]
pub fn adder_table(count: u32) -> Vec<(i64, i64)> {
    let (mut pos, mut neg) = (adder(), adder());
    (0..count)
        .map(i64::from)
        .map(|i| (pos(i), neg(-2 * i)))
        .collect()
}

/// An adder that writes the lesson's narration into a transcript: one
/// [`OUTER_LABEL`] line on creation, and `INNER_LABEL<x> --> ` on every call.
pub fn narrated_adder(transcript: &mut String) -> impl FnMut(i64, &mut String) -> i64 + use<> {
    let mut state = RunningSum::default();
    transcript.push_str(&format!("{OUTER_LABEL} {}\n", state.total()));

    move |x: i64, transcript: &mut String| {
        transcript.push_str(&format!("{INNER_LABEL}{x} --> "));
        state = state.plus(x);
        state.total()
    }
}

/// Everything the adder lesson prints for `count` rows.
///
/// Both adders announce themselves first. On each row both calls narrate
/// before the pair of sums is printed, as argument evaluation precedes the
/// print.
#[must_use]
pub fn adder_transcript(count: u32) -> String {
    let mut transcript = String::new();
    let mut pos = narrated_adder(&mut transcript);
    let mut neg = narrated_adder(&mut transcript);

    for i in (0..count).map(i64::from) {
        let p = pos(i, &mut transcript);
        let n = neg(-2 * i, &mut transcript);
        transcript.push_str(&format!("{p} {n}\n"));
    }
    transcript
}

// ============================================================================
// TESTS
// ============================================================================
