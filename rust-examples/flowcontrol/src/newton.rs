//! Square roots by Newton's method.
//!
//! The guess `z` for `√x` is refined with the Newton–Raphson update for the
//! root of `f(z) = z² - x`:
//!
//! ```text
//! z₀   = 1.0
//! zₙ₊₁ = zₙ - (zₙ² - x) / (2·zₙ)
//! ```
//!
//! The classic lesson runs a fixed nine updates and prints every guess along
//! the way. Here the numeric loop and the printing are kept apart:
//!
//! - [`NewtonConfig`] holds the iteration budget, the starting guess and an
//!   optional early-stop tolerance.
//! - [`GuessObserver`] receives each guess. [`NoOpObserver`] is the default,
//!   [`PrintObserver`] reproduces the lesson's output.
//! - [`Guesses`] exposes the whole sequence of guess states as an iterator.
//!
//! # Negative input
//!
//! [`sqrt`] and [`sqrt_with`] do not validate their input. For `x < 0` they
//! return whatever the iteration lands on, which is meaningless (and NaN for
//! `x = -1`, where the second guess is exactly zero). Inputs above roughly
//! `1e154` overflow `z²` on the second update and also end in NaN. Use
//! [`try_sqrt`] or [`try_sqrt_with`] to have such input and runs rejected.

use std::fmt;

use num_traits::Float;
use thiserror::Error;

/// Number of updates the classic lesson applies.
pub const DEFAULT_ITERATIONS: u32 = 9;

/// Floating point types the refiner runs on (`f32`, `f64`).
pub trait Real: Float + fmt::Debug + fmt::Display {}

impl<T> Real for T where T: Float + fmt::Debug + fmt::Display {}

// ============================================================================
// Errors
// ============================================================================

/// Reasons the strict entry points refuse to refine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqrtError {
    /// The input is below zero.
    #[error("cannot take the square root of negative input {0}")]
    NegativeInput(f64),

    /// The input is NaN.
    #[error("cannot take the square root of NaN")]
    NotANumber,

    /// The input is positive infinity.
    #[error("cannot refine the square root of an infinite input")]
    NotFinite,

    /// The refinement left the finite range, e.g. `z²` overflowed for a huge input.
    #[error("refinement diverged after {iterations} iterations")]
    Diverged { iterations: u32 },

    /// The refinement settings cannot produce a meaningful sequence.
    #[error("invalid refinement config: {0}")]
    InvalidConfig(&'static str),
}

// ============================================================================
// Configuration
// ============================================================================

/// Settings for one refinement run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig<T> {
    initial_guess: T,
    max_iterations: u32,
    tolerance: Option<T>,
}

impl<T: Real> NewtonConfig<T> {
    /// Starting guess 1.0, nine updates, no early stop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_guess: T::one(),
            max_iterations: DEFAULT_ITERATIONS,
            tolerance: None,
        }
    }

    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: T) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Stops after the first update that moves the guess by less than
    /// `tolerance`. The iteration budget still applies.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    #[must_use]
    pub fn initial_guess(&self) -> T {
        self.initial_guess
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn tolerance(&self) -> Option<T> {
        self.tolerance
    }

    /// Checks the settings used by the strict entry points.
    ///
    /// A zero starting guess divides by zero on the first update.
    pub fn validate(&self) -> Result<(), SqrtError> {
        if !self.initial_guess.is_finite() {
            return Err(SqrtError::InvalidConfig("initial guess must be finite"));
        }
        if self.initial_guess == T::zero() {
            return Err(SqrtError::InvalidConfig("initial guess must be non-zero"));
        }
        if let Some(tolerance) = self.tolerance
            && !(tolerance.is_finite() && tolerance > T::zero())
        {
            return Err(SqrtError::InvalidConfig(
                "tolerance must be positive and finite",
            ));
        }
        Ok(())
    }
}

impl<T: Real> Default for NewtonConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Observation
// ============================================================================

/// Receives every guess produced by an update.
///
/// `step` counts updates from 1; the initial guess is not reported.
pub trait GuessObserver<T> {
    fn on_guess(&mut self, step: u32, guess: T);
}

/// Ignores every guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpObserver;

impl<T> GuessObserver<T> for NoOpObserver {
    #[inline(always)]
    fn on_guess(&mut self, _step: u32, _guess: T) {}
}

/// Prints each guess on its own line to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintObserver;

impl<T: fmt::Display> GuessObserver<T> for PrintObserver {
    fn on_guess(&mut self, _step: u32, guess: T) {
        println!("{guess}");
    }
}

/// Emits a TRACE event per guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceObserver;

impl<T: fmt::Display> GuessObserver<T> for TraceObserver {
    fn on_guess(&mut self, step: u32, guess: T) {
        tracing::trace!(step, guess = %guess, "newton step");
    }
}

/// Keeps every guess in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingObserver<T> {
    guesses: Vec<T>,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            guesses: Vec::new(),
        }
    }

    #[must_use]
    pub fn guesses(&self) -> &[T] {
        &self.guesses
    }

    #[must_use]
    pub fn into_guesses(self) -> Vec<T> {
        self.guesses
    }
}

impl<T> GuessObserver<T> for RecordingObserver<T> {
    fn on_guess(&mut self, _step: u32, guess: T) {
        self.guesses.push(guess);
    }
}

/// Forwards each guess to two observers, `first` before `second`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeObserver<A, B> {
    first: A,
    second: B,
}

impl<A, B> CompositeObserver<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<T, A, B> GuessObserver<T> for CompositeObserver<A, B>
where
    T: Copy,
    A: GuessObserver<T>,
    B: GuessObserver<T>,
{
    fn on_guess(&mut self, step: u32, guess: T) {
        self.first.on_guess(step, guess);
        self.second.on_guess(step, guess);
    }
}

impl<T, F> GuessObserver<T> for F
where
    F: FnMut(u32, T),
{
    fn on_guess(&mut self, step: u32, guess: T) {
        self(step, guess);
    }
}

// ============================================================================
// Refinement
// ============================================================================

/// One Newton update of `guess` towards `√x`.
///
/// # Examples
/// ```
/// use tour_flowcontrol::newton::improve;
/// assert_eq!(improve(1.0, 3.0), 2.0);
/// assert_eq!(improve(2.0, 3.0), 1.75);
/// ```
#[inline]
pub fn improve<T: Real>(guess: T, x: T) -> T {
    let two = T::one() + T::one();
    guess - (guess * guess - x) / (two * guess)
}

/// Every guess state of one run, starting with the initial guess.
///
/// With the default config this yields ten values: the initial 1.0 followed
/// by nine updates.
///
/// # Examples
/// ```
/// use tour_flowcontrol::newton::{guesses, NewtonConfig};
/// let states: Vec<f64> = guesses(3.0, &NewtonConfig::default()).collect();
/// assert_eq!(states.len(), 10);
/// assert_eq!(&states[..3], &[1.0, 2.0, 1.75]);
/// ```
#[derive(Debug, Clone)]
pub struct Guesses<T> {
    x: T,
    guess: T,
    iterations: u32,
    max_iterations: u32,
    tolerance: Option<T>,
    yielded_initial: bool,
    converged: bool,
}

impl<T: Real> Guesses<T> {
    /// Updates applied so far.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether the configured tolerance has been met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// The most recent guess.
    #[must_use]
    pub fn current(&self) -> T {
        self.guess
    }
}

impl<T: Real> Iterator for Guesses<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.yielded_initial {
            self.yielded_initial = true;
            return Some(self.guess);
        }
        if self.converged || self.iterations >= self.max_iterations {
            return None;
        }

        let next = improve(self.guess, self.x);
        if let Some(tolerance) = self.tolerance {
            self.converged = (next - self.guess).abs() < tolerance;
        }
        self.guess = next;
        self.iterations += 1;
        Some(next)
    }
}

/// Starts a refinement of `√x` under `config`.
#[must_use]
pub fn guesses<T: Real>(x: T, config: &NewtonConfig<T>) -> Guesses<T> {
    Guesses {
        x,
        guess: config.initial_guess,
        iterations: 0,
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
        yielded_initial: false,
        converged: false,
    }
}

/// Outcome of a refinement run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<T> {
    /// The final guess.
    pub value: T,
    /// Updates applied.
    pub iterations: u32,
    /// True only when a tolerance was configured and met.
    pub converged: bool,
}

/// Approximates `√x` with the lesson's settings: nine updates from 1.0.
///
/// Negative input is not rejected; see the module docs.
///
/// # Examples
/// ```
/// use tour_flowcontrol::newton::sqrt;
/// assert!((sqrt(3.0) - 3.0_f64.sqrt()).abs() < 1e-9);
/// ```
#[must_use]
pub fn sqrt(x: f64) -> f64 {
    sqrt_with(x, &NewtonConfig::default(), &mut NoOpObserver).value
}

/// Approximates `√x` under `config`, reporting each update to `observer`.
///
/// Performs no validation of `x` or `config`.
pub fn sqrt_with<T, O>(x: T, config: &NewtonConfig<T>, observer: &mut O) -> Estimate<T>
where
    T: Real,
    O: GuessObserver<T>,
{
    tracing::debug!(
        x = %x,
        initial_guess = %config.initial_guess,
        max_iterations = config.max_iterations,
        "refining square root"
    );

    let mut states = guesses(x, config);
    let mut step = 0;
    for guess in states.by_ref().skip(1) {
        step += 1;
        observer.on_guess(step, guess);
    }

    let estimate = Estimate {
        value: states.current(),
        iterations: states.iterations(),
        converged: states.converged(),
    };
    tracing::debug!(
        value = %estimate.value,
        iterations = estimate.iterations,
        converged = estimate.converged,
        "square root refined"
    );
    estimate
}

/// Like [`sqrt`], but rejects negative and NaN input.
///
/// # Examples
/// ```
/// use tour_flowcontrol::newton::{try_sqrt, SqrtError};
/// assert!(try_sqrt(4.0).is_ok());
/// assert_eq!(try_sqrt(-4.0), Err(SqrtError::NegativeInput(-4.0)));
/// ```
pub fn try_sqrt(x: f64) -> Result<f64, SqrtError> {
    try_sqrt_with(x, &NewtonConfig::default(), &mut NoOpObserver).map(|estimate| estimate.value)
}

/// Like [`sqrt_with`], but validates `config`, rejects negative, NaN and
/// infinite input before refining, and reports a non-finite result as
/// [`SqrtError::Diverged`].
pub fn try_sqrt_with<T, O>(
    x: T,
    config: &NewtonConfig<T>,
    observer: &mut O,
) -> Result<Estimate<T>, SqrtError>
where
    T: Real,
    O: GuessObserver<T>,
{
    config.validate()?;
    if x.is_nan() {
        return Err(SqrtError::NotANumber);
    }
    if x < T::zero() {
        tracing::warn!(x = %x, "rejecting negative input");
        return Err(SqrtError::NegativeInput(x.to_f64().unwrap_or(f64::NAN)));
    }
    if x.is_infinite() {
        return Err(SqrtError::NotFinite);
    }

    let estimate = sqrt_with(x, config, observer);
    if !estimate.value.is_finite() {
        tracing::warn!(x = %x, iterations = estimate.iterations, "refinement diverged");
        return Err(SqrtError::Diverged {
            iterations: estimate.iterations,
        });
    }
    Ok(estimate)
}

// ============================================================================
// Comparison with the standard library
// ============================================================================

/// Newton's result for `x` next to `f64::sqrt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub x: f64,
    pub newton: f64,
    pub std: f64,
}

impl Comparison {
    #[must_use]
    pub fn abs_diff(&self) -> f64 {
        (self.newton - self.std).abs()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My sqrt({}) is {}", self.x, self.newton)?;
        write!(f, "std sqrt({}) is {}", self.x, self.std)
    }
}

#[must_use]
pub fn compare_with_std(x: f64) -> Comparison {
    Comparison {
        x,
        newton: sqrt(x),
        std: x.sqrt(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SQRT_3: f64 = 1.732_050_807_568_877_2;

    fn default_states(x: f64) -> Vec<f64> {
        guesses(x, &NewtonConfig::default()).collect()
    }

    #[test]
    fn test_improve_matches_update_rule() {
        assert_eq!(improve(1.0, 3.0), 2.0);
        assert_eq!(improve(2.0, 3.0), 1.75);
        assert_eq!(improve(1.0, 4.0), 2.5);
        assert_eq!(improve(1.0, 0.0), 0.5);
    }

    #[test]
    fn test_default_run_has_ten_states() {
        let states = default_states(3.0);
        assert_eq!(states.len(), 10);
        assert_eq!(states[0], 1.0);
        assert_eq!(states[1], 2.0);
        assert_eq!(states[2], 1.75);
    }

    #[test]
    fn test_sqrt_3_converges_to_std() {
        let states = default_states(3.0);
        let distance = |z: f64| (z - SQRT_3).abs();

        // Quadratic convergence until rounding takes over.
        for pair in states[..6].windows(2) {
            assert!(distance(pair[1]) < distance(pair[0]));
        }
        for &z in &states[5..] {
            assert!(distance(z) < 1e-15);
        }
        assert!((sqrt(3.0) - 3.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_square() {
        assert!((sqrt(4.0) - 2.0).abs() < 1e-12);
        assert_eq!(sqrt(100.0), 10.0);
        assert_eq!(sqrt(1.0), 1.0);
    }

    #[test]
    fn test_zero_halves_the_guess() {
        let states = default_states(0.0);
        for pair in states.windows(2) {
            assert_eq!(pair[1], pair[0] / 2.0);
        }
        assert_eq!(sqrt(0.0), 1.0 / 512.0);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(default_states(7.5), default_states(7.5));
        assert_eq!(sqrt(7.5).to_bits(), sqrt(7.5).to_bits());
    }

    #[test]
    fn test_negative_input_is_not_validated() {
        // 1.0 -> 0.0 -> -inf -> NaN
        let states = default_states(-1.0);
        assert_eq!(states[1], 0.0);
        assert!(sqrt(-1.0).is_nan());
    }

    #[test]
    fn test_observer_sees_every_update() {
        let mut recorder = RecordingObserver::new();
        let estimate = sqrt_with(3.0, &NewtonConfig::default(), &mut recorder);

        let expected: Vec<f64> = default_states(3.0).into_iter().skip(1).collect();
        assert_eq!(recorder.guesses(), expected.as_slice());
        assert_eq!(estimate.iterations, DEFAULT_ITERATIONS);
        assert_eq!(estimate.value, expected[expected.len() - 1]);
        assert!(!estimate.converged);
    }

    #[test]
    fn test_closure_observer_gets_step_numbers() {
        let mut steps = Vec::new();
        let mut observer = |step: u32, _guess: f64| steps.push(step);
        sqrt_with(2.0, &NewtonConfig::default(), &mut observer);
        assert_eq!(steps, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_composite_observer_feeds_both() {
        let mut both = CompositeObserver::new(RecordingObserver::new(), RecordingObserver::new());
        sqrt_with(5.0, &NewtonConfig::default(), &mut both);
        let (first, second) = both.into_inner();
        assert_eq!(first.guesses().len(), 9);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let config = NewtonConfig::default()
            .with_max_iterations(0)
            .with_initial_guess(3.0);
        let estimate = sqrt_with(10.0, &config, &mut NoOpObserver);
        assert_eq!(estimate.value, 3.0);
        assert_eq!(estimate.iterations, 0);
        assert_eq!(guesses(10.0, &config).count(), 1);
    }

    #[test]
    fn test_tolerance_stops_early() {
        let config = NewtonConfig::default()
            .with_max_iterations(100)
            .with_tolerance(1e-12);
        let estimate = sqrt_with(3.0, &config, &mut NoOpObserver);
        assert!(estimate.converged);
        assert_eq!(estimate.iterations, 6);
        assert!((estimate.value - SQRT_3).abs() < 1e-15);
    }

    #[test]
    fn test_budget_wins_over_tolerance() {
        let config = NewtonConfig::default()
            .with_max_iterations(2)
            .with_tolerance(1e-12);
        let estimate = sqrt_with(3.0, &config, &mut NoOpObserver);
        assert!(!estimate.converged);
        assert_eq!(estimate.iterations, 2);
        assert_eq!(estimate.value, 1.75);
    }

    #[test]
    fn test_f32_refinement() {
        let estimate = sqrt_with(2.0_f32, &NewtonConfig::default(), &mut NoOpObserver);
        assert!((estimate.value - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_try_sqrt_rejects_bad_input() {
        assert_eq!(try_sqrt(-4.0), Err(SqrtError::NegativeInput(-4.0)));
        assert_eq!(try_sqrt(f64::NAN), Err(SqrtError::NotANumber));
        assert_eq!(try_sqrt(9.0), Ok(sqrt(9.0)));
        assert_eq!(try_sqrt(-0.0), Ok(sqrt(-0.0)));
    }

    #[test]
    fn test_try_sqrt_rejects_non_finite() {
        assert_eq!(try_sqrt(f64::INFINITY), Err(SqrtError::NotFinite));
        assert_eq!(
            try_sqrt(f64::NEG_INFINITY),
            Err(SqrtError::NegativeInput(f64::NEG_INFINITY))
        );

        // 1e300 / 2 squared overflows, so the unvalidated run ends in NaN.
        assert!(sqrt(1e300).is_nan());
        assert_eq!(
            try_sqrt(1e300),
            Err(SqrtError::Diverged {
                iterations: DEFAULT_ITERATIONS
            })
        );
        assert!(matches!(try_sqrt(f64::MAX), Err(SqrtError::Diverged { .. })));

        // Large but representable squares still succeed.
        let config = NewtonConfig::default().with_max_iterations(200);
        let estimate = try_sqrt_with(1e100, &config, &mut NoOpObserver).unwrap();
        assert!((estimate.value - 1e50).abs() / 1e50 < 1e-12);
    }

    #[test]
    fn test_config_validation() {
        let zero_guess = NewtonConfig::default().with_initial_guess(0.0);
        assert!(matches!(
            try_sqrt_with(2.0, &zero_guess, &mut NoOpObserver),
            Err(SqrtError::InvalidConfig(_))
        ));

        let infinite_guess = NewtonConfig::default().with_initial_guess(f64::INFINITY);
        assert!(infinite_guess.validate().is_err());

        let negative_tolerance = NewtonConfig::default().with_tolerance(-1.0);
        assert!(negative_tolerance.validate().is_err());

        let nan_tolerance = NewtonConfig::default().with_tolerance(f64::NAN);
        assert!(nan_tolerance.validate().is_err());

        assert!(NewtonConfig::<f64>::default().validate().is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SqrtError::NegativeInput(-2.0).to_string(),
            "cannot take the square root of negative input -2"
        );
        assert_eq!(
            SqrtError::InvalidConfig("initial guess must be non-zero").to_string(),
            "invalid refinement config: initial guess must be non-zero"
        );
        assert_eq!(
            SqrtError::Diverged { iterations: 9 }.to_string(),
            "refinement diverged after 9 iterations"
        );
    }

    #[test]
    fn test_comparison_display() {
        let comparison = compare_with_std(3.0);
        assert!(comparison.abs_diff() < 1e-9);
        assert_eq!(
            comparison.to_string(),
            format!("My sqrt(3) is {}\nstd sqrt(3) is {}", sqrt(3.0), 3.0_f64.sqrt())
        );
    }
}
