//! Rectangular complex numbers over `f64`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A complex number `re + im·i`.
///
/// # Examples
/// ```
/// use tour_basics::Complex;
/// let z = Complex::new(-5.0, 12.0);
/// assert_eq!(z.sqrt(), Complex::new(2.0, 3.0));
/// assert_eq!(z.to_string(), "(-5+12i)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    #[must_use]
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Complex {
            re: magnitude * angle.cos(),
            im: magnitude * angle.sin(),
        }
    }

    #[must_use]
    pub fn re(&self) -> f64 {
        self.re
    }

    #[must_use]
    pub fn im(&self) -> f64 {
        self.im
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Angle in `(-π, π]`.
    #[must_use]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    #[must_use]
    pub fn conj(&self) -> Self {
        Complex::new(self.re, -self.im)
    }

    /// Principal square root: non-negative real part, imaginary part with the
    /// sign of `self.im`.
    ///
    /// Takes the root of whichever half-sum avoids cancellation and derives
    /// the other part by division, so `√(-5+12i)` comes out as exactly `2+3i`.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return Complex::new(0.0, self.im);
        }

        let r = self.magnitude();
        if self.re >= 0.0 {
            let t = ((r + self.re) / 2.0).sqrt();
            Complex::new(t, self.im / (2.0 * t))
        } else {
            let t = ((r - self.re) / 2.0).sqrt();
            Complex::new(self.im.abs() / (2.0 * t), t.copysign(self.im))
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::new(re, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

/// Prints as `(re+imi)`, e.g. `(2+3i)` or `(1-0.5i)`.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() && !self.im.is_nan() {
            write!(f, "({}{}i)", self.re, self.im)
        } else {
            write!(f, "({}+{}i)", self.re, self.im)
        }
    }
}
