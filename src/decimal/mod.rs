//! Extended-range numeric type used for every resource, cost and rate.
//!
//! Values whose magnitude fits comfortably inside `f64` are stored as a plain
//! `f64`, so arithmetic in that range is bit-identical to ordinary floating
//! point. Larger (or smaller) magnitudes switch to a base-10
//! mantissa/exponent pair. Domain errors never panic; they yield
//! [`Decimal::NAN`], which consumers clamp with [`Decimal::or_zero`].

mod arith;
mod series;
mod text;

pub use text::ParseDecimalError;

use std::cmp::Ordering;

/// Magnitudes at or above this leave the plain `f64` representation.
const PLAIN_MAX: f64 = 1e300;
/// Non-zero magnitudes below this leave the plain `f64` representation.
const PLAIN_MIN: f64 = 1e-299;
/// Scientific exponents strictly inside this bound collapse back to plain.
const PLAIN_EXPONENT_LIMIT: i64 = 300;

#[derive(Clone, Copy, Debug)]
pub struct Decimal {
    mantissa: f64,
    // 0 means `mantissa` holds the whole value.
    exponent: i64,
}

impl Decimal {
    pub const ZERO: Self = Self::plain_const(0.0);
    pub const ONE: Self = Self::plain_const(1.0);
    pub const NAN: Self = Self::plain_const(f64::NAN);
    pub const INFINITY: Self = Self::plain_const(f64::INFINITY);
    pub const NEG_INFINITY: Self = Self::plain_const(f64::NEG_INFINITY);

    const fn plain_const(value: f64) -> Self {
        Self {
            mantissa: value,
            exponent: 0,
        }
    }

    fn plain(value: f64) -> Self {
        Self {
            mantissa: if value == 0.0 { 0.0 } else { value },
            exponent: 0,
        }
    }

    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value == 0.0 || fits_plain(value) {
            return Self::plain(value);
        }
        Self::from_scientific(value, 0)
    }

    /// Builds `mantissa * 10^exponent`, normalizing the representation.
    pub fn from_scientific(mantissa: f64, exponent: i64) -> Self {
        if !mantissa.is_finite() || mantissa == 0.0 {
            return Self::plain(mantissa);
        }

        let shift = mantissa.abs().log10().floor() as i64;
        let mut m = scale_pow10(mantissa, -shift);
        let mut e = exponent.saturating_add(shift);
        while m.abs() >= 10.0 {
            m /= 10.0;
            e = e.saturating_add(1);
        }
        while m.abs() < 1.0 {
            m *= 10.0;
            e = e.saturating_sub(1);
        }

        if e.abs() < PLAIN_EXPONENT_LIMIT {
            return Self::plain(scale_pow10(m, e));
        }
        if e == i64::MAX {
            return if m > 0.0 {
                Self::INFINITY
            } else {
                Self::NEG_INFINITY
            };
        }
        if e == i64::MIN {
            return Self::ZERO;
        }
        Self {
            mantissa: m,
            exponent: e,
        }
    }

    /// Builds `10^log10`, keeping magnitudes beyond `f64` range.
    pub(crate) fn from_log10(log10: f64) -> Self {
        if log10.is_nan() {
            return Self::NAN;
        }
        if log10 == f64::INFINITY || log10 >= i64::MAX as f64 {
            return Self::INFINITY;
        }
        if log10 == f64::NEG_INFINITY || log10 <= i64::MIN as f64 {
            return Self::ZERO;
        }
        let exponent = log10.floor();
        Self::from_scientific(10f64.powf(log10 - exponent), exponent as i64)
    }

    pub fn to_f64(self) -> f64 {
        if self.exponent == 0 {
            self.mantissa
        } else {
            scale_pow10(self.mantissa, self.exponent)
        }
    }

    /// Normalized `(mantissa, exponent)` with `1 <= |mantissa| < 10`, or
    /// `(value, 0)` for zero and non-finite values.
    pub fn to_scientific(self) -> (f64, i64) {
        if self.exponent != 0 || !self.mantissa.is_finite() || self.mantissa == 0.0 {
            return (self.mantissa, self.exponent);
        }
        let mut e = self.mantissa.abs().log10().floor() as i64;
        let mut m = scale_pow10(self.mantissa, -e);
        while m.abs() >= 10.0 {
            m /= 10.0;
            e += 1;
        }
        while m.abs() < 1.0 {
            m *= 10.0;
            e -= 1;
        }
        (m, e)
    }

    pub fn is_nan(self) -> bool {
        self.mantissa.is_nan()
    }

    pub fn is_finite(self) -> bool {
        self.mantissa.is_finite()
    }

    pub fn is_zero(self) -> bool {
        self.mantissa == 0.0
    }

    pub fn is_sign_negative(self) -> bool {
        self.mantissa < 0.0
    }

    pub fn is_sign_positive(self) -> bool {
        self.mantissa > 0.0
    }

    pub fn or_zero(self) -> Self {
        if self.is_nan() { Self::ZERO } else { self }
    }

    pub fn abs(self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    pub fn min(self, other: impl Into<Decimal>) -> Self {
        let other = other.into();
        if self < other { self } else { other }
    }

    pub fn max(self, other: impl Into<Decimal>) -> Self {
        let other = other.into();
        if self > other { self } else { other }
    }

    pub fn floor(self) -> Self {
        if self.exponent == 0 {
            return Self::plain(self.mantissa.floor());
        }
        if self.exponent > 0 {
            return self;
        }
        if self.mantissa < 0.0 {
            -Self::ONE
        } else {
            Self::ZERO
        }
    }

    pub fn ceil(self) -> Self {
        if self.exponent == 0 {
            return Self::plain(self.mantissa.ceil());
        }
        if self.exponent > 0 {
            return self;
        }
        if self.mantissa > 0.0 {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    pub fn round(self) -> Self {
        if self.exponent == 0 {
            return Self::plain(self.mantissa.round());
        }
        if self.exponent > 0 { self } else { Self::ZERO }
    }

    /// `self^power`. Fractional powers of negative numbers and negative powers
    /// of zero are not-a-number.
    pub fn pow(self, power: impl Into<Decimal>) -> Self {
        let power = power.into().to_f64();
        if power.is_nan() || self.is_nan() {
            return Self::NAN;
        }
        if power == 0.0 {
            return Self::ONE;
        }
        if self.is_zero() {
            return if power > 0.0 { Self::ZERO } else { Self::NAN };
        }
        if self.is_sign_negative() {
            if power.fract() != 0.0 {
                return Self::NAN;
            }
            let magnitude = self.abs().pow(power);
            return if power % 2.0 == 0.0 {
                magnitude
            } else {
                -magnitude
            };
        }
        if !self.is_finite() {
            return Self::from_f64(self.mantissa.powf(power));
        }
        if self.exponent == 0 {
            let result = self.mantissa.powf(power);
            if fits_plain(result) {
                return Self::plain(result);
            }
        }
        Self::from_log10(self.log10_f64() * power)
    }

    /// `base^self`, for curves written as "ratio to the power of owned".
    pub fn pow_base(self, base: impl Into<Decimal>) -> Self {
        base.into().pow(self)
    }

    /// `n`-th root. Even (or fractional) roots of negative numbers are
    /// not-a-number; odd integer roots keep the sign.
    pub fn root(self, degree: impl Into<Decimal>) -> Self {
        let degree = degree.into().to_f64();
        if degree == 0.0 || degree.is_nan() {
            return Self::NAN;
        }
        if self.is_sign_negative() {
            if degree.fract() == 0.0 && degree % 2.0 != 0.0 {
                return -self.abs().pow(1.0 / degree);
            }
            return Self::NAN;
        }
        self.pow(1.0 / degree)
    }

    pub fn sqrt(self) -> Self {
        self.root(2.0)
    }

    pub(crate) fn log10_f64(self) -> f64 {
        if self.is_nan() || self.mantissa <= 0.0 {
            return f64::NAN;
        }
        if !self.is_finite() {
            return f64::INFINITY;
        }
        if self.exponent == 0 {
            self.mantissa.log10()
        } else {
            self.mantissa.log10() + self.exponent as f64
        }
    }

    pub fn log10(self) -> Self {
        Self::from_f64(self.log10_f64())
    }

    pub fn ln(self) -> Self {
        Self::from_f64(self.log10_f64() * std::f64::consts::LN_10)
    }

    /// Logarithm in an arbitrary base; not-a-number when the base is
    /// non-positive or one.
    pub fn log(self, base: impl Into<Decimal>) -> Self {
        let base = base.into().log10_f64();
        if base == 0.0 || base.is_nan() {
            return Self::NAN;
        }
        Self::from_f64(self.log10_f64() / base)
    }

    /// Finite stand-in used when mixing with infinities.
    fn saturating_f64(self) -> f64 {
        match self.exponent.cmp(&0) {
            Ordering::Equal => self.mantissa,
            Ordering::Greater => f64::MAX.copysign(self.mantissa),
            Ordering::Less => f64::MIN_POSITIVE.copysign(self.mantissa),
        }
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_f64(value as f64)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if self.exponent == 0 && other.exponent == 0 {
            return self.mantissa.partial_cmp(&other.mantissa);
        }
        if !self.is_finite() || !other.is_finite() {
            return self.saturating_f64().partial_cmp(&other.saturating_f64());
        }

        let (lhs_m, lhs_e) = self.to_scientific();
        let (rhs_m, rhs_e) = other.to_scientific();
        let lhs_sign = sign_of(lhs_m);
        let rhs_sign = sign_of(rhs_m);
        if lhs_sign != rhs_sign {
            return Some(lhs_sign.cmp(&rhs_sign));
        }
        if lhs_sign == 0 {
            return Some(Ordering::Equal);
        }
        let magnitude = lhs_e
            .cmp(&rhs_e)
            .then(lhs_m.abs().partial_cmp(&rhs_m.abs())?);
        Some(if lhs_sign > 0 {
            magnitude
        } else {
            magnitude.reverse()
        })
    }
}

impl PartialEq<f64> for Decimal {
    fn eq(&self, other: &f64) -> bool {
        *self == Decimal::from_f64(*other)
    }
}

impl PartialOrd<f64> for Decimal {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Decimal::from_f64(*other))
    }
}

fn sign_of(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn fits_plain(value: f64) -> bool {
    let magnitude = value.abs();
    value.is_finite() && (PLAIN_MIN..PLAIN_MAX).contains(&magnitude)
}

/// `value * 10^power`, applied in steps so intermediates stay finite.
fn scale_pow10(mut value: f64, mut power: i64) -> f64 {
    while power > 300 {
        value *= 1e300;
        power -= 300;
    }
    while power < -300 {
        value /= 1e300;
        power += 300;
    }
    if power >= 0 {
        value * 10f64.powi(power as i32)
    } else {
        value / 10f64.powi((-power) as i32)
    }
}
