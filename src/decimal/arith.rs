use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{Decimal, fits_plain, scale_pow10};

/// Mantissas further apart than this many decimal digits do not affect a sum.
const ADDITION_PRECISION: i64 = 17;

impl Decimal {
    fn add_decimal(self, rhs: Self) -> Self {
        if !self.is_finite() || !rhs.is_finite() {
            return Self::from_f64(self.saturating_f64() + rhs.saturating_f64());
        }
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        if self.exponent == 0 && rhs.exponent == 0 {
            let sum = self.mantissa + rhs.mantissa;
            if sum == 0.0 || fits_plain(sum) {
                return Self::plain(sum);
            }
        }

        let lhs = self.to_scientific();
        let rhs = rhs.to_scientific();
        let (big, small) = if lhs.1 >= rhs.1 { (lhs, rhs) } else { (rhs, lhs) };
        let gap = big.1 - small.1;
        if gap > ADDITION_PRECISION {
            return Self::from_scientific(big.0, big.1);
        }
        Self::from_scientific(big.0 + scale_pow10(small.0, -gap), big.1)
    }

    fn mul_decimal(self, rhs: Self) -> Self {
        if !self.is_finite() || !rhs.is_finite() {
            return Self::from_f64(self.saturating_f64() * rhs.saturating_f64());
        }
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        if self.exponent == 0 && rhs.exponent == 0 {
            let product = self.mantissa * rhs.mantissa;
            if fits_plain(product) {
                return Self::plain(product);
            }
        }

        let (lhs_m, lhs_e) = self.to_scientific();
        let (rhs_m, rhs_e) = rhs.to_scientific();
        Self::from_scientific(lhs_m * rhs_m, lhs_e.saturating_add(rhs_e))
    }

    fn div_decimal(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return Self::NAN;
        }
        if !self.is_finite() || !rhs.is_finite() {
            return Self::from_f64(self.saturating_f64() / rhs.saturating_f64());
        }
        if self.is_zero() {
            return Self::ZERO;
        }
        if self.exponent == 0 && rhs.exponent == 0 {
            let quotient = self.mantissa / rhs.mantissa;
            if fits_plain(quotient) {
                return Self::plain(quotient);
            }
        }

        let (lhs_m, lhs_e) = self.to_scientific();
        let (rhs_m, rhs_e) = rhs.to_scientific();
        Self::from_scientific(lhs_m / rhs_m, lhs_e.saturating_sub(rhs_e))
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            mantissa: if self.mantissa == 0.0 {
                0.0
            } else {
                -self.mantissa
            },
            exponent: self.exponent,
        }
    }
}

macro_rules! decimal_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $body:expr) => {
        impl $trait<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                $body(self, rhs)
            }
        }

        impl $trait<f64> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: f64) -> Decimal {
                $body(self, Decimal::from_f64(rhs))
            }
        }

        impl $trait<Decimal> for f64 {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                $body(Decimal::from_f64(self), rhs)
            }
        }

        impl $assign_trait<Decimal> for Decimal {
            fn $assign_method(&mut self, rhs: Decimal) {
                *self = $body(*self, rhs);
            }
        }

        impl $assign_trait<f64> for Decimal {
            fn $assign_method(&mut self, rhs: f64) {
                *self = $body(*self, Decimal::from_f64(rhs));
            }
        }
    };
}

decimal_binary_op!(Add, add, AddAssign, add_assign, Decimal::add_decimal);
decimal_binary_op!(
    Sub,
    sub,
    SubAssign,
    sub_assign,
    |lhs: Decimal, rhs: Decimal| lhs.add_decimal(-rhs)
);
decimal_binary_op!(Mul, mul, MulAssign, mul_assign, Decimal::mul_decimal);
decimal_binary_op!(Div, div, DivAssign, div_assign, Decimal::div_decimal);

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::ZERO, |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::ZERO, |acc, value| acc + *value)
    }
}
