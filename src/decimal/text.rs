use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::{Decimal, fits_plain};

/// Plain `Display` switches to scientific notation from this magnitude.
const DISPLAY_SCIENTIFIC_FROM: f64 = 1e9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal `{0}`")]
pub struct ParseDecimalError(String);

impl Decimal {
    /// Lossless text form; [`FromStr`] restores the identical value.
    pub fn to_exact_string(self) -> String {
        if self.exponent == 0 {
            format!("{:e}", self.mantissa)
        } else {
            format!("{}e{}", self.mantissa, self.exponent)
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        let invalid = || ParseDecimalError(raw.to_string());

        let split = text
            .rfind(['e', 'E'])
            .map(|at| (&text[..at], &text[at + 1..]));

        if let Ok(value) = text.parse::<f64>() {
            let mantissa_is_zero = split
                .and_then(|(mantissa, _)| mantissa.parse::<f64>().ok())
                .is_none_or(|mantissa| mantissa == 0.0);
            let lossless = if value == 0.0 {
                mantissa_is_zero
            } else {
                (!value.is_finite() && split.is_none()) || fits_plain(value)
            };
            if lossless {
                return Ok(Decimal::from_f64(value));
            }
        }

        let (mantissa, exponent) = split.ok_or_else(invalid)?;
        let mantissa = mantissa.parse::<f64>().map_err(|_| invalid())?;
        let exponent = exponent.parse::<i64>().map_err(|_| invalid())?;
        if !mantissa.is_finite() {
            return Err(invalid());
        }
        Ok(Decimal::from_scientific(mantissa, exponent))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        if !self.is_finite() {
            return f.write_str(if self.mantissa > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            });
        }

        let precision = f.precision().unwrap_or(2);
        if self.exponent == 0 && self.mantissa.abs() < DISPLAY_SCIENTIFIC_FROM {
            let text = format!("{:.*}", precision, self.mantissa);
            return f.write_str(trim_fraction(&text));
        }
        let (mantissa, exponent) = self.to_scientific();
        let text = format!("{:.*}", precision, mantissa);
        write!(f, "{}e{}", trim_fraction(&text), exponent)
    }
}

fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_exact_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
        Ok(Decimal::from_f64(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
        Ok(Decimal::from_f64(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
        Ok(Decimal::from_f64(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Decimal, E> {
        value.parse().map_err(E::custom)
    }
}
