use crate::error::ArgumentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounds to two decimal places, the precision amounts are displayed and compared at.
pub fn clean_float(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount for display: two decimals at most, no trailing zeros.
pub fn format_amount(value: f64) -> String {
    let cleaned = clean_float(value);
    if cleaned.fract() == 0.0 {
        format!("{}", cleaned as i64)
    } else {
        let text = format!("{:.2}", cleaned);
        text.trim_end_matches('0').to_string()
    }
}

/// An amount of an ingredient, instrument, vessel or product: a minimum and an optional maximum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantityRange {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl QuantityRange {
    /// Builds a validated range. Both bounds must be finite and non-negative, and `min <= max`.
    pub fn new(min: f64, max: Option<f64>) -> Result<Self, ArgumentError> {
        check_amount(min)?;
        if let Some(max) = max {
            check_amount(max)?;
            if min > max {
                return Err(ArgumentError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// A single amount with no upper bound.
    pub fn exact(min: f64) -> Self {
        Self { min, max: None }
    }

    /// Multiplies both bounds by `factor`. Non-positive or non-finite factors are rejected.
    pub fn scale(&self, factor: f64) -> Result<Self, ArgumentError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ArgumentError::NonPositiveScale(factor));
        }
        Ok(self.scaled_unchecked(factor))
    }

    pub(crate) fn scaled_unchecked(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max.map(|max| max * factor),
        }
    }

    /// Rounds both bounds up to whole numbers, for counts of physical things.
    pub fn ceil(&self) -> Self {
        Self {
            min: ceil_count(self.min),
            max: self.max.map(ceil_count),
        }
    }

    /// Sum-merges two ranges.
    ///
    /// Minimums are added. When either side carries a maximum the result does too, using the
    /// other side's minimum as its upper bound if it has none, so `min <= max` still holds.
    pub fn combine(&self, other: &QuantityRange) -> Self {
        let max = match (self.max, other.max) {
            (None, None) => None,
            _ => Some(self.upper() + other.upper()),
        };
        Self {
            min: self.min + other.min,
            max,
        }
    }

    /// The largest amount this range allows.
    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(self.min)
    }

    /// True when a maximum is present and differs from the minimum.
    pub fn is_range(&self) -> bool {
        self.max
            .is_some_and(|max| clean_float(max) != clean_float(self.min))
    }
}

impl fmt::Display for QuantityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if self.is_range() => {
                write!(f, "{}-{}", format_amount(self.min), format_amount(max))
            }
            _ => write!(f, "{}", format_amount(self.min)),
        }
    }
}

fn check_amount(value: f64) -> Result<(), ArgumentError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ArgumentError::NonFiniteQuantity(value))
    }
}

// Floating point products such as 3 * 0.1 land a hair above the whole number.
fn ceil_count(value: f64) -> f64 {
    (value - 1e-9).ceil().max(0.0)
}
