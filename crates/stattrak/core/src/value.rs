//! Numeric value carried by a statistic line.

use std::fmt;

/// Value of a tracked statistic.
///
/// The variant records how the value was read (`"5"` versus `"5.0"`), but
/// arithmetic and equality only look at the number itself, so
/// `Integer(5) == Fractional(5.0)`. How a value is written back is decided by
/// [`StatValue::is_whole`], not by the variant.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StatValue {
    Integer(i64),
    Fractional(f64),
}

impl StatValue {
    /// Value of a statistic that is absent or unreadable.
    pub const ZERO: Self = Self::Integer(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Fractional(value) => value,
        }
    }

    /// True when the value has no fractional part.
    ///
    /// Exact comparison against `floor`, so `2.0000000001` is not whole.
    pub fn is_whole(self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Fractional(value) => value == value.floor(),
        }
    }

    /// Counter step: drop any fractional part, then add one.
    pub fn increment(self) -> Self {
        let base = match self {
            Self::Integer(value) => value,
            Self::Fractional(value) => value.trunc() as i64,
        };
        Self::Integer(base.saturating_add(1))
    }
}

impl Default for StatValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for StatValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        Self::Fractional(value)
    }
}

/// Lore rendering: whole values as a bare integer, everything else with
/// exactly one decimal place.
///
/// Whole fractional values outside the `i64` range keep their decimal place,
/// since a bare integer that large would read back as an overflow.
impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Fractional(value) if self.is_whole() && fits_integer(value) => {
                write!(f, "{:.0}", value)
            }
            Self::Fractional(value) => write!(f, "{:.1}", value),
        }
    }
}

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn fits_integer(value: f64) -> bool {
    value >= i64::MIN as f64 && value < i64::MAX as f64
}
