//! Widget rank (relative polling weight)
//!
//! A rank multiplies the base interval to give the wait before the widget
//! that owns it is invoked. Ranks are validated once at construction so the
//! scheduler never has to deal with zero, negative or non-finite weights.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RotaboardError};

/// Positive, finite weight attached to a widget.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rank(f64);

impl Rank {
    /// Neutral rank: the widget waits exactly one base interval.
    pub const ONE: Self = Self(1.0);

    /// Create a rank, rejecting zero, negative, NaN and infinite values.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(RotaboardError::InvalidInput(format!(
                "rank must be a positive finite number, got {value}"
            )))
        }
    }

    /// Raw weight.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Multiply `base` by this rank.
    ///
    /// Whole-number ranks use integer arithmetic so the result is exact.
    /// Saturates at `Duration::MAX` rather than panicking on overflow.
    pub fn scale(self, base: Duration) -> Duration {
        if self.0.fract() == 0.0 && self.0 <= f64::from(u32::MAX) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let factor = self.0 as u32;
            return base.checked_mul(factor).unwrap_or(Duration::MAX);
        }

        Duration::try_from_secs_f64(base.as_secs_f64() * self.0).unwrap_or(Duration::MAX)
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Rank {
    type Error = RotaboardError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rank> for f64 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Rank::new(bad).unwrap_err();
            assert!(matches!(err, RotaboardError::InvalidInput(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn scales_whole_ranks_exactly() {
        let base = Duration::from_secs(30);
        assert_eq!(Rank::new(1.0).unwrap().scale(base), Duration::from_secs(30));
        assert_eq!(Rank::new(2.0).unwrap().scale(base), Duration::from_secs(60));
        assert_eq!(
            Rank::new(4.0).unwrap().scale(Duration::from_millis(7)),
            Duration::from_millis(28)
        );
    }

    #[test]
    fn scales_fractional_ranks() {
        let scaled = Rank::new(0.5).unwrap().scale(Duration::from_secs(30));
        assert_eq!(scaled, Duration::from_secs(15));
    }

    #[test]
    fn scale_saturates_instead_of_panicking() {
        let huge = Rank::new(1e300).unwrap();
        assert_eq!(huge.scale(Duration::from_secs(1)), Duration::MAX);

        let wide = Rank::new(f64::from(u32::MAX)).unwrap();
        assert_eq!(wide.scale(Duration::MAX), Duration::MAX);
    }

    #[test]
    fn deserializes_with_validation() {
        let rank: Rank = serde_json::from_str("2.5").unwrap();
        assert_eq!(rank.get(), 2.5);

        assert!(serde_json::from_str::<Rank>("0").is_err());
        assert!(serde_json::from_str::<Rank>("-3").is_err());
    }

    #[test]
    fn default_is_one() {
        assert_eq!(Rank::default(), Rank::ONE);
        assert_eq!(Rank::ONE.to_string(), "1");
    }
}
