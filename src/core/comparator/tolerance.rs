//! Tolerance percentage and the absolute channel threshold derived from it.

use crate::error::ToleranceError;
use serde::Serialize;
use std::str::FromStr;

/// Largest possible difference between two 8-bit samples
const MAX_CHANNEL_VALUE: f64 = 255.0;

/// A validated tolerance percentage (0-100)
///
/// The percentage maps onto an absolute per-channel threshold
/// `T = round(percent / 100 * 255)`. A channel difference only counts
/// when it is strictly greater than `T`, so a tolerance of 100 never
/// flags anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    percent: f64,
    threshold: u8,
}

impl Tolerance {
    /// Create a tolerance from a percentage
    pub fn new(percent: f64) -> Result<Self, ToleranceError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(ToleranceError::OutOfRange { value: percent });
        }

        let threshold = (percent / 100.0 * MAX_CHANNEL_VALUE).round() as u8;
        Ok(Self { percent, threshold })
    }

    /// Zero tolerance: any difference at all counts
    pub fn exact() -> Self {
        Self {
            percent: 0.0,
            threshold: 0,
        }
    }

    /// The percentage this tolerance was created from
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Absolute channel threshold `T`
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Whether a single channel difference exceeds the tolerance
    pub fn exceeds(&self, difference: u8) -> bool {
        difference > self.threshold
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::exact()
    }
}

impl FromStr for Tolerance {
    type Err = ToleranceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let percent: f64 = input
            .trim()
            .parse()
            .map_err(|_| ToleranceError::NotANumber {
                input: input.to_string(),
            })?;
        Self::new(percent)
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_rounded_fraction_of_255() {
        assert_eq!(Tolerance::new(0.0).unwrap().threshold(), 0);
        assert_eq!(Tolerance::new(5.0).unwrap().threshold(), 13);
        assert_eq!(Tolerance::new(10.0).unwrap().threshold(), 26);
        assert_eq!(Tolerance::new(20.0).unwrap().threshold(), 51);
        assert_eq!(Tolerance::new(100.0).unwrap().threshold(), 255);
    }

    #[test]
    fn exceeds_is_strict() {
        let tolerance = Tolerance::new(20.0).unwrap();

        assert!(!tolerance.exceeds(50));
        assert!(!tolerance.exceeds(51));
        assert!(tolerance.exceeds(52));
    }

    #[test]
    fn full_tolerance_never_exceeds() {
        let tolerance = Tolerance::new(100.0).unwrap();
        assert!(!tolerance.exceeds(255));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Tolerance::new(-5.0),
            Err(ToleranceError::OutOfRange { value: -5.0 })
        );
        assert_eq!(
            Tolerance::new(105.0),
            Err(ToleranceError::OutOfRange { value: 105.0 })
        );
        assert!(Tolerance::new(f64::NAN).is_err());
        assert!(Tolerance::new(f64::INFINITY).is_err());
    }

    #[test]
    fn parses_from_string() {
        let tolerance: Tolerance = "12.5".parse().unwrap();
        assert_eq!(tolerance.percent(), 12.5);

        assert_eq!(
            "abc".parse::<Tolerance>(),
            Err(ToleranceError::NotANumber {
                input: "abc".to_string()
            })
        );
        assert_eq!(
            "120".parse::<Tolerance>(),
            Err(ToleranceError::OutOfRange { value: 120.0 })
        );
    }

    #[test]
    fn default_is_exact() {
        assert_eq!(Tolerance::default().threshold(), 0);
        assert_eq!(Tolerance::default().to_string(), "0%");
    }
}
