//! Option contract definitions.

use super::error::OptionError;

/// Smallest accepted percent-of-spot strike.
pub const MIN_STRIKE_PCT: f64 = 1.0;

/// Largest accepted percent-of-spot strike.
pub const MAX_STRIKE_PCT: f64 = 500.0;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Pays `max(0, price - strike)`.
    Call,
    /// Pays `max(0, strike - price)`.
    Put,
}

impl OptionKind {
    /// Payoff at `price` for the given `strike`.
    ///
    /// # Examples
    /// ```
    /// use freight_pricing::options::OptionKind;
    ///
    /// assert_eq!(OptionKind::Call.payoff(3500.0, 3200.0), 300.0);
    /// assert_eq!(OptionKind::Put.payoff(3500.0, 3200.0), 0.0);
    /// ```
    #[inline]
    pub fn payoff(&self, price: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (price - strike).max(0.0),
            OptionKind::Put => (strike - price).max(0.0),
        }
    }
}

/// How the user expressed the strike.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrikeSpec {
    /// Strike in price units.
    Absolute(f64),
    /// Strike as a percentage of the initial spot (125 = 125%).
    PercentOfSpot(f64),
}

impl StrikeSpec {
    /// Converts to an absolute strike.
    ///
    /// # Errors
    ///
    /// - [`OptionError::InvalidStrikePercent`] for a percentage outside [1, 500]
    /// - [`OptionError::InvalidStrike`] if the resulting strike is negative
    ///
    /// # Examples
    /// ```
    /// use freight_pricing::options::StrikeSpec;
    ///
    /// assert_eq!(StrikeSpec::PercentOfSpot(125.0).resolve(3000.0).unwrap(), 3750.0);
    /// assert_eq!(StrikeSpec::Absolute(3500.0).resolve(3000.0).unwrap(), 3500.0);
    /// assert!(StrikeSpec::PercentOfSpot(600.0).resolve(3000.0).is_err());
    /// ```
    pub fn resolve(&self, initial_spot: f64) -> Result<f64, OptionError> {
        let strike = match *self {
            StrikeSpec::Absolute(strike) => strike,
            StrikeSpec::PercentOfSpot(pct) => {
                if !(MIN_STRIKE_PCT..=MAX_STRIKE_PCT).contains(&pct) {
                    return Err(OptionError::InvalidStrikePercent { pct });
                }
                initial_spot * (pct / 100.0)
            }
        };
        check_strike(strike)?;
        Ok(strike)
    }
}

/// A European-style option exercised at one simulated step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// 1-based exercise step; step 1 is the initial spot.
    pub exercise_step: usize,
    /// Absolute strike.
    pub strike: f64,
    /// Call or put.
    pub kind: OptionKind,
}

impl OptionSpec {
    /// Creates an option specification. Validation happens at pricing time,
    /// against the actual path length.
    #[inline]
    pub fn new(exercise_step: usize, strike: f64, kind: OptionKind) -> Self {
        Self {
            exercise_step,
            strike,
            kind,
        }
    }

    /// Checks the strike and the exercise step against `path_len`.
    ///
    /// # Errors
    ///
    /// [`OptionError::InvalidStrike`] or [`OptionError::InvalidExerciseStep`].
    pub fn validate(&self, path_len: usize) -> Result<(), OptionError> {
        check_strike(self.strike)?;
        if self.exercise_step == 0 || self.exercise_step > path_len {
            return Err(OptionError::InvalidExerciseStep {
                step: self.exercise_step,
                path_len,
            });
        }
        Ok(())
    }
}

fn check_strike(strike: f64) -> Result<(), OptionError> {
    if strike.is_finite() && strike >= 0.0 {
        Ok(())
    } else {
        Err(OptionError::InvalidStrike { strike })
    }
}
