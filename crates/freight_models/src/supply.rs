//! Supply curves for freight capacity.
//!
//! Supply is expressed as price at a given volume. Two shapes are
//! supported: a flat curve with a fixed capacity, and a linear curve whose
//! price rises with volume.

use thiserror::Error;

/// Errors raised when constructing a supply curve.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SupplyError {
    /// Base price is zero, negative, or not finite.
    #[error("Invalid base price {0}: must be positive")]
    InvalidBasePrice(f64),

    /// Flat-curve capacity is zero, negative, or not finite.
    #[error("Invalid capacity {0}: must be positive")]
    InvalidCapacity(f64),

    /// Slope is not a finite number.
    #[error("Invalid slope {0}: must be finite")]
    InvalidSlope(f64),
}

/// Price-at-volume supply curve.
///
/// # Examples
///
/// ```
/// use freight_models::supply::SupplyCurve;
///
/// let flat = SupplyCurve::flat(3000.0, 1200.0).unwrap();
/// assert_eq!(flat.predict(10.0), 3000.0);
///
/// let sloped = SupplyCurve::sloped(2500.0, 0.5).unwrap();
/// assert_eq!(sloped.predict(1000.0), 3000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum SupplyCurve {
    /// Constant price up to a fixed capacity.
    Flat {
        /// Price charged for any volume
        base_price: f64,
        /// Volume the market can carry
        capacity: f64,
    },
    /// Price rising linearly with volume: `base_price + slope × volume`.
    Sloped {
        /// Price at zero volume
        base_price: f64,
        /// Price increase per unit volume
        slope: f64,
    },
}

impl SupplyCurve {
    /// Creates a flat supply curve.
    ///
    /// # Errors
    ///
    /// Returns an error unless both `base_price` and `capacity` are finite
    /// and strictly positive.
    pub fn flat(base_price: f64, capacity: f64) -> Result<Self, SupplyError> {
        check_base_price(base_price)?;
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(SupplyError::InvalidCapacity(capacity));
        }
        Ok(SupplyCurve::Flat {
            base_price,
            capacity,
        })
    }

    /// Creates a linearly sloped supply curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_price` is not finite and strictly positive,
    /// or if `slope` is not finite.
    pub fn sloped(base_price: f64, slope: f64) -> Result<Self, SupplyError> {
        check_base_price(base_price)?;
        if !slope.is_finite() {
            return Err(SupplyError::InvalidSlope(slope));
        }
        Ok(SupplyCurve::Sloped { base_price, slope })
    }

    /// Price at which suppliers provide `volume`.
    #[inline]
    pub fn predict(&self, volume: f64) -> f64 {
        match *self {
            SupplyCurve::Flat { base_price, .. } => base_price,
            SupplyCurve::Sloped { base_price, slope } => base_price + slope * volume,
        }
    }

    /// Price at zero volume.
    #[inline]
    pub fn base_price(&self) -> f64 {
        match *self {
            SupplyCurve::Flat { base_price, .. } | SupplyCurve::Sloped { base_price, .. } => {
                base_price
            }
        }
    }

    /// Capacity of a flat curve; `None` for a sloped curve.
    #[inline]
    pub fn capacity(&self) -> Option<f64> {
        match *self {
            SupplyCurve::Flat { capacity, .. } => Some(capacity),
            SupplyCurve::Sloped { .. } => None,
        }
    }

    /// Returns whether this is a flat curve.
    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self, SupplyCurve::Flat { .. })
    }
}

fn check_base_price(base_price: f64) -> Result<(), SupplyError> {
    if base_price.is_finite() && base_price > 0.0 {
        Ok(())
    } else {
        Err(SupplyError::InvalidBasePrice(base_price))
    }
}
