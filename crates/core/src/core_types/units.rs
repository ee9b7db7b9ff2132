//! Semantic unit types for type-safe sprayer quantity handling
//!
//! This module provides newtype wrappers for the physical quantities that flow
//! through the rate-compensation model, so a pressure can never be passed where
//! a road speed is expected.
//!
//! # Design Philosophy
//! - All quantities use f64; compensation ratios are products of several
//!   conversions and the extra precision keeps boom totals stable
//! - Quantities are unit-agnostic: whether a [`Distance`] is feet or metres is
//!   decided by the [`UnitSystem`](super::UnitSystem) the boom was built with
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Private inner fields with validated constructors
//!
//! # Usage
//! ```
//! use sprayer_core::core_types::units::{DutyCycle, Pressure};
//!
//! let low = Pressure::new(40.0);
//! let high = Pressure::new(50.0);
//! assert!((high / low - 1.25).abs() < 1e-12);
//!
//! let duty = DutyCycle::saturating(1.7);
//! assert!(duty.is_saturated());
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Deref, Div, Mul};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// True for values usable as a physical size or rate: finite and above zero
#[inline]
pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// Shared trait impls for every scalar quantity: total ordering, `Deref` to the
// raw value, conversion back to f64, and fixed-precision `Display`.
macro_rules! scalar_quantity {
    ($name:ident, $precision:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.*}", $precision, self.0)
            }
        }
    };
}

// ============================================================================
// SPATIAL TYPES
// ============================================================================

/// Lateral distance along the boom (feet or metres)
///
/// Signed: negative values are left of the boom centre.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Distance(f64);

scalar_quantity!(Distance, 2);

impl Distance {
    /// Boom centre
    pub const ZERO: Distance = Distance(0.0);

    /// Create a new distance (any sign)
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Distance(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;
    fn mul(self, rhs: f64) -> Distance {
        Distance(self.0 * rhs)
    }
}

// ============================================================================
// MOTION TYPES
// ============================================================================

/// Vehicle road speed (mph or km/h)
///
/// Converted to distance per second through
/// [`UnitSystem::speed_to_distance_per_second`](super::UnitSystem::speed_to_distance_per_second).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Speed(f64);

scalar_quantity!(Speed, 1);

impl Speed {
    /// Create a new road speed. Asserts value >= 0 (the boom never drives backwards).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Speed::new: negative road speed is invalid");
        Speed(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Vehicle yaw rate in degrees per second
///
/// Positive is clockwise (a right turn), negative is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct YawRate(f64);

scalar_quantity!(YawRate, 1);

impl YawRate {
    /// Driving straight
    pub const STRAIGHT: YawRate = YawRate(0.0);

    /// Create a new yaw rate (any sign)
    #[inline]
    #[must_use]
    pub const fn new(degrees_per_second: f64) -> Self {
        YawRate(degrees_per_second)
    }

    /// Get the raw value in degrees per second
    #[inline]
    #[must_use]
    pub fn degrees_per_second(self) -> f64 {
        self.0
    }

    /// Fraction of a full turn swept each second
    #[inline]
    #[must_use]
    pub fn turns_per_second(self) -> f64 {
        self.0 / 360.0
    }
}

// ============================================================================
// HYDRAULIC TYPES
// ============================================================================

/// Supply pressure at the nozzle (psi or bar)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Pressure(f64);

scalar_quantity!(Pressure, 2);

impl Pressure {
    /// Create a new pressure. Asserts value >= 0 (gauge pressure is never negative).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Pressure::new: negative pressure is invalid");
        Pressure(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// Cross-type operation: pressure / pressure = dimensionless ratio
impl Div for Pressure {
    type Output = f64;
    fn div(self, rhs: Pressure) -> f64 {
        self.0 / rhs.0
    }
}

/// Liquid flow in volume per minute (gal/min or l/min)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FlowRate(f64);

scalar_quantity!(FlowRate, 2);

impl FlowRate {
    /// No flow
    pub const ZERO: FlowRate = FlowRate(0.0);

    /// Create a new flow rate. Asserts value >= 0 (a nozzle cannot draw liquid back).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "FlowRate::new: negative flow is invalid");
        FlowRate(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Sum for FlowRate {
    fn sum<I: Iterator<Item = FlowRate>>(iter: I) -> FlowRate {
        FlowRate(iter.map(|f| f.0).sum())
    }
}

// Cross-type operation: flow / flow = fraction of capacity
impl Div for FlowRate {
    type Output = f64;
    fn div(self, rhs: FlowRate) -> f64 {
        self.0 / rhs.0
    }
}

/// Target application rate in volume per area (gal/acre or l/ha)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ApplicationRate(f64);

scalar_quantity!(ApplicationRate, 1);

impl ApplicationRate {
    /// Create a new application rate. Asserts value >= 0.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0,
            "ApplicationRate::new: negative application rate is invalid"
        );
        ApplicationRate(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// DUTY CYCLE
// ============================================================================

/// Fraction of each PWM period a nozzle valve is open, in [0, 1]
///
/// 1.0 is a valve held open; a boom commanded to 1.0 is at its physical
/// ceiling and anything more it is asked for is underspray.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DutyCycle(f64);

scalar_quantity!(DutyCycle, 2);

impl DutyCycle {
    /// Valve closed
    pub const OFF: DutyCycle = DutyCycle(0.0);

    /// Valve held open
    pub const FULL: DutyCycle = DutyCycle(1.0);

    /// Create a new duty cycle. Asserts value is within [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "DutyCycle::new: value not in [0, 1]"
        );
        DutyCycle(value)
    }

    /// Clamp an arbitrary demand into [0, 1]. NaN maps to fully open so a
    /// broken demand never reads as "nothing to spray".
    #[inline]
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            return DutyCycle::FULL;
        }
        DutyCycle(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the valve is held fully open
    #[inline]
    #[must_use]
    pub fn is_saturated(self) -> bool {
        self.0 >= 1.0
    }

    /// Convert to percentage (0-100)
    #[inline]
    #[must_use]
    pub fn to_percent(self) -> f64 {
        self.0 * 100.0
    }
}

// Cross-type operation: duty × compensation ratio = requested duty (may exceed 1)
impl Mul<f64> for DutyCycle {
    type Output = f64;
    fn mul(self, rhs: f64) -> f64 {
        self.0 * rhs
    }
}
