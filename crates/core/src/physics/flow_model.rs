//! Nozzle flow-pressure relationship
//!
//! Flow through a fixed orifice scales with the square root of the pressure
//! drop and inversely with the square root of fluid density:
//!
//! ```text
//! Q = Q_rated × √(P / P_ref) / √SG
//! ```
//!
//! where `Q_rated` is the tip's catalogue flow at the reference pressure
//! `P_ref` with water, and `SG` is the specific gravity of the spray mix.
//!
//! # References
//!
//! - `TeeJet` Technologies Catalog 51A: "Formulas and useful information"

use crate::core_types::units::{
    is_positive_finite, ApplicationRate, Distance, FlowRate, Pressure, Speed,
};
use crate::core_types::{UnitSystem, SECONDS_PER_MINUTE};
use crate::error::SprayError;
use serde::{Deserialize, Serialize};

/// Hydraulic properties shared by every nozzle on a boom
///
/// A boom owns one flow model and hands a copy to each nozzle it mounts, so
/// nozzles can answer capacity questions without a reference back to the boom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowModel {
    /// Rated tip flow at the unit system's base pressure, with water
    nominal_flow: FlowRate,

    /// Density of the spray mix relative to water
    /// Water: 1.0, 28% UAN: ~1.28
    specific_gravity: f64,

    /// Conversion constants the formulas are evaluated in
    units: UnitSystem,
}

impl FlowModel {
    /// Create a validated flow model
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidConfiguration`] if `nominal_flow` or
    /// `specific_gravity` is not finite and positive, or if any constant of
    /// `units` is not finite and positive.
    pub fn new(
        nominal_flow: FlowRate,
        specific_gravity: f64,
        units: UnitSystem,
    ) -> Result<Self, SprayError> {
        if !is_positive_finite(nominal_flow.value()) {
            return Err(SprayError::invalid_configuration(
                "nominal_flow",
                nominal_flow.value(),
            ));
        }
        if !is_positive_finite(specific_gravity) {
            return Err(SprayError::invalid_configuration(
                "specific_gravity",
                specific_gravity,
            ));
        }
        if let Some((parameter, value)) = units.invalid_constant() {
            return Err(SprayError::invalid_configuration(parameter, value));
        }

        Ok(Self {
            nominal_flow,
            specific_gravity,
            units,
        })
    }

    /// Unit system the model computes in
    #[inline]
    pub fn units(&self) -> &UnitSystem {
        &self.units
    }

    /// Maximum flow one nozzle delivers at `pressure` (100% duty cycle)
    ///
    /// Monotonically non-decreasing in pressure, non-increasing in specific
    /// gravity. At the base pressure this is `nominal_flow / √SG`.
    pub fn capacity(&self, pressure: Pressure) -> FlowRate {
        let pressure_ratio = pressure / self.units.base_pressure;
        FlowRate::new(
            self.nominal_flow.value() * pressure_ratio.sqrt() / self.specific_gravity.sqrt(),
        )
    }

    /// Flow one nozzle covering `width` must deliver to lay down `rate` while
    /// travelling straight at `speed`
    ///
    /// `rate / area × ground speed × width × 60` gives volume per minute.
    pub fn nozzle_flow(&self, rate: ApplicationRate, speed: Speed, width: Distance) -> FlowRate {
        let covered_per_second = self.units.distance_per_second(speed) * width.value();
        FlowRate::new(
            rate.value() / self.units.square_distance_per_area
                * covered_per_second
                * SECONDS_PER_MINUTE,
        )
    }
}
