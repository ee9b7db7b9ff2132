//! Physical boom parameters and named presets

use crate::core_types::units::{is_positive_finite, Distance, FlowRate};
use crate::core_types::UnitSystem;
use crate::error::SprayError;
use crate::physics::FlowModel;
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`Boom`](super::Boom)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoomConfig {
    /// Number of nozzles across the boom
    pub nozzle_count: usize,

    /// Lateral distance between adjacent nozzles
    pub spacing: Distance,

    /// Rated tip flow at the unit system's base pressure
    pub nominal_flow: FlowRate,

    /// Spray mix density relative to water
    pub specific_gravity: f64,

    /// Measurement system for every quantity above and every command
    pub units: UnitSystem,
}

impl BoomConfig {
    /// 120 ft boom: 72 nozzles on 20" spacing, 06 tips (0.6 gpm at 40 psi), water
    pub fn imperial_120ft() -> Self {
        Self {
            nozzle_count: 72,
            spacing: Distance::new(20.0 / 12.0),
            nominal_flow: FlowRate::new(0.6),
            specific_gravity: 1.0,
            units: UnitSystem::IMPERIAL,
        }
    }

    /// 36 m boom: 72 nozzles on 50 cm spacing, 06 tips (2.27 l/min at 2.76 bar), water
    pub fn metric_36m() -> Self {
        Self {
            nozzle_count: 72,
            spacing: Distance::new(0.5),
            nominal_flow: FlowRate::new(2.27),
            specific_gravity: 1.0,
            units: UnitSystem::METRIC,
        }
    }

    /// Overall boom width (nozzle count × spacing)
    pub fn width(&self) -> Distance {
        self.spacing * self.nozzle_count as f64
    }

    /// Check every parameter and build the shared flow model
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidConfiguration`] for a zero nozzle count or
    /// any spacing, flow, specific gravity, or unit constant that is not finite
    /// and positive.
    pub fn flow_model(&self) -> Result<FlowModel, SprayError> {
        if self.nozzle_count == 0 {
            return Err(SprayError::invalid_configuration("nozzle_count", 0.0));
        }
        if !is_positive_finite(self.spacing.value()) {
            return Err(SprayError::invalid_configuration(
                "spacing",
                self.spacing.value(),
            ));
        }
        FlowModel::new(self.nominal_flow, self.specific_gravity, self.units)
    }
}

impl Default for BoomConfig {
    fn default() -> Self {
        Self::imperial_120ft()
    }
}
