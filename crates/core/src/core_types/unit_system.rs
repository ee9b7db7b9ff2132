//! Unit conversion constants injected into every boom
//!
//! The compensation formulas are written once against a [`UnitSystem`]; swapping
//! between imperial (gal/acre, mph, psi) and metric (l/ha, km/h, bar) is a
//! matter of passing a different value at boom construction.

use super::units::{is_positive_finite, Pressure, Speed};
use serde::{Deserialize, Serialize};

/// Seconds per minute, used to turn per-second ground coverage into flow per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Conversion constants for one measurement system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitSystem {
    /// Square distance units in one application-area unit
    /// Imperial: 43560 ft² per acre, Metric: 10000 m² per hectare
    pub square_distance_per_area: f64,

    /// Multiplier taking road speed to boom distance units per second
    /// Imperial: 5280/3600 (mph to ft/s), Metric: 1000/3600 (km/h to m/s)
    pub speed_to_distance_per_second: f64,

    /// Reference pressure at which a nozzle delivers its rated flow
    /// Imperial: 40 psi, Metric: 2.76 bar
    pub base_pressure: Pressure,
}

impl UnitSystem {
    /// Gallons per acre, feet, miles per hour, psi
    pub const IMPERIAL: Self = Self {
        square_distance_per_area: 43560.0,
        speed_to_distance_per_second: 5280.0 / 3600.0,
        base_pressure: Pressure::new(40.0),
    };

    /// Litres per hectare, metres, kilometres per hour, bar
    pub const METRIC: Self = Self {
        square_distance_per_area: 10000.0,
        speed_to_distance_per_second: 1000.0 / 3600.0,
        base_pressure: Pressure::new(2.76),
    };

    /// Convert a road speed into boom distance units per second
    #[inline]
    #[must_use]
    pub fn distance_per_second(&self, speed: Speed) -> f64 {
        speed.value() * self.speed_to_distance_per_second
    }

    /// First constant that is not strictly positive and finite, if any
    pub(crate) fn invalid_constant(&self) -> Option<(&'static str, f64)> {
        [
            ("square_distance_per_area", self.square_distance_per_area),
            (
                "speed_to_distance_per_second",
                self.speed_to_distance_per_second,
            ),
            ("base_pressure", self.base_pressure.value()),
        ]
        .into_iter()
        .find(|&(_, value)| !is_positive_finite(value))
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::IMPERIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imperial_speed_conversion() {
        // 60 mph is 88 ft/s
        let fps = UnitSystem::IMPERIAL.distance_per_second(Speed::new(60.0));
        assert!((fps - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_metric_speed_conversion() {
        // 36 km/h is 10 m/s
        let mps = UnitSystem::METRIC.distance_per_second(Speed::new(36.0));
        assert!((mps - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(UnitSystem::IMPERIAL.invalid_constant(), None);
        assert_eq!(UnitSystem::METRIC.invalid_constant(), None);
    }

    #[test]
    fn test_invalid_constant_detected() {
        let broken = UnitSystem {
            square_distance_per_area: 0.0,
            ..UnitSystem::IMPERIAL
        };
        assert_eq!(
            broken.invalid_constant(),
            Some(("square_distance_per_area", 0.0))
        );
    }
}
