//! Scripted driving sequences for exercising a boom
//!
//! A scenario fixes the application rate and pressure, then alternates
//! driving commands (speed + yaw) with section toggles. Running it against a
//! boom yields one [`SprayReport`] per driving command.

use crate::boom::{Boom, SprayReport};
use crate::core_types::units::{ApplicationRate, Pressure, Speed, YawRate};
use crate::error::SprayError;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::info;

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Drive at `speed` while turning at `yaw_rate`
    Command {
        /// Road speed held for the command
        speed: Speed,
        /// Vehicle yaw rate, positive clockwise
        yaw_rate: YawRate,
    },
    /// Switch a contiguous block of nozzles on or off
    SetEnabled {
        /// Nozzle indices, leftmost is 0
        nozzles: Range<usize>,
        /// New state of every nozzle in the block
        enabled: bool,
    },
}

/// A named sequence of steps at a fixed rate and pressure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label shown when the scenario runs
    pub name: String,
    /// Target application rate for every command
    pub rate: ApplicationRate,
    /// Supply pressure for every command
    pub pressure: Pressure,
    /// Actions in the order they are applied
    pub steps: Vec<ScenarioStep>,
}

/// Result of one driving command within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Road speed of the command
    pub speed: Speed,
    /// Yaw rate of the command
    pub yaw_rate: YawRate,
    /// Compensation and warnings the boom produced
    pub report: SprayReport,
}

impl Scenario {
    /// Field demonstration for the imperial 120 ft boom at 10 gal/acre, 50 psi
    ///
    /// Sweeps the yaw rate from straight to 240 deg/s at 8 mph, shuts off two
    /// ten-nozzle sections, then repeats a turn at two speeds and turns the
    /// other way.
    pub fn demonstration() -> Self {
        let mut steps: Vec<ScenarioStep> = [0.0, 40.0, 80.0, 120.0, 160.0, 200.0, 240.0]
            .into_iter()
            .map(|yaw| ScenarioStep::Command {
                speed: Speed::new(8.0),
                yaw_rate: YawRate::new(yaw),
            })
            .collect();

        steps.extend([
            ScenarioStep::SetEnabled {
                nozzles: 0..10,
                enabled: false,
            },
            ScenarioStep::SetEnabled {
                nozzles: 40..50,
                enabled: false,
            },
            ScenarioStep::Command {
                speed: Speed::new(8.0),
                yaw_rate: YawRate::new(120.0),
            },
            ScenarioStep::Command {
                speed: Speed::new(10.0),
                yaw_rate: YawRate::new(120.0),
            },
            ScenarioStep::Command {
                speed: Speed::new(8.0),
                yaw_rate: YawRate::new(-160.0),
            },
        ]);

        Self {
            name: "Yaw sweep with section control".to_string(),
            rate: ApplicationRate::new(10.0),
            pressure: Pressure::new(50.0),
            steps,
        }
    }

    /// A one-command scenario
    pub fn single(
        rate: ApplicationRate,
        pressure: Pressure,
        speed: Speed,
        yaw_rate: YawRate,
    ) -> Self {
        Self {
            name: format!("{speed} speed at {yaw_rate} deg/s"),
            rate,
            pressure,
            steps: vec![ScenarioStep::Command { speed, yaw_rate }],
        }
    }

    /// Number of driving commands in the script
    pub fn command_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, ScenarioStep::Command { .. }))
            .count()
    }

    /// Apply every step to `boom` in order
    ///
    /// Section toggles persist on the boom after the run.
    ///
    /// # Errors
    /// Stops at the first step the boom rejects: a toggle addressing a nozzle
    /// past the end of the boom, or a command with zero speed.
    pub fn run(&self, boom: &mut Boom) -> Result<Vec<ScenarioOutcome>, SprayError> {
        info!(
            "Running scenario '{}' ({} commands) on {} nozzles",
            self.name,
            self.command_count(),
            boom.nozzle_count()
        );

        let mut outcomes = Vec::with_capacity(self.command_count());
        for step in &self.steps {
            match step {
                ScenarioStep::Command { speed, yaw_rate } => {
                    let report = boom.command(self.rate, *speed, self.pressure, *yaw_rate)?;
                    outcomes.push(ScenarioOutcome {
                        speed: *speed,
                        yaw_rate: *yaw_rate,
                        report,
                    });
                }
                ScenarioStep::SetEnabled { nozzles, enabled } => {
                    boom.set_enabled(nozzles.clone(), *enabled)?;
                }
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boom::BoomConfig;

    #[test]
    fn test_demonstration_shape() {
        let scenario = Scenario::demonstration();
        assert_eq!(scenario.steps.len(), 12);
        assert_eq!(scenario.command_count(), 10);
    }

    #[test]
    fn test_single_command() {
        let mut boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
        let scenario = Scenario::single(
            ApplicationRate::new(10.0),
            Pressure::new(50.0),
            Speed::new(10.0),
            YawRate::new(-120.0),
        );
        let outcomes = scenario.run(&mut boom).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].yaw_rate, YawRate::new(-120.0));
        assert_eq!(boom.enabled_count(), 72);
    }

    #[test]
    fn test_zero_speed_rejected() {
        let mut boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
        let scenario = Scenario::single(
            ApplicationRate::new(10.0),
            Pressure::new(50.0),
            Speed::new(0.0),
            YawRate::STRAIGHT,
        );
        assert!(matches!(
            scenario.run(&mut boom),
            Err(SprayError::InvalidCommand {
                parameter: "speed",
                ..
            })
        ));
    }

    #[test]
    fn test_run_applies_toggles_in_order() {
        let mut boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
        let outcomes = Scenario::demonstration().run(&mut boom).unwrap();

        assert_eq!(outcomes.len(), 10);
        // Toggles happen after the seventh command
        assert!(outcomes[6].report.values.nozzles[0].ratio > 0.0);
        assert_eq!(outcomes[7].report.values.nozzles[0].ratio, 0.0);
        assert_eq!(boom.enabled_count(), 52);
    }

    #[test]
    fn test_run_stops_on_bad_toggle() {
        let mut boom = Boom::from_config(&BoomConfig {
            nozzle_count: 20,
            ..BoomConfig::imperial_120ft()
        })
        .unwrap();
        let result = Scenario::demonstration().run(&mut boom);
        assert_eq!(
            result,
            Err(SprayError::IndexOutOfRange {
                index: 40,
                nozzle_count: 20
            })
        );
    }
}
