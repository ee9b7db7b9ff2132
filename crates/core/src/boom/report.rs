//! Results of a compensation command and the underspray conditions they imply

use crate::core_types::units::{DutyCycle, FlowRate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// What a nozzle ended up doing for one command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NozzleState {
    /// Delivering its full compensated demand
    Spraying,
    /// Demand exceeded capacity; delivering capacity (100% duty)
    AtCapacity,
    /// Boom point travelling backwards; shut off for this command
    ShutOff,
    /// Section valve disabled
    Disabled,
}

/// Per-nozzle result of one compensation command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NozzleOutput {
    /// Raw geometric correction from [`Nozzle::change_ratio`](super::Nozzle::change_ratio)
    /// (0 for a disabled nozzle)
    pub correction: f64,

    /// Reported ratio: the correction, or 0 when shut off or disabled
    /// Not reduced when the flow was capped
    pub ratio: f64,

    /// Delivered flow after both clamps
    pub flow: FlowRate,

    /// Which envelope, if any, the nozzle hit
    pub state: NozzleState,
}

impl NozzleOutput {
    /// Output of a nozzle whose valve is disabled
    pub(crate) fn disabled() -> Self {
        Self {
            correction: 0.0,
            ratio: 0.0,
            flow: FlowRate::ZERO,
            state: NozzleState::Disabled,
        }
    }
}

/// Boom-wide result of [`Boom::compensated_values`](super::Boom::compensated_values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatedValues {
    /// Sum of delivered flow over every enabled, forward-moving nozzle
    pub total_flow: FlowRate,

    /// One entry per nozzle, in boom order (leftmost first)
    pub nozzles: Vec<NozzleOutput>,
}

impl CompensatedValues {
    /// Reported ratios in boom order
    pub fn ratios(&self) -> Vec<f64> {
        self.nozzles.iter().map(|n| n.ratio).collect()
    }

    /// Largest reported ratio, or 0 for an empty boom
    pub fn max_ratio(&self) -> f64 {
        self.nozzles.iter().map(|n| n.ratio).fold(0.0, f64::max)
    }

    /// Indices of nozzles in `state`
    pub fn indices_in(&self, state: NozzleState) -> Vec<usize> {
        self.nozzles
            .iter()
            .enumerate()
            .filter(|(_, n)| n.state == state)
            .map(|(i, _)| i)
            .collect()
    }

    /// Split into `(total_flow, ordered_ratios)`
    pub fn into_parts(self) -> (FlowRate, Vec<f64>) {
        let ratios = self.ratios();
        (self.total_flow, ratios)
    }
}

/// A physical limit was reached; the boom is still commanded but the target
/// application rate will not be met everywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SprayWarning {
    /// Even driving straight the nozzles need 100% duty or more
    BaselineSaturated {
        /// Straight-line flow one nozzle would need
        requested_flow: FlowRate,
        /// What one nozzle can deliver at the commanded pressure
        capacity: FlowRate,
    },

    /// Some nozzles would need more than 100% duty to follow the turn
    NozzleUnderspray {
        /// Affected nozzle indices
        nozzles: Vec<usize>,
        /// Highest requested duty (ratio × baseline), above 1.0
        peak_duty: f64,
    },

    /// Pivot-side nozzles moving backwards were shut off
    NozzlesShutOff {
        /// Affected nozzle indices
        nozzles: Vec<usize>,
    },
}

impl fmt::Display for SprayWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprayWarning::BaselineSaturated {
                requested_flow,
                capacity,
            } => write!(
                f,
                "baseline needs {requested_flow} per nozzle but capacity is {capacity}; underspraying at 100% duty cycle"
            ),
            SprayWarning::NozzleUnderspray { nozzles, peak_duty } => write!(
                f,
                "{} nozzles at 100% duty cycle and under applying (peak demand {:.0}%)",
                nozzles.len(),
                peak_duty * 100.0
            ),
            SprayWarning::NozzlesShutOff { nozzles } => {
                write!(f, "{} nozzles moving backwards and shut off", nozzles.len())
            }
        }
    }
}

/// Everything one driving command produces: baseline duty, per-nozzle
/// compensation, and the limits that were hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayReport {
    /// Straight-line duty cycle for the command
    pub baseline: DutyCycle,

    /// Per-nozzle compensation
    pub values: CompensatedValues,

    /// Physical limits reached, never empty when the rate is not met
    pub warnings: Vec<SprayWarning>,
}

impl SprayReport {
    /// Build a report and log every limit that was reached
    pub(crate) fn assess(
        baseline: DutyCycle,
        requested_flow: FlowRate,
        capacity: FlowRate,
        values: CompensatedValues,
    ) -> Self {
        let mut warnings = Vec::new();

        if baseline.is_saturated() {
            warnings.push(SprayWarning::BaselineSaturated {
                requested_flow,
                capacity,
            });
        }

        let underspraying: Vec<usize> = values
            .nozzles
            .iter()
            .enumerate()
            .filter(|(_, n)| baseline * n.ratio > 1.0)
            .map(|(i, _)| i)
            .collect();
        if !underspraying.is_empty() {
            let peak_duty = baseline * values.max_ratio();
            warn!(
                "{} nozzles need {:.0}% duty cycle, under applying",
                underspraying.len(),
                peak_duty * 100.0
            );
            warnings.push(SprayWarning::NozzleUnderspray {
                nozzles: underspraying,
                peak_duty,
            });
        }

        let shut_off = values.indices_in(NozzleState::ShutOff);
        if !shut_off.is_empty() {
            debug!("{} reversing nozzles shut off", shut_off.len());
            warnings.push(SprayWarning::NozzlesShutOff { nozzles: shut_off });
        }

        Self {
            baseline,
            values,
            warnings,
        }
    }

    /// Total delivered flow
    pub fn total_flow(&self) -> FlowRate {
        self.values.total_flow
    }

    /// Requested duty per nozzle (ratio × baseline); above 1.0 means underspray
    pub fn nozzle_duty_cycles(&self) -> Vec<f64> {
        self.values
            .nozzles
            .iter()
            .map(|n| self.baseline * n.ratio)
            .collect()
    }

    /// True when any part of the boom falls short of the target rate
    pub fn is_underspraying(&self) -> bool {
        self.warnings.iter().any(|w| {
            matches!(
                w,
                SprayWarning::BaselineSaturated { .. } | SprayWarning::NozzleUnderspray { .. }
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(ratio: f64, flow: f64, state: NozzleState) -> NozzleOutput {
        NozzleOutput {
            correction: ratio,
            ratio,
            flow: FlowRate::new(flow),
            state,
        }
    }

    fn sample_values() -> CompensatedValues {
        CompensatedValues {
            total_flow: FlowRate::new(0.97),
            nozzles: vec![
                output(3.0, 0.67, NozzleState::AtCapacity),
                output(1.1, 0.30, NozzleState::Spraying),
                NozzleOutput::disabled(),
                NozzleOutput {
                    correction: -0.5,
                    ratio: 0.0,
                    flow: FlowRate::ZERO,
                    state: NozzleState::ShutOff,
                },
            ],
        }
    }

    #[test]
    fn test_ratios_and_parts() {
        let values = sample_values();
        assert_eq!(values.ratios(), vec![3.0, 1.1, 0.0, 0.0]);
        assert_eq!(values.max_ratio(), 3.0);
        assert_eq!(values.indices_in(NozzleState::Disabled), vec![2]);

        let (total, ratios) = values.into_parts();
        assert_eq!(total, FlowRate::new(0.97));
        assert_eq!(ratios.len(), 4);
    }

    #[test]
    fn test_max_ratio_empty_boom() {
        let values = CompensatedValues {
            total_flow: FlowRate::ZERO,
            nozzles: Vec::new(),
        };
        assert_eq!(values.max_ratio(), 0.0);
    }

    #[test]
    fn test_assess_flags_underspray_and_shut_off() {
        let report = SprayReport::assess(
            DutyCycle::new(0.4),
            FlowRate::new(0.27),
            FlowRate::new(0.67),
            sample_values(),
        );

        assert!(report.is_underspraying());
        assert_eq!(
            report.warnings,
            vec![
                SprayWarning::NozzleUnderspray {
                    nozzles: vec![0],
                    peak_duty: 0.4 * 3.0,
                },
                SprayWarning::NozzlesShutOff { nozzles: vec![3] },
            ]
        );
    }

    #[test]
    fn test_assess_flags_saturated_baseline() {
        let values = CompensatedValues {
            total_flow: FlowRate::new(0.67),
            nozzles: vec![output(1.0, 0.67, NozzleState::AtCapacity)],
        };
        let report = SprayReport::assess(
            DutyCycle::FULL,
            FlowRate::new(0.9),
            FlowRate::new(0.67),
            values,
        );
        assert!(report.is_underspraying());
        assert!(matches!(
            report.warnings[0],
            SprayWarning::BaselineSaturated { .. }
        ));
    }

    #[test]
    fn test_nozzle_duty_cycles() {
        let report = SprayReport::assess(
            DutyCycle::new(0.5),
            FlowRate::new(0.3),
            FlowRate::new(0.67),
            sample_values(),
        );
        assert_eq!(report.nozzle_duty_cycles(), vec![1.5, 0.55, 0.0, 0.0]);
    }

    #[test]
    fn test_warning_display() {
        let warning = SprayWarning::NozzleUnderspray {
            nozzles: vec![0, 1, 2],
            peak_duty: 1.75,
        };
        assert_eq!(
            warning.to_string(),
            "3 nozzles at 100% duty cycle and under applying (peak demand 175%)"
        );
    }
}
