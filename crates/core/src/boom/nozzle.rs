//! A single spray outlet mounted on the boom
//!
//! During a turn every point of the boom sweeps the ground at a different
//! speed. A nozzle at lateral offset `x` (positive right of centre) moves at
//!
//! ```text
//! v_nozzle = v + (-yaw / 360) × x
//! ```
//!
//! and must scale its flow by `v_nozzle / v` to keep the applied volume per
//! area constant. With this arithmetic a positive (clockwise) yaw slows the
//! right side of the boom and speeds up the left side.

use super::report::{NozzleOutput, NozzleState};
use crate::core_types::units::{
    is_positive_finite, ApplicationRate, Distance, FlowRate, Pressure, Speed, YawRate,
};
use crate::error::SprayError;
use crate::physics::{cap_at_capacity, shut_off_reversing, FlowModel, ReverseClamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One spray outlet at a fixed lateral offset from boom centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nozzle {
    /// Lateral swath this nozzle covers (the boom spacing)
    width: Distance,

    /// Signed offset from boom centre; negative is left
    /// Fixed at construction, it encodes the physical mounting order
    position: Distance,

    /// Whether the section valve feeding this nozzle is enabled
    on: bool,

    /// Hydraulics of the tip and spray mix
    flow: FlowModel,
}

impl Nozzle {
    /// Create an enabled nozzle
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidConfiguration`] if `width` is not finite
    /// and positive.
    pub fn new(width: Distance, position: Distance, flow: FlowModel) -> Result<Self, SprayError> {
        if !is_positive_finite(width.value()) {
            return Err(SprayError::invalid_configuration("width", width.value()));
        }
        if !position.value().is_finite() {
            return Err(SprayError::invalid_configuration(
                "position",
                position.value(),
            ));
        }

        Ok(Self {
            width,
            position,
            on: true,
            flow,
        })
    }

    /// Lateral swath this nozzle covers
    #[inline]
    pub fn width(&self) -> Distance {
        self.width
    }

    /// Signed offset from boom centre
    #[inline]
    pub fn position(&self) -> Distance {
        self.position
    }

    /// Whether the nozzle is enabled
    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Enable or disable the nozzle
    #[inline]
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Hydraulics this nozzle was mounted with
    #[inline]
    pub fn flow_model(&self) -> &FlowModel {
        &self.flow
    }

    /// Ratio of this nozzle's ground speed to the vehicle's ground speed
    ///
    /// 1.0 when driving straight or for a centred nozzle. Below zero the
    /// nozzle point travels backwards and must be shut off by the caller.
    /// The result can be applied to PWM duty, speed, or volume alike.
    pub fn change_ratio(&self, speed: Speed, yaw_rate: YawRate) -> f64 {
        let speed = self.flow.units().distance_per_second(speed);
        let speed_difference = yaw_rate.turns_per_second() * -self.position.value();
        (speed_difference + speed) / speed
    }

    /// PWM adjustment factor and compensated flow for one command
    ///
    /// A disabled nozzle returns `(0, 0)`. Flow is capped at the tip's
    /// capacity at `pressure`; a reversing nozzle reports zero flow but keeps
    /// its negative adjustment so the caller can see why.
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidCommand`] if `speed` is zero or `yaw_rate`
    /// is not finite.
    pub fn pwm_and_rate(
        &self,
        rate: ApplicationRate,
        speed: Speed,
        pressure: Pressure,
        yaw_rate: YawRate,
    ) -> Result<(f64, FlowRate), SprayError> {
        validate_motion(speed, yaw_rate)?;

        let straight_flow = self.flow.nozzle_flow(rate, speed, self.width);
        let output = self.compensate(
            straight_flow,
            self.flow.capacity(pressure),
            speed,
            yaw_rate,
        );
        Ok((output.correction, output.flow))
    }

    /// Apply this nozzle's correction to the straight-line flow and run both
    /// envelope clamps
    pub(crate) fn compensate(
        &self,
        straight_flow: FlowRate,
        capacity: FlowRate,
        speed: Speed,
        yaw_rate: YawRate,
    ) -> NozzleOutput {
        if !self.on {
            return NozzleOutput::disabled();
        }

        let correction = self.change_ratio(speed, yaw_rate);
        let capped = cap_at_capacity(straight_flow.value() * correction, capacity);

        match shut_off_reversing(correction, capped.flow) {
            ReverseClamp::ShutOff => NozzleOutput {
                correction,
                ratio: 0.0,
                flow: FlowRate::ZERO,
                state: NozzleState::ShutOff,
            },
            ReverseClamp::Forward { ratio, flow } => NozzleOutput {
                correction,
                ratio,
                flow,
                state: if capped.capped {
                    NozzleState::AtCapacity
                } else {
                    NozzleState::Spraying
                },
            },
        }
    }
}

/// Reject commands the correction ratio cannot be evaluated for
pub(crate) fn validate_motion(speed: Speed, yaw_rate: YawRate) -> Result<(), SprayError> {
    if !is_positive_finite(speed.value()) {
        return Err(SprayError::invalid_command(
            "speed",
            "must be finite and strictly positive",
            speed.value(),
        ));
    }
    if !yaw_rate.degrees_per_second().is_finite() {
        return Err(SprayError::invalid_command(
            "yaw_rate",
            "must be finite",
            yaw_rate.degrees_per_second(),
        ));
    }
    Ok(())
}

impl fmt::Display for Nozzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nozzle at {:.2} with {:.2} width",
            self.position.value(),
            self.width.value()
        )
    }
}
