//! Sprayer boom: evenly spaced nozzles and boom-wide rate compensation
//!
//! The boom turns a target application rate into a baseline PWM duty cycle,
//! then for every yaw event asks each nozzle for its geometric correction,
//! caps nozzles at 100% duty, shuts off nozzles moving backwards, and sums the
//! flow the pump must supply.
//!
//! Data flows one way: boom command → nozzle correction → clamped nozzle
//! flow → boom aggregate. The only state that survives a command is each
//! nozzle's on/off flag.

pub mod config;
pub mod nozzle;
pub mod report;

pub use config::BoomConfig;
pub use nozzle::Nozzle;
pub use report::{CompensatedValues, NozzleOutput, NozzleState, SprayReport, SprayWarning};

use crate::core_types::units::{ApplicationRate, Distance, DutyCycle, FlowRate, Pressure, Speed, YawRate};
use crate::core_types::UnitSystem;
use crate::error::SprayError;
use crate::physics::FlowModel;
use nozzle::validate_motion;
use tracing::{debug, warn};

/// A sprayer boom owning its nozzles
///
/// Nozzle 0 is leftmost (most negative position); positions step by the
/// spacing and sum to zero.
#[derive(Debug, Clone)]
pub struct Boom {
    spacing: Distance,
    flow: FlowModel,
    nozzles: Vec<Nozzle>,
}

impl Boom {
    /// Build an imperial boom (gal/acre, ft, mph, psi)
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidConfiguration`] if `nozzle_count` is zero or
    /// `spacing`, `nominal_flow`, or `specific_gravity` is not finite and
    /// positive.
    pub fn new(
        nozzle_count: usize,
        spacing: Distance,
        nominal_flow: FlowRate,
        specific_gravity: f64,
    ) -> Result<Self, SprayError> {
        Self::with_units(
            nozzle_count,
            spacing,
            nominal_flow,
            specific_gravity,
            UnitSystem::IMPERIAL,
        )
    }

    /// Build a boom in an explicit unit system
    ///
    /// # Errors
    /// Same as [`Boom::new`], plus any unit constant that is not finite and
    /// positive.
    pub fn with_units(
        nozzle_count: usize,
        spacing: Distance,
        nominal_flow: FlowRate,
        specific_gravity: f64,
        units: UnitSystem,
    ) -> Result<Self, SprayError> {
        Self::from_config(&BoomConfig {
            nozzle_count,
            spacing,
            nominal_flow,
            specific_gravity,
            units,
        })
    }

    /// Build a boom from a configuration preset
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidConfiguration`] if any parameter of
    /// `config` is invalid.
    pub fn from_config(config: &BoomConfig) -> Result<Self, SprayError> {
        let flow = config.flow_model()?;
        let half_count = config.nozzle_count as f64 / 2.0;

        let nozzles = (0..config.nozzle_count)
            .map(|i| {
                let position = config.spacing * (i as f64 + 0.5 - half_count);
                Nozzle::new(config.spacing, position, flow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Built boom: {} nozzles, {:.2} spacing, {:.2} wide",
            nozzles.len(),
            config.spacing,
            config.width()
        );

        Ok(Self {
            spacing: config.spacing,
            flow,
            nozzles,
        })
    }

    /// Number of nozzles
    pub fn nozzle_count(&self) -> usize {
        self.nozzles.len()
    }

    /// Distance between adjacent nozzles
    pub fn spacing(&self) -> Distance {
        self.spacing
    }

    /// Overall boom width
    pub fn width(&self) -> Distance {
        self.spacing * self.nozzles.len() as f64
    }

    /// Shared hydraulics of every nozzle
    pub fn flow_model(&self) -> &FlowModel {
        &self.flow
    }

    /// Nozzles in boom order, leftmost first
    pub fn nozzles(&self) -> &[Nozzle] {
        &self.nozzles
    }

    /// Number of enabled nozzles
    pub fn enabled_count(&self) -> usize {
        self.nozzles.iter().filter(|n| n.is_on()).count()
    }

    /// Maximum flow one nozzle delivers at `pressure`
    pub fn capacity(&self, pressure: Pressure) -> FlowRate {
        self.flow.capacity(pressure)
    }

    /// Uncorrected flow one nozzle must deliver for `rate` at `speed`
    pub fn per_nozzle_flow(&self, rate: ApplicationRate, speed: Speed) -> FlowRate {
        self.flow.nozzle_flow(rate, speed, self.spacing)
    }

    /// Duty cycle a nozzle driving straight needs to hit `rate`
    ///
    /// Nothing requested is always 0, even with no pressure to spray it.
    /// Clamped to 1.0; a saturated result means the boom cannot deliver the
    /// rate at this speed and pressure and is logged as a warning.
    pub fn baseline_duty_cycle(
        &self,
        rate: ApplicationRate,
        speed: Speed,
        pressure: Pressure,
    ) -> DutyCycle {
        let requested = self.per_nozzle_flow(rate, speed);
        if requested == FlowRate::ZERO {
            return DutyCycle::OFF;
        }
        let capacity = self.capacity(pressure);
        let duty = DutyCycle::saturating(requested / capacity);

        if duty.is_saturated() {
            warn!(
                "Baseline duty cycle saturated: {} needed per nozzle, {} available at {} pressure",
                requested, capacity, pressure
            );
        }
        duty
    }

    /// Per-nozzle compensation for one driving command
    ///
    /// Each nozzle's straight-line flow is scaled by its correction ratio,
    /// capped at capacity, and shut off if negative. Disabled nozzles report
    /// ratio 0 and no flow. A capped nozzle still reports its full geometric
    /// ratio, so `ratio × baseline` exposes the underspray.
    ///
    /// # Errors
    /// Returns [`SprayError::InvalidCommand`] if `speed` is zero or `yaw_rate`
    /// is not finite. Nothing is computed for a rejected command.
    pub fn compensated_values(
        &self,
        rate: ApplicationRate,
        speed: Speed,
        pressure: Pressure,
        yaw_rate: YawRate,
    ) -> Result<CompensatedValues, SprayError> {
        validate_motion(speed, yaw_rate)?;

        let straight_flow = self.per_nozzle_flow(rate, speed);
        let capacity = self.capacity(pressure);

        let nozzles: Vec<NozzleOutput> = self
            .nozzles
            .iter()
            .map(|nozzle| nozzle.compensate(straight_flow, capacity, speed, yaw_rate))
            .collect();
        let total_flow: FlowRate = nozzles.iter().map(|n| n.flow).sum();

        debug!(
            "Compensated {} nozzles at {} speed, {} deg/s: {} total flow",
            nozzles.len(),
            speed,
            yaw_rate,
            total_flow
        );

        Ok(CompensatedValues {
            total_flow,
            nozzles,
        })
    }

    /// Baseline duty, compensation, and limit warnings for one command
    ///
    /// # Errors
    /// Same as [`Boom::compensated_values`].
    pub fn command(
        &self,
        rate: ApplicationRate,
        speed: Speed,
        pressure: Pressure,
        yaw_rate: YawRate,
    ) -> Result<SprayReport, SprayError> {
        let values = self.compensated_values(rate, speed, pressure, yaw_rate)?;
        let baseline = self.baseline_duty_cycle(rate, speed, pressure);

        Ok(SprayReport::assess(
            baseline,
            self.per_nozzle_flow(rate, speed),
            self.capacity(pressure),
            values,
        ))
    }

    /// Enable or disable a set of nozzles by index
    ///
    /// All indices are checked before any flag changes.
    ///
    /// # Errors
    /// Returns [`SprayError::IndexOutOfRange`] for the first index outside
    /// `0..nozzle_count`; no nozzle is toggled in that case.
    pub fn set_enabled<I>(&mut self, indices: I, enabled: bool) -> Result<(), SprayError>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: Vec<usize> = indices.into_iter().collect();
        let nozzle_count = self.nozzles.len();

        if let Some(&index) = indices.iter().find(|&&i| i >= nozzle_count) {
            return Err(SprayError::IndexOutOfRange {
                index,
                nozzle_count,
            });
        }

        for index in indices {
            self.nozzles[index].set_on(enabled);
        }
        Ok(())
    }
}
