//! Sprayer Boom Rate Compensation Core Library
//!
//! Models the flow control of a multi-nozzle agricultural sprayer boom driven
//! by pulse-width-modulated (PWM) nozzle valves. Given a target application
//! rate, road speed, supply pressure and yaw rate, it computes for every
//! nozzle the duty-cycle correction and flow that keep ground coverage uniform
//! while the boom sweeps through a turn.
//!
//! ## Model
//!
//! - Per-nozzle geometric speed correction during turns
//! - Orifice flow-pressure relationship with specific gravity correction
//! - Boom-wide aggregation with a 100% duty cap and reverse shut-off
//! - Underspray detection at baseline and per-nozzle level
//!
//! ```
//! use sprayer_core::{ApplicationRate, Boom, BoomConfig, Pressure, Speed, YawRate};
//!
//! let boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
//! let report = boom
//!     .command(
//!         ApplicationRate::new(10.0),
//!         Speed::new(8.0),
//!         Pressure::new(50.0),
//!         YawRate::new(240.0),
//!     )
//!     .unwrap();
//! assert!(report.is_underspraying());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Rate compensation model
pub mod boom;
pub mod physics;

// Scripted driving sequences
pub mod scenario;

// Re-export core types
pub use core_types::{
    ApplicationRate, Distance, DutyCycle, FlowRate, Pressure, Speed, UnitSystem, YawRate,
};
pub use error::SprayError;

// Re-export model types
pub use boom::{
    Boom, BoomConfig, CompensatedValues, Nozzle, NozzleOutput, NozzleState, SprayReport,
    SprayWarning,
};
pub use physics::FlowModel;
pub use scenario::{Scenario, ScenarioOutcome, ScenarioStep};
