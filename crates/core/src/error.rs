//! Error types for boom construction and command validation

use thiserror::Error;

/// Failures reported by boom construction, commands, and nozzle toggling.
///
/// Every variant is raised before any nozzle state is touched or any flow is
/// computed, so a returned error never leaves the boom half-updated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SprayError {
    /// A physical boom parameter or unit constant is zero, negative, or not finite
    #[error("Invalid boom configuration: {parameter} must be finite and positive, got {value}")]
    InvalidConfiguration {
        /// Name of the offending parameter (e.g. `"spacing"`, `"specific_gravity"`)
        parameter: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A nozzle index outside `0..nozzle_count`
    #[error("Nozzle index {index} is out of range for a boom of {nozzle_count} nozzles")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of nozzles on the boom
        nozzle_count: usize,
    },

    /// A driving command that cannot be compensated (e.g. zero speed)
    #[error("Invalid spray command: {parameter} {reason}, got {value}")]
    InvalidCommand {
        /// Name of the offending command input
        parameter: &'static str,
        /// What the input must satisfy
        reason: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl SprayError {
    /// Create error for a boom parameter that must be finite and positive.
    pub(crate) fn invalid_configuration(parameter: &'static str, value: f64) -> Self {
        Self::InvalidConfiguration { parameter, value }
    }

    /// Create error for a command input that failed validation.
    pub(crate) fn invalid_command(parameter: &'static str, reason: &'static str, value: f64) -> Self {
        Self::InvalidCommand {
            parameter,
            reason,
            value,
        }
    }
}
