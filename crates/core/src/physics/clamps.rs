//! Physical envelope clamps applied to a compensated nozzle demand
//!
//! Two independent limits act on every nozzle:
//!
//! 1. **Capacity**: a valve cannot be open more than 100% of the PWM period,
//!    so delivered flow never exceeds the tip's capacity at the supply pressure.
//!    The geometric correction ratio is left untouched.
//! 2. **Reverse**: a nozzle whose boom point moves backwards over the ground
//!    during a tight turn is shut off; both its flow and its ratio become zero.
//!
//! The capacity clamp runs first. A negative demand passes through it
//! unchanged and is then caught by the reverse clamp.

use crate::core_types::units::FlowRate;

/// Flow after the capacity clamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedFlow {
    /// Demand limited to capacity; still negative for a reversing nozzle
    pub flow: f64,
    /// True when the demand exceeded capacity
    pub capped: bool,
}

/// Limit a compensated demand to the nozzle's capacity
pub fn cap_at_capacity(demand: f64, capacity: FlowRate) -> CappedFlow {
    if demand > capacity.value() {
        CappedFlow {
            flow: capacity.value(),
            capped: true,
        }
    } else {
        CappedFlow {
            flow: demand,
            capped: false,
        }
    }
}

/// Outcome of the reverse clamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReverseClamp {
    /// The nozzle travels forward and sprays `flow` with correction `ratio`
    Forward { ratio: f64, flow: FlowRate },
    /// The nozzle travels backward over the ground and is shut off this cycle
    ShutOff,
}

/// Shut off a nozzle whose capped flow is negative
///
/// A negative ratio also shuts the nozzle off, so a zero-rate command cannot
/// report a backwards nozzle as spraying. A ratio or flow that is not finite
/// never reaches the valve.
pub fn shut_off_reversing(ratio: f64, flow: f64) -> ReverseClamp {
    if !ratio.is_finite() || !flow.is_finite() || flow < 0.0 || ratio < 0.0 {
        ReverseClamp::ShutOff
    } else {
        ReverseClamp::Forward {
            ratio,
            flow: FlowRate::new(flow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_clamp_caps_excess_demand() {
        let capped = cap_at_capacity(0.9, FlowRate::new(0.67));
        assert!(capped.capped);
        assert_eq!(capped.flow, 0.67);
    }

    #[test]
    fn test_capacity_clamp_passes_demand_below_capacity() {
        let capped = cap_at_capacity(0.27, FlowRate::new(0.67));
        assert!(!capped.capped);
        assert_eq!(capped.flow, 0.27);
    }

    #[test]
    fn test_capacity_clamp_at_exact_capacity_is_not_capped() {
        let capped = cap_at_capacity(0.67, FlowRate::new(0.67));
        assert!(!capped.capped);
    }

    #[test]
    fn test_capacity_clamp_leaves_negative_demand() {
        let capped = cap_at_capacity(-0.3, FlowRate::new(0.67));
        assert!(!capped.capped);
        assert_eq!(capped.flow, -0.3);
    }

    #[test]
    fn test_reverse_clamp_shuts_off_negative_flow() {
        assert_eq!(shut_off_reversing(-1.2, -0.3), ReverseClamp::ShutOff);
    }

    #[test]
    fn test_reverse_clamp_keeps_forward_ratio() {
        // Ratio is the geometric correction, untouched even when flow was capped
        assert_eq!(
            shut_off_reversing(2.5, 0.67),
            ReverseClamp::Forward {
                ratio: 2.5,
                flow: FlowRate::new(0.67)
            }
        );
    }

    #[test]
    fn test_reverse_clamp_zero_flow_is_forward() {
        assert_eq!(
            shut_off_reversing(0.0, 0.0),
            ReverseClamp::Forward {
                ratio: 0.0,
                flow: FlowRate::ZERO
            }
        );
    }

    #[test]
    fn test_reverse_clamp_zero_rate_backwards_nozzle() {
        // No rate commanded: demand is -0.0 but the nozzle still travels backwards
        assert_eq!(shut_off_reversing(-0.8, -0.0), ReverseClamp::ShutOff);
    }

    #[test]
    fn test_reverse_clamp_shuts_off_non_finite() {
        assert_eq!(shut_off_reversing(f64::NAN, f64::NAN), ReverseClamp::ShutOff);
        assert_eq!(shut_off_reversing(f64::INFINITY, 0.67), ReverseClamp::ShutOff);
        assert_eq!(shut_off_reversing(1.0, f64::INFINITY), ReverseClamp::ShutOff);
    }
}
