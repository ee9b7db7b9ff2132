//! Physics of nozzle delivery: flow-pressure model and envelope clamps

pub mod clamps;
pub mod flow_model;

pub use clamps::{cap_at_capacity, shut_off_reversing, CappedFlow, ReverseClamp};
pub use flow_model::FlowModel;
