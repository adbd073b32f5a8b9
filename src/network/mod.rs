//! Fault study network description and validation.
//!
//! This module provides the value types a fault study is built from: the
//! per-unit [`BaseSystem`], the short-circuit capacities measured at the two
//! line terminals, the line sequence impedances, and the [`FaultInputs`]
//! tagged union that fixes which of those a topology needs.

mod base;
mod types;
mod validate;

pub use base::{current_base, impedance_base, BaseSystem};
pub use types::*;
pub use validate::validate_inputs;
