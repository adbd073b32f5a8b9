//! Fault current solver.
//!
//! This module provides the numerical engine of a fault study.
//!
//! ## Source resolution
//!
//! Ring systems give only the short-circuit capacity at each bus, so the
//! source impedances behind the buses are recovered first by solving a
//! quadratic per sequence network and keeping the root with positive
//! resistance. Radial systems use the terminal quantities directly.
//!
//! ## Sweep
//!
//! The fault is then moved along the line in steps of `Δp` percent. At each
//! fraction `p` the driving-point impedance seen from the fault is
//!
//! ```text
//! Z(p) = (z_A + p·z_L)·(z_B + (1 − p)·z_L) / (z_A + z_B + z_L)
//! ```
//!
//! and the per-unit fault current follows from the sequence impedances of the
//! fault type: `1/Z₁` for a three-phase fault, `3/(2·Z₁ + Z₀)` for a
//! single-phase one.

mod quadratic;
mod resolver;
mod sweep;

pub use quadratic::{select_physical_root, solve_quadratic};
pub use resolver::{
    bus_thevenin, resolve_ring_single_phase, resolve_ring_three_phase, resolve_sources, Sequence,
    SequenceSources, SourceImpedances,
};
pub use sweep::{compute_fault_sweep, sweep_positions, SweepConfig};

use crate::error::{FaultError, Result};
use crate::phasor::Complex64;

/// Default sweep step in percent of line length.
pub const DEFAULT_STEP: u32 = 10;

/// Magnitude below which an impedance or denominator counts as zero.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Divide, failing with [`FaultError::SingularNetwork`] on a zero denominator.
pub(crate) fn checked_div(num: Complex64, den: Complex64, context: &str) -> Result<Complex64> {
    if den.norm() <= SINGULAR_TOLERANCE {
        return Err(FaultError::singular(context));
    }
    Ok(num / den)
}
