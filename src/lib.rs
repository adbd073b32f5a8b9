//! # Faultsweep Core
//!
//! Short-circuit current profiles along a transmission line.
//!
//! This library provides:
//! - Per-unit base handling and phasor helpers
//! - Resolution of the source impedances behind the line terminals from
//!   their short-circuit capacities
//! - A sweep of the fault position along the line for ring and radial
//!   systems, with single- and three-phase faults
//! - Result series with chart projection and CSV export
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`network`] - Study inputs: system base, terminal data, line impedances
//! - [`solver`] - Source impedance resolution and the fault sweep
//! - [`report`] - Result series, formatting and export
//! - [`input`] - Impedance text parsing and case files (CLI only)
//! - [`phasor`] - Complex helpers in polar notation
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use faultsweep_core::network::{BaseSystem, FaultInputs, RadialInputs, ShortCircuitPower};
//! use faultsweep_core::{compute_fault_sweep, SweepConfig};
//!
//! let base = BaseSystem::new(138.0, 100.0)?;
//! let inputs = FaultInputs::Radial3Phase(RadialInputs {
//!     source_a: ShortCircuitPower::new(12.0, -80.0),
//!     source_b: ShortCircuitPower::new(7.0, -75.0),
//! });
//! let result = compute_fault_sweep(&base, &inputs, &SweepConfig::new().with_step(25))?;
//! assert_eq!(result.len(), 5);
//! println!("{}", result.to_csv());
//! # Ok::<(), faultsweep_core::FaultError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! faultsweep study.toml --step 5 --output results.csv
//! ```
//!
//! ## Fault Current Method
//!
//! Each bus is modelled as a source behind an impedance. For a fault at
//! fraction `p` of the line, the impedance seen from the fault is the two
//! sides of the line in parallel:
//!
//! 1. Ring systems first recover the source impedances from the
//!    short-circuit capacities (one quadratic per sequence network)
//! 2. The driving-point impedance `Z(p)` is evaluated per sequence
//! 3. The per-unit current is `1/Z₁` (three-phase) or `3/(2·Z₁ + Z₀)`
//!    (single-phase), scaled by the current base for the absolute value

pub mod error;
pub mod input;
pub mod network;
pub mod phasor;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use error::{FaultError, Result};
pub use network::{BaseSystem, FaultInputs, Topology, Unit};
pub use report::{SweepResult, SweepStep};
pub use solver::{compute_fault_sweep, SweepConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmFaultSweep;
