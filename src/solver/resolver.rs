//! Source impedance resolution for ring systems.
//!
//! A ring study knows the short-circuit capacity at each end of the line but
//! not the source impedances behind the buses. For one sequence network with
//! sources `z_A`, `z_B` and line `z_L`, the driving-point impedances are
//!
//! ```text
//! a = z_A·(z_B + z_L) / D      b = z_B·(z_A + z_L) / D      D = z_A + z_B + z_L
//! ```
//!
//! Eliminating `z_B` leaves a quadratic in the admittance `x = 1/z_A`:
//!
//! ```text
//! a·z_L²·x² + z_L·(2a − z_L)·x + (a − b − z_L) = 0
//! ```
//!
//! after which `z_B = b·(z_A + z_L) / (z_A + z_L − b)`.

use log::{debug, warn};

use crate::error::{FaultError, Result};
use crate::network::{BaseSystem, BusShortCircuit, Ring1PhaseInputs, Ring3PhaseInputs, Unit};
use crate::phasor::Complex64;

use super::checked_div;
use super::quadratic::{select_physical_root, solve_quadratic};

/// Symmetrical-component sequence network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Positive,
    Zero,
}

impl Sequence {
    pub fn name(&self) -> &'static str {
        match self {
            Sequence::Positive => "positive",
            Sequence::Zero => "zero",
        }
    }
}

/// Per-unit source impedances behind the two buses of one sequence network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceImpedances {
    pub bus_a: Complex64,
    pub bus_b: Complex64,
}

/// Positive- and zero-sequence sources of a ring system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSources {
    pub positive: SourceImpedances,
    pub zero: SourceImpedances,
}

/// Driving-point impedances of a bus from its short-circuit capacities.
///
/// Returns `(positive, zero)`: the positive-sequence impedance is `1/P₃`,
/// the zero-sequence one the composite `3/P₁ − 2/P₃`.
pub fn bus_thevenin(
    bus: &BusShortCircuit,
    unit: Unit,
    base: &BaseSystem,
) -> Result<(Complex64, Complex64)> {
    let one = Complex64::new(1.0, 0.0);
    let p1 = bus.single_phase.to_pu(unit, base.power_mva());
    let p3 = bus.three_phase.to_pu(unit, base.power_mva());

    let positive = checked_div(one, p3, "zero three-phase short-circuit capacity")?;
    let single = checked_div(one, p1, "zero single-phase short-circuit capacity")?;

    Ok((positive, single * 3.0 - positive * 2.0))
}

/// Resolve the source impedances of one sequence network.
///
/// `thevenin_a` and `thevenin_b` are the driving-point impedances at each
/// bus, `line` the per-unit line impedance of the same sequence.
pub fn resolve_sources(
    sequence: Sequence,
    thevenin_a: Complex64,
    thevenin_b: Complex64,
    line: Complex64,
) -> Result<SourceImpedances> {
    let a = thevenin_a;
    let b = thevenin_b;
    let z = line;

    let roots = solve_quadratic(a * z * z, z * (a * 2.0 - z), a - b - z)?;

    let admittance = match select_physical_root(&roots) {
        Some(root) => root,
        None => {
            warn!(
                "{} sequence: no root with positive real part among {:?}",
                sequence.name(),
                roots
            );
            return Err(FaultError::NoPhysicalSolution {
                sequence: sequence.name(),
            });
        }
    };

    let bus_a = checked_div(Complex64::new(1.0, 0.0), admittance, "zero source admittance")?;
    let bus_b = checked_div(b * (bus_a + z), bus_a + z - b, "bus B source is unbounded")?;

    debug!(
        "{} sequence sources: z_A = {}, z_B = {}",
        sequence.name(),
        bus_a,
        bus_b
    );

    Ok(SourceImpedances { bus_a, bus_b })
}

/// Resolve the positive-sequence sources of a ring three-phase study.
pub fn resolve_ring_three_phase(
    inputs: &Ring3PhaseInputs,
    unit: Unit,
    base: &BaseSystem,
) -> Result<SourceImpedances> {
    let one = Complex64::new(1.0, 0.0);
    let thevenin_a = checked_div(
        one,
        inputs.bus_a.to_pu(unit, base.power_mva()),
        "zero short-circuit capacity at bus A",
    )?;
    let thevenin_b = checked_div(
        one,
        inputs.bus_b.to_pu(unit, base.power_mva()),
        "zero short-circuit capacity at bus B",
    )?;
    let line = inputs.line_positive / base.impedance_base();

    resolve_sources(Sequence::Positive, thevenin_a, thevenin_b, line)
}

/// Resolve both sequence networks of a ring single-phase study.
///
/// Fails as soon as either sequence has no physical solution.
pub fn resolve_ring_single_phase(
    inputs: &Ring1PhaseInputs,
    unit: Unit,
    base: &BaseSystem,
) -> Result<SequenceSources> {
    let (positive_a, zero_a) = bus_thevenin(&inputs.bus_a, unit, base)?;
    let (positive_b, zero_b) = bus_thevenin(&inputs.bus_b, unit, base)?;

    let z_base = base.impedance_base();
    let positive = resolve_sources(
        Sequence::Positive,
        positive_a,
        positive_b,
        inputs.line_positive / z_base,
    )?;
    let zero = resolve_sources(Sequence::Zero, zero_a, zero_b, inputs.line_zero / z_base)?;

    Ok(SequenceSources { positive, zero })
}
