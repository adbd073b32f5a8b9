//! Fault position sweep.

use log::{debug, trace};

use crate::error::{FaultError, Result};
use crate::network::{validate_inputs, BaseSystem, FaultInputs, Unit};
use crate::phasor::Complex64;
use crate::report::{SweepResult, SweepStep};

use super::resolver::{resolve_ring_single_phase, resolve_ring_three_phase, SourceImpedances};
use super::{checked_div, DEFAULT_STEP, SINGULAR_TOLERANCE};

/// Configuration for a fault sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Distance between fault positions, in percent of line length.
    pub step: u32,
    /// Unit of the short-circuit capacities.
    pub unit: Unit,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            unit: Unit::Pu,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep step (percent).
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Set the unit of the short-circuit capacities.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }
}

/// Fault positions visited for a step: `0, Δp, 2Δp, …` up to 100.
pub fn sweep_positions(step: u32) -> impl Iterator<Item = u32> {
    (0..=100u32).step_by(step.max(1) as usize)
}

/// The network seen from the fault, with every source known in per-unit.
enum FaultNetwork {
    Radial {
        source_a: Complex64,
        source_b: Complex64,
    },
    RingThreePhase {
        positive: SourceImpedances,
        line: Complex64,
    },
    RingSinglePhase {
        positive: SourceImpedances,
        zero: SourceImpedances,
        line_positive: Complex64,
        line_zero: Complex64,
    },
}

impl FaultNetwork {
    fn build(base: &BaseSystem, inputs: &FaultInputs, unit: Unit) -> Result<Self> {
        match inputs {
            FaultInputs::Radial1Phase(r) | FaultInputs::Radial3Phase(r) => {
                let source_a = r.source_a.to_pu(unit, base.power_mva());
                let source_b = r.source_b.to_pu(unit, base.power_mva());
                if source_a.norm() <= SINGULAR_TOLERANCE {
                    return Err(FaultError::singular("zero terminal quantity at bus A"));
                }
                if source_b.norm() <= SINGULAR_TOLERANCE {
                    return Err(FaultError::singular("zero terminal quantity at bus B"));
                }
                Ok(FaultNetwork::Radial { source_a, source_b })
            }
            FaultInputs::Ring3Phase(r) => Ok(FaultNetwork::RingThreePhase {
                positive: resolve_ring_three_phase(r, unit, base)?,
                line: r.line_positive / base.impedance_base(),
            }),
            FaultInputs::Ring1Phase(r) => {
                let sources = resolve_ring_single_phase(r, unit, base)?;
                Ok(FaultNetwork::RingSinglePhase {
                    positive: sources.positive,
                    zero: sources.zero,
                    line_positive: r.line_positive / base.impedance_base(),
                    line_zero: r.line_zero / base.impedance_base(),
                })
            }
        }
    }

    /// Per-unit fault current with the fault at fraction `p` of the line.
    fn current_pu(&self, p: f64) -> Result<Complex64> {
        match self {
            FaultNetwork::Radial { source_a, source_b } => {
                let (a, b) = (*source_a, *source_b);
                checked_div(
                    a * b,
                    a * p + b * (1.0 - p),
                    "radial sources cancel at the fault point",
                )
            }
            FaultNetwork::RingThreePhase { positive, line } => {
                let z1 = driving_point(positive, *line, p)?;
                checked_div(Complex64::new(1.0, 0.0), z1, "zero impedance at the fault point")
            }
            FaultNetwork::RingSinglePhase {
                positive,
                zero,
                line_positive,
                line_zero,
            } => {
                let z1 = driving_point(positive, *line_positive, p)?;
                let z0 = driving_point(zero, *line_zero, p)?;
                checked_div(
                    Complex64::new(3.0, 0.0),
                    z1 * 2.0 + z0,
                    "zero sequence impedance sum at the fault point",
                )
            }
        }
    }
}

/// Impedance seen from a fault at fraction `p`: the two sides of the line in parallel.
fn driving_point(sources: &SourceImpedances, line: Complex64, p: f64) -> Result<Complex64> {
    let left = sources.bus_a + line * p;
    let right = sources.bus_b + line * (1.0 - p);
    checked_div(
        left * right,
        sources.bus_a + sources.bus_b + line,
        "sources and line sum to zero",
    )
}

/// Sweep the fault along the line and collect the fault current profile.
///
/// Validates the inputs, resolves the source impedances for ring systems,
/// then evaluates the fault current at every position of
/// [`sweep_positions`]. Any error aborts the whole sweep.
pub fn compute_fault_sweep(
    base: &BaseSystem,
    inputs: &FaultInputs,
    config: &SweepConfig,
) -> Result<SweepResult> {
    validate_inputs(inputs, config.step)?;

    let topology = inputs.topology();
    let network = FaultNetwork::build(base, inputs, config.unit)?;
    let current_base = base.current_base();

    debug!(
        "sweeping {} every {}% (current base {:.6})",
        topology, config.step, current_base
    );

    let mut steps = Vec::new();
    for percent in sweep_positions(config.step) {
        let current_pu = network.current_pu(percent as f64 / 100.0)?;
        trace!("{:>3}%: {} pu", percent, current_pu);
        steps.push(SweepStep {
            percent,
            current_pu,
            current_amps: current_pu * current_base,
        });
    }

    Ok(SweepResult::new(topology, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{
        BusShortCircuit, RadialInputs, Ring1PhaseInputs, Ring3PhaseInputs, ShortCircuitPower,
        Topology,
    };
    use crate::phasor::PhasorExt;
    use approx::assert_relative_eq;

    fn radial(a: ShortCircuitPower, b: ShortCircuitPower) -> FaultInputs {
        FaultInputs::Radial3Phase(RadialInputs {
            source_a: a,
            source_b: b,
        })
    }

    #[test]
    fn test_positions_stop_at_largest_multiple() {
        assert_eq!(sweep_positions(30).collect::<Vec<_>>(), vec![0, 30, 60, 90]);
        assert_eq!(sweep_positions(50).collect::<Vec<_>>(), vec![0, 50, 100]);
        assert_eq!(sweep_positions(100).collect::<Vec<_>>(), vec![0, 100]);
        assert_eq!(sweep_positions(1).count(), 101);
    }

    #[test]
    fn test_radial_equal_sources_scenario() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let source = ShortCircuitPower::new(10.0, 0.0);
        let config = SweepConfig::new().with_step(50);

        let result = compute_fault_sweep(&base, &radial(source, source), &config).unwrap();
        let percents: Vec<u32> = result.steps().iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![0, 50, 100]);

        // (10·10) / (10·p + 10·(1 − p)) = 10 at every position
        for step in result.steps() {
            assert_relative_eq!(step.current_pu.magnitude(), 10.0, epsilon = 1e-12);
            assert_relative_eq!(step.current_pu.angle_degrees(), 0.0, epsilon = 1e-9);
            assert_relative_eq!(
                step.current_amps.magnitude(),
                10.0 * base.current_base(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_radial_endpoints_and_symmetry() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let a = ShortCircuitPower::new(12.0, -80.0);
        let b = ShortCircuitPower::new(7.0, -70.0);
        let config = SweepConfig::new().with_step(10);

        let result = compute_fault_sweep(&base, &radial(a, b), &config).unwrap();
        let steps = result.steps();
        assert_relative_eq!(steps[0].current_pu.magnitude(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(steps[0].current_pu.angle_degrees(), -80.0, epsilon = 1e-9);
        assert_relative_eq!(steps[10].current_pu.magnitude(), 7.0, epsilon = 1e-9);

        let same = ShortCircuitPower::new(9.0, -75.0);
        let result = compute_fault_sweep(&base, &radial(same, same), &config).unwrap();
        let steps = result.steps();
        for i in 0..steps.len() {
            let mirror = &steps[steps.len() - 1 - i];
            assert_relative_eq!(steps[i].current_pu.re, mirror.current_pu.re, epsilon = 1e-9);
            assert_relative_eq!(steps[i].current_pu.im, mirror.current_pu.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let base = BaseSystem::new(69.0, 100.0).unwrap();
        let inputs = radial(ShortCircuitPower::new(5.0, -60.0), ShortCircuitPower::new(3.0, -85.0));
        let config = SweepConfig::new().with_step(7);

        let first = compute_fault_sweep(&base, &inputs, &config).unwrap();
        let second = compute_fault_sweep(&base, &inputs, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pu_and_mva_give_identical_series() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let config = SweepConfig::new().with_step(25);

        let pu = radial(ShortCircuitPower::new(12.0, -80.0), ShortCircuitPower::new(7.0, -70.0));
        let mva = radial(
            ShortCircuitPower::new(1200.0, -80.0),
            ShortCircuitPower::new(700.0, -70.0),
        );

        let from_pu = compute_fault_sweep(&base, &pu, &config).unwrap();
        let from_mva = compute_fault_sweep(&base, &mva, &config.with_unit(Unit::Mva)).unwrap();
        assert_eq!(from_pu.len(), from_mva.len());
        for (x, y) in from_pu.steps().iter().zip(from_mva.steps()) {
            assert_eq!(x.percent, y.percent);
            assert_relative_eq!(x.current_pu.re, y.current_pu.re, epsilon = 1e-9);
            assert_relative_eq!(x.current_pu.im, y.current_pu.im, epsilon = 1e-9);
        }
        assert_eq!(from_pu.to_csv(), from_mva.to_csv());
    }

    #[test]
    fn test_ring_three_phase_profile() {
        // z_A = 1, z_B = 2, z_L = 1 on a 1 Ω impedance base.
        let base = BaseSystem::new(10.0, 100.0).unwrap();
        let inputs = FaultInputs::Ring3Phase(Ring3PhaseInputs {
            bus_a: ShortCircuitPower::new(4.0 / 3.0, 0.0),
            bus_b: ShortCircuitPower::new(1.0, 0.0),
            line_positive: Complex64::new(1.0, 0.0),
        });
        let config = SweepConfig::new().with_step(50);

        let result = compute_fault_sweep(&base, &inputs, &config).unwrap();
        let steps = result.steps();
        assert_eq!(result.topology(), Topology::Ring3Phase);
        // Ends reproduce the bus capacities.
        assert_relative_eq!(steps[0].current_pu.re, 4.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(steps[2].current_pu.re, 1.0, epsilon = 1e-9);
        // Midpoint: 4 / ((1 + 0.5)(2 + 0.5)) = 16/15
        assert_relative_eq!(steps[1].current_pu.re, 16.0 / 15.0, epsilon = 1e-9);
        assert_relative_eq!(steps[1].current_pu.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ring_three_phase_no_physical_solution() {
        let base = BaseSystem::new(10.0, 100.0).unwrap();
        let inputs = FaultInputs::Ring3Phase(Ring3PhaseInputs {
            bus_a: ShortCircuitPower::new(1.0 / 3.0, 0.0),
            bus_b: ShortCircuitPower::new(1.0, 0.0),
            line_positive: Complex64::new(1.0, 0.0),
        });
        let err = compute_fault_sweep(&base, &inputs, &SweepConfig::new()).unwrap_err();
        assert!(err.is_no_physical_solution());
    }

    #[test]
    fn test_ring_single_phase_profile() {
        // Positive: z_A = z_B = 1, z_L1 = 2. Zero: z_A = 1, z_B = 2, z_L0 = 1.
        // Driving points: Z₁ = Z₀ = 0.75 at A, Z₁ = 0.75 and Z₀ = 1 at B.
        let base = BaseSystem::new(10.0, 100.0).unwrap();
        let bus_a = BusShortCircuit {
            single_phase: ShortCircuitPower::new(3.0 / 2.25, 0.0),
            three_phase: ShortCircuitPower::new(4.0 / 3.0, 0.0),
        };
        let bus_b = BusShortCircuit {
            single_phase: ShortCircuitPower::new(3.0 / 2.5, 0.0),
            three_phase: ShortCircuitPower::new(4.0 / 3.0, 0.0),
        };
        let inputs = FaultInputs::Ring1Phase(Ring1PhaseInputs {
            bus_a,
            bus_b,
            line_positive: Complex64::new(2.0, 0.0),
            line_zero: Complex64::new(1.0, 0.0),
        });
        let config = SweepConfig::new().with_step(50);

        let result = compute_fault_sweep(&base, &inputs, &config).unwrap();
        let steps = result.steps();
        assert_relative_eq!(steps[0].current_pu.re, 3.0 / 2.25, epsilon = 1e-9);
        assert_relative_eq!(steps[2].current_pu.re, 3.0 / 2.5, epsilon = 1e-9);
        // Midpoint: Z₁ = 2·2/4 = 1, Z₀ = 1.5·2.5/4 = 0.9375
        assert_relative_eq!(steps[1].current_pu.re, 3.0 / 2.9375, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_source_is_singular() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let inputs = radial(ShortCircuitPower::new(0.0, 0.0), ShortCircuitPower::new(5.0, 0.0));
        assert!(matches!(
            compute_fault_sweep(&base, &inputs, &SweepConfig::new()),
            Err(FaultError::SingularNetwork { .. })
        ));
    }

    #[test]
    fn test_cancelling_sources_abort_whole_sweep() {
        // 10∠0° and 10∠−180° cancel at the midpoint.
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let inputs = radial(
            ShortCircuitPower::new(10.0, 0.0),
            ShortCircuitPower::new(10.0, -180.0),
        );
        let config = SweepConfig::new().with_step(50);
        assert!(matches!(
            compute_fault_sweep(&base, &inputs, &config),
            Err(FaultError::SingularNetwork { .. })
        ));
    }

    #[test]
    fn test_export_rounds_exact_ties_up() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let source = ShortCircuitPower::new(1.03125, 0.0);
        let config = SweepConfig::new().with_step(100);
        let result = compute_fault_sweep(&base, &radial(source, source), &config).unwrap();
        let csv = result.to_csv();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("0%,1.0313∡ 0.00°,"));
        assert!(rows[1].starts_with("100%,1.0313∡ 0.00°,"));
    }

    #[test]
    fn test_step_above_line_length_visits_first_bus_only() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let source = ShortCircuitPower::new(10.0, 0.0);
        let config = SweepConfig::new().with_step(150);
        let result = compute_fault_sweep(&base, &radial(source, source), &config).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.steps()[0].percent, 0);
        assert_eq!(sweep_positions(150).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_invalid_inputs_rejected_before_resolving() {
        let base = BaseSystem::new(138.0, 100.0).unwrap();
        let inputs = radial(ShortCircuitPower::new(10.0, 30.0), ShortCircuitPower::new(5.0, 0.0));
        assert!(matches!(
            compute_fault_sweep(&base, &inputs, &SweepConfig::new()),
            Err(FaultError::AngleConventionViolation { .. })
        ));
        let inputs = radial(ShortCircuitPower::new(10.0, 0.0), ShortCircuitPower::new(5.0, 0.0));
        assert!(matches!(
            compute_fault_sweep(&base, &inputs, &SweepConfig::new().with_step(0)),
            Err(FaultError::InvalidStep { .. })
        ));
    }
}
