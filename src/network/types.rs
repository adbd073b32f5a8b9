//! Core types for the fault study inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::phasor::{Complex64, PhasorExt};

/// Unit in which short-circuit capacities are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Already per-unit on the system base.
    #[default]
    #[serde(rename = "pu")]
    Pu,
    /// Megavolt-amperes, divided by the base power.
    #[serde(rename = "MVA")]
    Mva,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Pu => write!(f, "pu"),
            Unit::Mva => write!(f, "MVA"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pu" | "p.u" | "p.u." => Ok(Unit::Pu),
            "mva" => Ok(Unit::Mva),
            other => Err(format!("unknown unit '{}' (expected 'pu' or 'MVA')", other)),
        }
    }
}

/// Network topology selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    #[serde(rename = "ring-1ph")]
    Ring1Phase,
    #[serde(rename = "ring-3ph")]
    Ring3Phase,
    #[serde(rename = "radial-1ph")]
    Radial1Phase,
    #[serde(rename = "radial-3ph")]
    Radial3Phase,
}

impl Topology {
    /// Whether the source impedances must be resolved from short-circuit data.
    pub fn is_ring(&self) -> bool {
        matches!(self, Topology::Ring1Phase | Topology::Ring3Phase)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Ring1Phase => "ring, single-phase fault",
            Topology::Ring3Phase => "ring, three-phase fault",
            Topology::Radial1Phase => "radial, single-phase fault",
            Topology::Radial3Phase => "radial, three-phase fault",
        };
        write!(f, "{}", name)
    }
}

/// A short-circuit capacity at a bus, as magnitude and angle in degrees.
///
/// The angle follows the conjugate convention and is never positive in a
/// valid study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortCircuitPower {
    pub magnitude: f64,
    #[serde(rename = "angle")]
    pub angle_deg: f64,
}

impl ShortCircuitPower {
    pub fn new(magnitude: f64, angle_deg: f64) -> Self {
        Self {
            magnitude,
            angle_deg,
        }
    }

    /// The capacity as a phasor in its own unit.
    pub fn to_phasor(&self) -> Complex64 {
        Complex64::from_polar_degrees(self.magnitude, self.angle_deg)
    }

    /// The capacity in per-unit on `power_base_mva`.
    pub fn to_pu(&self, unit: Unit, power_base_mva: f64) -> Complex64 {
        match unit {
            Unit::Pu => self.to_phasor(),
            Unit::Mva => self.to_phasor() / power_base_mva,
        }
    }
}

/// Single- and three-phase short-circuit capacities of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusShortCircuit {
    pub single_phase: ShortCircuitPower,
    pub three_phase: ShortCircuitPower,
}

/// Sequence impedances of the line, in ohms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineImpedance {
    pub positive_sequence: Complex64,
    pub zero_sequence: Option<Complex64>,
}

impl LineImpedance {
    pub fn positive(positive_sequence: Complex64) -> Self {
        Self {
            positive_sequence,
            zero_sequence: None,
        }
    }

    pub fn with_zero(positive_sequence: Complex64, zero_sequence: Complex64) -> Self {
        Self {
            positive_sequence,
            zero_sequence: Some(zero_sequence),
        }
    }
}

/// Ring system, single-phase fault: both sequence networks are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring1PhaseInputs {
    pub bus_a: BusShortCircuit,
    pub bus_b: BusShortCircuit,
    pub line_positive: Complex64,
    pub line_zero: Complex64,
}

/// Ring system, three-phase fault: only the positive sequence is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring3PhaseInputs {
    pub bus_a: ShortCircuitPower,
    pub bus_b: ShortCircuitPower,
    pub line_positive: Complex64,
}

/// Radial system: the two terminal quantities feed the fault directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialInputs {
    pub source_a: ShortCircuitPower,
    pub source_b: ShortCircuitPower,
}

/// Inputs of one fault study, tagged by topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultInputs {
    Ring1Phase(Ring1PhaseInputs),
    Ring3Phase(Ring3PhaseInputs),
    Radial1Phase(RadialInputs),
    Radial3Phase(RadialInputs),
}

impl FaultInputs {
    /// Build ring single-phase inputs from bus data and a line with both sequences.
    ///
    /// Returns `None` when the line has no zero-sequence impedance.
    pub fn ring_single_phase(
        bus_a: BusShortCircuit,
        bus_b: BusShortCircuit,
        line: LineImpedance,
    ) -> Option<Self> {
        Some(FaultInputs::Ring1Phase(Ring1PhaseInputs {
            bus_a,
            bus_b,
            line_positive: line.positive_sequence,
            line_zero: line.zero_sequence?,
        }))
    }

    pub fn topology(&self) -> Topology {
        match self {
            FaultInputs::Ring1Phase(_) => Topology::Ring1Phase,
            FaultInputs::Ring3Phase(_) => Topology::Ring3Phase,
            FaultInputs::Radial1Phase(_) => Topology::Radial1Phase,
            FaultInputs::Radial3Phase(_) => Topology::Radial3Phase,
        }
    }

    /// Every short-circuit capacity with its field path.
    pub fn short_circuit_fields(&self) -> Vec<(&'static str, ShortCircuitPower)> {
        match self {
            FaultInputs::Ring1Phase(r) => vec![
                ("bus_a.single_phase", r.bus_a.single_phase),
                ("bus_a.three_phase", r.bus_a.three_phase),
                ("bus_b.single_phase", r.bus_b.single_phase),
                ("bus_b.three_phase", r.bus_b.three_phase),
            ],
            FaultInputs::Ring3Phase(r) => vec![
                ("bus_a.three_phase", r.bus_a),
                ("bus_b.three_phase", r.bus_b),
            ],
            FaultInputs::Radial1Phase(r) | FaultInputs::Radial3Phase(r) => {
                vec![("bus_a", r.source_a), ("bus_b", r.source_b)]
            }
        }
    }

    /// Every line impedance with its field path.
    pub fn impedance_fields(&self) -> Vec<(&'static str, Complex64)> {
        match self {
            FaultInputs::Ring1Phase(r) => vec![
                ("line.positive_sequence", r.line_positive),
                ("line.zero_sequence", r.line_zero),
            ],
            FaultInputs::Ring3Phase(r) => vec![("line.positive_sequence", r.line_positive)],
            FaultInputs::Radial1Phase(_) | FaultInputs::Radial3Phase(_) => Vec::new(),
        }
    }
}
