//! TOML case files for the command-line front-end.
//!
//! ```toml
//! topology = "ring-1ph"
//! unit = "MVA"
//! step = 10
//!
//! [base]
//! voltage_kv = 138.0
//! power_mva = 100.0
//!
//! [bus_a]
//! single_phase = { magnitude = 1200.0, angle = -80.0 }
//! three_phase = { magnitude = 1500.0, angle = -85.0 }
//!
//! [bus_b]
//! single_phase = { magnitude = 900.0, angle = -78.0 }
//! three_phase = { magnitude = 1100.0, angle = -84.0 }
//!
//! [line]
//! positive_sequence = "4+20i"
//! zero_sequence = "12+60i"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FaultError, Result};
use crate::network::{
    BaseSystem, BusShortCircuit, FaultInputs, LineImpedance, RadialInputs, Ring3PhaseInputs,
    ShortCircuitPower, Topology, Unit,
};
use crate::solver::{SweepConfig, DEFAULT_STEP};

use super::parse_impedance;

/// `[base]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseSection {
    pub voltage_kv: f64,
    pub power_mva: f64,
}

/// `[bus_a]` / `[bus_b]` sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BusSection {
    pub single_phase: Option<ShortCircuitPower>,
    pub three_phase: Option<ShortCircuitPower>,
}

/// `[line]` section, impedances in `a+bi` ohms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSection {
    pub positive_sequence: Option<String>,
    pub zero_sequence: Option<String>,
}

fn default_step() -> u32 {
    DEFAULT_STEP
}

/// A fault study as written in a case file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub topology: Topology,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default = "default_step")]
    pub step: u32,
    pub base: BaseSection,
    #[serde(default)]
    pub bus_a: BusSection,
    #[serde(default)]
    pub bus_b: BusSection,
    #[serde(default)]
    pub line: LineSection,
}

/// Everything a sweep needs, decoded from a case file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultStudy {
    pub base: BaseSystem,
    pub inputs: FaultInputs,
    pub config: SweepConfig,
}

/// Read and decode a case file.
pub fn load_case_file(path: &Path) -> Result<CaseFile> {
    let content = std::fs::read_to_string(path).map_err(|e| FaultError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    CaseFile::from_toml_str(&content, &path.display().to_string())
}

impl CaseFile {
    /// Decode a case file; `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FaultError::case_file(origin, e.to_string()))
    }

    /// Build the study, picking the fields the topology needs.
    pub fn into_study(self, origin: &str) -> Result<FaultStudy> {
        let base = BaseSystem::new(self.base.voltage_kv, self.base.power_mva)?;
        let config = SweepConfig::new().with_step(self.step).with_unit(self.unit);
        let topology = self.topology;

        let missing = |field: &str| {
            FaultError::case_file(
                origin,
                format!("topology '{}' requires {}", topology, field),
            )
        };
        let require = |value: Option<ShortCircuitPower>, field: &str| {
            value.ok_or_else(|| missing(field))
        };
        let line = || -> Result<LineImpedance> {
            let positive = match &self.line.positive_sequence {
                Some(text) => parse_impedance(text)?,
                None => return Err(missing("[line].positive_sequence")),
            };
            match &self.line.zero_sequence {
                Some(text) => Ok(LineImpedance::with_zero(positive, parse_impedance(text)?)),
                None => Ok(LineImpedance::positive(positive)),
            }
        };

        let inputs = match topology {
            Topology::Ring1Phase => {
                let bus_a = BusShortCircuit {
                    single_phase: require(self.bus_a.single_phase, "[bus_a].single_phase")?,
                    three_phase: require(self.bus_a.three_phase, "[bus_a].three_phase")?,
                };
                let bus_b = BusShortCircuit {
                    single_phase: require(self.bus_b.single_phase, "[bus_b].single_phase")?,
                    three_phase: require(self.bus_b.three_phase, "[bus_b].three_phase")?,
                };
                FaultInputs::ring_single_phase(bus_a, bus_b, line()?)
                    .ok_or_else(|| missing("[line].zero_sequence"))?
            }
            Topology::Ring3Phase => FaultInputs::Ring3Phase(Ring3PhaseInputs {
                bus_a: require(self.bus_a.three_phase, "[bus_a].three_phase")?,
                bus_b: require(self.bus_b.three_phase, "[bus_b].three_phase")?,
                line_positive: line()?.positive_sequence,
            }),
            Topology::Radial1Phase => FaultInputs::Radial1Phase(RadialInputs {
                source_a: require(self.bus_a.single_phase, "[bus_a].single_phase")?,
                source_b: require(self.bus_b.single_phase, "[bus_b].single_phase")?,
            }),
            Topology::Radial3Phase => FaultInputs::Radial3Phase(RadialInputs {
                source_a: require(self.bus_a.three_phase, "[bus_a].three_phase")?,
                source_b: require(self.bus_b.three_phase, "[bus_b].three_phase")?,
            }),
        };

        Ok(FaultStudy {
            base,
            inputs,
            config,
        })
    }
}
