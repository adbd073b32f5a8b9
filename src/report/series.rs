//! Fault current series.

use crate::network::Topology;
use crate::phasor::{Complex64, PhasorExt, Polar, PolarStyle};

/// Fault current at one position along the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStep {
    /// Fault position in percent of line length from bus A.
    pub percent: u32,
    /// Fault current in per-unit.
    pub current_pu: Complex64,
    /// Fault current scaled by the current base.
    pub current_amps: Complex64,
}

impl SweepStep {
    /// Per-unit current in report notation (`10.0000∡ -80.00°`).
    pub fn pu_polar(&self) -> Polar {
        Polar::new(self.current_pu, PolarStyle::Tight)
    }

    /// Absolute current in report notation (`4.1837 ∡ -80.00°`).
    pub fn amps_polar(&self) -> Polar {
        Polar::new(self.current_amps, PolarStyle::Spaced)
    }

    /// Position label, e.g. `"30%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// One point of the magnitude chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub pu: f64,
    pub amps: f64,
}

/// Ordered fault current profile of one study.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    topology: Topology,
    steps: Vec<SweepStep>,
}

impl SweepResult {
    pub fn new(topology: Topology, steps: Vec<SweepStep>) -> Self {
        Self { topology, steps }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn steps(&self) -> &[SweepStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepStep> {
        self.steps.iter()
    }

    /// Position labels with per-unit and absolute magnitudes.
    pub fn chart(&self) -> Vec<ChartPoint> {
        self.steps
            .iter()
            .map(|s| ChartPoint {
                label: s.label(),
                pu: s.current_pu.magnitude(),
                amps: s.current_amps.magnitude(),
            })
            .collect()
    }

    /// Step with the largest per-unit magnitude (first one on ties).
    pub fn peak(&self) -> Option<&SweepStep> {
        self.steps.iter().fold(None, |best: Option<&SweepStep>, s| match best {
            Some(b) if b.current_pu.magnitude() >= s.current_pu.magnitude() => Some(b),
            _ => Some(s),
        })
    }
}

impl<'a> IntoIterator for &'a SweepResult {
    type Item = &'a SweepStep;
    type IntoIter = std::slice::Iter<'a, SweepStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
