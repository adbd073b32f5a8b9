//! Per-unit system base.

use crate::error::{FaultError, Result};

/// Voltage and power bases of the study.
///
/// Construction enforces both bases strictly positive, so every derived
/// quantity is well-defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSystem {
    voltage_kv: f64,
    power_mva: f64,
}

impl BaseSystem {
    /// Create a base from line voltage (kV) and three-phase power (MVA).
    pub fn new(voltage_kv: f64, power_mva: f64) -> Result<Self> {
        check_base("base voltage", voltage_kv)?;
        check_base("base power", power_mva)?;
        Ok(Self {
            voltage_kv,
            power_mva,
        })
    }

    /// Base voltage in kV.
    pub fn voltage_kv(&self) -> f64 {
        self.voltage_kv
    }

    /// Base power in MVA.
    pub fn power_mva(&self) -> f64 {
        self.power_mva
    }

    /// Impedance base `V² / S` in ohms.
    pub fn impedance_base(&self) -> f64 {
        self.voltage_kv * self.voltage_kv / self.power_mva
    }

    /// Current base `S / (√3·V)`.
    pub fn current_base(&self) -> f64 {
        self.power_mva / (3f64.sqrt() * self.voltage_kv)
    }
}

/// Impedance base `V² / S` for raw base values.
pub fn impedance_base(voltage_base: f64, power_base: f64) -> Result<f64> {
    BaseSystem::new(voltage_base, power_base).map(|b| b.impedance_base())
}

/// Current base `S / (√3·V)` for raw base values.
pub fn current_base(power_base: f64, voltage_base: f64) -> Result<f64> {
    BaseSystem::new(voltage_base, power_base).map(|b| b.current_base())
}

fn check_base(quantity: &'static str, value: f64) -> Result<()> {
    // NaN fails the comparison as well
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FaultError::InvalidBase { quantity, value })
    }
}
