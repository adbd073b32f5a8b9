//! Study input validation.

use crate::error::{FaultError, Result};

use super::FaultInputs;

/// Validate fault study inputs before any resolving.
///
/// Checks:
/// - The sweep step is positive (a step above 100 visits only the first bus)
/// - Every numeric field is finite
/// - Every short-circuit angle is conjugate (<= 0°)
pub fn validate_inputs(inputs: &FaultInputs, step: u32) -> Result<()> {
    if step == 0 {
        return Err(FaultError::InvalidStep { step });
    }

    let powers = inputs.short_circuit_fields();

    for (field, power) in &powers {
        if !power.magnitude.is_finite() {
            return Err(FaultError::missing_field(format!("{}.magnitude", field)));
        }
        if !power.angle_deg.is_finite() {
            return Err(FaultError::missing_field(format!("{}.angle", field)));
        }
    }

    for (field, z) in inputs.impedance_fields() {
        if !z.re.is_finite() || !z.im.is_finite() {
            return Err(FaultError::missing_field(field));
        }
    }

    for (field, power) in &powers {
        if power.angle_deg > 0.0 {
            return Err(FaultError::AngleConventionViolation {
                field: format!("{}.angle", field),
                angle: power.angle_deg,
            });
        }
    }

    Ok(())
}
