//! WASM bindings for Faultsweep Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front-end
//! can run the sweep and chart or download the results.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmFaultSweep } from 'faultsweep_core';
//!
//! await init();
//!
//! const sweep = new WasmFaultSweep(138.0, 100.0);
//! const csv = sweep.radial(true, 1200, -80, 700, -75, "MVA", 10);
//! const pu = sweep.chart_pu();
//! ```

use wasm_bindgen::prelude::*;

use crate::input::parse_impedance;
use crate::network::{
    BaseSystem, BusShortCircuit, FaultInputs, LineImpedance, RadialInputs, Ring3PhaseInputs,
    ShortCircuitPower, Unit,
};
use crate::report::SweepResult;
use crate::solver::{compute_fault_sweep, SweepConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: crate::FaultError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible fault sweep runner.
///
/// Holds the system base and the last computed series, so the chart arrays
/// can be fetched after a sweep.
#[wasm_bindgen]
pub struct WasmFaultSweep {
    base: BaseSystem,
    last: Option<SweepResult>,
}

#[wasm_bindgen]
impl WasmFaultSweep {
    /// Create a runner for a base voltage (kV) and base power (MVA).
    #[wasm_bindgen(constructor)]
    pub fn new(voltage_kv: f64, power_mva: f64) -> Result<WasmFaultSweep, JsValue> {
        let base = BaseSystem::new(voltage_kv, power_mva).map_err(to_js)?;
        Ok(WasmFaultSweep { base, last: None })
    }

    /// Radial system. Returns the CSV export of the series.
    ///
    /// # Arguments
    /// * `three_phase` - Three-phase fault when true, single-phase otherwise
    /// * `unit` - `"pu"` or `"MVA"`
    /// * `step` - Sweep step in percent
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn radial(
        &mut self,
        three_phase: bool,
        magnitude_a: f64,
        angle_a: f64,
        magnitude_b: f64,
        angle_b: f64,
        unit: &str,
        step: u32,
    ) -> Result<String, JsValue> {
        let radial = RadialInputs {
            source_a: ShortCircuitPower::new(magnitude_a, angle_a),
            source_b: ShortCircuitPower::new(magnitude_b, angle_b),
        };
        let inputs = if three_phase {
            FaultInputs::Radial3Phase(radial)
        } else {
            FaultInputs::Radial1Phase(radial)
        };
        self.run(inputs, unit, step)
    }

    /// Ring system with a three-phase fault. `line` is `a+bi` ohms.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn ring_three_phase(
        &mut self,
        magnitude_a: f64,
        angle_a: f64,
        magnitude_b: f64,
        angle_b: f64,
        line: &str,
        unit: &str,
        step: u32,
    ) -> Result<String, JsValue> {
        let inputs = FaultInputs::Ring3Phase(Ring3PhaseInputs {
            bus_a: ShortCircuitPower::new(magnitude_a, angle_a),
            bus_b: ShortCircuitPower::new(magnitude_b, angle_b),
            line_positive: parse_impedance(line).map_err(to_js)?,
        });
        self.run(inputs, unit, step)
    }

    /// Ring system with a single-phase fault.
    ///
    /// `bus_a` and `bus_b` hold `[mag 1φ, angle 1φ, mag 3φ, angle 3φ]`.
    #[wasm_bindgen]
    pub fn ring_single_phase(
        &mut self,
        bus_a: &[f64],
        bus_b: &[f64],
        line_positive: &str,
        line_zero: &str,
        unit: &str,
        step: u32,
    ) -> Result<String, JsValue> {
        let line = LineImpedance::with_zero(
            parse_impedance(line_positive).map_err(to_js)?,
            parse_impedance(line_zero).map_err(to_js)?,
        );
        let inputs =
            FaultInputs::ring_single_phase(bus_from_slice(bus_a)?, bus_from_slice(bus_b)?, line)
                .ok_or_else(|| JsValue::from_str("zero-sequence line impedance is required"))?;
        self.run(inputs, unit, step)
    }

    /// Position labels of the last sweep.
    #[wasm_bindgen]
    pub fn chart_labels(&self) -> Vec<String> {
        self.chart().into_iter().map(|p| p.label).collect()
    }

    /// Per-unit magnitudes of the last sweep.
    #[wasm_bindgen]
    pub fn chart_pu(&self) -> Vec<f64> {
        self.chart().into_iter().map(|p| p.pu).collect()
    }

    /// Absolute magnitudes of the last sweep.
    #[wasm_bindgen]
    pub fn chart_amps(&self) -> Vec<f64> {
        self.chart().into_iter().map(|p| p.amps).collect()
    }

    fn chart(&self) -> Vec<crate::report::ChartPoint> {
        self.last.as_ref().map(|r| r.chart()).unwrap_or_default()
    }

    fn run(&mut self, inputs: FaultInputs, unit: &str, step: u32) -> Result<String, JsValue> {
        let unit: Unit = unit.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let config = SweepConfig::new().with_step(step).with_unit(unit);

        self.last = None;
        let result = compute_fault_sweep(&self.base, &inputs, &config).map_err(to_js)?;
        let csv = result.to_csv();
        self.last = Some(result);
        Ok(csv)
    }
}

fn bus_from_slice(values: &[f64]) -> Result<BusShortCircuit, JsValue> {
    match values {
        [m1, a1, m3, a3] => Ok(BusShortCircuit {
            single_phase: ShortCircuitPower::new(*m1, *a1),
            three_phase: ShortCircuitPower::new(*m3, *a3),
        }),
        _ => Err(JsValue::from_str(
            "bus data must be [magnitude 1φ, angle 1φ, magnitude 3φ, angle 3φ]",
        )),
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
