//! Delimited text export of a fault current series.
//!
//! The layout is consumed by existing spreadsheets and must not change:
//!
//! ```text
//! Percentual,Icc_pu,Icc_A
//! 0%,10.0000∡ -80.00°,4.1837 ∡ -80.00°
//! 50%,...
//! ```
//!
//! Rows are separated by `\n` and the last row has no line terminator.

use std::io::Write;

use crate::error::{FaultError, Result};

use super::{SweepResult, SweepStep};

/// Header line of the export.
pub const CSV_HEADER: &str = "Percentual,Icc_pu,Icc_A";

fn csv_row(step: &SweepStep) -> String {
    format!("{},{},{}", step.label(), step.pu_polar(), step.amps_polar())
}

impl SweepResult {
    /// Render the series in the export layout.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        for step in self.steps() {
            out.push('\n');
            out.push_str(&csv_row(step));
        }
        out
    }

    /// Write the export to `writer`.
    ///
    /// An empty series has nothing to export and is rejected.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.is_empty() {
            return Err(FaultError::ExportError {
                message: "no results to export".to_string(),
            });
        }

        writer
            .write_all(self.to_csv().as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| FaultError::ExportError {
                message: e.to_string(),
            })
    }
}
