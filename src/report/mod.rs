//! Result series and export.
//!
//! A sweep produces a [`SweepResult`]: the ordered fault current at every
//! visited position, with a chart projection and the CSV export used by
//! downstream tools.

mod export;
mod series;

pub use export::CSV_HEADER;
pub use series::{ChartPoint, SweepResult, SweepStep};
