//! Text inputs: impedance notation and case files.
//!
//! Line impedances are written in rectangular form, `<real>[+|-]<imag>i`
//! (`4+2i`, `0.6-2i`), in ohms. The command-line front-end reads whole
//! studies from TOML case files; see [`case`] for the layout.

mod impedance;

#[cfg(feature = "cli")]
pub mod case;

pub use impedance::{format_impedance, parse_impedance};

#[cfg(feature = "cli")]
pub use case::{load_case_file, CaseFile, FaultStudy};
