//! Scan report assembly and serialization.
//!
//! A report maps each scanned host name to the findings produced for it and
//! is written to stdout as pretty JSON or YAML.

mod report;
mod writer;

pub use report::ScanReport;
pub use writer::{print_report, render_report, write_report};
