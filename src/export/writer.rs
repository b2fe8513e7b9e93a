//! JSON / YAML rendering of a scan report.

use std::io::{self, ErrorKind, Write};

use anyhow::{Context, Result};

use super::report::ScanReport;
use crate::config::OutputFormat;

/// Wrapper around a Write that ignores broken pipe errors (EPIPE).
/// This allows graceful handling when stdout is piped to a command that exits early.
struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Renders the report in `format`.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).context("Failed to serialize report as YAML")
        }
    }
}

/// Writes the rendered report, newline-terminated, to `writer`.
pub fn write_report<W: Write>(report: &ScanReport, format: OutputFormat, mut writer: W) -> Result<()> {
    let mut rendered = render_report(report, format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    writer
        .write_all(rendered.as_bytes())
        .context("Failed to write report")?;
    writer.flush().context("Failed to flush report")?;
    Ok(())
}

/// Writes the report to stdout.
pub fn print_report(report: &ScanReport, format: OutputFormat) -> Result<()> {
    write_report(report, format, IgnoreBrokenPipe::new(io::stdout().lock()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::takeover::{Finding, ReasonCode};

    fn report() -> ScanReport {
        let mut report = ScanReport::new(false);
        report.insert(
            "shop.example.com",
            vec![Finding::new(
                ReasonCode::CnamedToUnconfigured3rdPartySvc,
                "shop.example.com is a CNAME to an unclaimed Amazon S3 resource",
            )],
        );
        report
    }

    #[test]
    fn test_json_shape() {
        let rendered = render_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let finding = &value["shop.example.com"][0];
        assert_eq!(finding["vulnerable"], true);
        assert_eq!(
            finding["reasonCode"],
            "CNAMED_TO_UNCONFIGURED_3RD_PARTY_SVC"
        );
        assert_eq!(finding["severity"], "HIGH");
    }

    #[test]
    fn test_yaml_shape() {
        let rendered = render_report(&report(), OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        let finding = &value["shop.example.com"][0];
        assert_eq!(finding["reasonCode"].as_str(), Some("CNAMED_TO_UNCONFIGURED_3RD_PARTY_SVC"));
        assert_eq!(finding["vulnerable"].as_bool(), Some(true));
    }

    #[test]
    fn test_empty_report_renders() {
        let rendered = render_report(&ScanReport::new(false), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{}");
    }

    #[test]
    fn test_write_report_terminates_line() {
        let mut buffer = Vec::new();
        write_report(&report(), OutputFormat::Json, &mut buffer).unwrap();
        assert!(buffer.ends_with(b"\n"));
    }
}
