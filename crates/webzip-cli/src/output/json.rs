//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use webzip_core::PackReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ToolRunOutput {
    step: &'static str,
    exit_code: Option<i32>,
    success: bool,
}

#[derive(Serialize)]
struct PackOutput {
    output_path: String,
    files_added: usize,
    bytes_written: u64,
    excluded: Vec<String>,
    intermediate_size: u64,
    archive_size: u64,
    compression_percentage: f64,
    tool_runs: Vec<ToolRunOutput>,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl PackOutput {
    fn from_report(output_path: &Path, report: &PackReport) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            excluded: report
                .entries_excluded
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            intermediate_size: report.intermediate_size,
            archive_size: report.archive_size,
            compression_percentage: report.compression_percentage(),
            tool_runs: report
                .tool_runs
                .iter()
                .map(|run| ToolRunOutput {
                    step: run.step.as_str(),
                    exit_code: run.exit_code,
                    success: run.success,
                })
                .collect(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        let output = JsonOutput::success("package", PackOutput::from_report(output_path, report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("package", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use webzip_core::ToolRun;
    use webzip_core::ToolStep;

    #[test]
    fn test_pack_output_fields() {
        let mut report = PackReport::new();
        report.files_added = 3;
        report.entries_excluded = vec![PathBuf::from("lib")];
        report.intermediate_size = 200;
        report.archive_size = 100;
        report.tool_runs.push(ToolRun::in_process(ToolStep::Extract));

        let data = PackOutput::from_report(Path::new("game.zip"), &report);
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["output_path"], "game.zip");
        assert_eq!(value["files_added"], 3);
        assert_eq!(value["excluded"][0], "lib");
        assert_eq!(value["compression_percentage"], 50.0);
        assert_eq!(value["tool_runs"][0]["step"], "extract");
        assert!(value["tool_runs"][0]["exit_code"].is_null());
    }
}
