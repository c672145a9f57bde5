//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use webzip_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn excluded_names(report: &PackReport) -> String {
        report
            .entries_excluded
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_warnings(&self, warnings: &[String]) {
        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Warnings:").yellow().bold()));
        } else {
            let _ = self.term.write_line("Warnings:");
        }
        for warning in warnings {
            let _ = self.term.write_line(&format!("  - {warning}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Archive created: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Archive created: {}", output_path.display()));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        if !report.entries_excluded.is_empty() {
            let _ = self.term.write_line(&format!(
                "  Excluded:         {}",
                Self::excluded_names(report)
            ));
        }
        let _ = self.term.write_line(&format!(
            "  Stored size:      {}",
            humanize_bytes(report.intermediate_size)
        ));

        if report.was_repacked() && report.archive_size > 0 {
            let _ = self.term.write_line(&format!(
                "  Final size:       {}",
                humanize_bytes(report.archive_size)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Bytes read:       {}",
                humanize_bytes(report.bytes_written)
            ));
            for run in &report.tool_runs {
                let code = run
                    .exit_code
                    .map_or_else(|| "-".to_string(), |c| c.to_string());
                let label = format!("{}:", run.step);
                let _ = self
                    .term
                    .write_line(&format!("  Tool {label:<9}    exit {code}"));
            }
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            self.write_warnings(&report.warnings);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always shown, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
