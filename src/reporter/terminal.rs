use crate::aggregator::CollectReport;
use crate::error::Warning;
use crate::reporter::Reporter;
use colored::Colorize;
use std::path::Path;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];
        let mut size = bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} {}", bytes, UNITS[0])
        } else {
            format!("{:.1} {}", size, UNITS[unit])
        }
    }

    fn warning_label(warning: &Warning) -> colored::ColoredString {
        match warning {
            Warning::MalformedRule { .. } => "[RULE]".magenta(),
            Warning::SkippedFile { .. } | Warning::SkippedDirectory { .. } => "[SKIP]".yellow(),
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &CollectReport, output: &Path) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} {} {} {} {}\n",
            "Collected".green().bold(),
            report.files_written(),
            if report.files_written() == 1 { "file" } else { "files" },
            "into",
            output.display()
        ));
        out.push_str(&format!(
            "  root: {}\n  directories: {}\n  size: {}\n",
            report.root.display(),
            report.directories,
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            for file in &report.files {
                out.push_str(&format!("  + {}\n", file));
            }
        }

        if report.has_warnings() {
            out.push_str(&format!(
                "\n{}\n",
                format!("{} warning(s):", report.warnings.len()).yellow().bold()
            ));
            for warning in &report.warnings {
                out.push_str(&format!("  {} {}\n", Self::warning_label(warning), warning));
            }
        }

        out
    }
}
