use crate::aggregator::CollectReport;
use crate::reporter::Reporter;
use serde_json::json;
use std::path::Path;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, report: &CollectReport, output: &Path) -> String {
        let value = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "output": output.display().to_string(),
            "result": report,
        });
        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SkipReason, Warning};
    use crate::filter::RuleSource;
    use std::path::PathBuf;

    fn sample_report() -> CollectReport {
        CollectReport {
            root: PathBuf::from("/work/demo"),
            files: vec!["a.txt".to_string()],
            directories: 0,
            bytes_written: 120,
            warnings: vec![
                Warning::SkippedFile {
                    path: "logo.png".to_string(),
                    reason: SkipReason::NotText,
                },
                Warning::MalformedRule {
                    origin: RuleSource::IgnoreFile {
                        path: PathBuf::from(".gitignore"),
                        line: 4,
                    },
                    pattern: "src/[".to_string(),
                    message: "unclosed character class".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_json_output_structure() {
        let output = JsonReporter::new().report(&sample_report(), Path::new("out.md"));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["output"], "out.md");
        assert_eq!(parsed["result"]["root"], "/work/demo");
        assert_eq!(parsed["result"]["files"][0], "a.txt");
        assert_eq!(parsed["result"]["bytes_written"], 120);
    }

    #[test]
    fn test_json_output_warnings() {
        let output = JsonReporter::new().report(&sample_report(), Path::new("out.md"));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        let warnings = &parsed["result"]["warnings"];
        assert_eq!(warnings[0]["kind"], "skipped_file");
        assert_eq!(warnings[0]["path"], "logo.png");
        assert_eq!(warnings[0]["reason"], "not_text");
        assert_eq!(warnings[1]["kind"], "malformed_rule");
        assert_eq!(warnings[1]["origin"]["ignore_file"]["line"], 4);
    }
}
