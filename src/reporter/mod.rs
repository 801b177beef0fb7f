pub mod json;
pub mod terminal;

use crate::aggregator::CollectReport;
use std::path::Path;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

pub trait Reporter {
    fn report(&self, report: &CollectReport, output: &Path) -> String;
}
