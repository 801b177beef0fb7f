//! Path filtering against ignore rules.
//!
//! A [`PathFilter`] holds an ordered set of [`IgnoreRule`]s and decides, for a
//! path relative to the project root, whether it is included in the output.
//!
//! Resolution:
//! - No matching rule: included.
//! - Otherwise the most specific matching rule decides (see
//!   [`rule::Specificity`]); declaration order breaks ties, later wins.
//! - An excluded directory excludes everything below it, whatever rules the
//!   descendants match.

pub mod rule;
pub mod sources;

pub use rule::{IgnoreRule, RuleError, RuleKind, Specificity};
pub use sources::{RuleSetBuilder, RuleSource};

use tracing::trace;

/// Outcome of filtering a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Included,
    Excluded,
}

impl Decision {
    pub fn is_excluded(self) -> bool {
        self == Decision::Excluded
    }
}

/// Ordered ignore rule set.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    rules: Vec<IgnoreRule>,
}

impl PathFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<IgnoreRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decide a path on its own, assuming every ancestor directory has
    /// already been included. The directory walker relies on this: it never
    /// descends into an excluded directory.
    pub fn evaluate(&self, path: &str, is_dir: bool) -> Decision {
        match self.winning_rule(path, is_dir) {
            Some(rule) if !rule.is_negated() => {
                trace!(path, rule = rule.pattern(), kind = rule.kind().name(), "Excluded");
                Decision::Excluded
            }
            Some(rule) => {
                trace!(path, rule = rule.pattern(), "Re-included");
                Decision::Included
            }
            None => Decision::Included,
        }
    }

    /// Decide a path, checking each ancestor directory first.
    pub fn decide(&self, path: &str, is_dir: bool) -> Decision {
        let path = path.trim_matches('/');
        for (idx, _) in path.match_indices('/') {
            if self.evaluate(&path[..idx], true).is_excluded() {
                return Decision::Excluded;
            }
        }
        self.evaluate(path, is_dir)
    }

    /// Convenience wrapper over [`PathFilter::decide`].
    pub fn is_excluded(&self, path: &str, is_dir: bool) -> bool {
        self.decide(path, is_dir).is_excluded()
    }

    /// Most specific matching rule; the later one wins a tie.
    fn winning_rule(&self, path: &str, is_dir: bool) -> Option<&IgnoreRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path, is_dir))
            .max_by(|a, b| a.cmp_specificity(b))
    }
}
