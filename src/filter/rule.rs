//! A single ignore rule and its gitignore-style line parser.

use globset::{GlobBuilder, GlobMatcher};
use std::cmp::Ordering;

const WILDCARDS: &[char] = &['*', '?', '[', '\\'];

/// How a rule's pattern is matched against a path.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Literal path (anchored) or literal file/directory name (unanchored).
    Exact(String),
    /// Wildcard pattern. `*` and `?` stay within one path segment.
    Glob(GlobMatcher),
    /// Literal directory. Matches the directory only; its contents are
    /// excluded through it.
    Prefix(String),
}

impl RuleKind {
    /// Rank used when two matching rules have the same depth.
    fn rank(&self) -> u8 {
        match self {
            RuleKind::Exact(_) => 2,
            RuleKind::Prefix(_) => 1,
            RuleKind::Glob(_) => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Exact(_) => "exact",
            RuleKind::Glob(_) => "glob",
            RuleKind::Prefix(_) => "prefix",
        }
    }
}

/// Ordering key for overlapping rules: deeper patterns first, then exact over
/// prefix over glob, then longer literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    depth: usize,
    rank: u8,
    literal_len: usize,
}

/// Reasons a pattern line cannot become a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Nothing left after stripping `!` and slashes.
    Empty,
    /// The glob failed to compile.
    InvalidGlob(String),
    /// A literal name rule contained a path separator.
    NameWithSeparator,
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleError::Empty => write!(f, "pattern is empty"),
            RuleError::InvalidGlob(msg) => write!(f, "{}", msg),
            RuleError::NameWithSeparator => write!(f, "name must not contain '/'"),
        }
    }
}

/// An immutable ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    kind: RuleKind,
    negated: bool,
    anchored: bool,
    dir_only: bool,
    specificity: Specificity,
}

impl IgnoreRule {
    /// Parse one line of an ignore file.
    ///
    /// Returns `Ok(None)` for blank lines and comments. Syntax follows
    /// `.gitignore`: `!` negates, a leading or inner `/` anchors the pattern
    /// to the root, a trailing `/` restricts it to directories, and `\#` or
    /// `\!` escape a literal first character.
    pub fn parse(line: &str) -> Result<Option<Self>, RuleError> {
        let line = trim_unescaped_end(line);
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negated, body) = if let Some(rest) = line.strip_prefix('!') {
            (true, rest)
        } else if line.starts_with("\\#") || line.starts_with("\\!") {
            (false, &line[1..])
        } else {
            (false, line)
        };

        let dir_only = body.ends_with('/');
        let body = body.trim_end_matches('/');

        let mut anchored = body.starts_with('/');
        let mut body = body.trim_start_matches('/');

        // `**/name` is the same as an unanchored `name`.
        if let Some(rest) = body.strip_prefix("**/")
            && !rest.contains('/')
        {
            body = rest;
            anchored = false;
        }
        anchored |= body.contains('/');

        if body.is_empty() {
            return Err(RuleError::Empty);
        }

        let kind = if body.contains(WILDCARDS) {
            RuleKind::Glob(compile_glob(body)?)
        } else if dir_only {
            RuleKind::Prefix(body.to_string())
        } else {
            RuleKind::Exact(body.to_string())
        };

        Ok(Some(Self::build(line, kind, negated, anchored, dir_only, body)))
    }

    /// A rule excluding every file or directory with exactly this name.
    pub fn name(name: &str) -> Result<Self, RuleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RuleError::Empty);
        }
        if name.contains('/') {
            return Err(RuleError::NameWithSeparator);
        }
        Ok(Self::build(
            name,
            RuleKind::Exact(name.to_string()),
            false,
            false,
            false,
            name,
        ))
    }

    /// A rule excluding every file whose name ends with `suffix`.
    /// A missing leading `.` is added.
    pub fn suffix(suffix: &str) -> Result<Self, RuleError> {
        let suffix = suffix.trim().trim_start_matches('.');
        if suffix.is_empty() {
            return Err(RuleError::Empty);
        }
        if suffix.contains('/') {
            return Err(RuleError::NameWithSeparator);
        }
        if suffix.contains(WILDCARDS) {
            return Err(RuleError::InvalidGlob(format!(
                "extension '{}' contains wildcard characters",
                suffix
            )));
        }
        let pattern = format!("*.{}", suffix);
        let matcher = compile_glob(&pattern)?;
        Ok(Self::build(
            &pattern,
            RuleKind::Glob(matcher),
            false,
            false,
            false,
            &pattern,
        ))
    }

    fn build(
        pattern: &str,
        kind: RuleKind,
        negated: bool,
        anchored: bool,
        dir_only: bool,
        body: &str,
    ) -> Self {
        let specificity = Specificity {
            depth: body.split('/').filter(|s| !s.is_empty()).count(),
            rank: kind.rank(),
            literal_len: body
                .chars()
                .filter(|c| !WILDCARDS.contains(c) && *c != ']')
                .count(),
        };
        Self {
            pattern: pattern.to_string(),
            kind,
            negated,
            anchored,
            dir_only,
            specificity,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Compare two rules by specificity only.
    pub fn cmp_specificity(&self, other: &Self) -> Ordering {
        self.specificity.cmp(&other.specificity)
    }

    /// Whether this rule matches `path` (relative, `/`-separated).
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);

        match &self.kind {
            RuleKind::Exact(literal) => {
                if self.anchored {
                    path == literal
                } else {
                    name == literal
                }
            }
            RuleKind::Glob(matcher) => {
                if self.dir_only && !is_dir {
                    return false;
                }
                if self.anchored {
                    matcher.is_match(path)
                } else {
                    matcher.is_match(name)
                }
            }
            // Only the directory itself; descendants follow from it being
            // excluded (see `PathFilter::decide`).
            RuleKind::Prefix(dir) => {
                let target = if self.anchored { path } else { name };
                is_dir && target == dir
            }
        }
    }
}

/// Trim trailing whitespace, keeping one space escaped as `\ `.
fn trim_unescaped_end(line: &str) -> &str {
    let trimmed = line.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|c| *c == '\\').count();
    if backslashes % 2 == 1 && line[trimmed.len()..].starts_with(' ') {
        &line[..trimmed.len() + 1]
    } else {
        trimmed
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, RuleError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| RuleError::InvalidGlob(e.kind().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(line: &str) -> IgnoreRule {
        IgnoreRule::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        assert!(IgnoreRule::parse("").unwrap().is_none());
        assert!(IgnoreRule::parse("   ").unwrap().is_none());
        assert!(IgnoreRule::parse("# comment").unwrap().is_none());
    }

    #[test]
    fn test_parse_kinds() {
        assert!(matches!(rule("Cargo.lock").kind(), RuleKind::Exact(_)));
        assert!(matches!(rule("*.log").kind(), RuleKind::Glob(_)));
        assert!(matches!(rule("target/").kind(), RuleKind::Prefix(_)));
        assert!(matches!(rule("*.egg-info/").kind(), RuleKind::Glob(_)));
        assert!(rule("*.egg-info/").is_dir_only());
    }

    #[test]
    fn test_parse_flags() {
        let r = rule("!keep.log");
        assert!(r.is_negated());
        assert!(!r.is_anchored());

        assert!(rule("/build").is_anchored());
        assert!(rule("docs/api").is_anchored());
        assert!(!rule("**/node_modules/").is_anchored());
    }

    #[test]
    fn test_parse_escaped_first_character() {
        let r = rule("\\#notes.md");
        assert!(!r.is_negated());
        assert!(r.matches("#notes.md", false));

        let r = rule("\\!important");
        assert!(!r.is_negated());
        assert!(r.matches("!important", false));
    }

    #[test]
    fn test_parse_trailing_whitespace_trimmed() {
        assert!(rule("*.log   ").matches("debug.log", false));
    }

    #[test]
    fn test_parse_escaped_trailing_space() {
        let r = rule("foo\\ ");
        assert!(r.matches("foo ", false));
        assert!(!r.matches("foo", false));

        let r = rule("foo\\    ");
        assert!(r.matches("foo ", false));
        assert!(!r.matches("foo  ", false));

        // An escaped backslash does not escape the space after it.
        let r = rule("foo\\\\ ");
        assert!(r.matches("foo\\", false));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(IgnoreRule::parse("!").unwrap_err(), RuleError::Empty);
        assert_eq!(IgnoreRule::parse("/").unwrap_err(), RuleError::Empty);
        assert!(matches!(
            IgnoreRule::parse("src/[").unwrap_err(),
            RuleError::InvalidGlob(_)
        ));
    }

    #[test]
    fn test_exact_unanchored_matches_name_at_any_depth() {
        let r = rule("Cargo.lock");
        assert!(r.matches("Cargo.lock", false));
        assert!(r.matches("crates/core/Cargo.lock", false));
        assert!(!r.matches("Cargo.lock.bak", false));
    }

    #[test]
    fn test_exact_anchored_matches_full_path_only() {
        let r = rule("/docs/README.md");
        assert!(r.matches("docs/README.md", false));
        assert!(!r.matches("other/docs/README.md", false));
    }

    #[test]
    fn test_glob_is_single_level() {
        let r = rule("src/*.rs");
        assert!(r.matches("src/main.rs", false));
        assert!(!r.matches("src/bin/tool.rs", false));

        let r = rule("src/**/*.rs");
        assert!(r.matches("src/bin/tool.rs", false));
    }

    #[test]
    fn test_glob_unanchored_matches_basename() {
        let r = rule("*.log");
        assert!(r.matches("debug.log", false));
        assert!(r.matches("logs/2024/app.log", false));
        assert!(!r.matches("catalog", false));
    }

    #[test]
    fn test_glob_dir_only() {
        let r = rule("*.egg-info/");
        assert!(r.matches("pkg.egg-info", true));
        assert!(!r.matches("pkg.egg-info", false));
    }

    #[test]
    fn test_prefix_matches_directory_only() {
        let r = rule("/target/");
        assert!(r.matches("target", true));
        assert!(!r.matches("target", false));
        assert!(!r.matches("target/debug", true));
        assert!(!r.matches("targets", true));

        let r = rule("node_modules/");
        assert!(r.matches("node_modules", true));
        assert!(r.matches("web/node_modules", true));
        assert!(!r.matches("web/node_modules", false));
        assert!(!r.matches("web/node_modules/pkg/index.js", false));
    }

    #[test]
    fn test_name_rule() {
        let r = IgnoreRule::name("vendor").unwrap();
        assert!(r.matches("vendor", true));
        assert!(r.matches("lib/vendor", true));
        assert_eq!(
            IgnoreRule::name("a/b").unwrap_err(),
            RuleError::NameWithSeparator
        );
    }

    #[test]
    fn test_suffix_rule() {
        let r = IgnoreRule::suffix("tmp").unwrap();
        assert_eq!(r.pattern(), "*.tmp");
        assert!(r.matches("cache/file.tmp", false));

        let r = IgnoreRule::suffix(".min.js").unwrap();
        assert!(r.matches("dist/app.min.js", false));
        assert!(!r.matches("dist/app.js", false));

        assert!(IgnoreRule::suffix("*").is_err());
        assert_eq!(IgnoreRule::suffix(".").unwrap_err(), RuleError::Empty);
    }

    #[test]
    fn test_specificity_order() {
        // Depth dominates.
        assert_eq!(
            rule("logs/*.log").cmp_specificity(&rule("keep.log")),
            Ordering::Greater
        );
        // Same depth: exact beats prefix beats glob.
        assert_eq!(
            rule("keep.log").cmp_specificity(&rule("*.log")),
            Ordering::Greater
        );
        assert_eq!(
            rule("build/").cmp_specificity(&rule("b*/")),
            Ordering::Greater
        );
        // Same kind and depth: longer literal wins.
        assert_eq!(
            rule("*.test.js").cmp_specificity(&rule("*.js")),
            Ordering::Greater
        );
    }
}
