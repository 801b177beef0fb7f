//! `tree`-style rendering of walked entries.

use crate::discovery::ProjectEntry;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render entries as tree lines.
///
/// `entries` must be in walk order: depth first, parents before children,
/// siblings adjacent. This is what [`crate::discovery::DirectoryWalker`]
/// yields.
pub fn render_tree(entries: &[ProjectEntry]) -> Vec<String> {
    let last = last_sibling_flags(entries);
    let mut lines = Vec::with_capacity(entries.len());
    // For each open ancestor level: whether that ancestor was the last child.
    let mut ancestors: Vec<bool> = Vec::new();

    for (entry, is_last) in entries.iter().zip(last) {
        let level = entry.depth.saturating_sub(1);
        ancestors.truncate(level);

        let mut line = String::new();
        for ancestor_last in &ancestors {
            line.push_str(if *ancestor_last { SPACE } else { PIPE });
        }
        line.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        line.push_str(entry.name());
        lines.push(line);

        if entry.is_dir() {
            ancestors.push(is_last);
        }
    }

    lines
}

/// For each entry, whether no later sibling follows it.
fn last_sibling_flags(entries: &[ProjectEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    // seen[d]: a later entry at depth d exists under the current parent.
    let mut seen: Vec<bool> = Vec::new();

    for (idx, entry) in entries.iter().enumerate().rev() {
        let depth = entry.depth;
        if seen.len() <= depth {
            seen.resize(depth + 1, false);
        }
        flags[idx] = !seen[depth];
        seen[depth] = true;
        seen.truncate(depth + 1);
    }

    flags
}
