//! Tag markers embedded in the reference tree.
//!
//! Three shapes are recognised, each written as a trailing comment:
//!
//! ```text
//! foo() // spawntag:NAME        single line, tied to NAME
//! // !spawntag:NAME             opens (and later closes) a block tied to NAME
//! // bar() // ?spawntag:NAME    commented alternative, uncommented when NAME is removed
//! ```
//!
//! The comment leader may be `//` or `#`, so Go sources, shell scripts,
//! Makefiles and YAML can all carry tags. A tag name ends at the first
//! whitespace character and is matched exactly.

use crate::error::{Result, SpawnError};

const MARKER: &str = "spawntag:";

/// The shape of a tag marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `spawntag:NAME`
    Line,
    /// `!spawntag:NAME`
    Block,
    /// `?spawntag:NAME`
    Uncomment,
}

/// A marker found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMarker<'a> {
    pub kind: MarkerKind,
    pub name: &'a str,
    /// Byte offset where the marker text (including any `!`/`?`) starts.
    pub start: usize,
}

/// Absorb the common `//spawntag:` typo.
pub fn normalize(contents: &str) -> String {
    contents.replace("//spawntag:", "// spawntag:")
}

/// Find the tag marker on `line`, if any.
pub fn find_marker(line: &str) -> Option<TagMarker<'_>> {
    let at = line.find(MARKER)?;
    let (kind, start) = match line[..at].chars().next_back() {
        Some('!') => (MarkerKind::Block, at - 1),
        Some('?') => (MarkerKind::Uncomment, at - 1),
        _ => (MarkerKind::Line, at),
    };
    let rest = &line[at + MARKER.len()..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() {
        return None;
    }
    Some(TagMarker { kind, name, start })
}

/// Byte offset of the comment leader that introduces the marker.
fn comment_start(line: &str, marker: &TagMarker<'_>) -> usize {
    let head = &line[..marker.start];
    let slash = head.rfind("//");
    let hash = head.rfind('#');
    match (slash, hash) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => marker.start,
    }
}

/// Remove the marker and its comment leader, plus trailing whitespace.
pub fn strip_marker(line: &str, marker: &TagMarker<'_>) -> String {
    line[..comment_start(line, marker)].trim_end().to_string()
}

/// Remove a leading `//` or `#` (and at most one following space), keeping indentation.
pub fn uncomment(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let rest = if let Some(r) = body.strip_prefix("//") {
        r
    } else if let Some(r) = body.strip_prefix('#') {
        r
    } else {
        return line.to_string();
    };
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    format!("{indent}{rest}")
}

/// Apply the tag rules for `feature` to every line of `contents`.
///
/// With a feature name:
/// - `spawntag:F` lines are dropped when `delete_line` is set, otherwise
///   their marker is stripped;
/// - `!spawntag:F` blocks are always dropped along with both marker lines;
/// - `?spawntag:F` lines are uncommented.
///
/// With an empty feature name the call is the final sweep: block marker lines
/// are dropped but their bodies kept, single-line markers are stripped, and
/// `?spawntag` lines (alternatives for features that stayed enabled) are dropped.
///
/// An opening block marker with no closing marker is a [`SpawnError::TagMismatch`].
pub fn remove_tagged_lines(path: &str, contents: &str, feature: &str, delete_line: bool) -> Result<String> {
    let normalized = normalize(contents);
    let mut out: Vec<String> = Vec::new();
    let mut open_block: Option<usize> = None;

    for (idx, line) in normalized.split('\n').enumerate() {
        let marker = find_marker(line);

        if open_block.is_some() {
            if let Some(m) = marker {
                if m.kind == MarkerKind::Block && m.name == feature {
                    open_block = None;
                }
            }
            continue;
        }

        let Some(m) = marker else {
            out.push(line.to_string());
            continue;
        };

        if feature.is_empty() {
            match m.kind {
                MarkerKind::Block | MarkerKind::Uncomment => {}
                MarkerKind::Line => push_stripped(&mut out, line, &m),
            }
            continue;
        }

        if m.name != feature {
            out.push(line.to_string());
            continue;
        }

        match m.kind {
            MarkerKind::Line if delete_line => {}
            MarkerKind::Line => push_stripped(&mut out, line, &m),
            MarkerKind::Block => open_block = Some(idx + 1),
            MarkerKind::Uncomment => out.push(uncomment(&strip_marker(line, &m))),
        }
    }

    if let Some(line) = open_block {
        return Err(SpawnError::TagMismatch {
            path: path.to_string(),
            feature: feature.to_string(),
            line,
        });
    }

    Ok(out.join("\n"))
}

/// Uncomment every `?spawntag:F` line, leaving everything else untouched.
pub fn handle_comment_swaps(contents: &str, feature: &str) -> String {
    let normalized = normalize(contents);
    normalized
        .split('\n')
        .map(|line| match find_marker(line) {
            Some(m) if m.kind == MarkerKind::Uncomment && m.name == feature => {
                uncomment(&strip_marker(line, &m))
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// A marker alone on its line leaves nothing worth keeping.
fn push_stripped(out: &mut Vec<String>, line: &str, marker: &TagMarker<'_>) {
    let stripped = strip_marker(line, marker);
    if !stripped.trim().is_empty() {
        out.push(stripped);
    }
}
