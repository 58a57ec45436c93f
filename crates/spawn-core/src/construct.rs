//! Identifier-scoped construct removal.
//!
//! A line-state automaton with two states. While scanning, a line that
//! mentions the identifier is dropped; if its code also ends in an opening
//! `(` or `{`, the automaton starts swallowing and keeps dropping lines up to
//! and including the first line whose trimmed content is exactly `)` or `}`.
//! Nested constructs are not tracked, so removable regions must not contain
//! an own-line closer of an inner block.

/// Lines carrying one of these comments are never removed.
pub const ESCAPE_COMMENTS: [&str; 2] = ["// ignore", "//ignore"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Swallowing { opened_at: usize },
}

/// Result of one removal pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub contents: String,
    /// Number of lines dropped.
    pub removed: usize,
    /// 1-based line of a construct still open at end of input.
    pub unclosed: Option<usize>,
}

/// The part of a line before any `//` comment that is outside a string literal.
pub fn code_portion(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' && q != b'`' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'`' | b'\'' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => return &line[..i],
                _ => {}
            },
        }
        i += 1;
    }
    line
}

fn opens_construct(line: &str) -> bool {
    let code = code_portion(line).trim_end();
    code.ends_with('(') || code.ends_with('{')
}

fn closes_construct(line: &str) -> bool {
    matches!(line.trim(), ")" | "}")
}

fn is_escaped(line: &str) -> bool {
    ESCAPE_COMMENTS.iter().any(|c| line.contains(c))
}

/// Remove every line mentioning `identifier`, and any construct such a line opens.
pub fn remove_construct(contents: &str, identifier: &str) -> Removal {
    let mut state = State::Scanning;
    let mut kept: Vec<&str> = Vec::new();
    let mut removed = 0;

    for (idx, line) in contents.split('\n').enumerate() {
        match state {
            State::Swallowing { .. } => {
                removed += 1;
                if closes_construct(line) {
                    state = State::Scanning;
                }
            }
            State::Scanning => {
                if !line.contains(identifier) || is_escaped(line) {
                    kept.push(line);
                    continue;
                }
                removed += 1;
                if opens_construct(line) {
                    state = State::Swallowing { opened_at: idx + 1 };
                }
            }
        }
    }

    let unclosed = match state {
        State::Swallowing { opened_at } => Some(opened_at),
        State::Scanning => None,
    };

    Removal {
        contents: kept.join("\n"),
        removed,
        unclosed,
    }
}
