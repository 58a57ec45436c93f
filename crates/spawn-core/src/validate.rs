//! Post-transform syntax validation.
//!
//! The engine only knows the [`Validator`] trait, so retargeting it at a
//! reference tree in another language means supplying another validator.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, SpawnError};

/// Checks (and optionally reformats) a generated file before it is written.
pub trait Validator {
    /// Whether this validator wants to see the file. Defaults to Go sources.
    fn applies_to(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "go")
    }

    /// Return the contents to persist, or a [`SpawnError::Syntax`].
    fn validate(&self, path: &Path, contents: &str) -> Result<String>;
}

/// Accepts everything unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn applies_to(&self, _path: &Path) -> bool {
        false
    }

    fn validate(&self, _path: &Path, contents: &str) -> Result<String> {
        Ok(contents.to_string())
    }
}

/// Verifies that `()`, `[]` and `{}` balance outside comments and literals.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimiterValidator;

impl Validator for DelimiterValidator {
    fn validate(&self, path: &Path, contents: &str) -> Result<String> {
        check_delimiters(contents).map_err(|(line, reason)| SpawnError::Syntax {
            path: path.to_path_buf(),
            line: Some(line),
            reason,
        })?;
        Ok(contents.to_string())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Lexer {
    Code,
    LineComment,
    BlockComment,
    Str,
    RawStr,
    Rune,
}

/// Scan Go source and report the first unbalanced delimiter as `(line, reason)`.
pub fn check_delimiters(src: &str) -> std::result::Result<(), (usize, String)> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = Lexer::Code;
    let mut line = 1;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            if matches!(state, Lexer::Str | Lexer::Rune) {
                return Err((line, "newline in literal".into()));
            }
            line += 1;
            if state == Lexer::LineComment {
                state = Lexer::Code;
            }
            continue;
        }

        match state {
            Lexer::LineComment => {}
            Lexer::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Lexer::Code;
                }
            }
            Lexer::Str | Lexer::Rune => {
                let close = if state == Lexer::Str { '"' } else { '\'' };
                if c == '\\' {
                    chars.next();
                } else if c == close {
                    state = Lexer::Code;
                }
            }
            Lexer::RawStr => {
                if c == '`' {
                    state = Lexer::Code;
                }
            }
            Lexer::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Lexer::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lexer::BlockComment;
                }
                '"' => state = Lexer::Str,
                '`' => state = Lexer::RawStr,
                '\'' => state = Lexer::Rune,
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, at)) => {
                            return Err((line, format!("unexpected '{c}', '{open}' opened at line {at}")));
                        }
                        None => return Err((line, format!("unexpected '{c}'"))),
                    }
                }
                _ => {}
            },
        }
    }

    match state {
        Lexer::BlockComment => return Err((line, "unterminated comment".into())),
        Lexer::RawStr => return Err((line, "unterminated raw string".into())),
        _ => {}
    }
    if let Some((open, at)) = stack.pop() {
        return Err((at, format!("unclosed '{open}'")));
    }
    Ok(())
}

/// Pipes Go sources through `gofmt` and persists the formatted output.
///
/// Falls back to [`DelimiterValidator`] when `gofmt` is not installed.
#[derive(Debug, Clone)]
pub struct GofmtValidator {
    binary: Option<PathBuf>,
}

impl GofmtValidator {
    /// Locate `gofmt` on `PATH`.
    pub fn new() -> Self {
        let binary = which::which("gofmt").ok();
        if binary.is_none() {
            tracing::warn!("gofmt not found, falling back to delimiter checks");
        }
        Self { binary }
    }

    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn run(&self, gofmt: &Path, path: &Path, contents: &str) -> Result<String> {
        let mut child = Command::new(gofmt)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(contents.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let (line, reason) = parse_gofmt_error(&stderr);
            return Err(SpawnError::Syntax {
                path: path.to_path_buf(),
                line,
                reason,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GofmtValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for GofmtValidator {
    fn validate(&self, path: &Path, contents: &str) -> Result<String> {
        match &self.binary {
            Some(gofmt) => self.run(gofmt, path, contents),
            None => DelimiterValidator.validate(path, contents),
        }
    }
}

/// Parse the first `<standard input>:L:C: msg` diagnostic.
pub fn parse_gofmt_error(stderr: &str) -> (Option<usize>, String) {
    let first = stderr.lines().next().unwrap_or_default().trim();
    let Some(rest) = first.strip_prefix("<standard input>:") else {
        return (None, first.to_string());
    };

    let mut parts = rest.splitn(3, ':');
    let line = parts.next().and_then(|l| l.trim().parse().ok());
    let _column = parts.next();
    let reason = parts.next().map(str::trim).unwrap_or(rest).to_string();
    (line, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_go_source() {
        let src = "package app\n\nfunc f() {\n\ts := \"a{b(\" // ) }\n\tr := '}'\n\t/* { */\n\tx := `\n(`\n\t_ = []int{1}\n}\n";
        assert!(check_delimiters(src).is_ok());
    }

    #[test]
    fn test_unbalanced_close_reports_line() {
        let src = "package app\n\nfunc f() {\n}\n}\n";
        let (line, reason) = check_delimiters(src).unwrap_err();
        assert_eq!(line, 5);
        assert!(reason.contains("unexpected '}'"));
    }

    #[test]
    fn test_unclosed_open_reports_opening_line() {
        let src = "package app\n\nvar x = New(\n\ta,\n";
        let (line, reason) = check_delimiters(src).unwrap_err();
        assert_eq!(line, 3);
        assert_eq!(reason, "unclosed '('");
    }

    #[test]
    fn test_mismatched_kinds() {
        let src = "x := f(]\n";
        assert!(check_delimiters(src).is_err());
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert!(check_delimiters("s := \"a\\\"(\"\n").is_ok());
    }

    #[test]
    fn test_delimiter_validator_error_shape() {
        let err = DelimiterValidator
            .validate(Path::new("app/app.go"), "func f() {\n")
            .unwrap_err();
        match err {
            SpawnError::Syntax { path, line, .. } => {
                assert_eq!(path, PathBuf::from("app/app.go"));
                assert_eq!(line, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_applies_to_go_only() {
        assert!(DelimiterValidator.applies_to(Path::new("app/app.go")));
        assert!(!DelimiterValidator.applies_to(Path::new("Makefile")));
        assert!(!NoopValidator.applies_to(Path::new("app/app.go")));
    }

    #[test]
    fn test_parse_gofmt_error() {
        let (line, reason) = parse_gofmt_error("<standard input>:12:5: expected '}', found 'EOF'\n");
        assert_eq!(line, Some(12));
        assert_eq!(reason, "expected '}', found 'EOF'");

        let (line, reason) = parse_gofmt_error("something else");
        assert_eq!(line, None);
        assert_eq!(reason, "something else");
    }
}
