//! Unified error types for the spawn toolkit.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single chain configuration rule. Validation reports the first rule that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigRule {
    EmptyOrg,
    EmptyProject,
    ProjectSpecialChars,
    BinTooShort,
    DenomTooShort,
    HomeTooShort,
    EmptyPrefix,
    PrefixNotAlpha,
}

impl ConfigRule {
    /// Stable kebab-case name of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyOrg => "empty-org",
            Self::EmptyProject => "empty-project",
            Self::ProjectSpecialChars => "project-special-chars",
            Self::BinTooShort => "bin-too-short",
            Self::DenomTooShort => "denom-too-short",
            Self::HomeTooShort => "home-too-short",
            Self::EmptyPrefix => "empty-prefix",
            Self::PrefixNotAlpha => "prefix-not-alpha",
        }
    }

    /// Human-readable description used in error messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmptyOrg => "github organization name cannot be empty",
            Self::EmptyProject => "project name cannot be empty",
            Self::ProjectSpecialChars => "project name cannot contain special characters",
            Self::BinTooShort => "binary name is too short",
            Self::DenomTooShort => "token denom is too short",
            Self::HomeTooShort => "home directory is too short",
            Self::EmptyPrefix => "address prefix cannot be empty",
            Self::PrefixNotAlpha => "address prefix must only contain alphabetical characters",
        }
    }
}

impl fmt::Display for ConfigRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_str())
    }
}

/// All errors that can occur while materializing a project.
#[derive(Error, Debug)]
pub enum SpawnError {
    // --- Configuration ---

    /// A chain configuration rule was violated.
    #[error("invalid config: {0}")]
    ConfigInvalid(ConfigRule),

    /// A minimum-length rule was violated.
    #[error("invalid config: {rule}: minimum expected length {expected}, got {actual}")]
    ConfigTooShort {
        rule: ConfigRule,
        expected: usize,
        actual: usize,
    },

    /// A user-supplied feature name did not resolve to a known feature.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// The chain config file was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chain config file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Transformation ---

    /// An opening `!spawntag:NAME` marker has no closing marker in the same file.
    #[error("unclosed block tag '!spawntag:{feature}' opened at {path}:{line}")]
    TagMismatch {
        path: String,
        feature: String,
        line: usize,
    },

    /// An address-literal pattern could not be compiled.
    #[error("invalid address pattern: {0}")]
    Pattern(#[from] regex::Error),

    // --- Validation ---

    /// The generated file was rejected by the syntax validator.
    #[error("syntax error in {}{}: {reason}", .path.display(), .line.map(|l| format!(":{l}")).unwrap_or_default())]
    Syntax {
        path: PathBuf,
        line: Option<usize>,
        reason: String,
    },

    // --- Output ---

    /// The output root already exists.
    #[error("project directory already exists: {0}")]
    ProjectExists(PathBuf),

    /// Two embedded files resolved to the same destination path.
    #[error("destination written twice: {0}")]
    DuplicateOutput(PathBuf),

    /// A filesystem I/O error tied to a specific path.
    #[error("I/O failure at {path}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpawnError {
    /// The configuration rule behind a validation failure, if any.
    pub fn config_rule(&self) -> Option<ConfigRule> {
        match self {
            Self::ConfigInvalid(rule) => Some(*rule),
            Self::ConfigTooShort { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

/// Alias for `Result<T, SpawnError>`.
pub type Result<T> = std::result::Result<T, SpawnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rule_names() {
        assert_eq!(ConfigRule::PrefixNotAlpha.as_str(), "prefix-not-alpha");
        assert_eq!(ConfigRule::EmptyOrg.as_str(), "empty-org");
        assert_eq!(ConfigRule::HomeTooShort.as_str(), "home-too-short");
    }

    #[test]
    fn test_syntax_error_display_with_line() {
        let err = SpawnError::Syntax {
            path: PathBuf::from("app/app.go"),
            line: Some(12),
            reason: "unexpected '}'".into(),
        };
        assert_eq!(err.to_string(), "syntax error in app/app.go:12: unexpected '}'");
    }

    #[test]
    fn test_config_rule_extraction() {
        let err = SpawnError::ConfigTooShort {
            rule: ConfigRule::DenomTooShort,
            expected: 3,
            actual: 1,
        };
        assert_eq!(err.config_rule(), Some(ConfigRule::DenomTooShort));
        assert!(err.to_string().contains("minimum expected length 3, got 1"));
        assert_eq!(SpawnError::UnknownFeature("x".into()).config_rule(), None);
    }
}
