//! Chain configuration: the single user-supplied input to the engine.
//!
//! A [`ChainConfig`] is validated and resolved once before any file is
//! touched. Resolution canonicalizes `disabled_features` and closes it under
//! the feature implications; the removal routines then query the result
//! through [`ChainConfig::is_disabled`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigRule, Result, SpawnError};
use crate::features::{self, Feature, FeatureSet, Implications, DEFAULT_IMPLICATIONS};

/// Characters a project name may not contain.
pub const PROJECT_FORBIDDEN_CHARS: &str = "~!@#$%^&*()_+{}|:\"<>?/.,;'[]\\=-";

pub const MIN_DENOM_LEN: usize = 3;
pub const MIN_BINARY_LEN: usize = 2;
pub const MIN_HOME_DIR_LEN: usize = 2;

/// User configuration for a new chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfig {
    pub project_name: String,
    /// Bech32 human-readable part, lowercased during validation.
    pub address_prefix: String,
    /// Node home directory name, conventionally starting with a period.
    pub home_dir: String,
    pub binary_name: String,
    /// Native token denomination.
    pub denom: String,
    /// Source organization, used in the Go module path.
    pub org_name: String,
    /// Features to opt out of, by canonical name or alias.
    #[serde(default)]
    pub disabled_features: Vec<String>,
    /// Consumed by the CLI after generation.
    #[serde(default = "default_init_git")]
    pub init_git: bool,

    #[serde(skip)]
    effective: FeatureSet,
}

fn default_init_git() -> bool {
    true
}

impl ChainConfig {
    /// A configuration with the defaults the CLI starts from.
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            address_prefix: "cosmos".into(),
            home_dir: format!(".{project_name}"),
            binary_name: "simd".into(),
            denom: "token".into(),
            org_name: "rollchains".into(),
            disabled_features: Vec::new(),
            init_git: true,
            effective: FeatureSet::new(),
        }
    }

    pub fn with_org(mut self, org: &str) -> Self {
        self.org_name = org.into();
        self
    }

    pub fn with_project_name(mut self, name: &str) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn with_address_prefix(mut self, prefix: &str) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    pub fn with_home_dir(mut self, home: &str) -> Self {
        self.home_dir = home.into();
        self
    }

    pub fn with_binary_name(mut self, bin: &str) -> Self {
        self.binary_name = bin.into();
        self
    }

    pub fn with_denom(mut self, denom: &str) -> Self {
        self.denom = denom.into();
        self
    }

    pub fn with_disabled_features<S: AsRef<str>>(mut self, features: &[S]) -> Self {
        self.disabled_features = features.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    pub fn with_init_git(mut self, init_git: bool) -> Self {
        self.init_git = init_git;
        self
    }

    /// Check every rule in a fixed order and report the first failure.
    ///
    /// The address prefix is lowercased before the alphabetic check.
    pub fn validate(&mut self) -> Result<()> {
        if self.project_name.is_empty() {
            return Err(SpawnError::ConfigInvalid(ConfigRule::EmptyProject));
        }
        if self
            .project_name
            .chars()
            .any(|c| PROJECT_FORBIDDEN_CHARS.contains(c))
        {
            return Err(SpawnError::ConfigInvalid(ConfigRule::ProjectSpecialChars));
        }
        if self.org_name.is_empty() {
            return Err(SpawnError::ConfigInvalid(ConfigRule::EmptyOrg));
        }
        check_min_len(ConfigRule::DenomTooShort, &self.denom, MIN_DENOM_LEN)?;
        check_min_len(ConfigRule::BinTooShort, &self.binary_name, MIN_BINARY_LEN)?;
        if self.address_prefix.is_empty() {
            return Err(SpawnError::ConfigInvalid(ConfigRule::EmptyPrefix));
        }
        self.address_prefix = self.address_prefix.to_lowercase();
        if !self.address_prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SpawnError::ConfigInvalid(ConfigRule::PrefixNotAlpha));
        }
        check_min_len(ConfigRule::HomeTooShort, &self.home_dir, MIN_HOME_DIR_LEN)?;
        Ok(())
    }

    /// Canonicalize `disabled_features` and close it under the default
    /// implications. The list is rewritten with canonical names in registry order.
    pub fn set_proper_feature_pairs(&mut self) -> Result<()> {
        self.set_feature_pairs_with(DEFAULT_IMPLICATIONS)
    }

    /// Like [`set_proper_feature_pairs`](Self::set_proper_feature_pairs) with
    /// caller-supplied implication rules.
    pub fn set_feature_pairs_with(&mut self, implications: &Implications) -> Result<()> {
        let set = features::normalize(&self.disabled_features, implications)?;
        self.disabled_features = set.names();
        self.effective = set;
        Ok(())
    }

    /// Validate, then resolve the effective disabled set.
    pub fn resolve(&mut self) -> Result<()> {
        self.validate()?;
        self.set_proper_feature_pairs()
    }

    /// The effective disabled set. Empty until the config has been resolved.
    pub fn disabled(&self) -> &FeatureSet {
        &self.effective
    }

    pub fn is_disabled(&self, feature: Feature) -> bool {
        self.effective.contains(feature)
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        !self.is_disabled(feature)
    }

    /// Go module path of the generated project.
    pub fn module_path(&self) -> String {
        format!("github.com/{}/{}", self.org_name, self.project_name)
    }

    /// Application type name, e.g. `RollchainApp` for `rollchain`.
    pub fn app_title(&self) -> String {
        let mut chars = self.project_name.chars();
        let title: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
        format!("{title}App")
    }

    /// Local docker image name.
    pub fn docker_image(&self) -> String {
        self.project_name.to_lowercase()
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpawnError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SpawnError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SpawnError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| SpawnError::IoPath {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn check_min_len(rule: ConfigRule, value: &str, expected: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual < expected {
        return Err(SpawnError::ConfigTooShort {
            rule,
            expected,
            actual,
        });
    }
    Ok(())
}
