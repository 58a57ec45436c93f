//! Feature registry.
//!
//! The closed set of optional modules a generated chain can opt out of, the
//! aliases users may type for each of them, and the implication rules that
//! close a user-supplied list into the effective disabled set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpawnError};

/// A feature of the reference project that can be removed at generation time.
///
/// Declaration order is the registry order: removal routines run in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Tokenfactory,
    Poa,
    Globalfee,
    Cosmwasm,
    WasmLc,
    Packetforward,
    IbcRatelimit,
    Ignite,
    Ics,
    Staking,
}

impl Feature {
    /// Every feature, in registry order.
    pub const ALL: [Feature; 10] = [
        Feature::Tokenfactory,
        Feature::Poa,
        Feature::Globalfee,
        Feature::Cosmwasm,
        Feature::WasmLc,
        Feature::Packetforward,
        Feature::IbcRatelimit,
        Feature::Ignite,
        Feature::Ics,
        Feature::Staking,
    ];

    /// Canonical identifier, also used as the tag name in the reference tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokenfactory => "tokenfactory",
            Self::Poa => "poa",
            Self::Globalfee => "globalfee",
            Self::Cosmwasm => "cosmwasm",
            Self::WasmLc => "wasm-lc",
            Self::Packetforward => "packetforward",
            Self::IbcRatelimit => "ibc-ratelimit",
            Self::Ignite => "ignite",
            Self::Ics => "ics",
            Self::Staking => "staking",
        }
    }

    /// Accepted spellings. The canonical name is always the first entry.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Tokenfactory => &["tokenfactory", "token-factory", "tf"],
            Self::Poa => &["poa", "proof-of-authority", "proofofauthority", "poauthority"],
            Self::Globalfee => &["globalfee", "global-fee"],
            Self::Cosmwasm => &["cosmwasm", "wasm", "cw"],
            Self::WasmLc => &[
                "wasm-lc",
                "wasmlc",
                "cwlc",
                "cosmwasm-lc",
                "wasm-light-client",
                "08wasm",
                "08-wasm",
                "08wasmlc",
                "08wasm-lc",
                "08-wasm-lc",
                "08-wasmlc",
            ],
            Self::Packetforward => &["packetforward", "ibc-packetforward", "pfm"],
            Self::IbcRatelimit => &["ibc-ratelimit", "ibc-rate-limit"],
            Self::Ignite => &["ignite", "ignite-cli"],
            Self::Ics => &["ics", "interchain-security"],
            Self::Staking => &["staking"],
        }
    }

    /// One-line description shown by `spawn features` and the selection prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Tokenfactory => "Native token minting and sending",
            Self::Poa => "Proof-of-Authority validator set",
            Self::Globalfee => "Static minimum fee(s) for all transactions",
            Self::Cosmwasm => "CosmWasm smart contracts",
            Self::WasmLc => "08 Wasm light client",
            Self::Packetforward => "Packet forward middleware for multi-hop IBC",
            Self::IbcRatelimit => "Thresholds for outflow as a percent of total channel value",
            Self::Ignite => "Ignite CLI compatibility",
            Self::Ics => "Interchain Security consumer chain",
            Self::Staking => "Native proof-of-stake with mint, distribution and gov",
        }
    }

    /// Resolve a user-supplied name to its canonical feature. Case-insensitive.
    pub fn canonicalize(name: &str) -> Result<Feature> {
        let needle = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.aliases().contains(&needle.as_str()))
            .ok_or_else(|| SpawnError::UnknownFeature(name.to_string()))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = SpawnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::canonicalize(s)
    }
}

/// Disabling the key also disables every listed feature.
pub type Implications = [(Feature, &'static [Feature])];

/// Implication rules of the current reference project. Closure is transitive,
/// so opting out of `ics` also removes `staking` and therefore `poa`.
///
/// Nothing is implied by an enabled feature: the default output keeps both the
/// ICS consumer wiring and native staking, where the upstream Go scaffolder
/// turned staking off whenever ICS was enabled.
pub const DEFAULT_IMPLICATIONS: &Implications = &[
    (Feature::Ics, &[Feature::Staking]),
    (Feature::Staking, &[Feature::Poa]),
];

/// A deduplicated set of features, iterated in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn insert(&mut self, feature: Feature) -> bool {
        self.0.insert(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical names in registry order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|f| f.as_str().to_string()).collect()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Canonicalize every name and close the result under `implications`.
///
/// Fails on the first name that is not a known alias.
pub fn normalize<S: AsRef<str>>(names: &[S], implications: &Implications) -> Result<FeatureSet> {
    let mut set = FeatureSet::new();
    let mut pending = Vec::with_capacity(names.len());
    for name in names {
        pending.push(Feature::canonicalize(name.as_ref())?);
    }

    while let Some(feature) = pending.pop() {
        if !set.insert(feature) {
            continue;
        }
        for (key, implied) in implications {
            if *key == feature {
                pending.extend(implied.iter().copied());
            }
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_feature() {
        for feature in Feature::ALL {
            assert_eq!(feature.aliases()[0], feature.as_str());
            for alias in feature.aliases() {
                assert_eq!(Feature::canonicalize(alias).unwrap(), feature);
            }
        }
    }

    #[test]
    fn test_canonicalize_is_case_insensitive() {
        assert_eq!(Feature::canonicalize("TF").unwrap(), Feature::Tokenfactory);
        assert_eq!(Feature::canonicalize(" Interchain-Security ").unwrap(), Feature::Ics);
        assert_eq!("08-WASM".parse::<Feature>().unwrap(), Feature::WasmLc);
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        let err = Feature::canonicalize("not-a-real-thing").unwrap_err();
        assert!(matches!(err, SpawnError::UnknownFeature(ref n) if n == "not-a-real-thing"));
    }

    #[test]
    fn test_normalize_dedups_aliases() {
        let set = normalize(&["cw", "wasm", "cosmwasm"], DEFAULT_IMPLICATIONS).unwrap();
        assert_eq!(set.names(), vec!["cosmwasm"]);
    }

    #[test]
    fn test_normalize_applies_implications_transitively() {
        let set = normalize(&["ics"], DEFAULT_IMPLICATIONS).unwrap();
        assert!(set.contains(Feature::Ics));
        assert!(set.contains(Feature::Staking));
        assert!(set.contains(Feature::Poa));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize(&["TF", "proof-of-authority", "ics"], DEFAULT_IMPLICATIONS).unwrap();
        let second = normalize(&first.names(), DEFAULT_IMPLICATIONS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_feature_set_iterates_in_registry_order() {
        let set: FeatureSet = [Feature::Staking, Feature::Tokenfactory, Feature::Ics]
            .into_iter()
            .collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![Feature::Tokenfactory, Feature::Ics, Feature::Staking]);
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Feature::IbcRatelimit).unwrap();
        assert_eq!(json, "\"ibc-ratelimit\"");
        let back: Feature = serde_json::from_str("\"wasm-lc\"").unwrap();
        assert_eq!(back, Feature::WasmLc);
    }
}
