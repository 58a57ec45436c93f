//! Top-level project generation.
//!
//! [`generate`] validates and resolves the config before touching the disk,
//! then materializes the main reference tree followed by the end-to-end test
//! tree into `<output_dir>/<project_name>`.
//!
//! ## Output layout
//!
//! ```text
//! <project>/
//! ├── app/                 # application wiring
//! ├── cmd/<binary>/        # node entry point
//! ├── interchaintest/      # end-to-end tests (own go.mod)
//! ├── scripts/             # local testnet scripts
//! ├── Makefile, Dockerfile, chains.yaml, go.mod, ...
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ChainConfig;
use crate::engine::{Engine, TreeReport, DEFAULT_DEBUG_DIR};
use crate::error::{Result, SpawnError};
use crate::pipeline::Pipeline;
use crate::templates::embedded::{EmbeddedTree, INTERCHAINTEST, SIMAPP};
use crate::validate::{GofmtValidator, Validator};

/// Where and how to generate.
pub struct GenerateOptions {
    /// Parent directory of the project directory.
    pub output_dir: PathBuf,
    pub debug_dir: PathBuf,
    pub validator: Box<dyn Validator>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
            validator: Box::new(GofmtValidator::new()),
        }
    }
}

impl GenerateOptions {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = dir.into();
        self
    }

    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }
}

/// What [`generate`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_root: PathBuf,
    pub trees: Vec<TreeReport>,
}

impl GenerationReport {
    pub fn files_written(&self) -> usize {
        self.trees.iter().map(|t| t.written.len()).sum()
    }
}

/// The embedded trees in generation order, each with its pipeline.
pub fn default_trees() -> Vec<(EmbeddedTree, Pipeline)> {
    vec![
        (SIMAPP, Pipeline::main_app()),
        (INTERCHAINTEST, Pipeline::interchaintest()),
    ]
}

/// Output root for a config under `output_dir`.
pub fn output_root(output_dir: &Path, cfg: &ChainConfig) -> PathBuf {
    output_dir.join(&cfg.project_name)
}

/// Generate a new chain project.
///
/// `cfg` is validated and resolved in place; nothing is written when that fails.
pub fn generate(cfg: &mut ChainConfig, options: GenerateOptions) -> Result<GenerationReport> {
    cfg.resolve()?;

    let root = output_root(&options.output_dir, cfg);
    if root.exists() {
        return Err(SpawnError::ProjectExists(root));
    }

    info!(
        project = %cfg.project_name,
        disabled = ?cfg.disabled_features,
        root = %root.display(),
        "generating project"
    );

    let mut engine = Engine::new(&root, options.validator).with_debug_dir(options.debug_dir);
    let mut trees = Vec::new();
    for (tree, pipeline) in default_trees() {
        let report = engine.materialize(&tree, &pipeline, cfg)?;
        info!(
            tree = %report.tree,
            written = report.written.len(),
            skipped = report.skipped_empty.len(),
            "materialized tree"
        );
        trees.push(report);
    }

    Ok(GenerationReport {
        output_root: root,
        trees,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::ConfigRule;
    use crate::features::Feature;
    use crate::validate::DelimiterValidator;

    fn options(dir: &Path) -> GenerateOptions {
        GenerateOptions::default()
            .with_output_dir(dir)
            .with_debug_dir(dir.join("debugging"))
            .with_validator(Box::new(DelimiterValidator))
    }

    fn scenario_config(disabled: &[&str]) -> ChainConfig {
        ChainConfig::new("rollchain")
            .with_address_prefix("cosmos")
            .with_home_dir(".rollchain")
            .with_binary_name("appd")
            .with_denom("token")
            .with_org("acme")
            .with_disabled_features(disabled)
    }

    /// Every generated file keyed by its path relative to `root`.
    fn read_tree(root: &Path) -> BTreeMap<String, String> {
        fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, String>) {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(root, &path, out);
                } else {
                    let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
                    out.insert(rel, std::fs::read_to_string(&path).unwrap());
                }
            }
        }
        let mut out = BTreeMap::new();
        walk(root, root, &mut out);
        out
    }

    fn generate_tree(disabled: &[&str]) -> (tempfile::TempDir, ChainConfig, BTreeMap<String, String>) {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = scenario_config(disabled);
        let report = generate(&mut cfg, options(dir.path())).unwrap();
        let tree = read_tree(&report.output_root);
        (dir, cfg, tree)
    }

    #[test]
    fn test_minimal_generation() {
        let (_dir, _cfg, tree) = generate_tree(&[]);

        let makefile = &tree["Makefile"];
        assert!(makefile.contains("cmd/appd"));
        assert!(!makefile.contains("cmd/wasmd"));

        let app = &tree["app/app.go"];
        assert!(app.contains(r#"appName = "RollchainApp""#));
        assert!(app.contains(r#"Bech32Prefix = "cosmos""#));

        assert!(tree.contains_key("cmd/appd/main.go"));
        assert!(!tree.keys().any(|k| k.starts_with("cmd/wasmd")));
        assert!(!tree.contains_key("embed.go"));
        assert!(!tree.keys().any(|k| k.starts_with("heighliner")));
        for (path, contents) in &tree {
            assert!(!contents.contains("spawntag"), "marker left in {path}");
        }
    }

    #[test]
    fn test_default_output_keeps_ics_and_staking() {
        let (_dir, cfg, tree) = generate_tree(&[]);

        assert!(cfg.disabled().is_empty());
        let app = &tree["app/app.go"];
        assert!(app.contains("StakingKeeper"));
        assert!(app.contains("ConsumerKeeper"));
        assert!(tree.contains_key("cmd/appd/ics_consumer.go"));
        assert!(tree.contains_key("scripts/test_ics_node.sh"));
    }

    #[test]
    fn test_cosmwasm_opt_out() {
        let (_dir, _cfg, tree) = generate_tree(&["cosmwasm"]);

        assert!(!tree.contains_key("app/wasm.go"));
        assert!(!tree.contains_key("interchaintest/cosmwasm_test.go"));
        assert!(!tree.contains_key("interchaintest/contracts/README.md"));

        let app = &tree["app/app.go"];
        for ident in [
            "WasmKeeper",
            "wasmtypes",
            "wasmStack",
            "wasmOpts",
            "TXCounterStoreService",
            "WasmConfig",
            "wasmDir",
            "github.com/CosmWasm/wasmd",
        ] {
            assert!(!app.contains(ident), "{ident} left in app.go");
        }
        for manifest in ["go.mod", "go.sum", "interchaintest/go.mod"] {
            if let Some(contents) = tree.get(manifest) {
                assert!(!contents.contains("github.com/CosmWasm/wasmd"), "{manifest}");
            }
        }
    }

    #[test]
    fn test_ics_opt_out_disables_staking() {
        let (_dir, cfg, tree) = generate_tree(&["ics"]);

        assert!(cfg.is_disabled(Feature::Ics));
        assert!(cfg.is_disabled(Feature::Staking));
        assert!(cfg.is_disabled(Feature::Poa));

        for (path, contents) in &tree {
            assert!(!contents.contains("ibcconsumerkeeper"), "{path}");
            assert!(!contents.contains("ibcconsumertypes"), "{path}");
        }
        let app = &tree["app/app.go"];
        assert!(!app.contains("StakingKeeper"));
        assert!(!app.contains("stakingtypes"));
        assert!(tree.contains_key("scripts/test_node.sh"));
        assert!(!tree.contains_key("scripts/test_ics_node.sh"));
    }

    #[test]
    fn test_aliases_match_canonical_names() {
        let (_a, aliased_cfg, aliased) = generate_tree(&["TF", "proof-of-authority", "cw"]);
        let (_b, _cfg, canonical) = generate_tree(&["tokenfactory", "poa", "cosmwasm"]);

        assert_eq!(aliased_cfg.disabled_features, vec!["tokenfactory", "poa", "cosmwasm"]);
        assert_eq!(aliased, canonical);
    }

    #[test]
    fn test_every_feature_combination_generates() {
        let dir = tempfile::tempdir().unwrap();
        let mut failures = Vec::new();

        for mask in 0u32..(1 << Feature::ALL.len()) {
            let disabled: Vec<&str> = Feature::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, f)| f.as_str())
                .collect();
            let out = dir.path().join(mask.to_string());
            let mut cfg = scenario_config(&disabled);

            match generate(&mut cfg, options(&out)) {
                Ok(report) => {
                    for (path, contents) in read_tree(&report.output_root) {
                        if contents.contains("spawntag") {
                            failures.push(format!("{disabled:?}: marker left in {path}"));
                        }
                    }
                }
                Err(e) => failures.push(format!("{disabled:?}: {e}")),
            }
            let _ = std::fs::remove_dir_all(&out);
        }

        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn test_unknown_feature_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = scenario_config(&["not-a-real-thing"]);
        let err = generate(&mut cfg, options(dir.path())).unwrap_err();
        assert!(matches!(err, SpawnError::UnknownFeature(ref name) if name == "not-a-real-thing"));
        assert!(!dir.path().join("rollchain").exists());
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = ChainConfig::new("rollchain").with_address_prefix("c919");
        let err = generate(&mut cfg, options(dir.path())).unwrap_err();
        assert_eq!(err.config_rule(), Some(ConfigRule::PrefixNotAlpha));
        assert!(!dir.path().join("rollchain").exists());
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("rollchain")).unwrap();
        let mut cfg = ChainConfig::new("rollchain");
        assert!(matches!(
            generate(&mut cfg, options(dir.path())),
            Err(SpawnError::ProjectExists(_))
        ));
    }

    #[test]
    fn test_generate_reports_both_trees() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = ChainConfig::new("rollchain").with_org("acme");
        let report = generate(&mut cfg, options(dir.path())).unwrap();

        assert_eq!(report.output_root, dir.path().join("rollchain"));
        let names: Vec<_> = report.trees.iter().map(|t| t.tree.as_str()).collect();
        assert_eq!(names, vec!["simapp", "interchaintest"]);
        assert!(report.files_written() > 20);
        assert!(report.output_root.join("interchaintest/go.mod").exists());
    }
}
