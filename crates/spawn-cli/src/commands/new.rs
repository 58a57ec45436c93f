use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use dialoguer::MultiSelect;

use spawn_core::config::ChainConfig;
use spawn_core::features::Feature;
use spawn_core::project::{self, GenerateOptions};

use crate::output;
use crate::NewArgs;

/// Generate a new chain project.
///
/// Builds a [`ChainConfig`] from flags (or a JSON file), asks which features
/// to keep unless told not to, generates the tree and optionally initializes
/// a git repository in it.
pub fn run(args: NewArgs) -> Result<()> {
    let name = args.name.to_lowercase();
    output::print_header(&format!("spawn new: {name}"));

    let mut cfg = build_config(&args, &name)?;

    output::print_step(1, 3, "Generating project sources");
    let options = GenerateOptions::default().with_output_dir(&args.output_dir);
    let report = project::generate(&mut cfg, options)?;
    output::print_key_value("Output", &report.output_root.display().to_string());
    output::print_key_value("Files", &report.files_written().to_string());
    output::print_key_value("Module", &cfg.module_path());
    output::print_key_value("Binary", &cfg.binary_name);
    if !cfg.disabled_features.is_empty() {
        output::print_key_value("Disabled", &cfg.disabled_features.join(", "));
    }

    output::print_step(2, 3, "Initializing git repository");
    if cfg.init_git {
        init_git(&report.output_root);
    } else {
        output::print_key_value("git", "skipped");
    }

    output::print_step(3, 3, "Done");
    output::print_success(&format!("Project '{name}' created"));
    output::print_next_steps(&[
        &format!("cd {}", report.output_root.display()),
        "make install",
        "make sh-testnet",
        "make ictest-basic",
    ]);

    Ok(())
}

fn build_config(args: &NewArgs, name: &str) -> Result<ChainConfig> {
    let mut cfg = match &args.config {
        Some(path) => ChainConfig::load(path)
            .with_context(|| format!("loading chain config from {}", path.display()))?
            .with_project_name(name),
        None => {
            let mut cfg = ChainConfig::new(name)
                .with_address_prefix(&args.address_prefix)
                .with_binary_name(&args.binary_name)
                .with_denom(&args.denom)
                .with_org(&args.org);
            if let Some(home) = &args.home {
                cfg = cfg.with_home_dir(home);
            }
            cfg
        }
    };

    if !args.disable.is_empty() {
        cfg = cfg.with_disabled_features(args.disable.as_slice());
    } else if args.config.is_none() && !args.bypass_prompt {
        cfg = cfg.with_disabled_features(prompt_disabled_features()?.as_slice());
    }
    if args.skip_git {
        cfg = cfg.with_init_git(false);
    }
    Ok(cfg)
}

/// Ask which features to keep; every unselected feature is disabled.
fn prompt_disabled_features() -> Result<Vec<&'static str>> {
    let items: Vec<String> = Feature::ALL
        .iter()
        .map(|f| format!("{:<width$} {}", f.as_str(), f.description(), width = output::FEATURE_COLUMN))
        .collect();
    let defaults = vec![true; items.len()];

    let selected = MultiSelect::new()
        .with_prompt("Select features to include (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    Ok(Feature::ALL
        .iter()
        .enumerate()
        .filter(|(i, _)| !selected.contains(i))
        .map(|(_, f)| f.as_str())
        .collect())
}

fn init_git(root: &Path) {
    let git = match which::which("git") {
        Ok(path) => path,
        Err(_) => {
            output::print_warning("git not found on PATH, skipping repository init");
            return;
        }
    };

    match Command::new(git).arg("init").current_dir(root).output() {
        Ok(out) if out.status.success() => output::print_success("Initialized git repository"),
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            tracing::warn!(stderr = %stderr.trim(), "git init failed");
            output::print_warning("git init failed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not run git");
            output::print_warning(&format!("could not run git: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use spawn_core::error::{ConfigRule, SpawnError};

    use super::*;

    fn args(name: &str, output_dir: PathBuf) -> NewArgs {
        NewArgs {
            name: name.into(),
            address_prefix: "cosmos".into(),
            binary_name: "appd".into(),
            denom: "token".into(),
            org: "acme".into(),
            home: None,
            disable: Vec::new(),
            skip_git: true,
            bypass_prompt: true,
            config: None,
            output_dir,
        }
    }

    #[test]
    fn test_build_config_from_flags() {
        let mut a = args("RollChain", PathBuf::from("."));
        a.disable = vec!["cw".into(), "tf".into()];
        let cfg = build_config(&a, "rollchain").unwrap();
        assert_eq!(cfg.project_name, "rollchain");
        assert_eq!(cfg.home_dir, ".rollchain");
        assert_eq!(cfg.disabled_features, vec!["cw", "tf"]);
        assert!(!cfg.init_git);
    }

    #[test]
    fn test_generation_error_is_returned_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args("rollchain", dir.path().to_path_buf());
        a.address_prefix = "c919".into();

        let err = run(a).unwrap_err();
        let spawn_err = err.downcast_ref::<SpawnError>().unwrap();
        assert_eq!(spawn_err.config_rule(), Some(ConfigRule::PrefixNotAlpha));
        assert!(!dir.path().join("rollchain").exists());
    }
}
