//! Placeholder substitutions.
//!
//! The reference tree is authored against fixed placeholder values (module
//! path, binary name, address prefix, ...). Each boundary step below rewrites
//! the placeholders of one family of files and is a no-op for other paths.

use crate::config::ChainConfig;
use crate::error::Result;
use crate::file::FileRecord;

/// Module path of the reference project.
pub const BASE_MODULE_PATH: &str = "github.com/rollchains/spawn/simapp";
/// Address prefix the reference project ships with.
pub const BASE_ADDRESS_PREFIX: &str = "wasm";
/// Binary name the reference project ships with.
pub const BASE_BINARY: &str = "wasmd";
/// Directory of the reference binary's entry point.
pub const BASE_BINARY_DIR: &str = "cmd/wasmd";

pub const APP_FILE: &str = "app/app.go";
pub const SETUP_FILE: &str = "interchaintest/setup.go";
pub const POA_TEST_FILE: &str = "interchaintest/poa_test.go";
pub const E2E_WORKFLOW: &str = ".github/workflows/interchaintest-e2e.yml";
pub const RELEASE_WORKFLOW: &str = ".github/workflows/docker-release.yml";
pub const GORELEASER: &str = ".goreleaser.yaml";
pub const TEST_NODE_SCRIPT: &str = "scripts/test_node.sh";
pub const TEST_ICS_NODE_SCRIPT: &str = "scripts/test_ics_node.sh";

/// CI workflows: local docker tag and the binary path inside the image.
pub fn replace_github_actions(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    let bin = &cfg.binary_name;
    if f.has_path_suffix(E2E_WORKFLOW) {
        f.replace_all("wasmd:local", &format!("{}:local", cfg.docker_image()));
    }
    if f.has_path_suffix(RELEASE_WORKFLOW) {
        f.replace_all("/go/bin/wasmd", &format!("/go/bin/{bin}"));
    }
    if f.has_path_suffix(GORELEASER) {
        f.replace_all("rollchains", &cfg.org_name);
        f.replace_all("simapp", &cfg.project_name);
        f.replace_all(BASE_BINARY, bin);
    }
    Ok(())
}

pub fn replace_dockerfile(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    if f.relative_path() == "Dockerfile" {
        f.replace_all(BASE_BINARY, &cfg.binary_name);
    }
    Ok(())
}

/// Defaults and sample addresses of the local testnet scripts.
pub fn replace_test_node_script(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    if !f.in_paths(&[TEST_NODE_SCRIPT, TEST_ICS_NODE_SCRIPT]) {
        return Ok(());
    }

    let home = &cfg.home_dir;
    f.replace_all(
        "export BINARY=${BINARY:-wasmd}",
        &format!("export BINARY=${{BINARY:-{}}}", cfg.binary_name),
    );
    f.replace_all(
        "export DENOM=${DENOM:-token}",
        &format!("export DENOM=${{DENOM:-{}}}", cfg.denom),
    );
    f.replace_all(
        r#"export HOME_DIR=$(eval echo "${HOME_DIR:-"~/.simapp"}")"#,
        &format!(r#"export HOME_DIR=$(eval echo "${{HOME_DIR:-"~/{home}"}}")"#),
    );
    f.replace_all(r#"HOME_DIR="~/.simapp""#, &format!(r#"HOME_DIR="~/{home}""#));
    f.find_and_replace_address_prefix(BASE_ADDRESS_PREFIX, &cfg.address_prefix)
}

/// Application name, node home and address prefix of the main application file.
pub fn replace_app(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    if f.has_path_suffix(APP_FILE) {
        f.replace_all(".myapplicationd", &cfg.home_dir);
        f.replace_all("CosmosSimApp", &cfg.app_title());
        f.replace_all("mybechprefix", &cfg.address_prefix);
    }
    Ok(())
}

/// Build recipes that mention the binary or docker image. Applies to every file.
pub fn replace_makefile(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    let bin = &cfg.binary_name;
    let image = cfg.docker_image();

    f.replace_all(
        "https://github.com/rollchains/spawn/simapp.git",
        &format!("https://{}.git", cfg.module_path()),
    );
    f.replace_all("version.Name=wasm", &format!("version.Name={}", cfg.project_name));
    f.replace_all("version.AppName=wasmd", &format!("version.AppName={bin}"));
    f.replace_all(BASE_BINARY_DIR, &format!("cmd/{bin}"));
    f.replace_all("build/wasmd", &format!("build/{bin}"));
    f.replace_all("wasmd keys", &format!("{bin} keys"));
    f.replace_all("wasmd config", &format!("{bin} config"));
    f.replace_all("docker build . -t wasmd:local", &format!("docker build . -t {image}:local"));
    f.replace_all("heighliner build -c wasmd", &format!("heighliner build -c {image}"));

    if f.has_path_suffix("chains.yaml") {
        f.replace_all("myappname", &image);
        f.replace_all("/go/bin/wasmd", &format!("/go/bin/{bin}"));
    }
    if f.relative_path() == "config.yml" {
        f.replace_all("binary: wasmd", &format!("binary: {bin}"));
    }
    Ok(())
}

/// Chain constants of the end-to-end test harness.
pub fn replace_interchaintest_setup(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    if !f.has_path_suffix(SETUP_FILE) {
        return Ok(());
    }

    // The image line mentions the binary, so it goes first.
    f.replace_all(
        r#"ibc.NewDockerImage("wasmd", "local", "1025:1025")"#,
        &format!(r#"ibc.NewDockerImage("{}", "local", "1025:1025")"#, cfg.docker_image()),
    );
    f.replace_all("mydenom", &cfg.denom);
    f.replace_all("appName", &cfg.project_name);
    f.replace_all(r#"Binary  = "wasmd""#, &format!(r#"Binary  = "{}""#, cfg.binary_name));
    f.replace_all(r#"Bech32  = "wasm""#, &format!(r#"Bech32  = "{}""#, cfg.address_prefix));
    f.find_and_replace_address_prefix(BASE_ADDRESS_PREFIX, &cfg.address_prefix)
}

/// Substitutions every file receives.
pub fn replace_everywhere(f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
    f.replace_all(BASE_MODULE_PATH, &cfg.module_path());

    if f.has_path_prefix(BASE_BINARY_DIR) {
        f.rewrite_destination(BASE_BINARY_DIR, &format!("cmd/{}", cfg.binary_name));
    }

    if f.has_path_suffix(POA_TEST_FILE) {
        f.find_and_replace_address_prefix(BASE_ADDRESS_PREFIX, &cfg.address_prefix)?;
    }
    Ok(())
}
