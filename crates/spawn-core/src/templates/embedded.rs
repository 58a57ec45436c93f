//! Compile-time embedded reference trees.
//!
//! Every file of `templates/simapp/` is loaded here via [`include_str!`]; the
//! paths are relative to this source file
//! (`crates/spawn-core/src/templates/embedded.rs`).
//!
//! ## Adding a reference file
//!
//! 1. Place the file under `templates/simapp/`
//! 2. Add an [`EmbeddedFile`] entry to [`SIMAPP`] or, for the end-to-end test
//!    harness, to [`INTERCHAINTEST`]
//! 3. Run `cargo build`: a wrong path fails compilation
//!
//! Files that must not be generated (such as `embed.go`) stay listed here and
//! are filtered by the engine's ignore list.

/// One file of an embedded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedFile {
    /// Slash-separated path relative to the project root.
    pub path: &'static str,
    pub contents: &'static str,
}

/// A named, immutable file tree bundled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTree {
    pub name: &'static str,
    pub files: &'static [EmbeddedFile],
}

impl EmbeddedTree {
    /// Look up a file by its relative path.
    pub fn get(&self, path: &str) -> Option<&'static EmbeddedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

// -------------------------------------------------------
// Main reference project
// -------------------------------------------------------

pub const SIMAPP: EmbeddedTree = EmbeddedTree {
    name: "simapp",
    files: SIMAPP_FILES,
};

const SIMAPP_FILES: &[EmbeddedFile] = &[
    EmbeddedFile {
        path: ".github/workflows/docker-release.yml",
        contents: include_str!("../../../../templates/simapp/.github/workflows/docker-release.yml"),
    },
    EmbeddedFile {
        path: ".github/workflows/interchaintest-e2e.yml",
        contents: include_str!("../../../../templates/simapp/.github/workflows/interchaintest-e2e.yml"),
    },
    EmbeddedFile {
        path: ".goreleaser.yaml",
        contents: include_str!("../../../../templates/simapp/.goreleaser.yaml"),
    },
    EmbeddedFile {
        path: "Dockerfile",
        contents: include_str!("../../../../templates/simapp/Dockerfile"),
    },
    EmbeddedFile {
        path: "Makefile",
        contents: include_str!("../../../../templates/simapp/Makefile"),
    },
    EmbeddedFile {
        path: "app/ante.go",
        contents: include_str!("../../../../templates/simapp/app/ante.go"),
    },
    EmbeddedFile {
        path: "app/app.go",
        contents: include_str!("../../../../templates/simapp/app/app.go"),
    },
    EmbeddedFile {
        path: "app/app_test.go",
        contents: include_str!("../../../../templates/simapp/app/app_test.go"),
    },
    EmbeddedFile {
        path: "app/encoding.go",
        contents: include_str!("../../../../templates/simapp/app/encoding.go"),
    },
    EmbeddedFile {
        path: "app/sim_test.go",
        contents: include_str!("../../../../templates/simapp/app/sim_test.go"),
    },
    EmbeddedFile {
        path: "app/test_helpers.go",
        contents: include_str!("../../../../templates/simapp/app/test_helpers.go"),
    },
    EmbeddedFile {
        path: "app/wasm.go",
        contents: include_str!("../../../../templates/simapp/app/wasm.go"),
    },
    EmbeddedFile {
        path: "chains.yaml",
        contents: include_str!("../../../../templates/simapp/chains.yaml"),
    },
    EmbeddedFile {
        path: "chains/.gitkeep",
        contents: include_str!("../../../../templates/simapp/chains/.gitkeep"),
    },
    EmbeddedFile {
        path: "cmd/wasmd/commands.go",
        contents: include_str!("../../../../templates/simapp/cmd/wasmd/commands.go"),
    },
    EmbeddedFile {
        path: "cmd/wasmd/ics_consumer.go",
        contents: include_str!("../../../../templates/simapp/cmd/wasmd/ics_consumer.go"),
    },
    EmbeddedFile {
        path: "cmd/wasmd/main.go",
        contents: include_str!("../../../../templates/simapp/cmd/wasmd/main.go"),
    },
    EmbeddedFile {
        path: "cmd/wasmd/root.go",
        contents: include_str!("../../../../templates/simapp/cmd/wasmd/root.go"),
    },
    EmbeddedFile {
        path: "cmd/wasmd/testnet.go",
        contents: include_str!("../../../../templates/simapp/cmd/wasmd/testnet.go"),
    },
    EmbeddedFile {
        path: "config.yml",
        contents: include_str!("../../../../templates/simapp/config.yml"),
    },
    EmbeddedFile {
        path: "embed.go",
        contents: include_str!("../../../../templates/simapp/embed.go"),
    },
    EmbeddedFile {
        path: "go.mod",
        contents: include_str!("../../../../templates/simapp/go.mod"),
    },
    EmbeddedFile {
        path: "go.sum",
        contents: include_str!("../../../../templates/simapp/go.sum"),
    },
    EmbeddedFile {
        path: "heighliner/Dockerfile",
        contents: include_str!("../../../../templates/simapp/heighliner/Dockerfile"),
    },
    EmbeddedFile {
        path: "scripts/test_ics_node.sh",
        contents: include_str!("../../../../templates/simapp/scripts/test_ics_node.sh"),
    },
    EmbeddedFile {
        path: "scripts/test_node.sh",
        contents: include_str!("../../../../templates/simapp/scripts/test_node.sh"),
    },
];

// -------------------------------------------------------
// End-to-end test harness
// -------------------------------------------------------

pub const INTERCHAINTEST: EmbeddedTree = EmbeddedTree {
    name: "interchaintest",
    files: INTERCHAINTEST_FILES,
};

const INTERCHAINTEST_FILES: &[EmbeddedFile] = &[
    EmbeddedFile {
        path: "interchaintest/basic_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/basic_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/contracts/README.md",
        contents: include_str!("../../../../templates/simapp/interchaintest/contracts/README.md"),
    },
    EmbeddedFile {
        path: "interchaintest/cosmwasm_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/cosmwasm_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/go.mod_",
        contents: include_str!("../../../../templates/simapp/interchaintest/go.mod_"),
    },
    EmbeddedFile {
        path: "interchaintest/ibc_rate_limit_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/ibc_rate_limit_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/ibc_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/ibc_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/packetforward_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/packetforward_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/poa.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/poa.go"),
    },
    EmbeddedFile {
        path: "interchaintest/poa_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/poa_test.go"),
    },
    EmbeddedFile {
        path: "interchaintest/setup.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/setup.go"),
    },
    EmbeddedFile {
        path: "interchaintest/tokenfactory_test.go",
        contents: include_str!("../../../../templates/simapp/interchaintest/tokenfactory_test.go"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trees_are_disjoint() {
        for file in SIMAPP.files {
            assert!(!file.path.starts_with("interchaintest/"), "{}", file.path);
            assert!(INTERCHAINTEST.get(file.path).is_none());
        }
        for file in INTERCHAINTEST.files {
            assert!(file.path.starts_with("interchaintest/"), "{}", file.path);
        }
    }

    #[test]
    fn test_reference_placeholders_present() {
        let app = SIMAPP.get("app/app.go").unwrap();
        assert!(app.contents.contains("CosmosSimApp"));
        assert!(app.contents.contains("mybechprefix"));

        let gomod = INTERCHAINTEST.get("interchaintest/go.mod_").unwrap();
        assert!(gomod.contents.starts_with("module github.com/rollchains/spawn/simapp/interchaintest"));
    }
}
