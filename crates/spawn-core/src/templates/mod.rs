//! Reference trees for project generation.
//!
//! The reference project under `templates/simapp/` is embedded into the binary
//! at compile time by the [`embedded`] module, so generation never reads it
//! from disk at runtime.
//!
//! ## Placeholders
//!
//! The reference sources are written against fixed values that
//! [`crate::replace`] rewrites:
//! - `github.com/rollchains/spawn/simapp`: Go module path
//! - `wasmd`, `cmd/wasmd`: binary name and its entry point directory
//! - `wasm1...`: sample addresses (prefix rewritten, body kept)
//! - `CosmosSimApp`, `.myapplicationd`, `mybechprefix`: app type name, node home, address prefix
//!
//! ## Tags
//!
//! Feature-dependent regions carry `spawntag` markers (see [`crate::tags`]).
//! Any line that mentions a removable identifier and opens a `(` or `{` must
//! close it on its own line with exactly `)` or `}`.
//!
//! **Warning**: the files in `templates/simapp/` and the table in [`embedded`]
//! must stay in sync.

pub mod embedded;
