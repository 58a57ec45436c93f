//! Core library for spawn.
//!
//! Generates a ready-to-build Cosmos SDK chain from an embedded reference
//! project. The [`project::generate`] entry point validates a
//! [`config::ChainConfig`], then the [`engine::Engine`] walks each embedded
//! tree and pushes every file through a [`pipeline::Pipeline`]:
//! placeholder substitution ([`replace`]), feature removal ([`removal`]),
//! syntax validation ([`validate`]) and finally a write to disk.
//!
//! Feature removal is built from a small set of text primitives on
//! [`file::FileRecord`]: tag markers ([`tags`]), identifier-scoped construct
//! removal ([`construct`]) and address-prefix rewriting ([`address`]).

pub mod address;
pub mod config;
pub mod construct;
pub mod engine;
pub mod error;
pub mod features;
pub mod file;
pub mod pipeline;
pub mod project;
pub mod removal;
pub mod replace;
pub mod tags;
pub mod templates;
pub mod validate;

pub use config::ChainConfig;
pub use error::{Result, SpawnError};
pub use features::Feature;
