//! CLI command implementations for spawn.
//!
//! Each module corresponds to a subcommand (`spawn <command>`).

pub mod features;
pub mod new;
