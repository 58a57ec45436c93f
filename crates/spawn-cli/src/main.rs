//! spawn CLI: scaffold a ready-to-build Cosmos SDK chain.
//!
//! Two commands: `new` generates a project from the embedded reference tree,
//! `features` lists the features that can be opted out of.
//!
//! All generation work is delegated to [`spawn_core::project::generate`].

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "spawn",
    about = "Scaffold a Cosmos SDK chain from an embedded reference project",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new chain project
    New(NewArgs),

    /// List the features that can be disabled
    Features,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Project name (creates a directory with this name)
    pub name: String,

    /// Bech32 address prefix
    #[arg(long = "bech32", short = 'p', default_value = "cosmos")]
    pub address_prefix: String,

    /// Binary name
    #[arg(long = "bin", short = 'b', default_value = "simd")]
    pub binary_name: String,

    /// Native token denomination
    #[arg(long, default_value = "token")]
    pub denom: String,

    /// Source organization (github.com/<org>/<project>)
    #[arg(long, env = "SPAWN_ORG", default_value = "rollchains")]
    pub org: String,

    /// Node home directory (default: .<project>)
    #[arg(long)]
    pub home: Option<String>,

    /// Features to disable, comma separated
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Do not initialize a git repository
    #[arg(long)]
    pub skip_git: bool,

    /// Skip the interactive feature selection
    #[arg(long)]
    pub bypass_prompt: bool,

    /// Read the chain configuration from a JSON file instead of flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the project directory is created in
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Commands only propagate; the error is reported once, here.
    if let Err(e) = run(cli.command) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::New(args) => commands::new::run(args)?,
        Commands::Features => commands::features::run(),
    }
    Ok(())
}
