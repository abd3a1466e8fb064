//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Anvil - Ansible deployment-bundle generator
#[derive(Parser, Debug)]
#[command(name = "anvil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a deployment bundle from a template request
    Generate(GenerateArgs),

    /// Remove a generation session's working tree and archive
    Cleanup(CleanupArgs),

    /// List stored CI fragments
    Fragments(FragmentsArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the configuration store file
    #[arg(short, long)]
    pub store: Utf8PathBuf,

    /// Path to the template request (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    pub request: Utf8PathBuf,

    /// Output path for the bundle archive
    #[arg(short, long, default_value = "Ansible-Template.tar.gz")]
    pub output: Utf8PathBuf,

    /// Working directory for generation sessions
    #[arg(long)]
    pub workdir: Option<Utf8PathBuf>,

    /// Keep the session working tree after the archive is delivered
    #[arg(long)]
    pub keep: bool,

    /// Compression level (1-9)
    #[arg(long, default_value = "6")]
    pub compression: u32,
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Session identifier returned by generate
    pub session_id: String,

    /// Working directory for generation sessions
    #[arg(long)]
    pub workdir: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct FragmentsArgs {
    /// Path to the configuration store file
    #[arg(short, long)]
    pub store: Utf8PathBuf,

    /// Only list fragments of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<FragmentKind>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FragmentKind {
    /// Shared pipeline preamble
    Common,

    /// Environment-scoped fragments
    Environment,

    /// Role-scoped fragments
    Role,
}

impl FragmentKind {
    /// Convert the CLI enum to the library fragment kind.
    pub fn to_lib_kind(self) -> anvil_store::CiFragmentKind {
        match self {
            FragmentKind::Common => anvil_store::CiFragmentKind::Common,
            FragmentKind::Environment => anvil_store::CiFragmentKind::Environment,
            FragmentKind::Role => anvil_store::CiFragmentKind::Role,
        }
    }
}
