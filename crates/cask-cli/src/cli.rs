use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cask_sdk::ScriptRef;
use cask_types::{Category, ShortId};

#[derive(Parser)]
#[command(
    name = "cask",
    about = "Content-addressed script storage under short shareable ids",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the journal file backing the store.
    #[arg(short, long, global = true, default_value = "cask.journal")]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a metadata and a roles document and register the pair
    Publish(PublishArgs),
    /// Store a single document in one category
    Put(PutArgs),
    /// Print a stored document
    Get(GetArgs),
    /// Register an existing metadata/roles pair
    Link(LinkArgs),
    /// Print both documents of a published script
    Pair(PairArgs),
    /// Show record, link, and id-length counters
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct PublishArgs {
    /// JSON file with the script metadata.
    pub metadata: PathBuf,
    /// JSON file with the role list.
    pub roles: PathBuf,
}

#[derive(Args)]
pub struct PutArgs {
    /// Target namespace: "metadata" or "roles".
    pub category: Category,
    /// JSON file to store.
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    /// Namespace: "metadata" or "roles".
    pub category: Category,
    /// Identifier to fetch.
    pub id: ShortId,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Metadata identifier.
    pub metadata_id: ShortId,
    /// Roles identifier.
    pub roles_id: ShortId,
}

#[derive(Args)]
pub struct PairArgs {
    /// Script reference, e.g. "g-4".
    pub script: ScriptRef,
}

#[derive(Args)]
pub struct StatsArgs {}
