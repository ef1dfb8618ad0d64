//! CLI module for model-share
//!
//! Subcommands operate on the configured model document store:
//! - `resolve`: print the public view of a share
//! - `share`: enable or update sharing for a model
//! - `revoke`: deactivate a model's share
//! - `import`: copy a shared model into an owner's workspace

pub mod share;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// model-share - resolve and manage shared diagram models
#[derive(Parser)]
#[command(name = "model-share")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Model document file, overrides `repository.path`
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the public view of a shared model
    Resolve {
        /// Share identifier from the share link
        share_id: String,
    },

    /// Enable or update sharing for a model
    Share(ShareArgs),

    /// Deactivate a model's share, keeping its share identifier
    Revoke {
        model_id: String,
    },

    /// Copy a shared model into an owner's workspace
    Import {
        share_id: String,

        /// Identifier of the user receiving the copy
        #[arg(long)]
        owner: String,
    },
}

#[derive(Args)]
pub struct ShareArgs {
    pub model_id: String,

    /// Create or keep the share but leave it disabled
    #[arg(long)]
    pub inactive: bool,

    /// Allow viewers to import the model
    #[arg(long)]
    pub import_allowed: bool,
}
