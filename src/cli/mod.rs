//! Command-line surface
//!
//! Argument definitions live here; [orchestration] maps each subcommand onto
//! the version store, repository gateway and build workflow.

pub mod orchestration;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "build-cut",
    version,
    about = "Bump build numbers, write release notes, and tag builds"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print debug logging to stderr")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the marketing version
    GetMarketingVersion,

    /// Set the marketing version
    SetMarketingVersion {
        /// The new marketing version
        version: String,

        #[arg(short, long, help = "Print the version tool's output")]
        verbose: bool,
    },

    /// Print the build number
    GetBuildNumber,

    /// Set the build number
    SetBuildNumber {
        /// The new build number
        version: String,

        #[arg(short, long, help = "Print the version tool's output")]
        verbose: bool,
    },

    /// Advance the build number once
    BumpBuildNumber {
        #[arg(short, long, help = "Print the version tool's output")]
        verbose: bool,
    },

    /// Print the full version (marketing version and build number)
    GetFullVersion,

    /// Bump the build number, generate release notes, commit and tag
    MakeBuild {
        #[arg(
            short,
            long,
            value_name = "TAG",
            help = "Previous tag for release notes [default: tag of the current version]"
        )]
        prev_tag: Option<String>,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },

    /// Push a release tag to the remote
    PushTag {
        /// Tag to push [default: tag of the current version]
        tag: Option<String>,

        #[arg(short, long, help = "Remote to push to [default: from config]")]
        remote: Option<String>,

        #[arg(short, long, help = "Skip confirmation prompt")]
        force: bool,
    },
}
