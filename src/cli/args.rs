use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::ModuleKey;

/// Records resolved dependency versions of a build into a lock file.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Project root directory, report and lock file paths are relative to it
    #[clap(short, long, default_value = ".")]
    pub root: PathBuf,
    /// Name of the lock file [default: dependencies.lock]
    #[clap(short, long)]
    pub lock_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Records resolution reports, one per project configuration, into the lock file
    Record {
        #[clap(required = true)]
        reports: Vec<PathBuf>,
        /// Verify that the lock file is up to date instead of rewriting it
        #[clap(long)]
        locked: bool,
    },
    /// Prints the entries of the lock file
    Show {
        /// Only show entries of this module, e.g. `com.example:lib`
        #[clap(short, long)]
        module: Option<ModuleKey>,
    },
}
