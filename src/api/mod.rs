use std::{error::Error, path::PathBuf};

use crate::{
    cli::command_handlers::{do_record, do_show},
    model::{lock::LockSnapshot, ModuleKey},
};

mod builder;

pub use builder::DeplockBuilder;

pub struct Deplock {
    root: PathBuf,
    lock_file_name: PathBuf,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LockMode {
    /// Verify that the lock file is up to date. This mode should be normally used on CI.
    Locked,
    /// Update the lock file if necessary.
    Update,
}

impl Deplock {
    pub fn builder() -> DeplockBuilder {
        DeplockBuilder::default()
    }

    /// Records the given resolution reports and writes or verifies the lock file
    pub fn record(
        &self,
        lock_mode: LockMode,
        reports: &[PathBuf],
    ) -> Result<LockSnapshot, Box<dyn Error>> {
        do_record(lock_mode, &self.root, &self.lock_file_name, reports)
    }

    /// Prints the lock file entries, optionally only those of one module
    pub fn show(&self, module: Option<&ModuleKey>) -> Result<(), Box<dyn Error>> {
        do_show(&self.root, &self.lock_file_name, module)
    }
}
