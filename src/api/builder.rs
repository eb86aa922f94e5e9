use std::{env, error::Error, path::PathBuf};

use crate::{config::DeplockConfig, Deplock};

#[derive(Default)]
pub struct DeplockBuilder {
    // All other paths are relative to `root`
    root: Option<PathBuf>,
    lock_file_name: Option<PathBuf>,
}

impl DeplockBuilder {
    /// Project root directory.
    ///
    /// Defaults to the current directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Name of the lock file.
    ///
    /// Defaults to `DEPLOCK_LOCK_FILE`, or `dependencies.lock` when that is not set.
    pub fn lock_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.lock_file_name = Some(path.into());
        self
    }

    pub fn try_build(self) -> Result<Deplock, Box<dyn Error>> {
        let Self {
            root,
            lock_file_name,
        } = self;
        let root = match root {
            Some(root) => root,
            None => env::current_dir()?,
        };

        let lock_file_name = match lock_file_name {
            Some(lock_file_name) => lock_file_name,
            None => DeplockConfig::load()?.lock_file,
        };

        Ok(Deplock {
            root,
            lock_file_name,
        })
    }
}
