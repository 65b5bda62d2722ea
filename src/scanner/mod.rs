//! Dependency scanners: walk a project's resolved dependency tree and report
//! each package's license metadata.
//!
//! - [`npm`] — npm projects, from `package-lock.json` or the installed `node_modules` tree.

use std::path::PathBuf;

use anyhow::Result;

use crate::models::ModuleInfos;

pub mod npm;

/// Where to start scanning and which dependencies to include.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub start: PathBuf,
    /// Leave out development-only dependencies.
    pub production: bool,
}

impl ScanOptions {
    /// Production-only scan rooted at `start`.
    pub fn production(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            production: true,
        }
    }
}

pub trait Scanner {
    /// Identifier (`name@version`) to license metadata, in reporting order.
    fn scan(&self, options: &ScanOptions) -> Result<ModuleInfos>;
}
