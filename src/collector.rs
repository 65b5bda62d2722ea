use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::models::{LicenseRecord, ModuleInfo};
use crate::package_id;
use crate::scanner::{ScanOptions, Scanner};

/// Adjustments applied to scanner output before grouping.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Package names to leave out entirely.
    pub exclude: Vec<String>,
    /// Package name → license file to use instead of the scanned one.
    pub replace: HashMap<String, PathBuf>,
}

/// Groups a project's dependencies by identical license text.
pub struct LicenseCollector<S> {
    scanner: S,
    options: CollectOptions,
}

impl<S: Scanner> LicenseCollector<S> {
    pub fn new(scanner: S) -> Self {
        Self::with_options(scanner, CollectOptions::default())
    }

    pub fn with_options(scanner: S, options: CollectOptions) -> Self {
        Self { scanner, options }
    }

    /// Scan the production dependencies under `project_path` and deduplicate their licenses.
    ///
    /// Records come back in the order their license text was first seen.
    pub fn collect(&self, project_path: &Path) -> Result<Vec<LicenseRecord>> {
        if !project_path.is_dir() {
            return Err(Error::DirectoryNotFound(project_path.to_path_buf()));
        }

        let modules = self
            .scanner
            .scan(&ScanOptions::production(project_path))
            .map_err(Error::Scanner)?;

        let mut records: Vec<LicenseRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (identifier, info) in modules {
            let (name, version) = package_id::split(&identifier);
            if self.options.exclude.contains(&name) {
                debug!("excluding {}", identifier);
                continue;
            }

            let content = match self.options.replace.get(&name) {
                Some(path) => read_license(path)?,
                None => match license_text(&info)? {
                    Some(text) => text,
                    None => {
                        debug!("{} has no license file or license type, skipping", identifier);
                        continue;
                    }
                },
            };

            let slot = *index.entry(content.clone()).or_insert_with(|| {
                records.push(LicenseRecord {
                    content,
                    name,
                    version,
                    dependencies: Vec::new(),
                });
                records.len() - 1
            });
            records[slot].dependencies.push(identifier);
        }

        Ok(records)
    }
}

/// License file text when it exists on disk, otherwise `(<license type>)`.
fn license_text(info: &ModuleInfo) -> Result<Option<String>> {
    if let Some(path) = info.license_file.as_deref().filter(|p| p.exists()) {
        return read_license(path).map(Some);
    }
    Ok(info
        .licenses
        .as_ref()
        .and_then(|l| l.first())
        .map(|license| format!("({})", license)))
}

/// Invalid UTF-8 sequences are replaced with U+FFFD; only I/O failures are errors.
fn read_license(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::LicenseRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
