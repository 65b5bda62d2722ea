//! `generate-license-file` — collect the license texts of a project's production
//! dependencies into a single notice file.
//!
//! # Flow
//! 1. Scan the project's installed dependency tree ([`scanner`]).
//! 2. Group packages that ship byte-identical license text ([`collector`]).
//! 3. Stream the groups out as plain text or JSON ([`report`]).
//!
//! ```no_run
//! use std::path::Path;
//! use generate_license_file::{generate_license_file, OutputFormat};
//!
//! # fn main() -> generate_license_file::Result<()> {
//! generate_license_file(Path::new("."), Path::new("third-party-licenses.txt"), OutputFormat::Text)?;
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod package_id;
pub mod report;
pub mod scanner;

use std::path::Path;

pub use collector::{CollectOptions, LicenseCollector};
pub use error::{Error, Result};
pub use models::{LicenseRecord, LicenseType, LineEnding, ModuleInfo, ModuleInfos, OutputFormat};
pub use scanner::npm::NpmScanner;
pub use scanner::{ScanOptions, Scanner};

/// Scan the project at `project_path` and write its license report to `output_path`.
///
/// The output file is created or truncated; line endings follow the host platform.
pub fn generate_license_file(
    project_path: &Path,
    output_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let licenses = get_project_licenses(project_path)?;
    report::write_report(&licenses, output_path, format, LineEnding::native())
}

/// License records for the production dependencies of the project at `project_path`.
pub fn get_project_licenses(project_path: &Path) -> Result<Vec<LicenseRecord>> {
    LicenseCollector::new(NpmScanner::new()).collect(project_path)
}
