use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One deduplicated license text and every dependency that ships it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Body of the license, or `(<license type>)` when no license file was found.
    pub content: String,
    /// Package the record was first seen on, scope included (`@scope/name`).
    pub name: String,
    /// Version of that first package.
    pub version: String,
    /// Scanner identifiers (`name@version`) of all packages sharing `content`.
    pub dependencies: Vec<String>,
}

/// License metadata reported by a [`Scanner`](crate::scanner::Scanner) for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    pub license_file: Option<PathBuf>,
    pub licenses: Option<LicenseType>,
}

/// Declared license type: package manifests carry either one string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseType {
    Single(String),
    Multiple(Vec<String>),
}

impl LicenseType {
    /// The license used as a textual fallback, `None` when nothing usable was declared.
    pub fn first(&self) -> Option<&str> {
        let first = match self {
            LicenseType::Single(s) => Some(s.as_str()),
            LicenseType::Multiple(v) => v.first().map(String::as_str),
        };
        first.filter(|s| !s.is_empty())
    }
}

/// Ordered scanner output: identifier (`name@version`) to license metadata.
pub type ModuleInfos = Vec<(String, ModuleInfo)>;

/// Output document flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Line break convention used for every generated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl LineEnding {
    /// The host platform's convention.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::native()
    }
}
