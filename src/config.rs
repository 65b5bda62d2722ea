use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::collector::CollectOptions;
use crate::models::LineEnding;

const CONFIG_DIR: &str = ".generate-license-file";
const CONFIG_FILE: &str = "config.toml";

/// Settings read from `.generate-license-file/config.toml`.
///
/// Every key is optional; command-line flags take precedence over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Destination file.
    pub output: Option<PathBuf>,
    /// Write JSON instead of plain text.
    #[serde(default)]
    pub json: bool,
    /// Line endings, `"lf"` or `"crlf"`. Native when unset.
    pub eol: Option<LineEnding>,
    /// Replace an existing output file.
    #[serde(default)]
    pub overwrite: bool,
    /// Package names left out of the report.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Package name → license file used instead of the one found in `node_modules`.
    #[serde(default)]
    pub replace: HashMap<String, PathBuf>,
}

impl Config {
    /// Collector options, resolving relative `replace` paths against `project_path`.
    pub fn collect_options(&self, project_path: &Path, extra_exclude: &[String]) -> CollectOptions {
        let mut exclude = self.exclude.clone();
        for name in extra_exclude {
            if !exclude.contains(name) {
                exclude.push(name.clone());
            }
        }

        let replace = self
            .replace
            .iter()
            .map(|(name, path)| (name.clone(), project_path.join(path)))
            .collect();

        CollectOptions { exclude, replace }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.generate-license-file/config.toml`
/// 3. `~/.config/generate-license-file/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(CONFIG_DIR).join(CONFIG_FILE);
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("generate-license-file")
            .join(CONFIG_FILE);
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
