use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ScanOptions, Scanner};
use crate::models::{LicenseType, ModuleInfo, ModuleInfos};
use crate::package_id;

/// Lockfiles in the order npm itself honours them.
const LOCKFILES: &[&str] = &["npm-shrinkwrap.json", "package-lock.json"];

const LICENSE_FILE_PATTERN: &str = r"(?i)^(LICEN[CS]E|COPYING)([-._].*)?$";

/// Scans an npm project installed on disk.
pub struct NpmScanner;

impl NpmScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NpmScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for NpmScanner {
    fn scan(&self, options: &ScanOptions) -> Result<ModuleInfos> {
        let root = options.start.as_path();
        if !root.join("package.json").is_file() {
            bail!("no package.json found in {}", root.display());
        }

        let packages = match find_lockfile(root) {
            Some(lock) => {
                debug!("reading dependency tree from {}", lock.display());
                parse_lockfile(&lock, root, options.production)
                    .with_context(|| format!("failed to parse {}", lock.display()))?
            }
            None => {
                debug!("no lockfile in {}, walking node_modules", root.display());
                walk_installed(root, options.production)?
            }
        };

        let license_file_re = Regex::new(LICENSE_FILE_PATTERN)?;
        let mut infos: BTreeMap<String, ModuleInfo> = BTreeMap::new();

        for pkg in packages {
            let id = package_id::identifier(&pkg.name, &pkg.version);
            if infos.contains_key(&id) {
                continue;
            }
            let info = read_module_info(&pkg.dir, pkg.license, &license_file_re)?;
            infos.insert(id, info);
        }

        Ok(infos.into_iter().collect())
    }
}

/// A package located in the dependency tree, before its license metadata is read.
#[derive(Debug)]
struct TreePackage {
    name: String,
    version: String,
    dir: PathBuf,
    /// License declared in the lockfile, used when the package is not installed.
    license: Option<LicenseType>,
}

fn find_lockfile(root: &Path) -> Option<PathBuf> {
    LOCKFILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

#[derive(Debug, Deserialize)]
struct PackageLock {
    packages: Option<BTreeMap<String, LockPackage>>,
    dependencies: Option<BTreeMap<String, LockDependency>>,
}

/// Entry of the lockfile v2/v3 `packages` map.
#[derive(Debug, Deserialize)]
struct LockPackage {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    link: bool,
    license: Option<Value>,
}

/// Entry of the lockfile v1 `dependencies` tree.
#[derive(Debug, Deserialize)]
struct LockDependency {
    version: String,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    dependencies: BTreeMap<String, LockDependency>,
}

fn parse_lockfile(lock_path: &Path, root: &Path, production: bool) -> Result<Vec<TreePackage>> {
    let content = std::fs::read_to_string(lock_path)?;
    let lock: PackageLock = serde_json::from_str(&content)?;

    if let Some(packages) = lock.packages {
        return Ok(packages_from_v2(packages, root, production));
    }

    let mut deps = Vec::new();
    if let Some(dependencies) = lock.dependencies {
        packages_from_v1(&dependencies, root, Path::new(""), production, &mut deps);
    }
    Ok(deps)
}

fn packages_from_v2(
    packages: BTreeMap<String, LockPackage>,
    root: &Path,
    production: bool,
) -> Vec<TreePackage> {
    let mut deps = Vec::new();

    for (pkg_path, entry) in packages {
        // "" is the project itself, links point at workspace sources
        if pkg_path.is_empty() || entry.link {
            continue;
        }
        if production && entry.dev {
            continue;
        }

        // "node_modules/a/node_modules/@scope/b" → "@scope/b"
        let Some((_, dir_name)) = pkg_path.rsplit_once("node_modules/") else {
            debug!("skipping workspace package {}", pkg_path);
            continue;
        };
        let Some(version) = entry.version else {
            debug!("skipping {} without a version", pkg_path);
            continue;
        };

        let dir = root.join(&pkg_path);
        if entry.optional && !dir.is_dir() {
            debug!("optional dependency {} is not installed", pkg_path);
            continue;
        }

        deps.push(TreePackage {
            name: entry.name.unwrap_or_else(|| dir_name.to_string()),
            version,
            dir,
            license: entry.license.as_ref().and_then(license_name).map(LicenseType::Single),
        });
    }

    deps
}

fn packages_from_v1(
    dependencies: &BTreeMap<String, LockDependency>,
    root: &Path,
    parent: &Path,
    production: bool,
    deps: &mut Vec<TreePackage>,
) {
    for (name, entry) in dependencies {
        if production && entry.dev {
            continue;
        }
        let rel = parent.join("node_modules").join(name);
        let dir = root.join(&rel);
        if entry.optional && !dir.is_dir() {
            debug!("optional dependency {} is not installed", name);
            continue;
        }

        deps.push(TreePackage {
            name: name.clone(),
            version: entry.version.clone(),
            dir,
            license: None,
        });
        packages_from_v1(&entry.dependencies, root, &rel, production, deps);
    }
}

/// Subset of `package.json` needed to walk the tree and read license metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
    license: Option<Value>,
    licenses: Option<Value>,
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, Value>,
}

fn read_manifest(path: &Path) -> Result<PackageManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// A dependency edge still waiting to be resolved.
struct Pending {
    from: PathBuf,
    name: String,
    optional: bool,
}

/// Walk `node_modules` from the root manifest's dependencies, the way Node resolves them.
fn walk_installed(root: &Path, production: bool) -> Result<Vec<TreePackage>> {
    let manifest = read_manifest(&root.join("package.json"))?;

    let mut stack: Vec<Pending> = Vec::new();
    push_edges(&mut stack, root, &manifest, !production);

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut deps = Vec::new();

    while let Some(edge) = stack.pop() {
        let Some(dir) = resolve(root, &edge.from, &edge.name) else {
            if edge.optional {
                debug!("optional dependency {} is not installed", edge.name);
            } else {
                warn!(
                    "{} is required by {} but is not installed",
                    edge.name,
                    edge.from.display()
                );
            }
            continue;
        };
        if !seen.insert(dir.clone()) {
            continue;
        }

        let pkg = read_manifest(&dir.join("package.json"))?;
        push_edges(&mut stack, &dir, &pkg, false);

        deps.push(TreePackage {
            name: pkg.name.unwrap_or_else(|| edge.name.clone()),
            version: pkg.version.unwrap_or_default(),
            dir,
            license: None,
        });
    }

    Ok(deps)
}

fn push_edges(stack: &mut Vec<Pending>, from: &Path, manifest: &PackageManifest, include_dev: bool) {
    let required = manifest.dependencies.keys().map(|n| (n, false));
    let optional = manifest.optional_dependencies.keys().map(|n| (n, true));
    let dev = manifest
        .dev_dependencies
        .keys()
        .filter(|_| include_dev)
        .map(|n| (n, false));

    // reversed so the stack pops in manifest order
    let mut edges: Vec<Pending> = required
        .chain(optional)
        .chain(dev)
        .map(|(name, optional)| Pending {
            from: from.to_path_buf(),
            name: name.clone(),
            optional,
        })
        .collect();
    edges.reverse();
    stack.extend(edges);
}

/// Node's lookup: `<dir>/node_modules/<name>` from `from` up to the project root.
fn resolve(root: &Path, from: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(from);
    while let Some(dir) = current {
        let candidate = dir.join("node_modules").join(name);
        if candidate.join("package.json").is_file() {
            return Some(candidate);
        }
        if dir == root {
            break;
        }
        current = dir.parent();
    }
    None
}

fn read_module_info(
    dir: &Path,
    lock_license: Option<LicenseType>,
    license_file_re: &Regex,
) -> Result<ModuleInfo> {
    let manifest_path = dir.join("package.json");
    let declared = if manifest_path.is_file() {
        let manifest = read_manifest(&manifest_path)?;
        declared_license(manifest.license.as_ref(), manifest.licenses.as_ref())
    } else {
        None
    };

    Ok(ModuleInfo {
        license_file: find_license_file(dir, license_file_re)?,
        licenses: declared.or(lock_license),
    })
}

/// License type from the modern `license` field or the legacy `licenses` list.
fn declared_license(license: Option<&Value>, licenses: Option<&Value>) -> Option<LicenseType> {
    if let Some(name) = license.and_then(license_name) {
        return Some(LicenseType::Single(name));
    }

    let mut names: Vec<String> = match licenses? {
        Value::Array(items) => items.iter().filter_map(license_name).collect(),
        other => license_name(other).into_iter().collect(),
    };
    match names.len() {
        0 => None,
        1 => Some(LicenseType::Single(names.remove(0))),
        _ => Some(LicenseType::Multiple(names)),
    }
}

/// `"MIT"` or `{ "type": "MIT", "url": "..." }`.
fn license_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("type").and_then(Value::as_str)?,
        _ => return None,
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// First `LICENSE*` / `LICENCE*` file in `dir`, falling back to `COPYING*`.
fn find_license_file(dir: &Path, license_file_re: &Regex) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<(u8, String)> = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(caps) = license_file_re.captures(&file_name) {
            let rank = if caps[1].eq_ignore_ascii_case("COPYING") { 1 } else { 0 };
            candidates.push((rank, file_name));
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next().map(|(_, name)| dir.join(name)))
}
