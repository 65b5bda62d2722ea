/// End-to-end tests: a small npm project on disk, the binary run against it,
/// and the generated report checked.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MIT_TEXT: &str = "MIT License\n\nCopyright (c) pad authors\n";

// ============================================================================
// Helper Functions
// ============================================================================

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `left-pad` and `right-pad` share one MIT text, `@scope/util` only declares ISC,
/// `jest` is a dev dependency.
fn create_test_project(root: &Path) {
    write(
        &root.join("package.json"),
        r#"{ "name": "app", "version": "1.0.0",
             "dependencies": { "left-pad": "^1.0.0", "right-pad": "^1.0.0", "@scope/util": "^2.0.0" },
             "devDependencies": { "jest": "^29.0.0" } }"#,
    );
    write(
        &root.join("package-lock.json"),
        r#"{
  "name": "app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "app", "version": "1.0.0" },
    "node_modules/@scope/util": { "version": "2.0.0", "license": "ISC" },
    "node_modules/jest": { "version": "29.0.0", "dev": true, "license": "MIT" },
    "node_modules/left-pad": { "version": "1.0.0", "license": "MIT" },
    "node_modules/right-pad": { "version": "1.0.0", "license": "MIT" }
  }
}"#,
    );
    for name in ["left-pad", "right-pad"] {
        let dir = root.join("node_modules").join(name);
        write(
            &dir.join("package.json"),
            &format!(r#"{{ "name": "{}", "version": "1.0.0", "license": "MIT" }}"#, name),
        );
        write(&dir.join("LICENSE"), MIT_TEXT);
    }
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_text_report() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.txt");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "--eol", "lf", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with(
        "The following NPM package may be included in this product:\n\n - @scope/util@2.0.0\n"
    ));
    assert!(report.contains("(ISC)"));
    assert!(report.contains(
        "The following NPM packages may be included in this product:\n\n - left-pad@1.0.0\n - right-pad@1.0.0\n"
    ));
    assert!(report.contains("These packages each contain the following license and notice below:"));
    assert!(report.contains("MIT License\n\nCopyright (c) pad authors\n\n-----------\n"));
    assert!(!report.contains("jest"));
    assert!(report.contains("\nGenerated on "));
    assert!(report.ends_with("https://www.npmjs.com/package/generate-license-file"));
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.json");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "--json", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let licenses = doc["licenses"].as_array().unwrap();
    assert_eq!(licenses.len(), 2);
    assert_eq!(licenses[0]["name"], "@scope/util");
    assert_eq!(licenses[0]["content"], "(ISC)");
    assert_eq!(licenses[1]["name"], "left-pad");
    assert_eq!(licenses[1]["version"], "1.0.0");
    assert_eq!(licenses[1]["content"], MIT_TEXT);
    assert_eq!(
        licenses[1]["dependencies"],
        serde_json::json!(["left-pad@1.0.0", "right-pad@1.0.0"])
    );
    assert!(doc["generatedOn"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_exclude_flag() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.txt");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "--exclude", "@scope/util", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let report = fs::read_to_string(&output).unwrap();
    assert!(!report.contains("@scope/util"));
    assert!(report.contains("left-pad@1.0.0"));
}

#[test]
fn test_json_report_with_crlf() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.json");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "--json", "--eol", "crlf", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let raw = fs::read_to_string(&output).unwrap();
    assert!(raw.starts_with("{ \"licenses\": [\r\n"));
    assert!(raw.contains("],\r\n\"generatedOn\""));
    // license bodies are JSON-escaped, so every raw line break is a separator
    assert_eq!(raw.matches('\n').count(), raw.matches("\r\n").count());

    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["licenses"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_eol_applies_to_text_report() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.txt");
    write(
        &dir.path().join(".generate-license-file").join("config.toml"),
        "eol = \"crlf\"\n",
    );

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with(
        "The following NPM package may be included in this product:\r\n\r\n - @scope/util@2.0.0\r\n"
    ));
    assert!(report.contains("\r\n-----------\r\n"));
    assert!(report.contains("\r\nGenerated on "));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_input_directory_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("licenses.txt");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path().join("does-not-exist"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find directory"));

    assert!(!output.exists());
}

#[test]
fn test_missing_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("licenses.txt");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no package.json found"));
}

#[test]
fn test_existing_output_requires_overwrite() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("licenses.txt");
    fs::write(&output, "old contents").unwrap();

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "old contents");

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "--overwrite", "-i"])
        .arg(dir.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(fs::read_to_string(&output).unwrap().contains("left-pad@1.0.0"));
}

// ============================================================================
// Config file
// ============================================================================

#[test]
fn test_project_config_file() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let output = dir.path().join("NOTICE.json");
    write(
        &dir.path().join(".generate-license-file").join("config.toml"),
        &format!(
            "output = {:?}\njson = true\nexclude = [\"right-pad\"]\n",
            output.to_string_lossy()
        ),
    );

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path())
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        doc["licenses"][1]["dependencies"],
        serde_json::json!(["left-pad@1.0.0"])
    );
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    create_test_project(dir.path());
    let config = dir.path().join("bad.toml");
    fs::write(&config, "json = \"yes please\"").unwrap();

    cargo_bin_cmd!("generate-license-file")
        .args(["-q", "-i"])
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
