//! Splitting scanner identifiers (`name@version`, `@scope/name@version`) into parts.

/// Package name of an identifier, scope prefix preserved.
pub fn name(identifier: &str) -> String {
    split(identifier).0
}

/// Version part of an identifier; empty when the identifier carries none.
pub fn version(identifier: &str) -> String {
    split(identifier).1
}

/// Split on `@`: three segments mean a scoped package (leading empty segment),
/// anything else is read as `name@version`.
pub fn split(identifier: &str) -> (String, String) {
    let parts: Vec<&str> = identifier.split('@').collect();
    if parts.len() == 3 {
        (format!("@{}", parts[1]), parts[2].to_string())
    } else {
        let version = parts.get(1).copied().unwrap_or_default();
        (parts[0].to_string(), version.to_string())
    }
}

/// Build the identifier a scanner reports for a package.
pub fn identifier(name: &str, version: &str) -> String {
    format!("{}@{}", name, version)
}
