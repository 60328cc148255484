//! Project metadata shown in the startup banner.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TerminalError};

const UNKNOWN: &str = "unknown";

/// Manifests looked up in the working directory, in order.
pub const DEFAULT_MANIFESTS: [&str; 2] = ["package.json", "Cargo.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
}

impl ProjectInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// First default manifest present in the current directory.
pub fn default_manifest() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    DEFAULT_MANIFESTS
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file())
}

/// Read `name` and `version` from a `package.json`-style JSON document or
/// the `[package]` table of a `Cargo.toml`. Fields that are missing or not
/// strings come back as `"unknown"`.
pub fn read_project_info(path: &Path) -> Result<ProjectInfo> {
    let raw = fs::read_to_string(path).map_err(|err| TerminalError::manifest(path, err))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        let doc: toml::Table = raw.parse().map_err(|err| TerminalError::manifest(path, err))?;
        let package = doc.get("package").and_then(toml::Value::as_table);
        let field = |key: &str| {
            package
                .and_then(|table| table.get(key))
                .and_then(toml::Value::as_str)
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Ok(ProjectInfo::new(field("name"), field("version")))
    } else {
        let doc: Value =
            serde_json::from_str(&raw).map_err(|err| TerminalError::manifest(path, err))?;
        let field = |key: &str| {
            doc.get(key)
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Ok(ProjectInfo::new(field("name"), field("version")))
    }
}

/// Like [`read_project_info`] but never fails: anything that goes wrong
/// yields [`ProjectInfo::unknown`]. `None` means the default manifest.
pub fn load_project_info(path: Option<&Path>) -> ProjectInfo {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_manifest() {
            Some(path) => path,
            None => {
                log::debug!("no project manifest in the working directory");
                return ProjectInfo::unknown();
            }
        },
    };

    match read_project_info(&path) {
        Ok(info) => info,
        Err(err) => {
            log::debug!("{err}; using unknown project metadata");
            ProjectInfo::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).expect("write manifest");
        path
    }

    #[test]
    fn reads_package_json() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "package.json", r#"{"name": "demo", "version": "1.2.3"}"#);
        assert_eq!(
            read_project_info(&path).unwrap(),
            ProjectInfo::new("demo", "1.2.3")
        );
    }

    #[test]
    fn reads_cargo_toml() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "Cargo.toml",
            "[package]\nname = \"crate-demo\"\nversion = \"0.4.0\"\n",
        );
        assert_eq!(
            read_project_info(&path).unwrap(),
            ProjectInfo::new("crate-demo", "0.4.0")
        );
    }

    #[test]
    fn missing_field_is_unknown() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "package.json", r#"{"name": "only-name"}"#);
        assert_eq!(
            read_project_info(&path).unwrap(),
            ProjectInfo::new("only-name", "unknown")
        );
    }

    #[test]
    fn malformed_manifest_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "package.json", "{ not json");
        assert!(read_project_info(&path).is_err());
        assert_eq!(load_project_info(Some(&path)), ProjectInfo::unknown());
    }

    #[test]
    fn missing_manifest_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("package.json");
        assert_eq!(load_project_info(Some(&path)), ProjectInfo::unknown());
    }
}
