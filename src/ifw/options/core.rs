//! Core `Options` store.

use crate::ifw::error::{Error, ErrorExt, Result};
use std::{collections::BTreeMap, path::Path};

/// CMake-style option store.
///
/// Later assignments replace earlier ones, so callers layer sources from the
/// least to the most specific (project file, option files, command line).
///
/// # Examples
///
/// ```
/// use ifw_packager::ifw::Options;
///
/// let mut options = Options::new();
/// options.set_option("CPACK_DOWNLOAD_ALL", "ON");
/// options.set_option("CPACK_IFW_PACKAGES_DIRECTORIES", "/opt/a;/opt/b");
///
/// assert!(options.is_option_true("CPACK_DOWNLOAD_ALL"));
/// assert_eq!(options.get_list("CPACK_IFW_PACKAGES_DIRECTORIES"), ["/opt/a", "/opt/b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    /// Creates an empty option store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) an option.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value of an option, if set.
    pub fn get_option(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of an option only when it is set and non-empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get_option(key).filter(|v| !v.is_empty())
    }

    /// Returns `true` when the option is set to a CMake true constant.
    pub fn is_option_true(&self, key: &str) -> bool {
        self.get_option(key).is_some_and(is_true_value)
    }

    /// Expands a `;`-separated list option, dropping empty elements.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get_option(key)
            .map(|value| {
                value
                    .split(';')
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Merges the options declared in a TOML list file.
    ///
    /// The file is a flat table; see [`Options::merge_table`] for value rules.
    pub async fn read_list_file(&mut self, path: &Path) -> Result<()> {
        log::debug!("Reading option file {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading option file", path)?;
        let table: toml::Table = toml::from_str(&content)?;
        self.merge_table(&table)
    }

    /// Merges a TOML table into the store.
    ///
    /// Strings are taken as is, booleans become `ON`/`OFF`, numbers their decimal
    /// text and arrays a `;`-joined list. Nested tables are rejected.
    pub fn merge_table(&mut self, table: &toml::Table) -> Result<()> {
        for (key, value) in table {
            let value = toml_to_option(key, value)?;
            self.set_option(key.clone(), value);
        }
        Ok(())
    }

    /// Parses and applies a `KEY=VALUE` definition.
    pub fn define(&mut self, definition: &str) -> Result<()> {
        let (key, value) = definition
            .split_once('=')
            .ok_or_else(|| Error::InvalidOption {
                key: definition.to_string(),
                reason: "expected KEY=VALUE".into(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidOption {
                key: definition.to_string(),
                reason: "empty option name".into(),
            });
        }
        self.set_option(key, value);
        Ok(())
    }
}

/// CMake truthiness: `1`, `ON`, `YES`, `TRUE`, `Y` and non-zero numbers.
pub fn is_true_value(value: &str) -> bool {
    let upper = value.trim().to_ascii_uppercase();
    match upper.as_str() {
        "1" | "ON" | "YES" | "TRUE" | "Y" => true,
        "" | "0" | "OFF" | "NO" | "FALSE" | "N" | "IGNORE" | "NOTFOUND" => false,
        _ if upper.ends_with("-NOTFOUND") => false,
        _ => upper.parse::<f64>().is_ok_and(|n| n != 0.0),
    }
}

fn toml_to_option(key: &str, value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Boolean(b) => Ok(if *b { "ON" } else { "OFF" }.to_string()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if matches!(item, toml::Value::Array(_) | toml::Value::Table(_)) {
                    return Err(Error::InvalidOption {
                        key: key.to_string(),
                        reason: "lists may only hold scalar values".into(),
                    });
                }
                parts.push(toml_to_option(key, item)?);
            }
            Ok(parts.join(";"))
        }
        toml::Value::Table(_) => Err(Error::InvalidOption {
            key: key.to_string(),
            reason: "tables are not valid option values".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmake_truthiness() {
        for value in ["1", "ON", "on", "Yes", "TRUE", "y", "2", "0.5"] {
            assert!(is_true_value(value), "{value} should be true");
        }
        for value in ["", "0", "OFF", "no", "false", "N", "IGNORE", "NOTFOUND", "FOO-NOTFOUND", "bogus"] {
            assert!(!is_true_value(value), "{value} should be false");
        }
    }

    #[test]
    fn list_expansion_skips_empty_items() {
        let mut options = Options::new();
        options.set_option("L", "a;;b;");
        assert_eq!(options.get_list("L"), ["a", "b"]);
        assert!(options.get_list("MISSING").is_empty());
    }

    #[test]
    fn merge_table_converts_scalars_and_lists() {
        let table: toml::Table = toml::from_str(
            r#"
            CPACK_DOWNLOAD_ALL = true
            CPACK_IFW_TOOL_TIMEOUT = 30
            CPACK_IFW_PACKAGES_DIRECTORIES = ["/a", "/b"]
            CPACK_PACKAGE_NAME = "Demo"
            "#,
        )
        .unwrap();

        let mut options = Options::new();
        options.merge_table(&table).unwrap();

        assert_eq!(options.get_option("CPACK_DOWNLOAD_ALL"), Some("ON"));
        assert_eq!(options.get_option("CPACK_IFW_TOOL_TIMEOUT"), Some("30"));
        assert_eq!(options.get_option("CPACK_IFW_PACKAGES_DIRECTORIES"), Some("/a;/b"));
        assert_eq!(options.get_option("CPACK_PACKAGE_NAME"), Some("Demo"));
    }

    #[test]
    fn merge_table_rejects_nested_tables() {
        let table: toml::Table = toml::from_str("[NESTED]\nx = 1\n").unwrap();
        let err = Options::new().merge_table(&table).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "NESTED"));
    }

    #[tokio::test]
    async fn read_list_file_layers_over_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        std::fs::write(&path, "CPACK_PACKAGE_NAME = \"FromFile\"\n").unwrap();

        let mut options = Options::new();
        options.set_option("CPACK_PACKAGE_NAME", "FromProject");
        options.set_option("CPACK_PACKAGE_VERSION", "2.0");
        options.read_list_file(&path).await.unwrap();

        assert_eq!(options.get_option("CPACK_PACKAGE_NAME"), Some("FromFile"));
        assert_eq!(options.get_option("CPACK_PACKAGE_VERSION"), Some("2.0"));
    }

    #[tokio::test]
    async fn missing_list_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Options::new().read_list_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn define_splits_on_first_equals() {
        let mut options = Options::new();
        options.define("CPACK_DOWNLOAD_SITE=https://x/?a=b").unwrap();
        assert_eq!(options.get_option("CPACK_DOWNLOAD_SITE"), Some("https://x/?a=b"));
        assert!(options.define("NO_VALUE").is_err());
        assert!(options.define("=value").is_err());
    }
}
