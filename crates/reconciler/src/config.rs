//! Reconciler configuration (environment-driven).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the export filename.
pub const EXPORT_FILE_ENV: &str = "GROCERY_EXPORT_FILE";
/// Environment variable overriding the export directory.
pub const EXPORT_DIR_ENV: &str = "GROCERY_EXPORT_DIR";

pub const DEFAULT_EXPORT_FILE: &str = "Boodschappen.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Filename handed to the export sink when a list is shared.
    pub export_file_name: String,
    /// Directory a [`crate::FileExportSink`] writes into.
    pub export_dir: PathBuf,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            export_file_name: DEFAULT_EXPORT_FILE.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl ReconcilerConfig {
    /// Defaults overridden by `GROCERY_EXPORT_FILE` / `GROCERY_EXPORT_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ReconcilerConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup(EXPORT_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.export_file_name = name;
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.export_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_boodschappen_json() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.export_file_name, "Boodschappen.json");
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ReconcilerConfig::from_lookup(|key| match key {
            EXPORT_FILE_ENV => Some("list.json".to_string()),
            EXPORT_DIR_ENV => Some("/tmp/exports".to_string()),
            _ => None,
        });
        assert_eq!(config.export_file_name, "list.json");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ReconcilerConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, ReconcilerConfig::default());
    }
}
