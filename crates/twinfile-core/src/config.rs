//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for one scan pass.
///
/// Passed explicitly into each component call; there is no process-wide
/// settings object.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Descend into subdirectories. When false, only direct children of
    /// the root are considered.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Exclude candidates smaller than this many bytes before
    /// fingerprinting.
    #[builder(default)]
    #[serde(default)]
    pub min_size: Option<u64>,

    /// Glob patterns for file names to skip.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Number of traversal threads (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            min_size: None,
            ignore_patterns: Vec::new(),
            include_hidden: true,
            threads: 0,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .recursive(false)
            .min_size(Some(1024))
            .threads(4usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(!config.recursive);
        assert_eq!(config.min_size, Some(1024));
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.recursive);
        assert_eq!(config.min_size, None);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_builder_rejects_missing_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ScanConfig::builder()
            .root("/data")
            .ignore_patterns(vec!["*.log".to_string()])
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.root, config.root);
        assert_eq!(back.ignore_patterns, config.ignore_patterns);
        assert!(back.recursive);
    }
}
