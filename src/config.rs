//! Configuration management
//!
//! Handles TOML configuration parsing and validation. The only tunable
//! today is the mapping from switch node numbers to pods, which is a
//! fabric-specific convention.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid pod band [{min}, {max}) -> '{pod}': min must be below max and pod must be named")]
    InvalidBand { min: u32, max: u32, pod: String },
    #[error("Default pod must not be empty")]
    EmptyDefaultPod,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pods: PodConfig,
}

/// Half-open node range `[min, max)` assigned to a pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodBand {
    pub min: u32,
    pub max: u32,
    pub pod: String,
}

impl PodBand {
    pub fn new(min: u32, max: u32, pod: impl Into<String>) -> Self {
        Self {
            min,
            max,
            pod: pod.into(),
        }
    }

    pub fn contains(&self, node: u32) -> bool {
        (self.min..self.max).contains(&node)
    }
}

/// How export rows pick a pod when no attachment matches the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodConfig {
    /// Pod for nodes outside every band
    pub default: String,
    /// Reuse the pod of an attachment on the same node(s) before bands
    pub infer_from_attachments: bool,
    /// Checked in order; first containing band wins
    pub bands: Vec<PodBand>,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            default: "pod-2".to_string(),
            infer_from_attachments: false,
            bands: vec![PodBand::new(300, 400, "pod-1"), PodBand::new(400, 500, "pod-2")],
        }
    }
}

impl PodConfig {
    /// Pod for a node number; unparsable nodes get the default pod
    pub fn pod_for_node(&self, node: &str) -> &str {
        let Ok(number) = node.trim().parse::<u32>() else {
            return &self.default;
        };
        self.bands
            .iter()
            .find(|band| band.contains(number))
            .map_or(self.default.as_str(), |band| band.pod.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultPod);
        }
        for band in &self.bands {
            if band.min >= band.max || band.pod.trim().is_empty() {
                return Err(ConfigError::InvalidBand {
                    min: band.min,
                    max: band.max,
                    pod: band.pod.clone(),
                });
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Parse and validate configuration text
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.pods.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `explicit` if given, else the per-user config file if it
    /// exists, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                log::info!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/vlancheck/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let pods = PodConfig::default();
        assert_eq!(pods.pod_for_node("303"), "pod-1");
        assert_eq!(pods.pod_for_node("399"), "pod-1");
        assert_eq!(pods.pod_for_node("400"), "pod-2");
        assert_eq!(pods.pod_for_node("425"), "pod-2");
        assert_eq!(pods.pod_for_node("101"), "pod-2");
        assert_eq!(pods.pod_for_node("500"), "pod-2");
        assert_eq!(pods.pod_for_node("XXX"), "pod-2");
    }

    #[test]
    fn test_parse_custom_bands() {
        let content = r#"
[pods]
default = "pod-9"
infer_from_attachments = true

[[pods.bands]]
min = 100
max = 200
pod = "pod-3"
"#;
        let config = AppConfig::from_toml(content, Path::new("test.toml")).unwrap();
        assert!(config.pods.infer_from_attachments);
        assert_eq!(config.pods.pod_for_node("150"), "pod-3");
        assert_eq!(config.pods.pod_for_node("303"), "pod-9");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_toml("[pods]\ninfer_from_attachments = true\n", Path::new("t"))
            .unwrap();
        assert_eq!(config.pods.default, "pod-2");
        assert_eq!(config.pods.bands.len(), 2);

        let empty = AppConfig::from_toml("", Path::new("t")).unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        let content = "[[pods.bands]]\nmin = 400\nmax = 300\npod = \"pod-1\"\n";
        let err = AppConfig::from_toml(content, Path::new("t")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBand { min: 400, max: 300, .. }));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err = AppConfig::from_toml("[pods]\ndefault = 2\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/vlancheck.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
