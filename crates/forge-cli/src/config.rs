//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables prefixed `FORGE_`, with `__` between sections
//!    (`FORGE_DEFAULTS__JDK=11`)
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_PREFIX: &str = "FORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new applications.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Extra feature manifests.
    pub features: FeaturesConfig,
    /// Binary resources referenced by artifacts.
    pub resources: ResourcesConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

/// Option values used when the matching flag is absent. Unset values are
/// inferred from the application type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub application_type: String,
    pub build_tool: Option<String>,
    pub test_framework: Option<String>,
    pub gorm: Option<String>,
    pub jdk: Option<String>,
    pub language: Option<String>,
    /// Always requested, in addition to `--features`.
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// JSON-lines log file, appended to on every run.
    pub file: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            application_type: "web".into(),
            build_tool: None,
            test_framework: None,
            gorm: None,
            jdk: Some("17".into()),
            language: None,
            features: vec!["web".into()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `FORGE_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = toml::to_string(&Self::default()).context("serialising defaults")?;

        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        Self::load_from(&defaults, &path, required)
    }

    fn load_from(defaults: &str, path: &Path, required: bool) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from_str(defaults, FileFormat::Toml))
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.features"),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("configuration has an invalid shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.forge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "forge", "forge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".forge.toml"))
    }

    /// Look up a dotted key such as `defaults.jdk`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = toml::Value::try_from(self).ok()?;
        let found = key
            .split('.')
            .try_fold(&value, |node, segment| node.get(segment))?;

        Some(match found {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(contents: Option<&str>) -> AppConfig {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let defaults = toml::to_string(&AppConfig::default()).unwrap();
        AppConfig::load_from(&defaults, &path, contents.is_some()).unwrap()
    }

    #[test]
    fn defaults_request_web_on_jdk_17() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.application_type, "web");
        assert_eq!(cfg.defaults.jdk.as_deref(), Some("17"));
        assert_eq!(cfg.defaults.features, vec!["web"]);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        assert_eq!(load(None), AppConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let cfg = load(Some(
            r#"
[defaults]
jdk = "11"
features = ["web", "h2"]

[resources]
dir = "/opt/forge/resources"
"#,
        ));
        assert_eq!(cfg.defaults.jdk.as_deref(), Some("11"));
        assert_eq!(cfg.defaults.features, vec!["web", "h2"]);
        assert_eq!(cfg.defaults.application_type, "web");
        assert_eq!(cfg.resources.dir, Some(PathBuf::from("/opt/forge/resources")));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let defaults = toml::to_string(&AppConfig::default()).unwrap();
        assert!(AppConfig::load_from(&defaults, Path::new("/no/such/forge.toml"), true).is_err());
    }

    #[test]
    fn dotted_get_reads_nested_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.jdk").as_deref(), Some("17"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("defaults.nope"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
