use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_zone_list_limit")]
    pub zone_list_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_provider() -> String {
    "ultradns".to_string()
}

fn default_host() -> String {
    "restapi.ultradns.com".to_string()
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_zone_list_limit() -> u32 {
    1000 // provider maximum per page
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        #[cfg(unix)]
        {
            PathBuf::from("/etc/zonectl")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\ProgramData\zonectl")
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            host: default_host(),
            use_tls: default_use_tls(),
            timeout_seconds: default_timeout(),
            zone_list_limit: default_zone_list_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[api]
host = "test-restapi.ultradns.com"
use_tls = false
zone_list_limit = 250

[logging]
level = "debug"
"#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.api.provider, "ultradns");
        assert_eq!(settings.api.host, "test-restapi.ultradns.com");
        assert!(!settings.api.use_tls);
        assert_eq!(settings.api.timeout_seconds, 30);
        assert_eq!(settings.api.zone_list_limit, 250);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.api.host, "restapi.ultradns.com");
        assert!(settings.api.use_tls);
        assert_eq!(settings.api.zone_list_limit, 1000);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::load(Some(&missing)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nhost = \"localhost:9000\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.api.host, "localhost:9000");
        assert_eq!(settings.api.provider, "ultradns");
    }
}
