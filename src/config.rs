//! Application configuration stored in `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SANTRI_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
///
/// Missing keys fall back to [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spreadsheet intake endpoint. Empty disables submission.
    pub intake_url: String,
    /// Extra endpoints notified after each delivered registration.
    pub webhooks: Vec<String>,
    /// Per-request timeout for every outbound HTTP call.
    pub request_timeout_secs: u64,
    pub backend: BackendConfig,
}

/// Hosted database holding activities and user roles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intake_url: String::new(),
            webhooks: Vec::new(),
            request_timeout_secs: 15,
            backend: BackendConfig::default(),
        }
    }
}

impl Config {
    /// Checks value ranges and URL schemes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".into(),
            ));
        }
        let urls = std::iter::once(("intake_url", &self.intake_url))
            .chain(self.webhooks.iter().map(|w| ("webhooks", w)))
            .chain(std::iter::once(("backend.url", &self.backend.url)));
        for (key, url) in urls {
            if !url.is_empty() && !is_http_url(url) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must start with http:// or https://, got {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// Applies `SANTRI_*` overrides looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SANTRI_INTAKE_URL") {
            self.intake_url = url;
        }
        if let Some(url) = lookup("SANTRI_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(key) = lookup("SANTRI_BACKEND_KEY") {
            self.backend.anon_key = key;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Returns the config file path: `$SANTRI_CONFIG`, else
/// `<config dir>/santri/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("santri").join("config.toml"))
}

/// Loads and validates config from a TOML file.
///
/// A missing file yields [`Config::default`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn full_file_parses() {
        let (_dir, path) = write_config(
            r#"
intake_url = "https://script.google.com/macros/s/abc/exec"
webhooks = ["https://hooks.example.org/a"]
request_timeout_secs = 5

[backend]
url = "https://project.supabase.co"
anon_key = "anon"
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.intake_url, "https://script.google.com/macros/s/abc/exec");
        assert_eq!(config.webhooks, vec!["https://hooks.example.org/a"]);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.backend.url, "https://project.supabase.co");
        assert_eq!(config.backend.anon_key, "anon");
    }

    #[test]
    fn partial_file_uses_defaults() {
        let (_dir, path) = write_config("intake_url = \"http://localhost:8080\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.intake_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.webhooks.is_empty());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let (_dir, path) = write_config("intake_url = ");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn non_http_webhook_rejected() {
        let config = Config {
            webhooks: vec!["ftp://example.org".into()],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("webhooks"));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SANTRI_INTAKE_URL", "https://intake.example.org"),
            ("SANTRI_BACKEND_KEY", "secret"),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.intake_url, "https://intake.example.org");
        assert_eq!(config.backend.anon_key, "secret");
        assert_eq!(config.backend.url, "");
    }
}
