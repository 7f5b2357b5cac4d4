//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::export::ExportFormat;
use crate::core::geocode::DEFAULT_REVERSE_URL;
use crate::core::notify::DEFAULT_TIMEOUT_SECS;

/// Project-local config directory, relative to the working directory
pub const PROJECT_DIR: &str = ".dca";

const MAX_TIMEOUT_SECS: u64 = 86_400;

const DEFAULT_USER_AGENT: &str = concat!("dryclean-admin/", env!("CARGO_PKG_VERSION"));

/// DCA configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seconds before a notification is dismissed
    pub notification_timeout_secs: Option<u64>,

    /// Where exports are written when no path is given
    pub export_dir: Option<PathBuf>,

    /// Base URL of the Nominatim-compatible reverse geocoder
    pub geocoder_url: Option<String>,

    /// User-Agent sent to the geocoder
    pub geocoder_user_agent: Option<String>,

    /// Default export format (csv or xls)
    pub default_format: Option<String>,
}

/// Keys with a short description, for `dca config show`
pub const KEYS: &[(&str, &str)] = &[
    (
        "notification_timeout_secs",
        "Seconds before a notification disappears",
    ),
    ("export_dir", "Directory for exported files"),
    ("geocoder_url", "Reverse geocoder base URL"),
    ("geocoder_user_agent", "User-Agent sent to the geocoder"),
    ("default_format", "Default export format (csv, xls)"),
];

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let project = PathBuf::from(PROJECT_DIR).join("config.yaml");
        Self::load_from(
            Self::global_config_path().as_deref(),
            Some(project.as_path()),
            |key| std::env::var(key).ok(),
        )
    }

    /// Layered load with explicit sources
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl and the accessors)

        // 2. Global user config (~/.config/dca/config.yaml)
        if let Some(global) = global.and_then(Self::read_file) {
            config.merge(global);
        }

        // 3. Project config (.dca/config.yaml)
        if let Some(project) = project.and_then(Self::read_file) {
            config.merge(project);
        }

        // 4. Environment variables
        if let Some(secs) = env("DCA_NOTIFICATION_TIMEOUT_SECS") {
            match secs.trim().parse() {
                Ok(secs) => config.notification_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %secs, "ignoring DCA_NOTIFICATION_TIMEOUT_SECS"),
            }
        }
        if let Some(dir) = env("DCA_EXPORT_DIR") {
            config.export_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = env("DCA_GEOCODER_URL") {
            config.geocoder_url = Some(url);
        }
        if let Some(agent) = env("DCA_GEOCODER_USER_AGENT") {
            config.geocoder_user_agent = Some(agent);
        }
        if let Some(format) = env("DCA_DEFAULT_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring malformed config: {}", e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dca")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.notification_timeout_secs.is_some() {
            self.notification_timeout_secs = other.notification_timeout_secs;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
        if other.geocoder_url.is_some() {
            self.geocoder_url = other.geocoder_url;
        }
        if other.geocoder_user_agent.is_some() {
            self.geocoder_user_agent = other.geocoder_user_agent;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    pub fn notification_timeout(&self) -> chrono::Duration {
        let secs = self
            .notification_timeout_secs
            .map(|secs| secs.min(MAX_TIMEOUT_SECS) as i64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        chrono::Duration::seconds(secs)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn geocoder_url(&self) -> &str {
        self.geocoder_url.as_deref().unwrap_or(DEFAULT_REVERSE_URL)
    }

    pub fn geocoder_user_agent(&self) -> &str {
        self.geocoder_user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Export format, falling back to CSV when unset or unrecognized
    pub fn default_format(&self) -> ExportFormat {
        match self.default_format.as_deref().map(str::parse::<ExportFormat>) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                tracing::warn!("ignoring default_format: {}", e);
                ExportFormat::Csv
            }
            None => ExportFormat::Csv,
        }
    }

    /// Effective value of a key, as shown to the user
    pub fn value(&self, key: &str) -> Option<String> {
        match key {
            "notification_timeout_secs" => Some(self.notification_timeout().num_seconds().to_string()),
            "export_dir" => Some(self.export_dir().display().to_string()),
            "geocoder_url" => Some(self.geocoder_url().to_string()),
            "geocoder_user_agent" => Some(self.geocoder_user_agent().to_string()),
            "default_format" => Some(self.default_format().to_string()),
            _ => None,
        }
    }
}

/// Install the global tracing subscriber
///
/// `DCA_LOG` takes an env-filter directive; otherwise `level` applies to
/// this crate only. Logs go to stderr so piped output stays clean.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("dca={}", level);
    let filter_directive = std::env::var("DCA_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive.clone());

    let filter = EnvFilter::try_new(&filter_directive)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_from(None, None, no_env);
        assert_eq!(config.notification_timeout(), chrono::Duration::seconds(5));
        assert_eq!(config.export_dir(), PathBuf::from("."));
        assert_eq!(config.geocoder_url(), DEFAULT_REVERSE_URL);
        assert!(config.geocoder_user_agent().starts_with("dryclean-admin/"));
        assert_eq!(config.default_format(), ExportFormat::Csv);
    }

    #[test]
    fn test_layers_override_in_order() {
        let tmp = tempdir().unwrap();
        let global = tmp.path().join("global.yaml");
        let project = tmp.path().join("project.yaml");
        fs::write(
            &global,
            "notification_timeout_secs: 10\ndefault_format: xls\nexport_dir: /srv/exports\n",
        )
        .unwrap();
        fs::write(&project, "notification_timeout_secs: 3\n").unwrap();

        let env: HashMap<&str, &str> = [("DCA_EXPORT_DIR", "/tmp/out")].into_iter().collect();
        let config = Config::load_from(Some(global.as_path()), Some(project.as_path()), |k| {
            env.get(k).map(|v| v.to_string())
        });

        assert_eq!(config.notification_timeout_secs, Some(3));
        assert_eq!(config.default_format(), ExportFormat::Xls);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let tmp = tempdir().unwrap();
        let project = tmp.path().join("config.yaml");
        fs::write(&project, "notification_timeout_secs: [not a number\n").unwrap();

        let config = Config::load_from(None, Some(project.as_path()), no_env);
        assert_eq!(config.notification_timeout_secs, None);
    }

    #[test]
    fn test_bad_env_values_fall_back() {
        let config = Config::load_from(None, None, |k| match k {
            "DCA_NOTIFICATION_TIMEOUT_SECS" => Some("soon".to_string()),
            "DCA_DEFAULT_FORMAT" => Some("pdf".to_string()),
            _ => None,
        });
        assert_eq!(config.notification_timeout_secs, None);
        assert_eq!(config.default_format(), ExportFormat::Csv);
    }

    #[test]
    fn test_value_lookup() {
        let config = Config::load_from(None, None, no_env);
        assert_eq!(config.value("default_format").as_deref(), Some("csv"));
        assert_eq!(config.value("nope"), None);
        for (key, _) in KEYS {
            assert!(config.value(key).is_some(), "{} has no value", key);
        }
    }
}
