//! Application configuration DTO.
//!
//! `AppConfig` is a pure data carrier. Loading happens in the binary's
//! bootstrap layer; this module only maps a parsed TOML tree onto fields.
//! Missing values become empty values, nothing is validated here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Which family of remote adapters the runtime is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-process auth service and document store. Nothing leaves the device.
    Memory,
    /// Firebase Identity Toolkit + Firestore over REST.
    Firebase,
}

impl BackendKind {
    fn parse(raw: &str) -> Self {
        match raw {
            "firebase" => BackendKind::Firebase,
            _ => BackendKind::Memory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub identity_endpoint: String,
    pub token_endpoint: String,
    pub firestore_endpoint: String,
}

impl FirebaseConfig {
    pub fn empty() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            identity_endpoint: DEFAULT_IDENTITY_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            firestore_endpoint: DEFAULT_FIRESTORE_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub firebase: FirebaseConfig,
    /// JSON file backing the local key/value preferences.
    pub preferences_path: PathBuf,
    /// Default tracing directive, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Directory for rolling log files. Empty disables file logging.
    pub log_dir: PathBuf,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
}

impl AppConfig {
    /// Map a parsed TOML document onto the config DTO.
    ///
    /// Endpoints fall back to the public Google hosts so a config only needs
    /// the project keys; every other missing value stays empty.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let string = |section: &str, key: &str| {
            str_at(toml_value, section, key).unwrap_or("").to_string()
        };
        let endpoint = |key: &str, default: &str| {
            str_at(toml_value, "firebase", key)
                .unwrap_or(default)
                .to_string()
        };

        Ok(Self {
            backend: BackendKind::parse(str_at(toml_value, "backend", "kind").unwrap_or("")),
            firebase: FirebaseConfig {
                api_key: string("firebase", "api_key"),
                auth_domain: string("firebase", "auth_domain"),
                project_id: string("firebase", "project_id"),
                storage_bucket: string("firebase", "storage_bucket"),
                messaging_sender_id: string("firebase", "messaging_sender_id"),
                app_id: string("firebase", "app_id"),
                identity_endpoint: endpoint("identity_endpoint", DEFAULT_IDENTITY_ENDPOINT),
                token_endpoint: endpoint("token_endpoint", DEFAULT_TOKEN_ENDPOINT),
                firestore_endpoint: endpoint("firestore_endpoint", DEFAULT_FIRESTORE_ENDPOINT),
            },
            preferences_path: PathBuf::from(string("storage", "preferences_path")),
            log_level: string("logging", "level"),
            log_dir: PathBuf::from(string("logging", "log_dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values).
    pub fn empty() -> Self {
        Self {
            backend: BackendKind::Memory,
            firebase: FirebaseConfig::empty(),
            preferences_path: PathBuf::new(),
            log_level: String::new(),
            log_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with paths under the given application data directory.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            preferences_path: data_dir.join("preferences.json"),
            log_level: "info".to_string(),
            log_dir: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [backend]
            kind = "firebase"

            [firebase]
            api_key = "key-1"
            project_id = "nutri-app"
            firestore_endpoint = "http://127.0.0.1:8080"

            [storage]
            preferences_path = "/tmp/nt/preferences.json"

            [logging]
            level = "debug"
            log_dir = "/tmp/nt/logs"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.backend, BackendKind::Firebase);
        assert_eq!(config.firebase.api_key, "key-1");
        assert_eq!(config.firebase.project_id, "nutri-app");
        assert_eq!(config.firebase.firestore_endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.firebase.identity_endpoint, DEFAULT_IDENTITY_ENDPOINT);
        assert_eq!(
            config.preferences_path,
            PathBuf::from("/tmp/nt/preferences.json")
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/nt/logs"));
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[firebase]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.firebase.api_key, "");
        assert_eq!(config.preferences_path, PathBuf::new());
        assert_eq!(config.log_level, "");
    }

    #[test]
    fn test_unknown_backend_falls_back_to_memory() {
        let toml_value: Value = toml::from_str("[backend]\nkind = \"carrier-pigeon\"\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.backend, BackendKind::Memory);
    }

    #[test]
    fn test_with_system_defaults_creates_valid_paths() {
        let data_dir = PathBuf::from("/tmp/test");
        let config = AppConfig::with_system_defaults(data_dir.clone());

        assert_eq!(config.preferences_path, data_dir.join("preferences.json"));
        assert_eq!(config.log_dir, data_dir.join("logs"));
        assert_eq!(config.backend, BackendKind::Memory);
    }
}
