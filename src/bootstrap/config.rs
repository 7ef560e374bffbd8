//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Overlay `FIREBASE_*` environment variables / 覆盖 Firebase 环境变量
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**

use std::path::{Path, PathBuf};

use anyhow::Context;
use nt_core::config::{AppConfig, BackendKind};

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "nutritrack";
/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "NUTRITRACK_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Pure data loading: missing sections become empty values.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Apply `FIREBASE_*` overrides on top of a loaded config.
///
/// Setting `FIREBASE_API_KEY` also switches the backend to Firebase, so a
/// `.env` file alone is enough to talk to a real project.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let firebase = &mut config.firebase;
    let fields: [(&str, &mut String); 9] = [
        ("FIREBASE_API_KEY", &mut firebase.api_key),
        ("FIREBASE_AUTH_DOMAIN", &mut firebase.auth_domain),
        ("FIREBASE_PROJECT_ID", &mut firebase.project_id),
        ("FIREBASE_STORAGE_BUCKET", &mut firebase.storage_bucket),
        ("FIREBASE_MESSAGING_SENDER_ID", &mut firebase.messaging_sender_id),
        ("FIREBASE_APP_ID", &mut firebase.app_id),
        ("FIREBASE_IDENTITY_ENDPOINT", &mut firebase.identity_endpoint),
        ("FIREBASE_TOKEN_ENDPOINT", &mut firebase.token_endpoint),
        ("FIREBASE_FIRESTORE_ENDPOINT", &mut firebase.firestore_endpoint),
    ];
    for (name, slot) in fields {
        if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
            *slot = value;
        }
    }

    if lookup("FIREBASE_API_KEY").is_some_and(|v| !v.is_empty()) {
        config.backend = BackendKind::Firebase;
    }
    if let Some(level) = lookup("NUTRITRACK_LOG").filter(|v| !v.is_empty()) {
        config.log_level = level;
    }
}

/// Resolve the effective configuration for this process.
///
/// Order: explicit path, then `NUTRITRACK_CONFIG`, then
/// `<data dir>/nutritrack/config.toml`. A missing default file is not an
/// error. Empty paths are filled from the data dir, then `.env` and process
/// environment overrides are applied.
pub fn resolve_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME);

    let requested = explicit.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = match requested {
        Some(path) => load_config(path)?,
        None => {
            let default_path = data_dir.join(CONFIG_FILE_NAME);
            if default_path.exists() {
                load_config(default_path)?
            } else {
                AppConfig::with_system_defaults(data_dir.clone())
            }
        }
    };
    fill_missing_paths(&mut config, &data_dir);

    // A missing .env file is the common case.
    let _ = dotenvy::dotenv();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

fn fill_missing_paths(config: &mut AppConfig, data_dir: &Path) {
    let defaults = AppConfig::with_system_defaults(data_dir.to_path_buf());
    if config.preferences_path.as_os_str().is_empty() {
        config.preferences_path = defaults.preferences_path;
    }
    if config.log_level.is_empty() {
        config.log_level = defaults.log_level;
    }
}
