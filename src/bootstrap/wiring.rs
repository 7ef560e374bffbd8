//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (preferences file, auth, documents) / 创建 infra 层具体实现
//! - ✅ Pick the adapter family named by `AppConfig::backend` / 按配置选择适配器
//! - ✅ Hand everything to the app layer as `AppDeps` / 以 `AppDeps` 注入应用层
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide which screen to show, the navigation gate owns that
//! - 不决定显示哪个页面，由导航门控负责
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - An empty Firebase project surfaces as request errors, not here
//! - 空的 Firebase 项目以请求错误体现，而不是在这里
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on nt-infra + nt-app simultaneously.**
//! > **这是唯一允许同时依赖 nt-infra 和 nt-app 的地方。**

use std::sync::Arc;

use nt_app::AppDeps;
use nt_core::config::{AppConfig, BackendKind};
use nt_core::ports::{AuthServicePort, ClockPort, DocumentStorePort, KeyValueStorePort};
use nt_infra::firebase::IdTokenSource;
use nt_infra::{
    FileKeyValueStore, FirebaseAuthClient, FirestoreDocumentStore, InMemoryAuthService,
    InMemoryDocumentStore, InMemoryKeyValueStore, SystemClock,
};
use tracing::{info, warn};

/// Build the port set for the configured backend.
///
/// For Firebase the persisted session is restored on a background task, so
/// the identity stream starts out unresolved exactly as it does on a cold
/// start of the mobile client.
pub fn wire_dependencies(config: &AppConfig) -> anyhow::Result<AppDeps> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let key_value = create_key_value_store(config);

    let (auth, documents): (Arc<dyn AuthServicePort>, Arc<dyn DocumentStorePort>) =
        match config.backend {
            BackendKind::Memory => {
                info!("wiring in-memory auth and document store");
                (
                    Arc::new(InMemoryAuthService::new()),
                    Arc::new(InMemoryDocumentStore::new()),
                )
            }
            BackendKind::Firebase => {
                info!(project = %config.firebase.project_id, "wiring firebase adapters");
                let client = Arc::new(FirebaseAuthClient::new(
                    config.firebase.clone(),
                    key_value.clone(),
                    clock.clone(),
                )?);
                let tokens: Arc<dyn IdTokenSource> = client.clone();
                let documents = FirestoreDocumentStore::new(config.firebase.clone(), tokens)?;

                let restoring = client.clone();
                tokio::spawn(async move {
                    let state = restoring.restore_session().await;
                    info!(signed_in = state.is_signed_in(), "auth session restored");
                });

                (client, Arc::new(documents))
            }
        };

    Ok(AppDeps {
        auth,
        documents,
        key_value,
        clock,
    })
}

fn create_key_value_store(config: &AppConfig) -> Arc<dyn KeyValueStorePort> {
    if config.preferences_path.as_os_str().is_empty() {
        warn!("no preferences path configured, local preferences will not persist");
        return Arc::new(InMemoryKeyValueStore::new());
    }
    Arc::new(FileKeyValueStore::new(config.preferences_path.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_core::AuthState;

    #[tokio::test]
    async fn test_memory_backend_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::with_system_defaults(dir.path().to_path_buf());
        config.backend = BackendKind::Memory;

        let deps = wire_dependencies(&config).unwrap();

        assert_eq!(deps.auth.current_auth_state(), AuthState::SignedOut);
        deps.key_value.set_item("probe", "1").await.unwrap();
        assert!(dir.path().join("preferences.json").exists());
    }

    #[tokio::test]
    async fn test_empty_preferences_path_uses_memory_store() {
        let config = AppConfig::empty();

        let deps = wire_dependencies(&config).unwrap();

        deps.key_value.set_item("k", "v").await.unwrap();
        assert_eq!(deps.key_value.get_item("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_firebase_backend_starts_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::with_system_defaults(dir.path().to_path_buf());
        config.backend = BackendKind::Firebase;

        let deps = wire_dependencies(&config).unwrap();

        // Restore runs on a spawned task and has not been polled yet.
        assert_eq!(deps.auth.current_auth_state(), AuthState::Unknown);
    }
}
