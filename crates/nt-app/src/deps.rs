//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for use case construction. No defaults and no hidden
//! logic: every port is required.

use std::sync::Arc;

use nt_core::ports::{AuthServicePort, ClockPort, DocumentStorePort, KeyValueStorePort};

/// Ports required by the application layer.
/// 应用层依赖的端口。
#[derive(Clone)]
pub struct AppDeps {
    pub auth: Arc<dyn AuthServicePort>,
    pub documents: Arc<dyn DocumentStorePort>,
    pub key_value: Arc<dyn KeyValueStorePort>,
    pub clock: Arc<dyn ClockPort>,
}
