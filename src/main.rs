use std::path::PathBuf;
use std::sync::Arc;

use nutritrack_lib::bootstrap::{
    resolve_config, tracing::init_tracing_subscriber, wire_dependencies, AppRuntime,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config(std::env::args_os().nth(1).map(PathBuf::from))?;

    if let Err(err) = init_tracing_subscriber(&config) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    info!(backend = ?config.backend, "starting nutritrack");

    let deps = wire_dependencies(&config)?;
    let runtime = Arc::new(AppRuntime::new(deps));

    nutritrack_lib::console::run_console(runtime).await
}
