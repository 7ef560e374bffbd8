use tracing::{info_span, Instrument};

use crate::bootstrap::AppRuntime;

/// Text for the home screen header.
pub async fn greeting(runtime: &AppRuntime) -> String {
    let span = info_span!("command.home.greeting");
    let name = runtime
        .usecases()
        .load_greeting()
        .execute()
        .instrument(span)
        .await;
    format!("Welcome, {name}!")
}
