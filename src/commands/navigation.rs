use nt_app::usecases::FooterTab;
use nt_core::{Route, RouteDecision};

use super::error::CommandError;
use crate::bootstrap::AppRuntime;

/// Screen a footer tab press leads to.
pub fn footer_target(runtime: &AppRuntime, tab: &str) -> Result<Route, CommandError> {
    let tab = FooterTab::parse(tab)
        .ok_or_else(|| CommandError::new(format!("Unknown footer tab: {tab}")))?;
    Ok(runtime.usecases().footer_routing().target(tab))
}

/// Latest gate decision, `None` while still undetermined.
pub fn current_route(runtime: &AppRuntime) -> Option<RouteDecision> {
    runtime.gate().current_decision()
}
