use tracing::{info_span, Instrument};

use nt_core::{Credentials, Identity, RouteDecision};

use super::error::{map_err, CommandError};
use crate::bootstrap::AppRuntime;

pub async fn register(
    runtime: &AppRuntime,
    email: &str,
    password: &str,
) -> Result<Identity, CommandError> {
    let span = info_span!("command.account.register");
    let credentials = Credentials::new(email, password);
    runtime
        .usecases()
        .register_account()
        .execute(&credentials)
        .instrument(span)
        .await
        .map_err(map_err)
}

pub async fn login(
    runtime: &AppRuntime,
    email: &str,
    password: &str,
) -> Result<Identity, CommandError> {
    let span = info_span!("command.account.login");
    let credentials = Credentials::new(email, password);
    runtime
        .usecases()
        .sign_in()
        .execute(&credentials)
        .instrument(span)
        .await
        .map_err(map_err)
}

/// Returns the decision after the switch, or `None` when the request was
/// ignored because someone is already signed in.
pub async fn continue_as_guest(runtime: &AppRuntime) -> Option<RouteDecision> {
    let span = info_span!("command.account.continue_as_guest");
    runtime
        .usecases()
        .continue_as_guest()
        .execute()
        .instrument(span)
        .await
}

pub async fn logout(runtime: &AppRuntime) -> Result<(), CommandError> {
    let span = info_span!("command.account.logout");
    runtime
        .usecases()
        .logout()
        .execute()
        .instrument(span)
        .await
        .map_err(map_err)
}

pub async fn delete_account(runtime: &AppRuntime) -> Result<(), CommandError> {
    let span = info_span!("command.account.delete");
    runtime
        .usecases()
        .delete_account()
        .execute()
        .instrument(span)
        .await
        .map_err(map_err)
}
