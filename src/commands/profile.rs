use tracing::{info_span, Instrument};

use super::error::{map_err, CommandError};
use crate::bootstrap::AppRuntime;

pub async fn complete_profile_setup(
    runtime: &AppRuntime,
    username: &str,
) -> Result<(), CommandError> {
    let span = info_span!("command.profile.complete_setup");
    runtime
        .usecases()
        .complete_profile_setup()
        .execute(username)
        .instrument(span)
        .await
        .map_err(map_err)
}
