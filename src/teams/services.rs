use tracing::warn;
use uuid::Uuid;

use super::repo;
use super::repo_types::ActivityType;
use crate::state::AppState;

/// Appends an audit row for the user's team. Failures are logged, never returned:
/// the action being audited has already happened.
pub async fn record_activity(
    st: &AppState,
    user_id: Uuid,
    action: ActivityType,
    ip_address: Option<&str>,
) {
    let team_id = match repo::team_id_for_user(&st.db, user_id).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, %user_id, %action, "team lookup for activity failed");
            None
        }
    };
    if let Err(e) = repo::log_activity(&st.db, team_id, user_id, action, ip_address).await {
        warn!(error = %e, %user_id, %action, "activity log failed");
    }
}
