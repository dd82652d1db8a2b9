use db::models::activity_log::Model as ActivityLogModel;
use sea_orm::DatabaseConnection;

/// Records an activity trail entry without blocking the caller.
///
/// Every mutating handler calls this after a successful write. The insert
/// runs on its own task; a failure is logged and otherwise ignored.
pub fn log_activity(
    db: DatabaseConnection,
    user_id: i64,
    module: &str,
    action: &str,
    details: String,
    ip_address: Option<String>,
) {
    let module = module.to_owned();
    let action = action.to_owned();

    tokio::spawn(async move {
        if let Err(e) = ActivityLogModel::record(
            &db,
            user_id,
            &module,
            &action,
            &details,
            ip_address.as_deref(),
        )
        .await
        {
            tracing::warn!(error = %e, user_id, module, action, "Failed to record activity log");
        }
    });
}
