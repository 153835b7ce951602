use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError, integration::Integrations, service::maintenance::MaintenanceService,
};

/// Every five minutes, at second zero.
const MAINTENANCE_SCHEDULE: &str = "0 */5 * * * *";

/// Starts the maintenance scheduler.
///
/// Each run cancels pending tickets whose checkout was abandoned and expires memberships
/// past their end date. A failing run is logged and the next one proceeds normally.
///
/// # Arguments
/// - `db` - Database connection
/// - `integrations` - Hosted-service clients, used to remove Discord roles of expired members
/// - `app_url` - Application URL
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for the jobs to fire
/// - `Err(AppError::SchedulerErr)` - Scheduler or job creation failed
pub async fn start_scheduler(
    db: DatabaseConnection,
    integrations: Integrations,
    app_url: String,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(MAINTENANCE_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let integrations = integrations.clone();
        let app_url = app_url.clone();

        Box::pin(async move {
            run_maintenance(&db, &integrations, &app_url).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

async fn run_maintenance(db: &DatabaseConnection, integrations: &Integrations, app_url: &str) {
    match MaintenanceService::new(db, integrations, app_url)
        .run(Utc::now())
        .await
    {
        Ok(report) if report.cancelled_tickets > 0 || report.expired_memberships > 0 => {
            tracing::info!(
                "Maintenance cancelled {} stale tickets and expired {} memberships",
                report.cancelled_tickets,
                report.expired_memberships
            );
        }
        Ok(_) => tracing::debug!("Maintenance found nothing to do"),
        Err(e) => tracing::error!("Maintenance run failed: {}", e),
    }
}
