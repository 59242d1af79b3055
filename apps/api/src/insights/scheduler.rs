//! Cron trigger for `InsightRefreshJob`.

use anyhow::{Context, Result};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::insights::error::InsightError;
use crate::insights::job::InsightRefreshJob;

/// Registers the refresh job under `cron` (seconds-first syntax) and starts
/// the scheduler. The returned handle must be kept alive.
pub async fn start_insight_scheduler(job: InsightRefreshJob, cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new()
        .await
        .context("creating insight refresh scheduler")?;

    let scheduled = Job::new_async(cron, move |_uuid, _lock| {
        let job = job.clone();
        Box::pin(async move {
            run_scheduled(&job).await;
        })
    })
    .with_context(|| format!("invalid insight refresh cron expression '{cron}'"))?;

    scheduler
        .add(scheduled)
        .await
        .context("registering insight refresh job")?;
    scheduler
        .start()
        .await
        .context("starting insight refresh scheduler")?;

    info!("Insight refresh scheduled with cron '{cron}'");
    Ok(scheduler)
}

/// Scheduler callback. Never fails: outcomes go to the log only.
pub async fn run_scheduled(job: &InsightRefreshJob) {
    match job.run().await {
        Ok(summary) if summary.failed() > 0 => warn!(
            "Scheduled insight refresh {} completed with {} failures out of {} users",
            summary.run_id,
            summary.failed(),
            summary.eligible
        ),
        Ok(summary) => info!(
            "Scheduled insight refresh {} completed: {} users refreshed",
            summary.run_id,
            summary.succeeded()
        ),
        Err(InsightError::RunInProgress) => {
            warn!("Skipping scheduled insight refresh: previous run still in progress")
        }
        Err(e) => error!("Scheduled insight refresh aborted: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;
    use uuid::Uuid;

    use crate::config::InsightRefreshConfig;
    use crate::insights::generator::ContentGenerator;
    use crate::insights::models::InsightRecord;
    use crate::insights::store::InsightStore;
    use crate::llm_client::LlmError;
    use crate::models::user::UserIndustryRef;

    /// Signals once a generation call has started, then never returns.
    struct Stalled {
        entered: Arc<Notify>,
    }

    #[async_trait]
    impl ContentGenerator for Stalled {
        async fn generate_text(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.entered.notify_one();
            std::future::pending().await
        }
    }

    /// Counts listings; optionally fails them.
    struct CountingStore {
        listings: AtomicUsize,
        fail_listing: bool,
    }

    impl CountingStore {
        fn new(fail_listing: bool) -> Self {
            Self {
                listings: AtomicUsize::new(0),
                fail_listing,
            }
        }
    }

    #[async_trait]
    impl InsightStore for CountingStore {
        async fn eligible_users(&self) -> Result<Vec<UserIndustryRef>, InsightError> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            if self.fail_listing {
                return Err(InsightError::Persistence(sqlx::Error::PoolClosed));
            }
            Ok(vec![UserIndustryRef {
                id: Uuid::new_v4(),
                industry: Some("Technology".to_string()),
                job_title: None,
            }])
        }

        async fn find_by_user(&self, _: Uuid) -> Result<Option<InsightRecord>, InsightError> {
            Ok(None)
        }

        async fn existing_id(&self, _: Uuid) -> Result<Option<Uuid>, InsightError> {
            Ok(None)
        }

        async fn upsert(&self, record: &InsightRecord) -> Result<InsightRecord, InsightError> {
            Ok(record.clone())
        }
    }

    fn job(store: Arc<CountingStore>, entered: Arc<Notify>) -> InsightRefreshJob {
        InsightRefreshJob::new(
            Arc::new(Stalled { entered }),
            store,
            &InsightRefreshConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_cron_is_rejected() {
        let store = Arc::new(CountingStore::new(true));
        let job = job(store, Arc::new(Notify::new()));
        let result = start_insight_scheduler(job, "every sunday please").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_scheduled_run_swallows_listing_failure() {
        let store = Arc::new(CountingStore::new(true));
        let job = job(store.clone(), Arc::new(Notify::new()));

        run_scheduled(&job).await;

        assert_eq!(store.listings.load(Ordering::SeqCst), 1);
        // The guard was released, so the next tick can run again.
        assert!(matches!(job.run().await, Err(InsightError::Persistence(_))));
        assert_eq!(store.listings.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_scheduled_run_skips_while_previous_run_in_progress() {
        let store = Arc::new(CountingStore::new(false));
        let entered = Arc::new(Notify::new());
        let job = job(store.clone(), entered.clone());

        let first = tokio::spawn({
            let job = job.clone();
            async move { job.run().await }
        });
        entered.notified().await;

        let skipped = tokio::time::timeout(Duration::from_secs(5), run_scheduled(&job)).await;
        assert!(skipped.is_ok(), "overlapping trigger should return immediately");
        assert_eq!(store.listings.load(Ordering::SeqCst), 1);

        first.abort();
    }
}
