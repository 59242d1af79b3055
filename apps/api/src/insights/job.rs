//! InsightRefreshJob: the weekly "regenerate industry insights for every user" run.
//!
//! Each eligible user is an independent `InsightTask`. Tasks run through a
//! bounded stream (sequential when `concurrency == 1`); their results are
//! folded into a `RunSummary`. One user's failure is logged and recorded,
//! never propagated to the others.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{Config, InsightRefreshConfig};
use crate::insights::error::InsightError;
use crate::insights::generator::{generate_insights, ContentGenerator};
use crate::insights::models::InsightRecord;
use crate::insights::store::{InsightStore, PgInsightStore};
use crate::llm_client::LlmClient;
use crate::models::user::UserIndustryRef;

// ────────────────────────────────────────────────────────────────────────────
// Per-user task
// ────────────────────────────────────────────────────────────────────────────

/// What a successful task did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightOutcome {
    Created(Uuid),
    Updated(Uuid),
}

/// Refresh work for one eligible user.
#[derive(Debug, Clone)]
pub struct InsightTask {
    pub user_id: Uuid,
    pub industry: String,
    pub job_title: Option<String>,
}

impl InsightTask {
    /// Fails for a user whose industry is missing or blank.
    pub fn for_user(user: UserIndustryRef) -> Result<Self, InsightError> {
        let industry = user
            .industry
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| {
                InsightError::InvalidProfile(format!("user {} has no industry", user.id))
            })?
            .to_string();
        Ok(Self {
            user_id: user.id,
            industry,
            job_title: user.job_title,
        })
    }

    /// generate → look up existing id → upsert. The lookup finishes before the
    /// create/update decision is made.
    pub async fn run(
        &self,
        generator: &dyn ContentGenerator,
        store: &dyn InsightStore,
        timeout: Duration,
    ) -> Result<InsightOutcome, InsightError> {
        let generated =
            generate_insights(generator, &self.industry, self.job_title.as_deref(), timeout)
                .await?;

        let existing_id = store.existing_id(self.user_id).await?;
        let record = InsightRecord::refreshed(
            existing_id,
            self.user_id,
            &self.industry,
            generated,
            Utc::now(),
        );
        let stored = store.upsert(&record).await?;

        Ok(match existing_id {
            Some(_) => InsightOutcome::Updated(stored.id),
            None => InsightOutcome::Created(stored.id),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Run summary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct UserFailure {
    pub user_id: Uuid,
    pub kind: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub eligible: usize,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<UserFailure>,
}

impl RunSummary {
    fn start(run_id: Uuid, started_at: DateTime<Utc>, eligible: usize) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: started_at,
            eligible,
            created: 0,
            updated: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, user_id: Uuid, result: Result<InsightOutcome, InsightError>) {
        match result {
            Ok(InsightOutcome::Created(_)) => self.created += 1,
            Ok(InsightOutcome::Updated(_)) => self.updated += 1,
            Err(e) => self.failures.push(UserFailure {
                user_id,
                kind: e.kind(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job
// ────────────────────────────────────────────────────────────────────────────

/// The scheduled entry point. Cheap to clone; clones share the overlap guard.
#[derive(Clone)]
pub struct InsightRefreshJob {
    generator: Arc<dyn ContentGenerator>,
    store: Arc<dyn InsightStore>,
    concurrency: usize,
    generation_timeout: Duration,
    running: Arc<Mutex<()>>,
}

impl InsightRefreshJob {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        store: Arc<dyn InsightStore>,
        settings: &InsightRefreshConfig,
    ) -> Result<Self, InsightError> {
        if settings.concurrency == 0 {
            return Err(InsightError::Configuration(
                "insight refresh concurrency must be at least 1".to_string(),
            ));
        }
        if settings.generation_timeout.is_zero() {
            return Err(InsightError::Configuration(
                "insight generation timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            generator,
            store,
            concurrency: settings.concurrency,
            generation_timeout: settings.generation_timeout,
            running: Arc::new(Mutex::new(())),
        })
    }

    /// Production wiring: Postgres store plus a single-attempt LLM client, so a
    /// failed generation waits for the next scheduled run instead of retrying.
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self, InsightError> {
        let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)
            .map_err(|e| InsightError::Configuration(e.to_string()))?
            .with_max_attempts(1);

        Self::new(
            Arc::new(llm),
            Arc::new(PgInsightStore::new(pool)),
            &config.insights,
        )
    }

    /// Runs one refresh over every eligible user.
    ///
    /// Errors only when the run cannot start: another run holds the guard, or
    /// the eligible-user query fails. Per-user failures are in the summary.
    pub async fn run(&self) -> Result<RunSummary, InsightError> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| InsightError::RunInProgress)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let users = self.store.eligible_users().await?;

        info!(
            "Insight refresh {run_id} started: {} eligible users, concurrency {}",
            users.len(),
            self.concurrency
        );

        let mut summary = RunSummary::start(run_id, started_at, users.len());

        let mut tasks = Vec::with_capacity(users.len());
        for user in users {
            let user_id = user.id;
            match InsightTask::for_user(user) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    warn!("Skipping insight refresh for user {user_id}: {e}");
                    summary.record(user_id, Err(e));
                }
            }
        }

        let generator = self.generator.as_ref();
        let store = self.store.as_ref();
        let timeout = self.generation_timeout;

        let results: Vec<(Uuid, Result<InsightOutcome, InsightError>)> = stream::iter(tasks)
            .map(|task| {
                let span = info_span!("insight_task", user_id = %task.user_id);
                async move {
                    let result = task.run(generator, store, timeout).await;
                    if let Err(e) = &result {
                        warn!("Insight refresh failed for user {}: {e}", task.user_id);
                    }
                    (task.user_id, result)
                }
                .instrument(span)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        for (user_id, result) in results {
            summary.record(user_id, result);
        }
        summary.finished_at = Utc::now();

        info!(
            "Insight refresh {run_id} finished: {} succeeded ({} created, {} updated), {} failed",
            summary.succeeded(),
            summary.created,
            summary.updated,
            summary.failed()
        );

        Ok(summary)
    }
}
