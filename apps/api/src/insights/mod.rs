//! Industry insights: per-user salary/demand/trend snapshots, regenerated weekly.
//!
//! Flow per run: store.eligible_users → for each user (bounded concurrency):
//!   prompt → LLM (timeout, single attempt) → strip fences → parse + validate →
//!   find existing → upsert keyed by user_id.
//!
//! A failing user never affects the others; failures land in the `RunSummary`.

pub mod error;
pub mod generator;
pub mod handlers;
pub mod job;
pub mod models;
pub mod prompts;
pub mod scheduler;
pub mod store;

pub use job::InsightRefreshJob;
pub use store::{InsightStore, PgInsightStore};
