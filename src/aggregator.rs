// 🔀 Scatter-Gather Aggregator - concurrent fetch with partial results
//
// One tokio task per candidate key, all sharing the caller's RequestContext.
// Every candidate ends up as exactly one collected record or exactly one
// failure; a failed key never aborts its siblings. Fan-out width equals the
// candidate count: large groups or countries put proportional load on the
// store.

use crate::context::RequestContext;
use crate::error::{DirectoryError, FetchCause, FetchFailure};
use crate::record::BankRecord;
use crate::resolver::CandidateKeySet;
use crate::store::{RecordStore, SharedStore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, warn};

// ============================================================================
// AGGREGATION RESULT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregationStatus {
    Complete,
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// One record per successfully fetched key, in no particular order
    pub collected: Vec<BankRecord>,
    pub status: AggregationStatus,
    /// Empty unless `status` is `Partial`
    pub failures: Vec<FetchFailure>,
}

impl AggregationResult {
    pub fn empty() -> Self {
        AggregationResult {
            collected: Vec::new(),
            status: AggregationStatus::Complete,
            failures: Vec::new(),
        }
    }

    fn from_parts(collected: Vec<BankRecord>, failures: Vec<FetchFailure>) -> Self {
        let status = if failures.is_empty() {
            AggregationStatus::Complete
        } else {
            AggregationStatus::Partial
        };
        AggregationResult {
            collected,
            status,
            failures,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == AggregationStatus::Complete
    }

    /// Number of candidates this result accounts for
    pub fn candidate_count(&self) -> usize {
        self.collected.len() + self.failures.len()
    }

    /// Human-readable reasons, one per failed key
    pub fn failure_descriptions(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.to_string()).collect()
    }
}

// ============================================================================
// AGGREGATOR
// ============================================================================

#[derive(Clone)]
pub struct Aggregator {
    store: SharedStore,
    fetch_timeout: Option<Duration>,
}

impl Aggregator {
    pub fn new(store: SharedStore) -> Self {
        Aggregator {
            store,
            fetch_timeout: None,
        }
    }

    /// Bound each individual fetch; a slow key becomes a `Timeout` failure
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch every candidate concurrently and merge the outcomes
    pub async fn gather(
        &self,
        ctx: &RequestContext,
        candidates: CandidateKeySet,
    ) -> Result<AggregationResult, DirectoryError> {
        if let Some(reason) = ctx.cancel_reason() {
            return Err(DirectoryError::Cancelled(reason));
        }
        if candidates.is_empty() {
            return Ok(AggregationResult::empty());
        }

        debug!(candidates = candidates.len(), "dispatching fetch tasks");

        let mut keys_by_task: HashMap<task::Id, String> =
            HashMap::with_capacity(candidates.len());
        let mut tasks = JoinSet::new();
        for key in candidates {
            let store = Arc::clone(&self.store);
            let ctx = ctx.clone();
            let fetch_timeout = self.fetch_timeout;
            let task_key = key.clone();
            let handle = tasks.spawn(async move {
                let outcome = fetch_one(store.as_ref(), &ctx, &task_key, fetch_timeout).await;
                (task_key, outcome)
            });
            keys_by_task.insert(handle.id(), key);
        }

        let mut collected = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(record))) => collected.push(record),
                Ok((key, Err(cause))) => failures.push(FetchFailure::new(key, cause)),
                Err(join_error) => {
                    // A panicked or aborted task never reported its key
                    let key = keys_by_task
                        .get(&join_error.id())
                        .cloned()
                        .unwrap_or_default();
                    failures.push(FetchFailure::new(
                        key,
                        FetchCause::Aborted(abort_message(join_error)),
                    ));
                }
            }
        }

        if let Some(reason) = ctx.cancel_reason() {
            warn!(%reason, "aggregation canceled by initiating context");
            return Err(DirectoryError::Cancelled(reason));
        }

        let result = AggregationResult::from_parts(collected, failures);
        if !result.is_complete() {
            warn!(
                collected = result.collected.len(),
                failed = result.failures.len(),
                "partial aggregation result"
            );
        }
        Ok(result)
    }
}

fn abort_message(join_error: JoinError) -> String {
    if !join_error.is_panic() {
        return join_error.to_string();
    }
    let payload = join_error.into_panic();
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    format!("panicked: {}", message)
}

async fn fetch_one(
    store: &dyn RecordStore,
    ctx: &RequestContext,
    key: &str,
    fetch_timeout: Option<Duration>,
) -> Result<BankRecord, FetchCause> {
    tokio::select! {
        reason = ctx.done() => Err(FetchCause::Cancelled(reason)),
        outcome = lookup(store, key, fetch_timeout) => outcome,
    }
}

async fn lookup(
    store: &dyn RecordStore,
    key: &str,
    fetch_timeout: Option<Duration>,
) -> Result<BankRecord, FetchCause> {
    let found = match fetch_timeout {
        Some(limit) => tokio::time::timeout(limit, store.get(key))
            .await
            .map_err(|_| FetchCause::Timeout(limit))?,
        None => store.get(key).await,
    };
    found
        .map_err(|e| FetchCause::Backend(format!("{:#}", e)))?
        .ok_or(FetchCause::NotFound)
}

// ============================================================================
// TESTS
// ============================================================================
