// 📇 Directory - entry points over store, resolver and aggregator
//
// `resolve_group` and `resolve_country` are the aggregation entry points.
// The single-record operations (lookup, add, remove, exists, health) are the
// thin layer the HTTP handlers and the CLI call; none of them touches the
// aggregator's internals.

use crate::aggregator::{AggregationResult, Aggregator};
use crate::context::RequestContext;
use crate::error::DirectoryError;
use crate::identifier::{classify, validate_country_code, SwiftCode, GROUP_PREFIX_LEN};
use crate::record::BankRecord;
use crate::resolver::{branch_candidates, country_candidates, CandidateQuery};
use crate::store::SharedStore;
use std::time::Duration;
use tracing::{debug, info};

/// What a point lookup found
#[derive(Debug, Clone, PartialEq)]
pub enum BankLookup {
    Branch(BankRecord),
    Headquarters {
        record: BankRecord,
        branches: AggregationResult,
    },
}

impl BankLookup {
    pub fn record(&self) -> &BankRecord {
        match self {
            BankLookup::Branch(record) => record,
            BankLookup::Headquarters { record, .. } => record,
        }
    }
}

#[derive(Clone)]
pub struct Directory {
    store: SharedStore,
    aggregator: Aggregator,
}

impl Directory {
    pub fn new(store: SharedStore) -> Self {
        Directory {
            aggregator: Aggregator::new(store.clone()),
            store,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.aggregator = self.aggregator.with_fetch_timeout(timeout);
        self
    }

    // ========================================================================
    // AGGREGATION ENTRY POINTS
    // ========================================================================

    /// Every branch sharing the headquarters' first 8 characters
    pub async fn resolve_group(
        &self,
        ctx: &RequestContext,
        hq_code: &str,
    ) -> Result<AggregationResult, DirectoryError> {
        classify(hq_code)?;
        debug!(code = hq_code, "resolving headquarters group");
        self.resolve(ctx, branch_candidates(hq_code)).await
    }

    /// Every bank whose code carries the country segment
    pub async fn resolve_country(
        &self,
        ctx: &RequestContext,
        country_code: &str,
    ) -> Result<AggregationResult, DirectoryError> {
        validate_country_code(country_code)?;
        debug!(country = country_code, "resolving country listing");
        self.resolve(ctx, country_candidates(country_code)).await
    }

    async fn resolve(
        &self,
        ctx: &RequestContext,
        query: CandidateQuery,
    ) -> Result<AggregationResult, DirectoryError> {
        if let Some(reason) = ctx.cancel_reason() {
            return Err(DirectoryError::Cancelled(reason));
        }

        let scanned = tokio::select! {
            reason = ctx.done() => return Err(DirectoryError::Cancelled(reason)),
            scanned = self.store.scan(query.pattern()) => scanned?,
        };

        let candidates = query.select(scanned);
        debug!(
            pattern = %query.pattern(),
            candidates = candidates.len(),
            "candidate keys resolved"
        );
        self.aggregator.gather(ctx, candidates).await
    }

    // ========================================================================
    // SINGLE-RECORD OPERATIONS
    // ========================================================================

    /// Point lookup; headquarters records come back with their branches
    ///
    /// An 8-character code addresses its headquarters ("XXX") record.
    pub async fn lookup(
        &self,
        ctx: &RequestContext,
        code: &SwiftCode,
    ) -> Result<Option<BankLookup>, DirectoryError> {
        let key = storage_key(code);
        let found = tokio::select! {
            reason = ctx.done() => return Err(DirectoryError::Cancelled(reason)),
            found = self.store.get(key.as_str()) => found?,
        };

        let Some(record) = found else {
            return Ok(None);
        };

        if !record.is_headquarter {
            return Ok(Some(BankLookup::Branch(record)));
        }

        let branches = self.resolve_group(ctx, &record.swift_code).await?;
        Ok(Some(BankLookup::Headquarters { record, branches }))
    }

    /// Store a new record; refuses to overwrite an existing code
    pub async fn add(&self, record: BankRecord) -> Result<(), DirectoryError> {
        if self.store.exists(&record.swift_code).await? > 0 {
            return Err(DirectoryError::AlreadyExists(record.swift_code));
        }
        self.store.put(&record).await?;
        info!(code = %record.swift_code, "bank record added");
        Ok(())
    }

    /// An 8-character code removes its headquarters record
    pub async fn remove(&self, code: &SwiftCode) -> Result<(), DirectoryError> {
        let key = storage_key(code);
        if self.store.exists(key.as_str()).await? == 0 {
            return Err(DirectoryError::NotFound(key.to_string()));
        }
        self.store.delete(key.as_str()).await?;
        info!(code = %key, "bank record deleted");
        Ok(())
    }

    pub async fn exists(&self, code: &SwiftCode) -> Result<bool, DirectoryError> {
        let key = storage_key(code);
        Ok(self.store.exists(key.as_str()).await? > 0)
    }

    pub async fn health(&self) -> Result<(), DirectoryError> {
        self.store.ping().await?;
        Ok(())
    }
}

/// Records are keyed by their 11-character code; the 8-character form
/// stands for the headquarters
fn storage_key(code: &SwiftCode) -> SwiftCode {
    if code.as_str().len() == GROUP_PREFIX_LEN {
        code.headquarters_code()
    } else {
        code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::AggregationStatus;
    use crate::context::CancelReason;
    use crate::identifier::IdentifierError;
    use crate::pattern::KeyPattern;
    use crate::store::{MemoryStore, RecordStore, SqliteStore};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Serves point lookups but cannot scan
    struct ScanlessStore(MemoryStore);

    #[async_trait]
    impl RecordStore for ScanlessStore {
        async fn get(&self, swift_code: &str) -> Result<Option<BankRecord>> {
            self.0.get(swift_code).await
        }

        async fn scan(&self, _pattern: &KeyPattern) -> Result<Vec<String>> {
            Err(anyhow!("store offline"))
        }

        async fn put(&self, record: &BankRecord) -> Result<()> {
            self.0.put(record).await
        }

        async fn delete(&self, swift_code: &str) -> Result<u64> {
            self.0.delete(swift_code).await
        }

        async fn exists(&self, swift_code: &str) -> Result<u64> {
            self.0.exists(swift_code).await
        }

        async fn ping(&self) -> Result<()> {
            self.0.ping().await
        }
    }

    fn record(code: &str) -> BankRecord {
        BankRecord::new(&SwiftCode::parse(code).unwrap(), "ALIOR BANK", "WARSZAWA")
    }

    fn code(raw: &str) -> SwiftCode {
        SwiftCode::parse(raw).unwrap()
    }

    fn directory() -> Directory {
        Directory::new(Arc::new(MemoryStore::with_records(vec![
            record("ALBPPLPWXXX"),
            record("ALBPPLPW001"),
            record("ALBPPLPW002"),
            record("BREXPLPWMBK"),
            record("DEUTDEFFXXX"),
        ])))
    }

    fn sorted_codes(result: &AggregationResult) -> Vec<String> {
        let mut codes: Vec<String> = result
            .collected
            .iter()
            .map(|r| r.swift_code.clone())
            .collect();
        codes.sort();
        codes
    }

    #[tokio::test]
    async fn test_resolve_group_excludes_headquarters() {
        let result = directory()
            .resolve_group(&RequestContext::background(), "ALBPPLPWXXX")
            .await
            .unwrap();

        assert_eq!(result.status, AggregationStatus::Complete);
        assert_eq!(sorted_codes(&result), vec!["ALBPPLPW001", "ALBPPLPW002"]);
    }

    #[tokio::test]
    async fn test_resolve_group_without_branches() {
        let result = directory()
            .resolve_group(&RequestContext::background(), "DEUTDEFFXXX")
            .await
            .unwrap();

        assert_eq!(result, AggregationResult::empty());
    }

    #[tokio::test]
    async fn test_resolve_group_rejects_malformed_code() {
        let result = directory()
            .resolve_group(&RequestContext::background(), "ALBP")
            .await;

        assert!(matches!(
            result,
            Err(DirectoryError::MalformedIdentifier(IdentifierError::InvalidLength { .. }))
        ));
    }

    #[tokio::test]
    async fn test_resolve_country() {
        let directory = directory();
        let ctx = RequestContext::background();

        let poland = directory.resolve_country(&ctx, "PL").await.unwrap();
        assert_eq!(
            sorted_codes(&poland),
            vec!["ALBPPLPW001", "ALBPPLPW002", "ALBPPLPWXXX", "BREXPLPWMBK"]
        );

        let germany = directory.resolve_country(&ctx, "DE").await.unwrap();
        assert_eq!(sorted_codes(&germany), vec!["DEUTDEFFXXX"]);
    }

    #[tokio::test]
    async fn test_resolve_country_without_banks_is_complete() {
        let directory = Directory::new(Arc::new(MemoryStore::new()));

        let result = directory
            .resolve_country(&RequestContext::background(), "PL")
            .await
            .unwrap();

        assert!(result.collected.is_empty());
        assert_eq!(result.status, AggregationStatus::Complete);
    }

    #[tokio::test]
    async fn test_resolve_country_requires_uppercase() {
        let result = directory()
            .resolve_country(&RequestContext::background(), "pl")
            .await;

        assert!(matches!(result, Err(DirectoryError::MalformedIdentifier(_))));
    }

    #[tokio::test]
    async fn test_cancelled_context_never_returns_result() {
        let ctx = RequestContext::background();
        ctx.cancel();

        let group = directory().resolve_group(&ctx, "ALBPPLPWXXX").await;
        assert!(matches!(
            group,
            Err(DirectoryError::Cancelled(CancelReason::Canceled))
        ));

        let country = directory().resolve_country(&ctx, "PL").await;
        assert!(matches!(country, Err(DirectoryError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_lookup_headquarters_with_branches() {
        let ctx = RequestContext::background();
        let found = directory()
            .lookup(&ctx, &code("ALBPPLPWXXX"))
            .await
            .unwrap()
            .unwrap();

        match found {
            BankLookup::Headquarters { record, branches } => {
                assert_eq!(record.swift_code, "ALBPPLPWXXX");
                assert_eq!(branches.collected.len(), 2);
            }
            other => panic!("expected headquarters, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_branch_and_short_code() {
        let directory = directory();
        let ctx = RequestContext::background();

        let branch = directory.lookup(&ctx, &code("ALBPPLPW001")).await.unwrap();
        assert!(matches!(branch, Some(BankLookup::Branch(_))));

        let short = directory.lookup(&ctx, &code("ALBPPLPW")).await.unwrap().unwrap();
        assert_eq!(short.record().swift_code, "ALBPPLPWXXX");

        let missing = directory.lookup(&ctx, &code("ALBPPLPW999")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let directory = Directory::new(store.clone());

        directory.add(record("ALBPPLPW001")).await.unwrap();
        assert!(directory.exists(&code("ALBPPLPW001")).await.unwrap());

        let duplicate = directory.add(record("ALBPPLPW001")).await;
        assert!(matches!(duplicate, Err(DirectoryError::AlreadyExists(_))));

        directory.remove(&code("ALBPPLPW001")).await.unwrap();
        assert_eq!(store.exists("ALBPPLPW001").await.unwrap(), 0);

        let missing = directory.remove(&code("ALBPPLPW001")).await;
        assert!(matches!(missing, Err(DirectoryError::NotFound(_))));

        directory.health().await.unwrap();
    }

    #[tokio::test]
    async fn test_short_code_removes_headquarters() {
        let store = Arc::new(MemoryStore::with_records(vec![
            record("ALBPPLPWXXX"),
            record("ALBPPLPW001"),
        ]));
        let directory = Directory::new(store.clone());

        assert!(directory.exists(&code("ALBPPLPW")).await.unwrap());
        directory.remove(&code("ALBPPLPW")).await.unwrap();

        assert_eq!(store.exists("ALBPPLPWXXX").await.unwrap(), 0);
        assert_eq!(store.exists("ALBPPLPW001").await.unwrap(), 1);
        assert!(!directory.exists(&code("ALBPPLPW")).await.unwrap());

        let missing = directory.remove(&code("ALBPPLPW")).await;
        assert!(matches!(missing, Err(DirectoryError::NotFound(key)) if key == "ALBPPLPWXXX"));
    }

    #[tokio::test]
    async fn test_scan_failure_is_a_store_error() {
        let directory = Directory::new(Arc::new(ScanlessStore(MemoryStore::with_records(
            vec![record("ALBPPLPWXXX"), record("ALBPPLPW001")],
        ))));
        let ctx = RequestContext::background();

        let country = directory.resolve_country(&ctx, "PL").await;
        assert!(matches!(country, Err(DirectoryError::Store(_))));

        let group = directory.resolve_group(&ctx, "ALBPPLPWXXX").await;
        assert!(matches!(group, Err(DirectoryError::Store(e)) if e.to_string() == "store offline"));

        // the headquarters record is found, its branch listing is not
        let lookup = directory.lookup(&ctx, &code("ALBPPLPWXXX")).await;
        assert!(matches!(lookup, Err(DirectoryError::Store(_))));
    }
}
