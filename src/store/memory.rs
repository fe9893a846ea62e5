// In-memory record store (DashMap)
//
// Used for tests, demos and `STORE_BACKEND=memory`. Data is lost on restart.

use super::RecordStore;
use crate::pattern::KeyPattern;
use crate::record::BankRecord;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, BankRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with records
    pub fn with_records(records: impl IntoIterator<Item = BankRecord>) -> Self {
        let store = MemoryStore::new();
        for record in records {
            store.records.insert(record.swift_code.clone(), record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, swift_code: &str) -> Result<Option<BankRecord>> {
        Ok(self.records.get(swift_code).map(|entry| entry.value().clone()))
    }

    async fn scan(&self, pattern: &KeyPattern) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .records
            .iter()
            .filter(|entry| pattern.matches(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn put(&self, record: &BankRecord) -> Result<()> {
        self.records
            .insert(record.swift_code.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, swift_code: &str) -> Result<u64> {
        Ok(self.records.remove(swift_code).map_or(0, |_| 1))
    }

    async fn exists(&self, swift_code: &str) -> Result<u64> {
        Ok(u64::from(self.records.contains_key(swift_code)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::SwiftCode;

    fn record(code: &str) -> BankRecord {
        BankRecord::new(&SwiftCode::parse(code).unwrap(), "TEST BANK", "TEST STREET 1")
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put(&record("ALBPPLPWXXX")).await.unwrap();

        assert_eq!(store.exists("ALBPPLPWXXX").await.unwrap(), 1);
        let fetched = store.get("ALBPPLPWXXX").await.unwrap().unwrap();
        assert_eq!(fetched.bank_name, "TEST BANK");

        assert_eq!(store.delete("ALBPPLPWXXX").await.unwrap(), 1);
        assert_eq!(store.delete("ALBPPLPWXXX").await.unwrap(), 0);
        assert!(store.get("ALBPPLPWXXX").await.unwrap().is_none());
        assert_eq!(store.exists("ALBPPLPWXXX").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_scan_by_pattern() {
        let store = MemoryStore::with_records(vec![
            record("ALBPPLPWXXX"),
            record("ALBPPLPW001"),
            record("ALBPPLPW002"),
            record("DEUTDEFFXXX"),
        ]);

        let group = store.scan(&KeyPattern::new("ALBPPLPW???")).await.unwrap();
        assert_eq!(group, vec!["ALBPPLPW001", "ALBPPLPW002", "ALBPPLPWXXX"]);

        let germany = store.scan(&KeyPattern::new("????DE?????")).await.unwrap();
        assert_eq!(germany, vec!["DEUTDEFFXXX"]);

        let nothing = store.scan(&KeyPattern::new("????FR?????")).await.unwrap();
        assert!(nothing.is_empty());
    }
}
