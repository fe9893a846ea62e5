// SQLite record store (rusqlite + WAL)
//
// One table, keyed by SWIFT code. The connection lives behind a mutex and
// every statement runs on the blocking pool, so the async side never holds
// the lock across an `.await`.

use super::RecordStore;
use crate::pattern::KeyPattern;
use crate::record::BankRecord;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn)?;
        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| anyhow!("SQLite connection mutex poisoned"))?;
            f(&guard)
        })
        .await
        .context("SQLite worker task failed")?
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS swift_codes (
            swift_code TEXT PRIMARY KEY NOT NULL,
            bank_name TEXT NOT NULL,
            address TEXT NOT NULL,
            country_iso2 TEXT NOT NULL,
            country_name TEXT NOT NULL,
            is_headquarter INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swift_codes_country ON swift_codes(country_iso2)",
        [],
    )?;

    Ok(())
}

fn get_record(conn: &Connection, swift_code: &str) -> Result<Option<BankRecord>> {
    let record = conn
        .query_row(
            "SELECT address, bank_name, country_iso2, country_name, is_headquarter, swift_code
             FROM swift_codes
             WHERE swift_code = ?1",
            params![swift_code],
            |row| {
                Ok(BankRecord {
                    address: row.get(0)?,
                    bank_name: row.get(1)?,
                    country_iso2: row.get(2)?,
                    country_name: row.get(3)?,
                    is_headquarter: row.get(4)?,
                    swift_code: row.get(5)?,
                })
            },
        )
        .optional()
        .with_context(|| format!("Failed to fetch data for key {}", swift_code))?;

    Ok(record)
}

fn scan_keys(conn: &Connection, glob: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT swift_code FROM swift_codes WHERE swift_code GLOB ?1 ORDER BY swift_code",
    )?;

    let keys = stmt
        .query_map(params![glob], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(keys)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get(&self, swift_code: &str) -> Result<Option<BankRecord>> {
        let key = swift_code.to_string();
        self.with_conn(move |conn| get_record(conn, &key)).await
    }

    async fn scan(&self, pattern: &KeyPattern) -> Result<Vec<String>> {
        let glob = pattern.to_glob();
        self.with_conn(move |conn| scan_keys(conn, &glob))
            .await
            .with_context(|| format!("Failed to fetch keys for pattern {}", pattern))
    }

    async fn put(&self, record: &BankRecord) -> Result<()> {
        let record = record.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO swift_codes (
                    swift_code, bank_name, address, country_iso2, country_name, is_headquarter
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.swift_code,
                    record.bank_name,
                    record.address,
                    record.country_iso2,
                    record.country_name,
                    record.is_headquarter,
                ],
            )
            .with_context(|| format!("Failed to store data for key {}", record.swift_code))?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, swift_code: &str) -> Result<u64> {
        let key = swift_code.to_string();
        self.with_conn(move |conn| {
            let removed = conn
                .execute("DELETE FROM swift_codes WHERE swift_code = ?1", params![key])
                .with_context(|| format!("Failed to delete data for SWIFT code {}", key))?;
            Ok(removed as u64)
        })
        .await
    }

    async fn exists(&self, swift_code: &str) -> Result<u64> {
        let key = swift_code.to_string();
        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM swift_codes WHERE swift_code = ?1",
                params![key],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::SwiftCode;

    fn record(code: &str, name: &str) -> BankRecord {
        BankRecord::new(&SwiftCode::parse(code).unwrap(), name, "UL. TESTOWA 1")
    }

    #[tokio::test]
    async fn test_roundtrip_record() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = record("ALBPPLPWXXX", "ALIOR BANK SPOLKA AKCYJNA");

        store.put(&original).await.unwrap();
        let fetched = store.get("ALBPPLPWXXX").await.unwrap().unwrap();

        assert_eq!(fetched, original);
        assert!(store.get("ALBPPLPW001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.put(&record("ALBPPLPWXXX", "OLD NAME")).await.unwrap();
        store.put(&record("ALBPPLPWXXX", "NEW NAME")).await.unwrap();

        assert_eq!(store.exists("ALBPPLPWXXX").await.unwrap(), 1);
        let fetched = store.get("ALBPPLPWXXX").await.unwrap().unwrap();
        assert_eq!(fetched.bank_name, "NEW NAME");
    }

    #[tokio::test]
    async fn test_scan_glob_matches_contract() {
        let store = SqliteStore::open_in_memory().unwrap();
        for code in ["ALBPPLPWXXX", "ALBPPLPW001", "ALBPPLPX001", "DEUTDEFFXXX"] {
            store.put(&record(code, "BANK")).await.unwrap();
        }

        let group = store.scan(&KeyPattern::new("ALBPPLPW???")).await.unwrap();
        assert_eq!(group, vec!["ALBPPLPW001", "ALBPPLPWXXX"]);

        let poland = store.scan(&KeyPattern::new("????PL?????")).await.unwrap();
        assert_eq!(poland.len(), 3);

        // GLOB is case-sensitive, like the contract
        let lower = store.scan(&KeyPattern::new("albpplpw???")).await.unwrap();
        assert!(lower.is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_ping() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ping().await.unwrap();

        store.put(&record("ALBPPLPW001", "BANK")).await.unwrap();
        assert_eq!(store.delete("ALBPPLPW001").await.unwrap(), 1);
        assert_eq!(store.delete("ALBPPLPW001").await.unwrap(), 0);
        assert_eq!(store.exists("ALBPPLPW001").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swift_codes.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put(&record("DEUTDEFFXXX", "DEUTSCHE BANK")).await.unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        let fetched = reopened.get("DEUTDEFFXXX").await.unwrap().unwrap();
        assert_eq!(fetched.country_name, "GERMANY");
    }
}
