// 📥 Data Import - CSV/JSON bank directory files → record store
//
// CSV files are the published SWIFT directory export: semicolon-delimited,
// one header row, columns
//   COUNTRY ISO2 CODE; SWIFT CODE; NAME; ADDRESS; COUNTRY NAME; ...
// JSON files are an array of records in the HTTP field names.
// Rows that cannot become a record are skipped and reported, never fatal:
// malformed codes, a country column that disagrees with the code, and
// countries outside the ISO table.

use crate::country;
use crate::identifier::SwiftCode;
use crate::record::BankRecord;
use crate::store::SharedStore;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Minimum columns a CSV row needs to produce a record
pub const MIN_CSV_COLUMNS: usize = 5;

/// Upper bound on puts in flight during an import
pub const IMPORT_CONCURRENCY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("json") => Ok(SourceFormat::Json),
            _ => bail!(
                "unsupported file format: {} (expected .csv or .json)",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line (CSV) or element index (JSON)
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportBatch {
    pub records: Vec<BankRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportBatch {
    fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(line, reason = %reason, "skipping import row");
        self.skipped.push(SkippedRow { line, reason });
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub failed: Vec<(String, String)>,
}

// ============================================================================
// PARSING
// ============================================================================

pub fn load_records(path: &Path) -> Result<ImportBatch> {
    let format = SourceFormat::detect(path)?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open import file {}", path.display()))?;

    match format {
        SourceFormat::Csv => parse_csv(file),
        SourceFormat::Json => parse_json(file),
    }
}

pub fn parse_csv<R: Read>(reader: R) -> Result<ImportBatch> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut batch = ImportBatch::default();

    for (index, row) in rdr.records().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row.with_context(|| format!("Failed to read CSV row at line {}", line))?;

        if row.len() < MIN_CSV_COLUMNS {
            batch.skip(
                line,
                format!("expected at least {} columns, found {}", MIN_CSV_COLUMNS, row.len()),
            );
            continue;
        }

        let source = SourceRow {
            swift_code: &row[1],
            country_iso2: &row[0],
            country_name: &row[4],
            bank_name: &row[2],
            address: &row[3],
        };
        match source.into_record() {
            Ok(record) => batch.records.push(record),
            Err(reason) => batch.skip(line, reason),
        }
    }

    Ok(batch)
}

pub fn parse_json<R: Read>(reader: R) -> Result<ImportBatch> {
    let values: Vec<serde_json::Value> =
        serde_json::from_reader(reader).context("Failed to parse JSON import file")?;

    let mut batch = ImportBatch::default();

    for (index, value) in values.into_iter().enumerate() {
        let line = index + 1;
        let parsed: BankRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                batch.skip(line, e.to_string());
                continue;
            }
        };

        let source = SourceRow {
            swift_code: &parsed.swift_code,
            country_iso2: &parsed.country_iso2,
            country_name: &parsed.country_name,
            bank_name: &parsed.bank_name,
            address: &parsed.address,
        };
        match source.into_record() {
            Ok(record) => batch.records.push(record),
            Err(reason) => batch.skip(line, reason),
        }
    }

    Ok(batch)
}

/// Raw fields of one source row, before normalization
struct SourceRow<'a> {
    swift_code: &'a str,
    country_iso2: &'a str,
    country_name: &'a str,
    bank_name: &'a str,
    address: &'a str,
}

impl SourceRow<'_> {
    /// Normalize into a record every read path can reach
    ///
    /// 8-character codes are stored under their "XXX" form, the key lookups
    /// and listings use. The country column must agree with the code.
    fn into_record(self) -> Result<BankRecord, String> {
        let code = SwiftCode::parse(self.swift_code).map_err(|e| e.to_string())?;
        let code = match code.branch() {
            Some(_) => code,
            None => code.headquarters_code(),
        };

        let country_iso2 = self.country_iso2.to_uppercase();
        if country_iso2 != code.country_code() {
            return Err(format!(
                "country '{}' does not match the country '{}' of SWIFT code {}",
                country_iso2,
                code.country_code(),
                code
            ));
        }

        let record = BankRecord {
            address: self.address.to_string(),
            bank_name: self.bank_name.to_string(),
            country_name: country::country_name(&country_iso2)
                .map(str::to_string)
                .unwrap_or_else(|| self.country_name.to_uppercase()),
            country_iso2,
            is_headquarter: code.is_headquarters(),
            swift_code: code.to_string(),
        };

        if !record.is_consistent() {
            return Err(format!(
                "'{}' is not a known ISO 3166-1 alpha-2 code",
                record.country_iso2
            ));
        }
        Ok(record)
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Put every record, up to `IMPORT_CONCURRENCY` at a time
pub async fn import_records(store: SharedStore, records: Vec<BankRecord>) -> ImportReport {
    let permits = Arc::new(Semaphore::new(IMPORT_CONCURRENCY));
    let mut tasks = JoinSet::new();

    for record in records {
        let store = store.clone();
        let permits = permits.clone();
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            let outcome = store.put(&record).await.map_err(|e| format!("{:#}", e));
            (record.swift_code, outcome)
        });
    }

    let mut report = ImportReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(()))) => report.inserted += 1,
            Ok((code, Err(e))) => {
                warn!(code = %code, error = %e, "failed to store record");
                report.failed.push((code, e));
            }
            Err(e) => {
                warn!(error = %e, "import task aborted");
                report.failed.push((String::new(), e.to_string()));
            }
        }
    }

    info!(
        inserted = report.inserted,
        failed = report.failed.len(),
        "import finished"
    );
    report
}
