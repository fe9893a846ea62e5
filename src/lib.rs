// SWIFT Directory - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod identifier;   // SWIFT/BIC parsing and classification
pub mod country;      // ISO 3166-1 alpha-2 table
pub mod pattern;      // Fixed-length wildcard key patterns
pub mod record;       // Bank records and summaries
pub mod store;        // RecordStore trait + memory/SQLite backends
pub mod resolver;     // Relationship resolver (branches, countries)
pub mod context;      // Request cancellation + deadline
pub mod error;        // Directory error taxonomy
pub mod aggregator;   // Scatter-gather fetch with partial results
pub mod directory;    // Entry points: resolve_group / resolve_country / lookup
pub mod validation;   // Incoming record rules
pub mod config;       // Environment configuration
pub mod import;       // CSV/JSON directory import

#[cfg(feature = "server")]
pub mod api;          // axum REST surface

// Re-export commonly used types
pub use identifier::{classify, Classification, IdentifierError, SwiftCode};
pub use pattern::KeyPattern;
pub use record::{BankRecord, BankSummary};
pub use store::{MemoryStore, RecordStore, SharedStore, SqliteStore};
pub use resolver::{branch_candidates, country_candidates, CandidateKeySet, CandidateQuery};
pub use context::{CancelReason, RequestContext};
pub use error::{DirectoryError, FetchCause, FetchFailure};
pub use aggregator::{AggregationResult, AggregationStatus, Aggregator};
pub use directory::{BankLookup, Directory};
pub use validation::{BankRecordPayload, RecordValidator, ValidationErrors};
pub use config::{Config, StoreBackend};
pub use import::{import_records, load_records, ImportBatch, ImportReport, SourceFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
