// ✅ Record Validation - explicit, immutable rule set for incoming data
//
// Built once at startup and handed to the request layer; there is no
// process-wide validator. Errors are collected per field so a client sees
// everything wrong with a payload in one response.

use crate::country;
use crate::identifier::{is_branch_suffix, SwiftCode, FULL_CODE_LEN};
use crate::record::BankRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", describe(.errors))]
pub struct ValidationErrors {
    /// Field name → reason (first failure per field)
    pub errors: BTreeMap<String, String>,
}

fn describe(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, reason)| format!("{}: {}", field, reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    fn single(field: &str, reason: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), reason.into());
        ValidationErrors { errors }
    }
}

#[derive(Default)]
struct Collector {
    errors: BTreeMap<String, String>,
}

impl Collector {
    fn fail(&mut self, field: &str, reason: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| reason.into());
    }

    fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Incoming record before validation; every field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecordPayload {
    pub address: Option<String>,
    pub bank_name: Option<String>,
    #[serde(rename = "countryISO2")]
    pub country_iso2: Option<String>,
    pub country_name: Option<String>,
    pub is_headquarter: Option<bool>,
    pub swift_code: Option<String>,
}

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordValidator {
    /// New records must carry the 11-character form of their code
    require_full_code: bool,
}

impl RecordValidator {
    pub fn new() -> Self {
        RecordValidator {
            require_full_code: true,
        }
    }

    /// Accept 8-character codes in new records too
    pub fn allow_short_codes(mut self) -> Self {
        self.require_full_code = false;
        self
    }

    /// Path parameter: a structurally valid 8- or 11-character code
    pub fn validate_swift_code(&self, raw: &str) -> Result<SwiftCode, ValidationErrors> {
        SwiftCode::parse(raw).map_err(|e| ValidationErrors::single("swiftCode", e.to_string()))
    }

    /// Path parameter: normalized to uppercase, must be a known ISO 3166-1 code
    pub fn validate_country_code(&self, raw: &str) -> Result<String, ValidationErrors> {
        let normalized = raw.trim().to_ascii_uppercase();
        if country::is_known_country(&normalized) {
            Ok(normalized)
        } else {
            Err(ValidationErrors::single(
                "countryISO2",
                format!("'{}' is not a known ISO 3166-1 alpha-2 code", raw),
            ))
        }
    }

    /// Full check of a new record; returns it with the canonical country name
    pub fn validate_record(
        &self,
        payload: &BankRecordPayload,
    ) -> Result<BankRecord, ValidationErrors> {
        let mut check = Collector::default();

        let address = required(&mut check, "address", &payload.address);
        let bank_name = required(&mut check, "bankName", &payload.bank_name);
        let country_iso2 = required(&mut check, "countryISO2", &payload.country_iso2);
        let country_name = required(&mut check, "countryName", &payload.country_name);
        let raw_code = required(&mut check, "swiftCode", &payload.swift_code);
        if payload.is_headquarter.is_none() {
            check.fail("isHeadquarter", "field is required");
        }

        let code = match SwiftCode::parse(raw_code) {
            Ok(code) => Some(code),
            Err(e) if !check.has("swiftCode") => {
                check.fail("swiftCode", e.to_string());
                None
            }
            Err(_) => None,
        };

        if let Some(code) = &code {
            if self.require_full_code && code.as_str().len() != FULL_CODE_LEN {
                check.fail("swiftCode", "SWIFT code must be 11 characters long");
            }
        }

        if !check.has("countryISO2") && !country::is_known_country(country_iso2) {
            check.fail(
                "countryISO2",
                format!("'{}' is not a known ISO 3166-1 alpha-2 code", country_iso2),
            );
        }

        if let Some(code) = &code {
            if !check.has("countryISO2") && code.country_code() != country_iso2 {
                check.fail(
                    "countryISO2",
                    format!(
                        "countryISO2 '{}' does not match the country derived from SWIFT code '{}'",
                        country_iso2,
                        code.country_code()
                    ),
                );
            }
        }

        if !check.has("countryISO2")
            && !check.has("countryName")
            && !country::name_matches(country_iso2, country_name)
        {
            check.fail(
                "countryName",
                format!(
                    "countryName '{}' does not match the country derived from countryISO2 '{}'",
                    country_name,
                    country::country_name(country_iso2).unwrap_or_default()
                ),
            );
        }

        if let (Some(code), Some(is_headquarter)) = (&code, payload.is_headquarter) {
            if is_headquarter == is_branch_suffix(code.as_str()) {
                check.fail(
                    "isHeadquarter",
                    format!(
                        "isHeadquarter value '{}' does not match the swiftCode value '{}'",
                        is_headquarter, code
                    ),
                );
            }
        }

        check.finish(|| BankRecord {
            address: address.to_string(),
            bank_name: bank_name.to_string(),
            country_iso2: country_iso2.to_string(),
            country_name: country::country_name(country_iso2)
                .unwrap_or_default()
                .to_string(),
            is_headquarter: payload.is_headquarter.unwrap_or_default(),
            swift_code: raw_code.to_string(),
        })
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn required<'a>(check: &mut Collector, field: &str, value: &'a Option<String>) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => {
            check.fail(field, "field is required");
            ""
        }
    }
}
