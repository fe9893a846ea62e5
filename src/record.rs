// 🏦 Bank Records - one entry per SWIFT code
//
// Field names on the wire follow the directory's public JSON shape
// (camelCase, `countryISO2`). Records are created on explicit add,
// read on lookup, deleted on explicit delete, and never mutated in between.

use crate::country;
use crate::identifier::{is_branch_suffix, SwiftCode};
use serde::{Deserialize, Serialize};

// ============================================================================
// BANK RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecord {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl BankRecord {
    /// Build a record whose country and headquarters flag come from the code
    pub fn new(swift_code: &SwiftCode, bank_name: &str, address: &str) -> Self {
        let country_iso2 = swift_code.country_code().to_string();
        let country_name = country::country_name(&country_iso2)
            .unwrap_or_default()
            .to_string();

        BankRecord {
            address: address.to_string(),
            bank_name: bank_name.to_string(),
            country_iso2,
            country_name,
            is_headquarter: swift_code.is_headquarters(),
            swift_code: swift_code.to_string(),
        }
    }

    /// Check the record's invariants against its own code
    ///
    /// - code is structurally valid
    /// - country code is the code's country segment
    /// - country name is canonical for the country code
    /// - headquarters flag agrees with the branch suffix
    pub fn is_consistent(&self) -> bool {
        let Ok(code) = SwiftCode::parse(&self.swift_code) else {
            return false;
        };

        code.country_code() == self.country_iso2
            && country::country_name(&self.country_iso2) == Some(self.country_name.as_str())
            && self.is_headquarter == !is_branch_suffix(&self.swift_code)
    }

    pub fn summary(&self) -> BankSummary {
        BankSummary::from(self.clone())
    }
}

// ============================================================================
// BANK SUMMARY (branch lists, country listings)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl From<BankRecord> for BankSummary {
    fn from(record: BankRecord) -> Self {
        BankSummary {
            address: record.address,
            bank_name: record.bank_name,
            country_iso2: record.country_iso2,
            is_headquarter: record.is_headquarter,
            swift_code: record.swift_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> SwiftCode {
        SwiftCode::parse(raw).unwrap()
    }

    #[test]
    fn test_new_derives_country_and_role() {
        let hq = BankRecord::new(&code("ALBPPLPWXXX"), "ALIOR BANK", "WARSZAWA");
        assert_eq!(hq.country_iso2, "PL");
        assert_eq!(hq.country_name, "POLAND");
        assert!(hq.is_headquarter);
        assert!(hq.is_consistent());

        let branch = BankRecord::new(&code("ALBPPLPW001"), "ALIOR BANK", "KRAKOW");
        assert!(!branch.is_headquarter);
        assert!(branch.is_consistent());
    }

    #[test]
    fn test_inconsistent_records() {
        let mut record = BankRecord::new(&code("ALBPPLPWXXX"), "ALIOR BANK", "WARSZAWA");
        record.is_headquarter = false;
        assert!(!record.is_consistent());

        let mut record = BankRecord::new(&code("ALBPPLPWXXX"), "ALIOR BANK", "WARSZAWA");
        record.country_name = "Poland".to_string();
        assert!(!record.is_consistent());

        let mut record = BankRecord::new(&code("ALBPPLPWXXX"), "ALIOR BANK", "WARSZAWA");
        record.country_iso2 = "DE".to_string();
        record.country_name = "GERMANY".to_string();
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_json_field_names() {
        let record = BankRecord::new(&code("ALBPPLPW001"), "ALIOR BANK", "KRAKOW");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["swiftCode"], "ALBPPLPW001");
        assert_eq!(json["countryISO2"], "PL");
        assert_eq!(json["countryName"], "POLAND");
        assert_eq!(json["isHeadquarter"], false);

        let summary = serde_json::to_value(record.summary()).unwrap();
        assert!(summary.get("countryName").is_none());
        assert_eq!(summary["bankName"], "ALIOR BANK");
    }
}
