// 🔖 SWIFT Code Parser - structure rules for bank identifiers
//
// Layout of a SWIFT/BIC code:
//   positions 1-4   institution code
//   positions 5-6   country code (ISO 3166-1 alpha-2)
//   positions 7-8   location code
//   positions 9-11  branch code (optional, "XXX" = headquarters)
//
// Everything the directory knows about headquarters/branch relationships is
// derived from this layout. No lookups, no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Branch segment reserved for the headquarters office
pub const HEADQUARTERS_SUFFIX: &str = "XXX";

/// Length of the headquarters group key (institution + country + location)
pub const GROUP_PREFIX_LEN: usize = 8;

/// Length of a code carrying an explicit branch segment
pub const FULL_CODE_LEN: usize = 11;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("SWIFT code '{code}' has length {len}, expected 8 or 11")]
    InvalidLength { code: String, len: usize },

    #[error("SWIFT code '{code}' has invalid country segment '{segment}'")]
    InvalidCountry { code: String, segment: String },

    #[error("SWIFT code '{code}' has invalid character '{ch}' at position {position}")]
    InvalidCharacter {
        code: String,
        ch: char,
        position: usize,
    },

    #[error("country code '{0}' must be two uppercase letters")]
    InvalidCountryCode(String),
}

// ============================================================================
// SWIFT CODE
// ============================================================================

/// A structurally valid SWIFT code (8 or 11 uppercase ASCII characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwiftCode(String);

impl SwiftCode {
    /// Validate the layout and wrap the code
    pub fn parse(code: &str) -> Result<Self, IdentifierError> {
        let len = code.chars().count();
        if len != GROUP_PREFIX_LEN && len != FULL_CODE_LEN {
            return Err(IdentifierError::InvalidLength {
                code: code.to_string(),
                len,
            });
        }

        for (index, ch) in code.chars().enumerate() {
            if (4..6).contains(&index) {
                if !ch.is_ascii_uppercase() {
                    return Err(IdentifierError::InvalidCountry {
                        code: code.to_string(),
                        segment: code.chars().skip(4).take(2).collect(),
                    });
                }
            } else if !(ch.is_ascii_uppercase() || ch.is_ascii_digit()) {
                return Err(IdentifierError::InvalidCharacter {
                    code: code.to_string(),
                    ch,
                    position: index + 1,
                });
            }
        }

        Ok(SwiftCode(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn institution(&self) -> &str {
        &self.0[0..4]
    }

    pub fn country_code(&self) -> &str {
        &self.0[4..6]
    }

    pub fn location(&self) -> &str {
        &self.0[6..8]
    }

    /// Branch segment, `None` for 8-character codes
    pub fn branch(&self) -> Option<&str> {
        self.0.get(GROUP_PREFIX_LEN..FULL_CODE_LEN)
    }

    pub fn group_prefix(&self) -> &str {
        &self.0[..GROUP_PREFIX_LEN]
    }

    pub fn is_headquarters(&self) -> bool {
        !is_branch_suffix(&self.0)
    }

    /// The 11-character "XXX" form of this code's headquarters
    pub fn headquarters_code(&self) -> SwiftCode {
        SwiftCode(format!("{}{}", self.group_prefix(), HEADQUARTERS_SUFFIX))
    }
}

impl fmt::Display for SwiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SwiftCode {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwiftCode::parse(s)
    }
}

impl TryFrom<String> for SwiftCode {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SwiftCode::parse(&value)
    }
}

impl From<SwiftCode> for String {
    fn from(code: SwiftCode) -> Self {
        code.0
    }
}

impl AsRef<str> for SwiftCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub country_code: String,
    pub is_headquarters: bool,
}

/// Decode country membership and headquarters/branch role from a code
pub fn classify(code: &str) -> Result<Classification, IdentifierError> {
    let parsed = SwiftCode::parse(code)?;
    Ok(Classification {
        country_code: parsed.country_code().to_string(),
        is_headquarters: parsed.is_headquarters(),
    })
}

/// First 8 characters: the key shared by a headquarters and all its branches
pub fn group_prefix(code: &str) -> &str {
    code.get(..GROUP_PREFIX_LEN).unwrap_or(code)
}

/// True for 11-character codes whose branch segment is not "XXX"
pub fn is_branch_suffix(code: &str) -> bool {
    code.len() == FULL_CODE_LEN && !code.ends_with(HEADQUARTERS_SUFFIX)
}

/// Shape check for a country code (normalization is the caller's job)
pub fn validate_country_code(country_code: &str) -> Result<(), IdentifierError> {
    if country_code.len() == 2 && country_code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(IdentifierError::InvalidCountryCode(country_code.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
