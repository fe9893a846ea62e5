// 🔍 Key Patterns - fixed-length wildcard scans over the key space
//
// Syntax: one character per key position. `?` matches any single character,
// every other character must match exactly (case-sensitive). A pattern only
// matches keys of its own length.

use serde::Serialize;
use std::fmt;

pub const WILDCARD: char = '?';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KeyPattern(String);

impl KeyPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        KeyPattern(pattern.into())
    }

    /// `literal` followed by `wildcards` positions of `?`
    pub fn prefixed(literal: &str, wildcards: usize) -> Self {
        let mut pattern = String::with_capacity(literal.len() + wildcards);
        pattern.push_str(literal);
        pattern.extend(std::iter::repeat(WILDCARD).take(wildcards));
        KeyPattern(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of key positions the pattern spans
    pub fn width(&self) -> usize {
        self.0.chars().count()
    }

    /// Check if a key matches position by position
    pub fn matches(&self, key: &str) -> bool {
        if key.chars().count() != self.width() {
            return false;
        }

        self.0
            .chars()
            .zip(key.chars())
            .all(|(expected, actual)| expected == WILDCARD || expected == actual)
    }

    /// Render as a SQLite GLOB expression
    ///
    /// GLOB's `?` already means "one character" and GLOB is case-sensitive,
    /// so only GLOB's other metacharacters need escaping.
    pub fn to_glob(&self) -> String {
        let mut glob = String::with_capacity(self.0.len());
        for ch in self.0.chars() {
            match ch {
                '*' => glob.push_str("[*]"),
                '[' => glob.push_str("[[]"),
                _ => glob.push(ch),
            }
        }
        glob
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_pattern() {
        let pattern = KeyPattern::prefixed("ALBPPLPW", 3);
        assert_eq!(pattern.as_str(), "ALBPPLPW???");
        assert_eq!(pattern.width(), 11);
    }

    #[test]
    fn test_wildcard_positions() {
        let pattern = KeyPattern::new("????PL?????");

        assert!(pattern.matches("ALBPPLPWXXX"));
        assert!(pattern.matches("BREXPLPWMBK"));
        assert!(!pattern.matches("DEUTDEFF500"));
        assert!(!pattern.matches("ALBPPLPW"));
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let pattern = KeyPattern::new("ALBPPLPW???");

        assert!(pattern.matches("ALBPPLPW001"));
        assert!(!pattern.matches("albpplpw001"));
        assert!(!pattern.matches("ALBPPLPX001"));
    }

    #[test]
    fn test_to_glob_escapes_metacharacters() {
        assert_eq!(KeyPattern::new("AB??").to_glob(), "AB??");
        assert_eq!(KeyPattern::new("A*[?").to_glob(), "A[*][[]?");
    }
}
