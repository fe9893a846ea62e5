// 🧭 Relationship Resolver - candidate keys from identifier structure
//
// Branches of a headquarters share its first 8 characters; banks of a
// country share positions 5-6. Neither relation has an index in the store,
// so both become wildcard patterns that the store scans, followed by a pure
// selection step over the scanned keys. An empty candidate set is a normal
// outcome (no branches, no banks in that country).

use crate::identifier::{group_prefix, is_branch_suffix, GROUP_PREFIX_LEN};
use crate::pattern::{KeyPattern, WILDCARD};

// ============================================================================
// CANDIDATE KEY SET
// ============================================================================

/// Request-scoped, sorted and de-duplicated identifiers to fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateKeySet(Vec<String>);

impl CandidateKeySet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|candidate| candidate == key)
    }
}

impl FromIterator<String> for CandidateKeySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut keys: Vec<String> = iter.into_iter().collect();
        keys.sort();
        keys.dedup();
        CandidateKeySet(keys)
    }
}

impl IntoIterator for CandidateKeySet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ============================================================================
// CANDIDATE QUERY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    /// Every scanned key
    All,
    /// Branch-suffixed keys other than the headquarters itself
    BranchesOf(String),
}

/// A pattern for the store to scan, plus the filter applied to what it returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pattern: KeyPattern,
    selection: Selection,
}

impl CandidateQuery {
    pub fn pattern(&self) -> &KeyPattern {
        &self.pattern
    }

    /// Narrow scanned keys down to the candidate set
    pub fn select(&self, scanned: impl IntoIterator<Item = String>) -> CandidateKeySet {
        scanned
            .into_iter()
            .filter(|key| self.pattern.matches(key))
            .filter(|key| match &self.selection {
                Selection::All => true,
                Selection::BranchesOf(hq) => key != hq && is_branch_suffix(key),
            })
            .collect()
    }
}

/// Branches of a headquarters: `<first 8 chars>???`, never the headquarters itself
pub fn branch_candidates(hq_code: &str) -> CandidateQuery {
    let prefix = group_prefix(hq_code);
    CandidateQuery {
        pattern: KeyPattern::prefixed(prefix, 3),
        selection: Selection::BranchesOf(hq_code.to_string()),
    }
}

/// Banks of a country: `????<CC>?????`. The country code must already be uppercase.
pub fn country_candidates(country_code: &str) -> CandidateQuery {
    let mut pattern = String::with_capacity(GROUP_PREFIX_LEN + 3);
    pattern.extend(std::iter::repeat(WILDCARD).take(4));
    pattern.push_str(country_code);
    pattern.extend(std::iter::repeat(WILDCARD).take(5));

    CandidateQuery {
        pattern: KeyPattern::new(pattern),
        selection: Selection::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_branch_pattern() {
        let query = branch_candidates("ALBPPLPWXXX");
        assert_eq!(query.pattern().as_str(), "ALBPPLPW???");

        // 8-character headquarters code gives the same group
        assert_eq!(branch_candidates("ALBPPLPW").pattern(), query.pattern());
    }

    #[test]
    fn test_country_pattern() {
        let query = country_candidates("PL");
        assert_eq!(query.pattern().as_str(), "????PL?????");
        assert_eq!(query.pattern().width(), 11);
    }

    #[test]
    fn test_branch_candidates_exclude_headquarters() {
        let query = branch_candidates("ALBPPLPWXXX");
        let candidates = query.select(keys(&["ALBPPLPWXXX", "ALBPPLPW001", "ALBPPLPW002"]));

        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains("ALBPPLPW001"));
        assert!(candidates.contains("ALBPPLPW002"));
        assert!(!candidates.contains("ALBPPLPWXXX"));
    }

    #[test]
    fn test_branch_candidates_from_short_code() {
        let query = branch_candidates("ALBPPLPW");
        let candidates = query.select(keys(&["ALBPPLPWXXX", "ALBPPLPW001"]));

        assert_eq!(candidates.into_iter().collect::<Vec<_>>(), keys(&["ALBPPLPW001"]));
    }

    #[test]
    fn test_select_drops_keys_outside_pattern() {
        let query = branch_candidates("ALBPPLPWXXX");
        let candidates = query.select(keys(&["ALBPPLPW001", "DEUTDEFF500", "ALBPPLPW0011"]));

        assert_eq!(candidates.into_iter().collect::<Vec<_>>(), keys(&["ALBPPLPW001"]));
    }

    #[test]
    fn test_country_candidates_keep_headquarters() {
        let query = country_candidates("PL");
        let candidates = query.select(keys(&[
            "ALBPPLPWXXX",
            "ALBPPLPW001",
            "BREXPLPWMBK",
            "ALBPPLPW001",
        ]));

        assert_eq!(
            candidates.into_iter().collect::<Vec<_>>(),
            keys(&["ALBPPLPW001", "ALBPPLPWXXX", "BREXPLPWMBK"])
        );
    }

    #[test]
    fn test_empty_candidate_set_is_valid() {
        let candidates = country_candidates("PL").select(Vec::new());
        assert!(candidates.is_empty());

        let candidates = branch_candidates("ALBPPLPWXXX").select(keys(&["ALBPPLPWXXX"]));
        assert!(candidates.is_empty());
    }
}
