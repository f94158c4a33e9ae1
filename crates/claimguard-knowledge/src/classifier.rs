//! Keyword classification of claim text

use claimguard_core::ClaimCategory;

/// Keyword sets tested in priority order; the first set with any hit wins
const KEYWORD_TABLE: &[(ClaimCategory, &[&str])] = &[
    (
        ClaimCategory::AutoAccident,
        &["vehicle", "car", "accident", "collision", "driver"],
    ),
    (
        ClaimCategory::PropertyDamage,
        &["property", "home", "house", "building", "fire", "water"],
    ),
    (
        ClaimCategory::Medical,
        &["medical", "injury", "hospital", "treatment", "doctor"],
    ),
];

/// Classify `query` by substring keyword match on its lower-cased form.
///
/// Text matching none of the keyword sets is `General`.
pub fn classify(query: &str) -> ClaimCategory {
    let query = query.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
        .map_or(ClaimCategory::General, |(category, _)| *category)
}
