//! Allergy parsing and ingredient filtering
//!
//! Matching is exact and case-sensitive: `"Honey"` does not exclude `"honey"`.

/// A child's allergy list parsed from the free-text profile field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergyList {
    entries: Vec<String>,
}

impl AllergyList {
    /// Parse a comma separated allergy field, trimming entries and
    /// dropping empty ones.
    pub fn parse(raw: Option<&str>) -> Self {
        let entries = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.entries.iter().any(|entry| entry == ingredient)
    }
}

/// Remove every ingredient that exactly matches an allergy entry.
///
/// Order of the remaining ingredients is preserved, so filtering an
/// already-filtered list is a no-op.
pub fn filter_allergies(ingredients: &[String], allergies: &AllergyList) -> Vec<String> {
    ingredients
        .iter()
        .filter(|ingredient| !allergies.contains(ingredient))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_trims_and_drops_empty_entries() {
        let allergies = AllergyList::parse(Some(" honey, ,peanuts ,"));
        assert!(allergies.contains("honey"));
        assert!(allergies.contains("peanuts"));
        assert!(!allergies.contains(""));
        assert_eq!(AllergyList::parse(None), AllergyList::default());
        assert_eq!(AllergyList::parse(Some(" , ")), AllergyList::default());
    }

    #[test]
    fn test_filter_removes_exact_matches_only() {
        let ingredients = list(&["honey", "Honey", "honeydew", "lemon"]);
        let allergies = AllergyList::parse(Some("honey"));

        assert_eq!(
            filter_allergies(&ingredients, &allergies),
            list(&["Honey", "honeydew", "lemon"])
        );
    }

    #[test]
    fn test_filter_removes_every_occurrence() {
        let ingredients = list(&["ginger", "honey", "honey"]);
        let allergies = AllergyList::parse(Some("honey"));
        assert_eq!(filter_allergies(&ingredients, &allergies), list(&["ginger"]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ingredients = list(&["honey", "lemon", "ginger", "milk"]);
        let allergies = AllergyList::parse(Some("milk, ginger"));

        let once = filter_allergies(&ingredients, &allergies);
        let twice = filter_allergies(&once, &allergies);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_everything_filtered_leaves_empty_list() {
        let ingredients = list(&["honey"]);
        let allergies = AllergyList::parse(Some("honey"));
        assert!(filter_allergies(&ingredients, &allergies).is_empty());
    }
}
