//! Scoring of shareable resources against a charity's declared profile.
//!
//! The score is a heuristic ranking aid, not a guarantee. It is a pure
//! function over its inputs so the surrounding listing code can stay
//! read-only and the whole policy is unit-testable without a database.

use serde::{Deserialize, Serialize};

use crate::Resource;

/// The requesting charity's declared interests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityProfile {
    pub primary_category: String,
    pub secondary_categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Words too common to count as resource-name keywords.
const STOP_WORDS: [&str; 5] = ["and", "the", "for", "from", "with"];

const BASE_SCORE: i64 = 40;
const PRIMARY_CATEGORY_BONUS: i64 = 50;
const SECONDARY_CATEGORY_BONUS: i64 = 30;
const TAG_BONUS: i64 = 20;
const RECOMMENDATION_BONUS: i64 = 30;

/// Score `resource` against `profile` and an optional free-text
/// recommendation, returning an integer in `[0, 100]`.
///
/// An exact resource-name mention in the recommendation text forces the score
/// to 100. Ties are left to the caller's stable input order.
pub fn score_match(
    resource: &Resource,
    profile: &CharityProfile,
    recommendation: Option<&str>,
) -> u8 {
    let mut score = BASE_SCORE;

    if categories_match(&resource.category, &profile.primary_category) {
        score += PRIMARY_CATEGORY_BONUS;
    }

    if profile
        .secondary_categories
        .iter()
        .any(|secondary| categories_match(&resource.category, secondary))
    {
        score += SECONDARY_CATEGORY_BONUS;
    }

    let haystack = match &resource.description {
        Some(description) => format!("{} {}", resource.name, description),
        None => resource.name.clone(),
    };
    if profile.tags.iter().any(|tag| contains_ci(&haystack, tag)) {
        score += TAG_BONUS;
    }

    if let Some(text) = recommendation {
        if contains_phrase(text, &resource.name) {
            return 100;
        }
        if name_keywords(&resource.name).any(|keyword| contains_whole_word(text, keyword)) {
            score += RECOMMENDATION_BONUS;
        }
        if contains_ci(text, &resource.category) {
            score += RECOMMENDATION_BONUS;
        }
    }

    score.clamp(0, 100) as u8
}

/// Case-insensitive phrase containment with word boundaries on both sides,
/// so the name "Rice" is not found inside "price".
fn contains_phrase(text: &str, phrase: &str) -> bool {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    let mut from = 0;
    while let Some(pos) = text[from..].find(&phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let boundary_before = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            return true;
        }
        from = start + 1;
    }
    false
}

/// Case-insensitive substring containment; empty needles never match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Open-string categories match when either side contains the other, so
/// "Food" matches both "food" and "Canned food & drink".
fn categories_match(category: &str, wanted: &str) -> bool {
    contains_ci(category, wanted) || contains_ci(wanted, category)
}

/// Keywords of a resource name: words longer than 3 characters that are not
/// stop-words, lowercased.
fn name_keywords(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 3)
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
}

fn contains_whole_word(text: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|candidate| candidate == word)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn resource(name: &str, category: &str, description: Option<&str>) -> Resource {
        Resource::new(
            "charity-a".to_string(),
            name.to_string(),
            description.map(str::to_string),
            category.to_string(),
            100,
            50,
            "units".to_string(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    fn profile(primary: &str, secondary: &[&str], tags: &[&str]) -> CharityProfile {
        CharityProfile {
            primary_category: primary.to_string(),
            secondary_categories: secondary.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn base_score_without_any_match() {
        let r = resource("Tents", "Shelter", None);
        let p = profile("Food", &[], &[]);

        assert_eq!(score_match(&r, &p, None), 40);
    }

    #[test]
    fn primary_category_match_is_case_insensitive() {
        let r = resource("Canned Food", "Food", None);
        let p = profile("food", &[], &[]);

        assert!(score_match(&r, &p, None) >= 90);
    }

    #[test]
    fn primary_category_matches_as_substring() {
        let r = resource("Rice", "Dry food", None);
        let p = profile("Food", &[], &[]);

        assert_eq!(score_match(&r, &p, None), 90);
    }

    #[test]
    fn secondary_category_counts_once() {
        let r = resource("Rice", "Food", None);
        let p = profile("Medicine", &["food", "Food supplies"], &[]);

        // 40 + 30, the second matching secondary adds nothing.
        assert_eq!(score_match(&r, &p, None), 70);
    }

    #[test]
    fn tag_match_in_name_or_description() {
        let r = resource("Winter kit", "Clothing", Some("warm blankets and gloves"));
        let p = profile("Food", &[], &["blankets", "gloves"]);

        // 40 + 20, first tag only.
        assert_eq!(score_match(&r, &p, None), 60);
    }

    #[test]
    fn empty_profile_strings_never_match() {
        let r = resource("Rice", "Food", Some("long grain"));
        let p = profile("", &[""], &["", "  "]);

        assert_eq!(score_match(&r, &p, None), 40);
    }

    #[test]
    fn exact_name_in_recommendation_forces_100() {
        let r = resource("Canned Food", "Food", None);
        let p = profile("clothing", &[], &[]);
        let text = "We suggest sharing canned food with nearby shelters.";

        assert_eq!(score_match(&r, &p, Some(text)), 100);
    }

    #[test]
    fn recommendation_keyword_and_category_bonuses() {
        let r = resource("Winter kit", "Clothing", None);
        let p = profile("food", &[], &[]);
        // "winter" is a whole-word keyword hit, "clothing" a category hit,
        // and the full name "Winter kit" never appears.
        let text = "Donate winter clothing to nearby shelters.";

        assert_eq!(score_match(&r, &p, Some(text)), 100);
    }

    #[test]
    fn stop_words_and_short_words_are_not_keywords() {
        let r = resource("Kit for the Cold", "Shelter", None);
        let p = profile("food", &[], &[]);
        // "for"/"the" are stop-words and "Kit" fails the length gate, so
        // "Cold" is the only keyword; it appears as a whole word.
        let text = "warm meals for the cold months";

        assert_eq!(score_match(&r, &p, Some(text)), 70);
    }

    #[test]
    fn keyword_must_match_whole_words() {
        let r = resource("Rice", "Food", None);
        let p = profile("clothing", &[], &[]);
        // "rice" only occurs inside "price", which must not count; "Food"
        // occurs as a category literal.
        let text = "price lists for Food banks";

        assert_eq!(score_match(&r, &p, Some(text)), 70);
    }

    #[test]
    fn score_is_clamped_to_100() {
        let r = resource("Canned Soup", "Food", Some("hearty soup"));
        let p = profile("food", &["food"], &["soup"]);
        let text = "canned goods and Food donations welcome";

        assert_eq!(score_match(&r, &p, Some(text)), 100);
    }

    #[test]
    fn spec_scenario_canned_food() {
        let r = resource("Canned Food", "Food", None);
        let p = profile("food", &[], &[]);

        assert!(score_match(&r, &p, None) >= 90);
        assert_eq!(
            score_match(&r, &p, Some("Consider requesting Canned Food today")),
            100
        );
    }
}
