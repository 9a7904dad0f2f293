//! Compact names for saved-recipe lists.
//!
//! Older saved records sometimes carry a whole conversational sentence as
//! their name ("Sure! How about a Creamy Tuscan Chicken?"). The cleaner pulls
//! out the dish name where it can and shortens the rest for list views.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::{char_len, cut_at_word, strip_markup};
use crate::title::UNTITLED_RECIPE;

/// Default width of a display name before it is shortened.
pub const DEFAULT_DISPLAY_NAME_LEN: usize = 55;

const ELLIPSIS: &str = "...";

const CONVERSATIONAL_MARKERS: &[&str] = &[
    "sure!",
    "how about",
    "let's",
    "here's",
    "try making",
    "here is",
];

const GENERIC_HEADERS: &[&str] = &["introduction", "overview", "recipe", "description"];

static INVITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:how about|let's make|try making)\s+(?:(?:an?|some)\s+)?(.+?)(?:[?!.,]|\bthis\s|$)")
        .expect("Invalid invitation regex")
});

static PRESENTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:here's|here is)\s+(?:(?:an?|some)\s+)?(?:(?:delicious|tasty|simple|quick|easy|classic|hearty|healthy|flavorful|comforting)\s+)?(.+?)(?:[?!.,]|\bthis\s|$)",
    )
    .expect("Invalid presentation regex")
});

/// Clean a stored recipe name for display in a compact list.
///
/// Names longer than `max_len` characters are cut on a word boundary and end
/// with `...`. Empty or generic names become [`UNTITLED_RECIPE`].
pub fn clean_display_name(name: &str, max_len: usize) -> String {
    let stripped = strip_markup(name);
    let mut cleaned = stripped
        .strip_suffix(':')
        .unwrap_or(&stripped)
        .trim()
        .to_string();

    let lower = cleaned.to_lowercase();
    if CONVERSATIONAL_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
    {
        if let Some(dish) = dish_from_sentence(&cleaned) {
            cleaned = dish;
        }
    }

    if GENERIC_HEADERS.contains(&cleaned.to_lowercase().as_str()) {
        return UNTITLED_RECIPE.to_string();
    }

    if char_len(&cleaned) > max_len {
        let cut = cut_at_word(&cleaned, max_len, 1);
        cleaned = format!("{cut}{ELLIPSIS}");
    }

    if cleaned.is_empty() {
        UNTITLED_RECIPE.to_string()
    } else {
        cleaned
    }
}

fn dish_from_sentence(sentence: &str) -> Option<String> {
    [&*INVITATION, &*PRESENTATION].iter().find_map(|pattern| {
        let captured = pattern.captures(sentence)?.get(1)?.as_str();
        let dish = captured
            .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .trim();
        (char_len(dish) >= 3).then(|| dish.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(
            clean_display_name("Garlic Butter Shrimp", DEFAULT_DISPLAY_NAME_LEN),
            "Garlic Butter Shrimp"
        );
    }

    #[test]
    fn test_strips_markup_and_trailing_colon() {
        assert_eq!(
            clean_display_name("## **Beef Stew** :", DEFAULT_DISPLAY_NAME_LEN),
            "Beef Stew"
        );
    }

    #[test]
    fn test_extracts_dish_from_invitation() {
        assert_eq!(
            clean_display_name(
                "Sure! How about a Creamy Tuscan Chicken? It's easy.",
                DEFAULT_DISPLAY_NAME_LEN
            ),
            "Creamy Tuscan Chicken"
        );
        assert_eq!(
            clean_display_name("Let's make some Veggie Fried Rice!", DEFAULT_DISPLAY_NAME_LEN),
            "Veggie Fried Rice"
        );
    }

    #[test]
    fn test_extracts_dish_from_presentation() {
        assert_eq!(
            clean_display_name(
                "Here's a delicious Shrimp Scampi, ready in 20 minutes",
                DEFAULT_DISPLAY_NAME_LEN
            ),
            "Shrimp Scampi"
        );
        assert_eq!(
            clean_display_name("Here is an Apple Crumble this weekend", DEFAULT_DISPLAY_NAME_LEN),
            "Apple Crumble"
        );
    }

    #[test]
    fn test_short_extraction_is_ignored() {
        assert_eq!(
            clean_display_name("How about it?", DEFAULT_DISPLAY_NAME_LEN),
            "How about it?"
        );
    }

    #[test]
    fn test_generic_header_becomes_fallback() {
        assert_eq!(clean_display_name("**Overview:**", 55), UNTITLED_RECIPE);
        assert_eq!(clean_display_name("Recipe", 55), UNTITLED_RECIPE);
    }

    #[test]
    fn test_empty_becomes_fallback() {
        assert_eq!(clean_display_name("", 55), UNTITLED_RECIPE);
        assert_eq!(clean_display_name(" ** ", 55), UNTITLED_RECIPE);
    }

    #[test]
    fn test_long_name_gets_ellipsis() {
        let name = "x".repeat(100);
        let cleaned = clean_display_name(&name, 55);
        assert!(cleaned.chars().count() <= 58);
        assert!(cleaned.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_long_name_cut_on_word() {
        let cleaned = clean_display_name("Slow Cooker Pulled Pork with Apple Slaw", 20);
        assert_eq!(cleaned, "Slow Cooker Pulled...");
    }
}
