//! Recipe title extraction from free-form model output.
//!
//! Generated recipes rarely start with a clean title. The extractor tries,
//! in order, a Markdown heading, a line that is a single bold span, the first
//! line that does not look like chatter or recipe metadata, and finally the
//! first substantial line of any kind.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::text::{char_len, cut_at_word, strip_markup};

/// Title used when nothing in the text qualifies.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Longest title the extractor will return, in characters.
pub const MAX_TITLE_LEN: usize = 80;

const MIN_TITLE_LEN: usize = 3;

const SECTION_KEYWORDS: &[&str] = &[
    "ingredients",
    "instructions",
    "directions",
    "steps",
    "tips",
    "notes",
    "shopping",
    "servings",
];

const TIME_KEYWORDS: &[&str] = &["prep time", "cook time", "total time"];

// Matched as plain substrings, so "enjoyable" is caught by "enjoy".
const FILLER_PHRASES: &[&str] = &[
    "here",
    "suggest",
    "perfect",
    "delicious",
    "enjoy",
    "this is",
    "try this",
    "sure!",
    "absolutely",
    "great choice",
];

const METADATA_MARKERS: &[&str] = &[
    "servings:",
    "prep time:",
    "cook time:",
    "total time:",
    "ingredients:",
    "instructions:",
    "directions:",
];

static NUMBERED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s").expect("Invalid numbered step regex"));

/// Pick the most plausible recipe title out of raw model output.
///
/// Always returns a non-empty string between 3 and 80 characters with no `#`
/// or `*` in it, falling back to [`UNTITLED_RECIPE`].
///
/// # Example
/// ```
/// use dinner_recipe_maker::extract_title;
///
/// let title = extract_title("# Garlic Butter Shrimp\n\nIngredients:\n- shrimp");
/// assert_eq!(title, "Garlic Butter Shrimp");
/// ```
pub fn extract_title(raw_text: &str) -> String {
    let lines: Vec<&str> = raw_text.split('\n').map(str::trim).collect();

    let title = heading_title(&lines)
        .or_else(|| bold_title(&lines))
        .or_else(|| plain_title(&lines))
        .or_else(|| first_substantial_line(&lines));

    match title {
        Some(title) => title,
        None => {
            debug!("No title candidate found, using fallback");
            UNTITLED_RECIPE.to_string()
        }
    }
}

fn heading_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| line.starts_with('#'))
        .map(|line| strip_markup(line))
        .filter(|text| !starts_with_any(text, SECTION_KEYWORDS))
        .find_map(|text| finish(&text))
}

fn bold_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| standalone_bold(line))
        .map(strip_markup)
        .filter(|text| {
            !starts_with_any(text, SECTION_KEYWORDS) && !starts_with_any(text, TIME_KEYWORDS)
        })
        .find_map(|text| finish(&text))
}

fn plain_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !line.is_empty() && !is_chatter_or_metadata(line))
        .map(|line| strip_markup(line))
        .find_map(|text| finish(&text))
}

fn first_substantial_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| strip_markup(line))
        .filter(|text| char_len(text) > MIN_TITLE_LEN)
        .find_map(|text| finish(&text))
}

/// Inner text of a line that is exactly one `**bold**` span.
fn standalone_bold(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    if inner.contains("**") {
        None
    } else {
        Some(inner)
    }
}

fn is_chatter_or_metadata(line: &str) -> bool {
    let lower = line.to_lowercase();
    FILLER_PHRASES.iter().any(|phrase| lower.contains(phrase))
        || METADATA_MARKERS.iter().any(|marker| lower.contains(marker))
        || line == "---"
        || line.starts_with('-')
        || line.starts_with('•')
        || NUMBERED_STEP.is_match(line)
}

fn starts_with_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.starts_with(keyword))
}

/// Apply the length rules to a cleaned candidate.
fn finish(candidate: &str) -> Option<String> {
    if char_len(candidate) < MIN_TITLE_LEN {
        return None;
    }
    let title = cut_at_word(candidate, MAX_TITLE_LEN, MIN_TITLE_LEN);
    (char_len(title) >= MIN_TITLE_LEN).then(|| title.to_string())
}
