//! Small string helpers shared by the title and display-name cleaners.

/// Remove every `#` and `*` character and trim the result.
pub(crate) fn strip_markup(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '#' && *c != '*')
        .collect::<String>()
        .trim()
        .to_string()
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to at most `max_chars` characters, preferring to end on a word.
///
/// When the cut falls inside a word, the result backs off to the last
/// whitespace before the cut, unless that would leave fewer than
/// `min_chars` characters, in which case the hard cut is kept.
pub(crate) fn cut_at_word(text: &str, max_chars: usize, min_chars: usize) -> &str {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };

    let head = &text[..cut];
    if text[cut..].starts_with(char::is_whitespace) {
        return head.trim_end();
    }

    match head.rfind(char::is_whitespace) {
        Some(idx) => {
            let backed_off = head[..idx].trim_end();
            if char_len(backed_off) >= min_chars {
                backed_off
            } else {
                head
            }
        }
        None => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("  ## **Lemon Pasta** "), "Lemon Pasta");
        assert_eq!(strip_markup("#*#"), "");
    }

    #[test]
    fn test_cut_short_text_unchanged() {
        assert_eq!(cut_at_word("Pad Thai", 80, 3), "Pad Thai");
    }

    #[test]
    fn test_cut_backs_off_to_whitespace() {
        assert_eq!(cut_at_word("Roasted Cauliflower", 12, 3), "Roasted");
    }

    #[test]
    fn test_cut_on_boundary_keeps_full_word() {
        assert_eq!(cut_at_word("Roasted Cauliflower", 7, 3), "Roasted");
    }

    #[test]
    fn test_cut_without_whitespace_is_hard() {
        assert_eq!(cut_at_word("abcdefghij", 4, 3), "abcd");
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        assert_eq!(cut_at_word("crème brûlée", 5, 3), "crème");
    }
}
