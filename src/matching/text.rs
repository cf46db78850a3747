//! Word-boundary helpers shared by the matcher and the disambiguator.

/// Unicode alphanumerics and `_` are word characters.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `text[start..end]` is not glued to a word character on either side.
pub fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Byte offset of the character following the one at `at`.
#[inline]
pub fn next_char_boundary(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}

/// Whole-word (or whole-phrase) containment. Phrase tokens match across any whitespace run.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let Some((first, rest)) = tokens.split_first() else {
        return false;
    };

    let mut from = 0;
    while from < haystack.len() {
        let Some(pos) = haystack[from..].find(first) else {
            return false;
        };
        let start = from + pos;
        if let Some(end) = match_tail(haystack, start + first.len(), rest) {
            if is_bounded(haystack, start, end) {
                return true;
            }
        }
        from = next_char_boundary(haystack, start);
    }
    false
}

fn match_tail(haystack: &str, mut at: usize, tokens: &[&str]) -> Option<usize> {
    for token in tokens {
        let remaining = &haystack[at..];
        let gap = remaining.len() - remaining.trim_start().len();
        if gap == 0 {
            return None;
        }
        at += gap;
        if !haystack[at..].starts_with(token) {
            return None;
        }
        at += token.len();
    }
    Some(at)
}
