// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns one raw review string into the flat token sequence the
// vocabulary and the encoder consume.
//
// Two stages:
//   1. clean()            — character-level cleaning of a string:
//                           URL-looking substrings go first, then
//                           every run of non-letters collapses to
//                           a single space, then trim.
//   2. filter_and_split() — item-level filtering: the lowercased,
//                           whitespace-split items are checked
//                           against the punctuation set and the
//                           stop-word list BEFORE cleaning and
//                           re-splitting. The check happens on
//                           whole items, not on the tokens that
//                           come out of the split — a filtered
//                           item drops all of its tokens, and a
//                           multi-word item keeps stop words that
//                           a token-level filter would remove.
//                           That ordering is intentional here;
//                           do not swap the stages.
//
// Reference: Rust Book §8 (Strings in Rust)
//            regex crate documentation

use regex::Regex;

/// Items exactly equal to one of these are dropped whole.
pub const STOP_WORDS: [&str; 16] = [
    "the", "a", "and", "i", "an", "are", "at", "for", "in", "is", "it", "of",
    "on", "to", "was", "with",
];

pub struct Preprocessor {
    /// Matches `http://...` / `https://...` up to the next whitespace
    url: Regex,
    /// Matches every run of characters outside the ASCII alphabet
    non_letter: Regex,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"https?://\S+").unwrap(),
            non_letter: Regex::new(r"[^A-Za-z]+").unwrap(),
        }
    }

    /// Clean a raw string: drop URLs, collapse non-letter runs to a
    /// single space, trim the edges. Empty input yields empty output.
    pub fn clean(&self, text: &str) -> String {
        let no_urls = self.url.replace_all(text, " ");
        let letters = self.non_letter.replace_all(&no_urls, " ");
        letters.trim().to_string()
    }

    /// Item-level filter followed by the split into tokens.
    ///
    /// For each non-empty item that is not itself a punctuation
    /// character and not a stop word, clean it and append every
    /// whitespace-separated piece of the result, in order, to one
    /// flat sequence.
    pub fn filter_and_split(&self, items: &[String]) -> Vec<String> {
        let mut tokens = Vec::new();

        for item in items {
            if item.is_empty() {
                continue;
            }
            if is_punctuation(item) || STOP_WORDS.contains(&item.as_str()) {
                continue;
            }
            for piece in self.clean(item).split_whitespace() {
                tokens.push(piece.to_string());
            }
        }

        tokens
    }

    /// Full pipeline for one review: lowercase, split on whitespace
    /// into items, then filter and re-split.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let items: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        self.filter_and_split(&items)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// True for items that are exactly one ASCII punctuation character.
/// Longer items pass through even if they are all punctuation.
fn is_punctuation(item: &str) -> bool {
    let mut chars = item.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_punctuation(),
        _ => false,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_urls_and_non_letters() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("Check http://x.com NOW!!"), "Check NOW");
    }

    #[test]
    fn clean_collapses_runs_to_one_space() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("well...done, twice!"), "well done twice");
    }

    #[test]
    fn clean_empty_input() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }

    #[test]
    fn clean_all_symbols_yields_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("123 !!! 456"), "");
    }

    #[test]
    fn filter_drops_whole_items_only() {
        let p = Preprocessor::new();
        // "the movie was great" is a multi-word item: it is not equal to
        // any stop word, so every token inside survives — including
        // "the" and "was". The lone "!" item is punctuation and drops.
        let items = vec!["the movie was great".to_string(), "!".to_string()];
        let tokens = p.filter_and_split(&items);
        assert_eq!(tokens, vec!["the", "movie", "was", "great"]);
    }

    #[test]
    fn filter_drops_stop_word_items() {
        let p = Preprocessor::new();
        let items: Vec<String> = ["the", "movie", "was", "great"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tokens = p.filter_and_split(&items);
        assert_eq!(tokens, vec!["movie", "great"]);
    }

    #[test]
    fn tokenize_lowercases_before_filtering() {
        let p = Preprocessor::new();
        // "The" lowercases to "the" and is then filtered as a stop word
        assert_eq!(p.tokenize("The movie"), vec!["movie"]);
    }

    #[test]
    fn tokenize_preserves_token_order() {
        let p = Preprocessor::new();
        assert_eq!(
            p.tokenize("don't stop believing"),
            vec!["don", "t", "stop", "believing"]
        );
    }
}
