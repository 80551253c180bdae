//! Word counting and reading-time estimation.
//!
//! Mixed-script text needs two counters: CJK scripts have no word
//! separators, so each code point counts as a word, while Latin-script
//! words are matched as boundary-delimited tokens.

use super::Document;
use regex::Regex;
use std::sync::LazyLock;

/// Assumed reading speed for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 230;

/// Hiragana, Katakana, CJK Unified Ideographs, and Hangul syllables.
static CJK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{3040}-\x{9fff}\x{ac00}-\x{d7af}]").unwrap());

/// Latin-script word tokens, including contractions and hyphenations.
static LATIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z0-9'-]+\b").unwrap());

/// Count words in mixed CJK/Latin text.
///
/// CJK code points count individually; Latin tokens count once each.
pub fn count_words(text: &str) -> usize {
    let cjk = CJK_RE.find_iter(text).count();
    let latin = LATIN_RE.find_iter(text).count();
    cjk + latin
}

/// Estimated reading time in minutes, rounded up, never below one.
pub fn reading_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Pipeline stage: record word count and reading time on the document.
pub fn count_stage(mut doc: Document) -> Document {
    doc.meta.word_count = count_words(&doc.body);
    doc.meta.reading_time = reading_time(doc.meta.word_count);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::DocMeta;

    #[test]
    fn test_latin_words() {
        assert_eq!(count_words("hello world"), 2);
    }

    #[test]
    fn test_cjk_code_points() {
        assert_eq!(count_words("你好"), 2);
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(count_words("hello 你好"), 3);
    }

    #[test]
    fn test_contractions_and_hyphens() {
        assert_eq!(count_words("don't over-think it"), 3);
    }

    #[test]
    fn test_punctuation_not_counted() {
        assert_eq!(count_words("... !! ??"), 0);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_hangul() {
        assert_eq!(count_words("안녕"), 2);
    }

    #[test]
    fn test_kana() {
        assert_eq!(count_words("ひらがな"), 4);
    }

    #[test]
    fn test_numbers_count_as_words() {
        assert_eq!(count_words("version 2 of 3"), 4);
    }

    #[test]
    fn test_reading_time_minimum_one() {
        assert_eq!(reading_time(0), 1);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(WORDS_PER_MINUTE), 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(WORDS_PER_MINUTE + 1), 2);
        assert_eq!(reading_time(WORDS_PER_MINUTE * 3), 3);
        assert_eq!(reading_time(WORDS_PER_MINUTE * 3 + 1), 4);
    }

    #[test]
    fn test_count_stage_populates_meta() {
        let doc = Document::new("one two three", DocMeta::default());
        let out = count_stage(doc);
        assert_eq!(out.meta.word_count, 3);
        assert_eq!(out.meta.reading_time, 1);
    }
}
