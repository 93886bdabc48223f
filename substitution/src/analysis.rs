//! Frequency statistics over ciphertext.
//!
//! All counts are kept in unordered maps. Display order is derived with
//! [`ranked`]: descending count, ties broken by ascending key.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::alphabet;

/// Letter -> occurrence count.
pub type LetterCounts = HashMap<char, usize>;

/// Word (or digraph) -> occurrence count.
pub type WordCounts = HashMap<String, usize>;

/// Adjacent letter pair -> occurrence count.
pub type DigraphCounts = HashMap<String, usize>;

/// Longest word length tracked in the short-word statistics.
pub const MAX_SHORT_WORD_LEN: usize = 4;

/// Snapshot of the statistics of one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyReport {
    letters: LetterCounts,
    first_letters: LetterCounts,
    short_words: [WordCounts; MAX_SHORT_WORD_LEN],
    total_letters: usize,
}

impl FrequencyReport {
    /// Count of each alphabet letter (lower-cased).
    pub fn letters(&self) -> &LetterCounts {
        &self.letters
    }

    /// Count of each word-initial letter (lower-cased).
    pub fn first_letters(&self) -> &LetterCounts {
        &self.first_letters
    }

    /// Counts of the distinct lower-cased words of exactly `length` letters.
    /// `None` outside `1..=MAX_SHORT_WORD_LEN`.
    pub fn short_words(&self, length: usize) -> Option<&WordCounts> {
        length
            .checked_sub(1)
            .and_then(|index| self.short_words.get(index))
    }

    /// Number of alphabet letters in the text.
    pub fn total_letters(&self) -> usize {
        self.total_letters
    }

    /// Number of words in the text.
    pub fn total_words(&self) -> usize {
        self.first_letters.values().sum()
    }

    /// Observed share of `letter` in percent, 0 for an empty text.
    pub fn letter_percentage(&self, letter: char) -> f64 {
        if self.total_letters == 0 {
            return 0.0;
        }
        let count = self.letters.get(&letter).copied().unwrap_or(0);
        count as f64 / self.total_letters as f64 * 100.0
    }

    pub fn ranked_letters(&self) -> Vec<(char, usize)> {
        ranked(&self.letters)
    }

    pub fn ranked_first_letters(&self) -> Vec<(char, usize)> {
        ranked(&self.first_letters)
    }

    /// Ranked words of one length; empty outside `1..=MAX_SHORT_WORD_LEN`.
    pub fn ranked_words(&self, length: usize) -> Vec<(String, usize)> {
        self.short_words(length).map(ranked).unwrap_or_default()
    }
}

/// Computes the letter, first-letter and short-word statistics of `text`.
///
/// # Example
///
/// ```rust
/// let report = substitution::analyze("The cat, the hat.");
/// assert_eq!(report.total_letters(), 12);
/// assert_eq!(report.letters()[&'t'], 4);
/// assert_eq!(report.short_words(3).unwrap()["the"], 2);
/// ```
pub fn analyze(text: &str) -> FrequencyReport {
    let filtered = filter_letters(text);
    let mut report = FrequencyReport {
        letters: count_letters(&filtered),
        total_letters: filtered.len(),
        ..FrequencyReport::default()
    };

    for word in words(text) {
        if let Some(first) = word.chars().next() {
            *report
                .first_letters
                .entry(first.to_ascii_lowercase())
                .or_insert(0) += 1;
        }

        let length = word.len();
        if (1..=MAX_SHORT_WORD_LEN).contains(&length) {
            *report.short_words[length - 1]
                .entry(word.to_ascii_lowercase())
                .or_insert(0) += 1;
        }
    }

    report
}

/// Lower-cases `text` and keeps only alphabet letters.
pub fn filter_letters(text: &str) -> Vec<char> {
    text.chars().filter_map(alphabet::normalize).collect()
}

/// Counts the alphabet letters of `text`, case-insensitively.
pub fn letter_counts(text: &str) -> LetterCounts {
    count_letters(&filter_letters(text))
}

fn count_letters(letters: &[char]) -> LetterCounts {
    let mut counts = LetterCounts::new();
    for &letter in letters {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}

/// Runs of word characters: letters, digits and underscore.
fn word_runs() -> &'static Regex {
    static WORD_RUNS: OnceLock<Regex> = OnceLock::new();
    WORD_RUNS.get_or_init(|| Regex::new(r"[\p{Alphabetic}\p{N}_]+").expect("valid regex"))
}

/// Splits `text` into words: maximal runs of ASCII letters that are not
/// glued to any other word character (digit, underscore, non-ASCII letter).
///
/// `abc-def` yields two words, `abc1` and `café` yield none.
pub fn words(text: &str) -> Vec<&str> {
    word_runs()
        .find_iter(text)
        .map(|run| run.as_str())
        .filter(|run| run.chars().all(|c| c.is_ascii_alphabetic()))
        .collect()
}

/// Counts adjacent letter pairs of the filtered letter stream.
///
/// Separators are stripped before pairing, so a pair may straddle two
/// words: `"ab cd"` yields `ab`, `bc` and `cd`.
pub fn digraphs(text: &str) -> DigraphCounts {
    let filtered = filter_letters(text);
    let mut counts = DigraphCounts::new();
    for pair in filtered.windows(2) {
        *counts.entry(pair.iter().collect()).or_insert(0) += 1;
    }
    counts
}

/// Orders a count map by descending count, ties broken by ascending key.
pub fn ranked<K: Ord + Clone>(counts: &HashMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts
        .iter()
        .map(|(key, &count)| (key.clone(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
