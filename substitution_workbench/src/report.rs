//! Rendering of the ciphertext-only attack statistics.

use std::io::{self, Write};

use substitution::alphabet::{self, STANDARD_FIRST_LETTER_ORDER};
use substitution::analysis::MAX_SHORT_WORD_LEN;
use substitution::{analyze, digraphs, ranked, Key};

/// Entries shown per short-word length and for digraphs.
const TOP_ENTRIES: usize = 5;

/// Letter pairs per line of the key mapping table.
const MAPPING_COLUMNS: usize = 8;

/// Writes the full statistics report for `ciphertext` and the suggested key.
///
/// # Arguments
///
/// * `out` - Destination of the report.
/// * `ciphertext` - The text under attack.
/// * `suggested` - The key proposed by frequency rank alignment.
pub fn write_attack_report<W: Write>(
    out: &mut W,
    ciphertext: &str,
    suggested: &Key,
) -> io::Result<()> {
    let report = analyze(ciphertext);

    // Letter frequencies against the English reference
    writeln!(out, "\nLetter frequencies (descending):")?;
    for (letter, count) in report.ranked_letters() {
        writeln!(
            out,
            "{}: {} times, {:.2}% (English: {:.2}%)",
            letter.to_ascii_uppercase(),
            count,
            report.letter_percentage(letter),
            alphabet::english_frequency(letter)
        )?;
    }

    // Word-initial letters against the English first-letter order
    writeln!(out, "\nFirst-letter frequencies (descending):")?;
    let total_words = report.total_words();
    for (rank, (letter, count)) in report.ranked_first_letters().into_iter().enumerate() {
        let percent = count as f64 / total_words as f64 * 100.0;
        let standard = STANDARD_FIRST_LETTER_ORDER.get(rank).copied().unwrap_or('?');
        writeln!(
            out,
            "{}: {} times, {:.2}% (English first letter: {})",
            letter.to_ascii_uppercase(),
            count,
            percent,
            standard.to_ascii_uppercase()
        )?;
    }

    writeln!(out, "\nCommon short words:")?;
    for length in 1..=MAX_SHORT_WORD_LEN {
        let words = report.ranked_words(length);
        if words.is_empty() {
            continue;
        }

        let hint = alphabet::word_length_hint(length).unwrap_or_default();
        writeln!(out, "\n{length}-letter words ({hint}):")?;
        for (word, count) in words.iter().take(TOP_ENTRIES) {
            let marker = if alphabet::is_common_word(word) { " (common word)" } else { "" };
            writeln!(out, "'{word}': {count} times{marker}")?;
        }
    }

    writeln!(out, "\nSuggested key from frequency analysis:")?;
    writeln!(out, "Key: {suggested}")?;

    writeln!(out, "\nFrequent digraphs (candidates for th/he/in):")?;
    if ciphertext.chars().count() >= 2 {
        for (pair, count) in ranked(&digraphs(ciphertext)).into_iter().take(TOP_ENTRIES) {
            writeln!(out, "{pair}: {count} times")?;
        }
    }

    Ok(())
}

/// Writes `P→C` pairs, upper-cased, eight per line.
pub fn write_mapping_table<W: Write>(out: &mut W, mapping: &[(char, char)]) -> io::Result<()> {
    for row in mapping.chunks(MAPPING_COLUMNS) {
        let cells: Vec<String> = row
            .iter()
            .map(|(plain, cipher)| {
                format!("{}→{}", plain.to_ascii_uppercase(), cipher.to_ascii_uppercase())
            })
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use substitution::suggest_key;

    fn render(ciphertext: &str) -> String {
        let mut out = Vec::new();
        write_attack_report(&mut out, ciphertext, &suggest_key(ciphertext)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_lists_letters_with_reference() {
        let text = render("xxy");
        assert!(text.contains("X: 2 times, 66.67% (English: 0.15%)"));
        assert!(text.contains("Y: 1 times, 33.33% (English: 1.97%)"));
        // X is listed before Y
        assert!(text.find("X: 2").unwrap() < text.find("Y: 1").unwrap());
    }

    #[test]
    fn test_report_first_letters_and_short_words() {
        let text = render("the cat the dog a");
        assert!(text.contains("T: 2 times, 40.00% (English first letter: S)"));
        assert!(text.contains("3-letter words"));
        assert!(text.contains("'the': 2 times (common word)"));
        assert!(text.contains("'cat': 1 times\n"));
        assert!(text.contains("'a': 1 times (common word)"));
        assert!(!text.contains("2-letter words"));
    }

    #[test]
    fn test_report_caps_short_words_at_five() {
        let text = render("ab cd ef gh ij kl mn");
        assert!(text.contains("'ij'"));
        assert!(!text.contains("'kl'"));
    }

    #[test]
    fn test_report_digraphs_and_key() {
        let text = render("aabb");
        assert!(text.contains("aa: 1 times"));
        assert!(text.contains("ab: 1 times"));
        assert!(text.contains("bb: 1 times"));
        assert!(text.contains(&format!("Key: {}", suggest_key("aabb"))));
    }

    #[test]
    fn test_report_skips_digraphs_for_single_character() {
        let text = render("a");
        assert!(text.ends_with("Frequent digraphs (candidates for th/he/in):\n"));
    }

    #[test]
    fn test_mapping_table_rows() {
        let mut out = Vec::new();
        write_mapping_table(&mut out, &Key::identity().mapping_table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A→A B→B C→C D→D E→E F→F G→G H→H");
        assert_eq!(lines[3], "Y→Y Z→Z");
    }
}
