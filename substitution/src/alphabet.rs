//! The fixed Latin alphabet and the English reference tables used by the
//! frequency attack.

/// Number of letters in the alphabet.
pub const ALPHABET_LEN: usize = 26;

/// The reference ordering. Index `i` is the canonical position of a letter.
pub const ALPHABET: [char; ALPHABET_LEN] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// English letters ordered from most to least frequent.
pub const STANDARD_FREQUENCY_ORDER: [char; ALPHABET_LEN] = [
    'e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'c', 'u',
    'm', 'w', 'f', 'g', 'y', 'p', 'b', 'v', 'k', 'j', 'x', 'q', 'z',
];

/// English word-initial letters ordered from most to least frequent.
pub const STANDARD_FIRST_LETTER_ORDER: [char; ALPHABET_LEN] = [
    's', 'c', 'p', 'a', 'd', 'r', 'b', 't', 'm', 'f', 'i', 'e', 'h',
    'l', 'g', 'w', 'o', 'u', 'n', 'v', 'j', 'k', 'q', 'y', 'z', 'x',
];

/// English letter frequencies in percent, indexed alphabetically (a-z).
const ENGLISH_FREQUENCIES: [f64; ALPHABET_LEN] = [
    8.17, 1.29, 2.78, 4.25, 12.70, 2.23, 2.02, 6.09, 6.97, 0.15, 0.77, 4.03, 2.41,
    6.75, 7.51, 1.93, 0.10, 5.99, 6.33, 9.06, 2.76, 0.98, 2.36, 0.15, 1.97, 0.07,
];

/// Common English words of length 1 to 4, indexed by `length - 1`.
const COMMON_WORDS: [&[&str]; 4] = [
    &["a", "i"],
    &[
        "am", "an", "as", "at", "be", "by", "do", "go", "he", "hi", "if", "in", "is",
        "it", "me", "my", "no", "of", "on", "or", "so", "to", "up", "us", "we",
    ],
    &[
        "the", "and", "for", "you", "are", "but", "not", "all", "any", "can", "her",
        "was", "one", "our", "out", "get", "has", "him", "his", "how", "man", "new",
        "now", "old", "see", "two", "way", "who", "did", "its", "let", "put", "say",
        "she", "too", "use",
    ],
    &[
        "that", "with", "this", "have", "from", "they", "were", "will", "your", "what",
        "when", "them", "like", "time", "more", "some", "over", "such", "here", "than",
        "then", "also", "into", "only",
    ],
];

const WORD_LENGTH_HINTS: [&str; 4] = [
    "likely: a, i",
    "likely: be, of, to, in, it, on, as, at, by, he, me, my, no, up, us",
    "likely: THE, AND, FOR, YOU, ARE, BUT, NOT, ALL, ANY, CAN, HER, WAS, ONE, OUR, OUT, \
     GET, HAS, HIS, HOW, NEW, NOW, SEE, TWO, WHO, SAY, SHE, TOO, USE",
    "likely: THAT, WITH, THIS, HAVE, FROM, THEY, WERE, WILL, YOUR, WHAT, WHEN, THEM, \
     LIKE, TIME, MORE, SOME, OVER, SUCH, HERE, THAN, THEN, ALSO, INTO, ONLY",
];

/// Returns the canonical position of a lowercase alphabet letter.
pub fn index_of(letter: char) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some((letter as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Lower-cases `c` and returns it if it belongs to the alphabet.
pub fn normalize(c: char) -> Option<char> {
    let lower = c.to_ascii_lowercase();
    index_of(lower).map(|_| lower)
}

/// Reference English frequency (percent) of a letter, 0 for non-letters.
pub fn english_frequency(letter: char) -> f64 {
    index_of(letter)
        .map(|index| ENGLISH_FREQUENCIES[index])
        .unwrap_or(0.0)
}

/// Whether `word` (lowercase) is one of the common English words of its length.
pub fn is_common_word(word: &str) -> bool {
    let length = word.chars().count();
    (1..=COMMON_WORDS.len()).contains(&length) && COMMON_WORDS[length - 1].contains(&word)
}

/// Candidate plaintext words for a cipher word of the given length.
pub fn word_length_hint(length: usize) -> Option<&'static str> {
    length
        .checked_sub(1)
        .and_then(|index| WORD_LENGTH_HINTS.get(index))
        .copied()
}
