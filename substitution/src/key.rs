//! The substitution key: a permutation of the alphabet.
//!
//! Position `i` of a key holds the ciphertext letter substituted for the
//! plaintext letter `ALPHABET[i]`. Every constructor guarantees that each
//! alphabet letter appears exactly once.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::alphabet::{self, ALPHABET, ALPHABET_LEN};
use crate::error::{Result, SubstitutionError};

/// Partially assigned key, used while a key is being built or repaired.
pub(crate) type Slots = [Option<char>; ALPHABET_LEN];

/// A bijection plaintext letter -> ciphertext letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    letters: [char; ALPHABET_LEN],
}

impl Key {
    /// The key that maps every letter to itself.
    pub fn identity() -> Self {
        Self { letters: ALPHABET }
    }

    /// Generates a uniformly random key from the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generates a random key from the given RNG.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use substitution::Key;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let key = Key::random_with(&mut rng);
    /// assert!(substitution::is_valid_key(&key.to_string()));
    /// ```
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut letters = ALPHABET;
        letters.shuffle(rng);
        Self { letters }
    }

    /// Parses the 26-letter textual form of a key.
    ///
    /// Input is case-insensitive. Fails with `InvalidKeyLength`,
    /// `InvalidKeyAlphabet` or `NotAPermutation`.
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = validate_key_text(text)?;

        let mut seen = [false; ALPHABET_LEN];
        let mut letters = ALPHABET;
        for (slot, letter) in letters.iter_mut().zip(normalized.chars()) {
            let index = alphabet::index_of(letter)
                .ok_or(SubstitutionError::InvalidKeyAlphabet(letter))?;
            if seen[index] {
                return Err(SubstitutionError::NotAPermutation(letter));
            }
            seen[index] = true;
            *slot = letter;
        }

        Ok(Self { letters })
    }

    /// Builds a key from a mapping specification such as `a->q,b->w,...`.
    ///
    /// All 26 plaintext letters must be given exactly once and mapped to
    /// distinct ciphertext letters.
    pub fn from_mapping(spec: &str) -> Result<Self> {
        Self::build_from_mapping(spec).map_err(|err| {
            tracing::debug!(%err, "rejected mapping specification");
            err
        })
    }

    fn build_from_mapping(spec: &str) -> Result<Self> {
        let mut slots: Slots = [None; ALPHABET_LEN];

        for entry in spec.split(',') {
            let (plain, cipher) = parse_mapping_entry(entry)?;
            let index = plain_index(plain);
            if slots[index].is_some() {
                return Err(SubstitutionError::DuplicateMapping(plain));
            }
            slots[index] = Some(cipher);
        }

        let mut letters = ALPHABET;
        for (i, slot) in slots.iter().enumerate() {
            letters[i] = slot.ok_or(SubstitutionError::IncompleteMapping(ALPHABET[i]))?;
        }

        let mut seen = [false; ALPHABET_LEN];
        for &cipher in &letters {
            let index = plain_index(cipher);
            if seen[index] {
                return Err(SubstitutionError::DuplicateMapping(cipher));
            }
            seen[index] = true;
        }

        Ok(Self { letters })
    }

    /// Completes partially assigned slots and builds the key.
    ///
    /// The assigned values must be distinct; empty slots receive the unused
    /// letters (see [`fill_gaps`]).
    pub(crate) fn from_slots(mut slots: Slots) -> Self {
        fill_gaps(&mut slots);
        let mut letters = ALPHABET;
        for (letter, slot) in letters.iter_mut().zip(slots) {
            debug_assert!(slot.is_some(), "slot left empty after fill_gaps");
            if let Some(cipher) = slot {
                *letter = cipher;
            }
        }
        Self { letters }
    }

    pub(crate) fn slots(&self) -> Slots {
        self.letters.map(Some)
    }

    /// The cipher letters in alphabet order.
    pub fn letters(&self) -> &[char; ALPHABET_LEN] {
        &self.letters
    }

    /// Ciphertext letter assigned to a plaintext letter.
    pub fn cipher_for(&self, plain: char) -> Option<char> {
        alphabet::normalize(plain).map(|letter| self.letters[plain_index(letter)])
    }

    /// The full plaintext -> ciphertext table, in alphabet order.
    pub fn mapping_table(&self) -> Vec<(char, char)> {
        ALPHABET.iter().copied().zip(self.letters).collect()
    }

    /// Renders the key as a mapping specification (`a->q,b->w,...`).
    pub fn to_mapping_spec(&self) -> String {
        self.mapping_table()
            .iter()
            .map(|(plain, cipher)| format!("{plain}->{cipher}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub(crate) fn swap(&mut self, first: usize, second: usize) {
        self.letters.swap(first, second);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for Key {
    type Err = SubstitutionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Checks the shape of a human-supplied key: exactly 26 ASCII letters.
///
/// Returns the lower-cased key text. Permutation-ness is not checked here.
pub fn validate_key_text(text: &str) -> Result<String> {
    let length = text.chars().count();
    if length != ALPHABET_LEN {
        return Err(SubstitutionError::InvalidKeyLength(length));
    }
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(SubstitutionError::InvalidKeyAlphabet(bad));
    }
    Ok(text.to_ascii_lowercase())
}

/// True iff `text` is exactly 26 lowercase letters forming a permutation
/// of the alphabet.
pub fn is_valid_key(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_lowercase()) && Key::parse(text).is_ok()
}

/// Fills every empty slot, in ascending index order, with the letters not
/// yet used as a value, in ascending alphabetical order.
pub(crate) fn fill_gaps(slots: &mut Slots) {
    let mut unused = ALPHABET
        .iter()
        .copied()
        .filter(|letter| !slots.contains(&Some(*letter)))
        .collect::<Vec<_>>()
        .into_iter();

    for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
        match unused.next() {
            Some(letter) => *slot = Some(letter),
            None => break,
        }
    }
}

/// Splits `p->c` into its two letters.
fn parse_mapping_entry(entry: &str) -> Result<(char, char)> {
    let malformed = || SubstitutionError::MalformedMappingEntry(entry.trim().to_string());

    let parts: Vec<&str> = entry.split("->").collect();
    if parts.len() != 2 {
        return Err(malformed());
    }

    let plain = single_letter(parts[0]).ok_or_else(malformed)?;
    let cipher = single_letter(parts[1]).ok_or_else(malformed)?;
    Ok((plain, cipher))
}

fn single_letter(text: &str) -> Option<char> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => alphabet::normalize(c),
        _ => None,
    }
}

/// Index of a letter already known to be in the alphabet.
fn plain_index(letter: char) -> usize {
    (letter as u8 - b'a') as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const REVERSED: &str = "zyxwvutsrqponmlkjihgfedcba";

    fn full_mapping(key: &str) -> String {
        ALPHABET
            .iter()
            .zip(key.chars())
            .map(|(p, c)| format!("{p}->{c}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_parse_valid_key() {
        let key = Key::parse(REVERSED).unwrap();
        assert_eq!(key.to_string(), REVERSED);
        assert_eq!(key.cipher_for('a'), Some('z'));
        assert_eq!(key.cipher_for('B'), Some('y'));
        assert_eq!(key.cipher_for('!'), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let key: Key = REVERSED.to_uppercase().parse().unwrap();
        assert_eq!(key.to_string(), REVERSED);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(Key::parse("abc"), Err(SubstitutionError::InvalidKeyLength(3)));
        assert_eq!(Key::parse(""), Err(SubstitutionError::InvalidKeyLength(0)));
    }

    #[test]
    fn test_parse_rejects_non_letters() {
        let result = Key::parse("abcdefghijklmnopqrstuvwxy1");
        assert_eq!(result, Err(SubstitutionError::InvalidKeyAlphabet('1')));
    }

    #[test]
    fn test_parse_rejects_repeated_letter() {
        let result = Key::parse("aacdefghijklmnopqrstuvwxyz");
        assert_eq!(result, Err(SubstitutionError::NotAPermutation('a')));
    }

    #[test]
    fn test_validate_key_text_allows_non_permutation() {
        assert_eq!(
            validate_key_text("AACDEFGHIJKLMNOPQRSTUVWXYZ").unwrap(),
            "aacdefghijklmnopqrstuvwxyz"
        );
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key(REVERSED));
        assert!(is_valid_key("abcdefghijklmnopqrstuvwxyz"));
        assert!(!is_valid_key("abcdefghijklmnopqrstuvwxy"));
        assert!(!is_valid_key("abcdefghijklmnopqrstuvwxyy"));
        assert!(!is_valid_key("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        assert!(!is_valid_key("abcdefghijklmnopqrstuvwxy "));
    }

    #[test]
    fn test_random_keys_are_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let key = Key::random_with(&mut rng);
            assert!(is_valid_key(&key.to_string()));
        }
        assert!(is_valid_key(&Key::random().to_string()));
    }

    #[test]
    fn test_random_with_same_seed_is_reproducible() {
        let first = Key::random_with(&mut StdRng::seed_from_u64(9));
        let second = Key::random_with(&mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_mapping_full() {
        let key = Key::from_mapping(&full_mapping(REVERSED)).unwrap();
        assert_eq!(key.to_string(), REVERSED);
    }

    #[test]
    fn test_from_mapping_tolerates_whitespace_and_case() {
        let spec = full_mapping(REVERSED).replace(',', " , ").to_uppercase();
        let key = Key::from_mapping(&spec).unwrap();
        assert_eq!(key.to_string(), REVERSED);
    }

    #[test]
    fn test_from_mapping_round_trips_spec() {
        let key = Key::parse(REVERSED).unwrap();
        assert_eq!(Key::from_mapping(&key.to_mapping_spec()).unwrap(), key);
    }

    #[test]
    fn test_from_mapping_rejects_repeated_plain_letter() {
        let result = Key::from_mapping("a->b,a->c");
        assert_eq!(result, Err(SubstitutionError::DuplicateMapping('a')));
    }

    #[test]
    fn test_from_mapping_rejects_incomplete() {
        let result = Key::from_mapping("a->b,b->a");
        assert_eq!(result, Err(SubstitutionError::IncompleteMapping('c')));
    }

    #[test]
    fn test_from_mapping_rejects_shared_cipher_letter() {
        let spec = full_mapping("aacdefghijklmnopqrstuvwxyz");
        let result = Key::from_mapping(&spec);
        assert_eq!(result, Err(SubstitutionError::DuplicateMapping('a')));
    }

    #[test]
    fn test_from_mapping_rejects_malformed_entries() {
        for spec in ["a-b", "a->b->c", "ab->c", "a->", "1->a", "a->b,"] {
            assert!(
                matches!(
                    Key::from_mapping(spec),
                    Err(SubstitutionError::MalformedMappingEntry(_))
                ),
                "spec {spec:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_fill_gaps_uses_unused_letters_in_order() {
        let mut slots: Slots = Key::identity().slots();
        slots[0] = None;
        slots[3] = None;
        slots[1] = Some('a');
        slots[4] = Some('d');
        // 'b' and 'e' are now unused; slot 0 gets 'b', slot 3 gets 'e'.
        fill_gaps(&mut slots);
        assert_eq!(slots[0], Some('b'));
        assert_eq!(slots[3], Some('e'));
    }

    #[test]
    fn test_mapping_table() {
        let key = Key::parse(REVERSED).unwrap();
        let table = key.mapping_table();
        assert_eq!(table.len(), ALPHABET_LEN);
        assert_eq!(table[0], ('a', 'z'));
        assert_eq!(table[25], ('z', 'a'));
    }
}
