//! Case-preserving substitution over the Latin alphabet.

use crate::alphabet::{self, ALPHABET, ALPHABET_LEN};
use crate::error::Result;
use crate::key::{validate_key_text, Key};

/// Substitutes every letter of `text` found in `source` with the letter at
/// the same position in `target`.
///
/// Characters whose lowercase form is not an alphabet letter are copied
/// unchanged, and the case of each letter is preserved. If `source` repeats
/// a letter, its first position wins; letters missing from `source` pass
/// through unchanged.
///
/// # Arguments
///
/// * `text` - The input text.
/// * `source` - The ordering letters are looked up in.
/// * `target` - The ordering substitutes are taken from.
///
/// # Returns
///
/// A `String` with the substituted text.
pub fn substitute(text: &str, source: &[char], target: &[char]) -> String {
    // Lookup table from source letter index to target letter
    let mut table: [Option<char>; ALPHABET_LEN] = [None; ALPHABET_LEN];
    for (&from, &to) in source.iter().zip(target) {
        if let Some(index) = alphabet::normalize(from).and_then(alphabet::index_of) {
            table[index].get_or_insert(to.to_ascii_lowercase());
        }
    }

    text.chars()
        .map(|c| {
            let substitute = alphabet::normalize(c)
                .and_then(alphabet::index_of)
                .and_then(|index| table[index]);

            match substitute {
                Some(letter) if c.is_ascii_uppercase() => letter.to_ascii_uppercase(),
                Some(letter) => letter,
                // Non-alphabetic characters remain unchanged
                None => c,
            }
        })
        .collect()
}

/// Encrypts `plaintext` under `key`.
///
/// # Example
///
/// ```rust
/// use substitution::{decrypt, encrypt, Key};
///
/// let key = Key::parse("zyxwvutsrqponmlkjihgfedcba")?;
/// assert_eq!(encrypt("abc", &key), "zyx");
/// assert_eq!(decrypt("zyx", &key), "abc");
/// # Ok::<(), substitution::SubstitutionError>(())
/// ```
pub fn encrypt(plaintext: &str, key: &Key) -> String {
    substitute(plaintext, &ALPHABET, key.letters())
}

/// Decrypts `ciphertext` under `key`. Exact inverse of [`encrypt`].
pub fn decrypt(ciphertext: &str, key: &Key) -> String {
    substitute(ciphertext, key.letters(), &ALPHABET)
}

/// Decrypts `ciphertext` with a key typed by a human.
///
/// The key is only checked for being 26 letters; it need not be a
/// permutation. A repeated letter decrypts to its first position, and a
/// letter missing from the key passes through unchanged.
pub fn decrypt_with_key_text(ciphertext: &str, key_text: &str) -> Result<String> {
    let key: Vec<char> = validate_key_text(key_text)?.chars().collect();
    Ok(substitute(ciphertext, &key, &ALPHABET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubstitutionError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reversed() -> Key {
        Key::parse("zyxwvutsrqponmlkjihgfedcba").unwrap()
    }

    #[test]
    fn test_reversed_alphabet() {
        let key = reversed();
        assert_eq!(encrypt("abc", &key), "zyx");
        assert_eq!(decrypt("zyx", &key), "abc");
    }

    #[test]
    fn test_preserves_case_and_punctuation() {
        let key = reversed();
        let encrypted = encrypt("Hello, World!", &key);
        assert_eq!(encrypted, "Svool, Dliow!");
        assert_eq!(decrypt(&encrypted, &key), "Hello, World!");
    }

    #[test]
    fn test_identity_key_is_noop() {
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(encrypt(text, &Key::identity()), text);
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let key = reversed();
        assert_eq!(encrypt("Grüße 123 _", &key), "Tiüßv 123 _");
    }

    #[test]
    fn test_round_trip_with_random_keys() {
        let mut rng = StdRng::seed_from_u64(2024);
        let text = "Attack at DAWN, 06:00 -- bring 3 ladders & rope!\n\tÉtoile? yes.";
        for _ in 0..25 {
            let key = Key::random_with(&mut rng);
            assert_eq!(decrypt(&encrypt(text, &key), &key), text);
        }
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(encrypt("", &reversed()), "");
        assert_eq!(decrypt("", &reversed()), "");
    }

    #[test]
    fn test_decrypt_with_key_text_matches_key_decrypt() {
        let key = reversed();
        let ciphertext = encrypt("Hello, World!", &key);
        assert_eq!(
            decrypt_with_key_text(&ciphertext, "ZYXWVUTSRQPONMLKJIHGFEDCBA").unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_decrypt_with_non_permutation_key_text() {
        let decrypted = decrypt_with_key_text("bcd", "aacdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(decrypted, "bcd");

        // 'z' at positions 0 and 1: first wins; 'y' is missing and passes through
        let decrypted = decrypt_with_key_text("Zyx", "zzxwvutsrqponmlkjihgfedcba").unwrap();
        assert_eq!(decrypted, "Ayc");
    }

    #[test]
    fn test_decrypt_with_key_text_rejects_bad_shape() {
        assert_eq!(
            decrypt_with_key_text("abc", "abc"),
            Err(SubstitutionError::InvalidKeyLength(3))
        );
        assert_eq!(
            decrypt_with_key_text("abc", "abcdefghijklmnopqrstuvwxy-"),
            Err(SubstitutionError::InvalidKeyAlphabet('-'))
        );
    }

    #[test]
    fn test_substitute_with_repeated_source_letter() {
        // First occurrence wins; 'b' and 'z' are absent from the source
        let source: Vec<char> = "aacdefghijklmnopqrstuvwxyy".chars().collect();
        let target: Vec<char> = "zyxwvutsrqponmlkjihgfedcba".chars().collect();
        assert_eq!(substitute("abyz", &source, &target), "zbbz");
    }
}
