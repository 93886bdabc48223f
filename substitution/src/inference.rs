//! Initial key guess from letter frequencies.
//!
//! The most frequent ciphertext letters are aligned with the most frequent
//! English letters. The result is a starting point for manual refinement,
//! not a solver.

use crate::alphabet::{self, ALPHABET, ALPHABET_LEN, STANDARD_FREQUENCY_ORDER};
use crate::analysis;
use crate::key::{Key, Slots};

/// Ranks the ciphertext letters: observed letters by descending count
/// (ties alphabetical), then the unobserved letters alphabetically.
/// Always holds every alphabet letter exactly once.
pub fn cipher_rank_order(ciphertext: &str) -> Vec<char> {
    let counts = analysis::letter_counts(ciphertext);
    let mut ranked: Vec<char> = analysis::ranked(&counts)
        .into_iter()
        .map(|(letter, _)| letter)
        .collect();

    for letter in ALPHABET {
        if !ranked.contains(&letter) {
            ranked.push(letter);
        }
    }

    ranked
}

/// Suggests a key for `ciphertext` by frequency rank alignment.
///
/// Deterministic: the same ciphertext always yields the same key.
///
/// # Example
///
/// ```rust
/// use substitution::{suggest_key, Key};
///
/// // 'x' is the most frequent ciphertext letter, so it is guessed to be 'e'
/// let key = suggest_key("xxxx yyy z");
/// assert_eq!(key.cipher_for('e'), Some('x'));
/// assert_eq!(key.cipher_for('t'), Some('y'));
/// assert_eq!(key.cipher_for('a'), Some('z'));
/// ```
pub fn suggest_key(ciphertext: &str) -> Key {
    let cipher_ranked = cipher_rank_order(ciphertext);

    let mut slots: Slots = [None; ALPHABET_LEN];
    for (rank, &plain) in STANDARD_FREQUENCY_ORDER.iter().enumerate() {
        let Some(index) = alphabet::index_of(plain) else {
            continue;
        };
        if let Some(&cipher) = cipher_ranked.get(rank) {
            slots[index] = Some(cipher);
        }
    }

    reconcile(&mut slots, &cipher_ranked);

    let key = Key::from_slots(slots);
    tracing::debug!(%key, "suggested key from letter frequencies");
    key
}

/// Pairs cipher letters left over by the primary pass with the letters not
/// yet used as a value, and places them in the still-empty slots.
///
/// The primary pass consumes all 26 ranks, so this currently changes
/// nothing. It keeps the key complete should the standard order ever be
/// shorter than the alphabet.
fn reconcile(slots: &mut Slots, cipher_ranked: &[char]) {
    let remaining_plain: Vec<char> = ALPHABET
        .iter()
        .copied()
        .filter(|letter| !slots.contains(&Some(*letter)))
        .collect();
    let remaining_cipher = cipher_ranked.iter().skip(STANDARD_FREQUENCY_ORDER.len());

    let empty: Vec<usize> = (0..ALPHABET_LEN).filter(|&i| slots[i].is_none()).collect();
    for ((index, _), value) in empty.into_iter().zip(remaining_cipher).zip(remaining_plain) {
        slots[index] = Some(value);
    }
}
