//! Interactive key refinement.
//!
//! A [`KeyAdjuster`] holds a candidate key while an analyst edits it. Every
//! edit leaves the key a full permutation of the alphabet. The session ends
//! with [`KeyAdjuster::save`] or [`KeyAdjuster::discard`].

use crate::alphabet;
use crate::engine;
use crate::error::{Result, SubstitutionError};
use crate::key::Key;

/// Default number of characters shown in the decryption preview.
pub const PREVIEW_LIMIT: usize = 500;

/// Lifecycle of an adjustment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjusterState {
    /// Accepting edits.
    Viewing,
    /// The key was committed. Terminal.
    Saved,
    /// The edits were abandoned. Terminal.
    Discarded,
}

/// What the display layer shows on each iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentView {
    /// Start of the ciphertext decrypted with the current key.
    pub preview: String,
    /// Plaintext -> ciphertext letter pairs in alphabet order.
    pub mapping: Vec<(char, char)>,
}

#[derive(Debug, Clone)]
pub struct KeyAdjuster {
    key: Key,
    state: AdjusterState,
}

impl KeyAdjuster {
    pub fn new(initial: Key) -> Self {
        Self {
            key: initial,
            state: AdjusterState::Viewing,
        }
    }

    pub fn state(&self) -> AdjusterState {
        self.state
    }

    /// The candidate key as currently edited.
    pub fn current_key(&self) -> &Key {
        &self.key
    }

    /// Maps `plain` to `cipher`.
    ///
    /// If `cipher` is already assigned to another letter, that slot is
    /// cleared first. Empty slots are then refilled, in alphabet order, with
    /// the unused letters in alphabetical order.
    pub fn set_mapping(&mut self, plain: char, cipher: char) -> Result<()> {
        self.ensure_open()?;
        let plain_index = letter_index(plain)?;
        let cipher_index = letter_index(cipher)?;
        let cipher = alphabet::ALPHABET[cipher_index];

        let mut slots = self.key.slots();
        if let Some(evicted) = slots.iter().position(|slot| *slot == Some(cipher)) {
            slots[evicted] = None;
        }
        slots[plain_index] = Some(cipher);
        self.key = Key::from_slots(slots);

        tracing::debug!(%plain, %cipher, key = %self.key, "set mapping");
        Ok(())
    }

    /// Exchanges the cipher letters assigned to `first` and `second`.
    pub fn swap_mapping(&mut self, first: char, second: char) -> Result<()> {
        self.ensure_open()?;
        let first_index = letter_index(first)?;
        let second_index = letter_index(second)?;

        self.key.swap(first_index, second_index);

        tracing::debug!(%first, %second, key = %self.key, "swapped mappings");
        Ok(())
    }

    /// Commits the current key and closes the session.
    pub fn save(&mut self) -> Result<Key> {
        self.ensure_open()?;
        self.state = AdjusterState::Saved;
        Ok(self.key.clone())
    }

    /// Abandons the edits and closes the session.
    pub fn discard(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.state = AdjusterState::Discarded;
        Ok(())
    }

    /// Decrypts `ciphertext` with the current key for display.
    pub fn view(&self, ciphertext: &str) -> AdjustmentView {
        self.view_with_limit(ciphertext, PREVIEW_LIMIT)
    }

    /// Like [`KeyAdjuster::view`] with a custom preview length in characters.
    pub fn view_with_limit(&self, ciphertext: &str, limit: usize) -> AdjustmentView {
        AdjustmentView {
            preview: engine::decrypt(ciphertext, &self.key)
                .chars()
                .take(limit)
                .collect(),
            mapping: self.key.mapping_table(),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            AdjusterState::Viewing => Ok(()),
            AdjusterState::Saved | AdjusterState::Discarded => {
                Err(SubstitutionError::SessionClosed)
            }
        }
    }
}

/// Parses one letter typed by the analyst (surrounding whitespace ignored,
/// case-insensitive).
pub fn parse_letter(input: &str) -> Result<char> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match (chars.next().and_then(alphabet::normalize), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(SubstitutionError::InvalidLetterInput(trimmed.to_string())),
    }
}

fn letter_index(letter: char) -> Result<usize> {
    alphabet::normalize(letter)
        .and_then(alphabet::index_of)
        .ok_or_else(|| SubstitutionError::InvalidLetterInput(letter.to_string()))
}
