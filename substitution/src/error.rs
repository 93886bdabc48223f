//! Error types for substitution cipher operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("Invalid key length {0} (must be exactly 26 letters)")]
    InvalidKeyLength(usize),

    #[error("Invalid key character '{0}' (only letters a-z are allowed)")]
    InvalidKeyAlphabet(char),

    #[error("Key is not a permutation: letter '{0}' appears more than once")]
    NotAPermutation(char),

    #[error("Incomplete mapping: plaintext letter '{0}' has no cipher letter")]
    IncompleteMapping(char),

    #[error("Duplicate mapping involving letter '{0}'")]
    DuplicateMapping(char),

    #[error("Malformed mapping entry '{0}' (expected plain->cipher)")]
    MalformedMappingEntry(String),

    #[error("Invalid letter input '{0}' (expected a single letter a-z)")]
    InvalidLetterInput(String),

    #[error("Adjustment session is already closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, SubstitutionError>;
