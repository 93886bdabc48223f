//! # Substitution Library
//!
//! Monoalphabetic substitution over the 26-letter Latin alphabet, together
//! with the tools for a ciphertext-only attack on it.
//!
//! ## Components
//!
//! - **Engine** - case-preserving encryption and decryption under a [`Key`]
//! - **Analysis** - letter, word-initial, short-word and digraph frequencies
//! - **Inference** - an initial key guess by frequency rank alignment
//! - **Adjustment** - interactive key refinement that keeps the key a permutation
//!
//! ## Usage
//!
//! ```rust
//! use substitution::{decrypt, encrypt, suggest_key, Key, KeyAdjuster};
//!
//! let key = Key::parse("qwertyuiopasdfghjklzxcvbnm")?;
//! let ciphertext = encrypt("Meet me at the usual place.", &key);
//! assert_eq!(decrypt(&ciphertext, &key), "Meet me at the usual place.");
//!
//! // Attack: guess a key, then refine it by hand
//! let mut adjuster = KeyAdjuster::new(suggest_key(&ciphertext));
//! adjuster.set_mapping('m', 'd')?;
//! adjuster.swap_mapping('a', 'o')?;
//! let refined = adjuster.save()?;
//! println!("{}", decrypt(&ciphertext, &refined));
//! # Ok::<(), substitution::SubstitutionError>(())
//! ```

// Public modules
pub mod adjust;
pub mod alphabet;
pub mod analysis;
pub mod engine;
pub mod error;
pub mod inference;
pub mod key;

// Re-exports for easy access
pub use adjust::{parse_letter, AdjusterState, AdjustmentView, KeyAdjuster, PREVIEW_LIMIT};
pub use alphabet::ALPHABET;
pub use analysis::{analyze, digraphs, ranked, DigraphCounts, FrequencyReport};
pub use engine::{decrypt, decrypt_with_key_text, encrypt, substitute};
pub use error::{Result, SubstitutionError};
pub use inference::suggest_key;
pub use key::{is_valid_key, validate_key_text, Key};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
