//! Interactive menu, modelled as an explicit state machine.
//!
//! Each call to [`Session::step`] reads the commands for one screen and
//! returns the next screen. The loop ends at [`Screen::Terminated`], either
//! on the Exit command or when the input is exhausted.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use substitution::{
    decrypt, decrypt_with_key_text, encrypt, parse_letter, suggest_key, Key, KeyAdjuster,
};

use crate::report;

/// The screens of the interactive workbench.
#[derive(Debug)]
pub enum Screen {
    Main,
    Encrypt,
    Decrypt,
    Attack,
    Adjust {
        ciphertext: String,
        adjuster: KeyAdjuster,
    },
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    Encrypt,
    Decrypt,
    CiphertextOnlyAttack,
    Exit,
}

impl MainCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Encrypt),
            "2" => Some(Self::Decrypt),
            "3" => Some(Self::CiphertextOnlyAttack),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackCommand {
    DecryptWithSuggested,
    EnterAdjustment,
    ReturnToMain,
}

impl AttackCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::DecryptWithSuggested),
            "2" => Some(Self::EnterAdjustment),
            "3" => Some(Self::ReturnToMain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustCommand {
    SetMapping,
    SwapMapping,
    Save,
    Discard,
}

impl AdjustCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::SetMapping),
            "2" => Some(Self::SwapMapping),
            "3" => Some(Self::Save),
            "4" => Some(Self::Discard),
            _ => None,
        }
    }
}

/// One interactive run over an input and an output stream.
pub struct Session<R, W, G> {
    input: R,
    output: W,
    rng: G,
    preview_limit: usize,
    /// Key committed by the last saved adjustment.
    active_key: Option<Key>,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(input: R, output: W, rng: G, preview_limit: usize) -> Self {
        Self {
            input,
            output,
            rng,
            preview_limit,
            active_key: None,
        }
    }

    pub fn active_key(&self) -> Option<&Key> {
        self.active_key.as_ref()
    }

    /// Runs screens until the session terminates.
    pub fn run(&mut self) -> Result<()> {
        let mut screen = Screen::Main;
        while !matches!(screen, Screen::Terminated) {
            screen = self.step(screen)?;
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    /// Handles one screen and returns the next.
    pub fn step(&mut self, screen: Screen) -> Result<Screen> {
        match screen {
            Screen::Main => self.main_menu(),
            Screen::Encrypt => self.encrypt_screen(),
            Screen::Decrypt => self.decrypt_screen(),
            Screen::Attack => self.attack_screen(),
            Screen::Adjust {
                ciphertext,
                adjuster,
            } => self.adjust_screen(ciphertext, adjuster),
            Screen::Terminated => Ok(Screen::Terminated),
        }
    }

    fn main_menu(&mut self) -> Result<Screen> {
        writeln!(self.output, "\n{}", "=".repeat(40))?;
        writeln!(self.output, "{:^40}", "Substitution Cipher Workbench")?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "1. Encrypt plaintext")?;
        writeln!(self.output, "2. Decrypt ciphertext")?;
        writeln!(self.output, "3. Ciphertext-only attack")?;
        writeln!(self.output, "4. Exit")?;
        writeln!(self.output, "{}", "=".repeat(40))?;

        let Some(choice) = self.prompt("Select an option: ")? else {
            return Ok(Screen::Terminated);
        };

        Ok(match MainCommand::parse(&choice) {
            Some(MainCommand::Encrypt) => Screen::Encrypt,
            Some(MainCommand::Decrypt) => Screen::Decrypt,
            Some(MainCommand::CiphertextOnlyAttack) => Screen::Attack,
            Some(MainCommand::Exit) => Screen::Terminated,
            None => {
                writeln!(self.output, "Invalid option, please try again")?;
                Screen::Main
            }
        })
    }

    fn encrypt_screen(&mut self) -> Result<Screen> {
        let Some(plaintext) = self.prompt("Enter the plaintext to encrypt: ")? else {
            return Ok(Screen::Terminated);
        };
        let Some(use_random) = self.prompt("Use a random key? (y/n): ")? else {
            return Ok(Screen::Terminated);
        };

        let key = if use_random.trim().eq_ignore_ascii_case("n") {
            let Some(key_text) =
                self.prompt("Enter a 26-letter key or a mapping (blank for random): ")?
            else {
                return Ok(Screen::Terminated);
            };

            if key_text.trim().is_empty() {
                Key::random_with(&mut self.rng)
            } else {
                match parse_key_input(&key_text) {
                    Ok(key) => key,
                    Err(err) => {
                        tracing::warn!(%err, "invalid encryption key, using a random key");
                        writeln!(self.output, "Invalid key ({err}), using a random key")?;
                        Key::random_with(&mut self.rng)
                    }
                }
            }
        } else {
            Key::random_with(&mut self.rng)
        };

        writeln!(self.output, "\nEncrypted text:")?;
        writeln!(self.output, "{}", encrypt(&plaintext, &key))?;
        writeln!(self.output, "Key used: {key}")?;
        Ok(Screen::Main)
    }

    fn decrypt_screen(&mut self) -> Result<Screen> {
        let Some(ciphertext) = self.prompt("Enter the ciphertext to decrypt: ")? else {
            return Ok(Screen::Terminated);
        };
        let Some(key_text) =
            self.prompt("Enter the 26-letter key or a mapping (blank uses the saved key): ")?
        else {
            return Ok(Screen::Terminated);
        };

        let decrypted = if key_text.trim().is_empty() {
            match &self.active_key {
                Some(key) => Ok(decrypt(&ciphertext, key)),
                None => {
                    writeln!(self.output, "No saved key available")?;
                    return Ok(Screen::Main);
                }
            }
        } else if key_text.contains("->") {
            Key::from_mapping(key_text.trim()).map(|key| decrypt(&ciphertext, &key))
        } else {
            decrypt_with_key_text(&ciphertext, key_text.trim())
        };

        match decrypted {
            Ok(plaintext) => {
                writeln!(self.output, "\nDecrypted text:")?;
                writeln!(self.output, "{plaintext}")?;
            }
            Err(err) => writeln!(self.output, "Invalid key: {err}")?,
        }
        Ok(Screen::Main)
    }

    fn attack_screen(&mut self) -> Result<Screen> {
        let Some(ciphertext) = self.prompt("Enter the ciphertext to analyze: ")? else {
            return Ok(Screen::Terminated);
        };

        let suggested = suggest_key(&ciphertext);
        report::write_attack_report(&mut self.output, &ciphertext, &suggested)?;

        writeln!(self.output, "\nNext step:")?;
        writeln!(self.output, "1. Decrypt with the suggested key")?;
        writeln!(self.output, "2. Adjust the key interactively")?;
        writeln!(self.output, "3. Return to the main menu")?;
        let Some(choice) = self.prompt("Select an option: ")? else {
            return Ok(Screen::Terminated);
        };

        Ok(match AttackCommand::parse(&choice) {
            Some(AttackCommand::DecryptWithSuggested) => {
                writeln!(self.output, "\nDecrypted text:")?;
                writeln!(self.output, "{}", decrypt(&ciphertext, &suggested))?;
                Screen::Main
            }
            Some(AttackCommand::EnterAdjustment) => Screen::Adjust {
                ciphertext,
                adjuster: KeyAdjuster::new(suggested),
            },
            Some(AttackCommand::ReturnToMain) | None => Screen::Main,
        })
    }

    fn adjust_screen(&mut self, ciphertext: String, mut adjuster: KeyAdjuster) -> Result<Screen> {
        let view = adjuster.view_with_limit(&ciphertext, self.preview_limit);
        writeln!(
            self.output,
            "\nCurrent decryption (first {} characters):",
            self.preview_limit
        )?;
        writeln!(self.output, "{}", view.preview)?;
        writeln!(self.output, "\nCurrent key mapping (plain->cipher):")?;
        report::write_mapping_table(&mut self.output, &view.mapping)?;

        writeln!(self.output, "\nOptions:")?;
        writeln!(self.output, "1. Change one mapping")?;
        writeln!(self.output, "2. Swap two mappings")?;
        writeln!(self.output, "3. Save and exit")?;
        writeln!(self.output, "4. Discard changes")?;
        let Some(choice) = self.prompt("Select an option: ")? else {
            return Ok(Screen::Terminated);
        };

        match AdjustCommand::parse(&choice) {
            Some(AdjustCommand::SetMapping) => {
                let Some(plain) = self.read_letter("Plaintext letter to change: ")? else {
                    return Ok(Screen::Adjust { ciphertext, adjuster });
                };
                let Some(cipher) = self.read_letter("Ciphertext letter to assign: ")? else {
                    return Ok(Screen::Adjust { ciphertext, adjuster });
                };
                adjuster.set_mapping(plain, cipher)?;
            }
            Some(AdjustCommand::SwapMapping) => {
                let Some(first) = self.read_letter("First plaintext letter: ")? else {
                    return Ok(Screen::Adjust { ciphertext, adjuster });
                };
                let Some(second) = self.read_letter("Second plaintext letter: ")? else {
                    return Ok(Screen::Adjust { ciphertext, adjuster });
                };
                adjuster.swap_mapping(first, second)?;
            }
            Some(AdjustCommand::Save) => {
                let key = adjuster.save()?;
                writeln!(self.output, "Key saved: {key}")?;
                tracing::info!(%key, "saved adjusted key");
                self.active_key = Some(key);
                return Ok(Screen::Main);
            }
            Some(AdjustCommand::Discard) => {
                adjuster.discard()?;
                writeln!(self.output, "Changes discarded")?;
                return Ok(Screen::Main);
            }
            None => writeln!(self.output, "Invalid choice")?,
        }

        Ok(Screen::Adjust {
            ciphertext,
            adjuster,
        })
    }

    /// Prompts for a single letter. `None` when the input is invalid or
    /// exhausted; the invalid case is reported to the user.
    fn read_letter(&mut self, message: &str) -> Result<Option<char>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };
        match parse_letter(&line) {
            Ok(letter) => Ok(Some(letter)),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(None)
            }
        }
    }

    /// Writes `message` and reads one line without its line terminator.
    /// Returns `None` at end of input. Bytes that are not valid UTF-8 are
    /// replaced rather than treated as an error.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }
}

/// Accepts either the 26-letter form of a key or a mapping specification.
fn parse_key_input(text: &str) -> substitution::Result<Key> {
    let text = text.trim();
    if text.contains("->") {
        Key::from_mapping(text)
    } else {
        Key::parse(text)
    }
}
