//! CLI command definitions and handlers

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use substitution::{decrypt, decrypt_with_key_text, encrypt, suggest_key, Key, PREVIEW_LIMIT};

use crate::report;
use crate::session::Session;

/// Command-line arguments for the substitution workbench.
#[derive(Parser, Debug)]
#[command(name = "substitution_workbench")]
#[command(
    version,
    about = "Encrypt, decrypt and break monoalphabetic substitution ciphers",
    after_help = "\
Examples:
  substitution_workbench                                   Interactive menu
  substitution_workbench encrypt -f plain.txt -o out.txt   Encrypt with a random key
  substitution_workbench decrypt -f out.txt -o plain.txt -k qwertyuiopasdfghjklzxcvbnm
  substitution_workbench analyze -f out.txt                Frequency statistics and key guess"
)]
pub struct Cli {
    /// Seed for random key generation (reproducible keys)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Characters of decrypted text shown while adjusting a key
    #[arg(long, global = true, default_value_t = PREVIEW_LIMIT)]
    pub preview: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive menu (default when no subcommand is given)
    Interactive,

    /// Encrypt a file (random key unless one is supplied)
    Encrypt {
        #[command(flatten)]
        files: FileArgs,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Decrypt a file with a known key
    Decrypt {
        #[command(flatten)]
        files: FileArgs,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Print frequency statistics and a suggested key for a ciphertext file
    Analyze {
        /// Path to the input file containing ciphertext
        #[arg(short, long, help = "Path to the input file containing ciphertext")]
        file: PathBuf,

        /// Where to write the text decrypted with the suggested key
        #[arg(short, long, help = "Path to the output file for the trial decryption")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the input file
    #[arg(short, long, help = "Path to the input file")]
    pub file: PathBuf,

    /// Path to the output file where the result will be saved
    #[arg(short, long, help = "Path to the output file")]
    pub output: PathBuf,
}

/// Where the key comes from: its 26-letter form or a mapping specification.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct KeyArgs {
    /// 26-letter key; position i is the cipher letter for the i-th letter
    #[arg(short, long, help = "26-letter substitution key")]
    pub key: Option<String>,

    /// Mapping specification such as a->q,b->w,...
    #[arg(short, long, help = "Mapping specification (a->q,b->w,...)")]
    pub mapping: Option<String>,
}

impl KeyArgs {
    /// Parses whichever key source was given.
    pub fn resolve(&self) -> substitution::Result<Option<Key>> {
        match (&self.key, &self.mapping) {
            (Some(text), _) => Key::parse(text).map(Some),
            (None, Some(spec)) => Key::from_mapping(spec).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Dispatches the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout(), rng, cli.preview);
            session.run()
        }
        Command::Encrypt { files, key } => {
            let key = encrypt_file(&files.file, &files.output, &key, &mut rng)?;
            println!("Encrypted with key: {key}");
            println!("Output saved to: {}", files.output.display());
            Ok(())
        }
        Command::Decrypt { files, key } => {
            decrypt_file(&files.file, &files.output, &key)?;
            println!("Output saved to: {}", files.output.display());
            Ok(())
        }
        Command::Analyze { file, output } => {
            let content = read_input(&file)?;
            let suggested = suggest_key(&content);
            report::write_attack_report(&mut io::stdout().lock(), &content, &suggested)
                .context("Failed to write the report")?;

            if let Some(output) = output {
                write_output(&output, &decrypt(&content, &suggested))?;
                println!("Trial decryption saved to: {}", output.display());
            }
            Ok(())
        }
    }
}

/// Encrypts `input` into `output` and returns the key used.
fn encrypt_file<R: Rng>(input: &Path, output: &Path, key: &KeyArgs, rng: &mut R) -> Result<Key> {
    let content = read_input(input)?;
    let key = match key.resolve().context("Invalid encryption key")? {
        Some(key) => key,
        None => Key::random_with(rng),
    };

    write_output(output, &encrypt(&content, &key))?;
    tracing::info!(input = %input.display(), output = %output.display(), "encrypted file");
    Ok(key)
}

/// Decrypts `input` into `output`.
///
/// A 26-letter key is only checked for shape, so a key with repeated
/// letters still decrypts. A mapping specification must be complete.
fn decrypt_file(input: &Path, output: &Path, key: &KeyArgs) -> Result<()> {
    let content = match (&key.key, &key.mapping) {
        (Some(text), _) => {
            let content = read_input(input)?;
            decrypt_with_key_text(&content, text).context("Invalid decryption key")?
        }
        (None, Some(spec)) => {
            let key = Key::from_mapping(spec).context("Invalid decryption key")?;
            decrypt(&read_input(input)?, &key)
        }
        (None, None) => bail!("Decryption needs a key: pass --key or --mapping"),
    };

    write_output(output, &content)?;
    tracing::info!(input = %input.display(), output = %output.display(), "decrypted file");
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read the input file {}", path.display()))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write the output file {}", path.display()))
}
