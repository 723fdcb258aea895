//! `keyloom entries` — list blinded entry ids without decrypting.
//!
//! Blinded names and blob sizes are public by construction (they sit
//! in the envelope in the clear), so this command never prompts for
//! the password.

use crate::cli::output;
use crate::cli::{keychain_paths, read_keychain_file, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::keychain::Envelope;

/// Execute the `entries` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    let (text, _digest) = read_keychain_file(&paths)?;
    let envelope = Envelope::parse(&text, None)?;

    let rows: Vec<(String, usize)> = envelope
        .kvs
        .iter()
        .map(|(blinded, blob)| (blinded.clone(), blob.len()))
        .collect();

    output::print_entries_table(&rows);
    Ok(())
}
