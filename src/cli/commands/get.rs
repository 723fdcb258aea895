//! `keyloom get` — retrieve and print a single entry's value.

use crate::cli::{keychain_paths, open_keychain, Cli};
use crate::config::Settings;
use crate::errors::{KeyloomError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let paths = keychain_paths(cli, &settings)?;

    // Open the keychain (requires password) and look the entry up.
    let keychain = open_keychain(&paths, &settings)?;

    match keychain.get(key)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        // Absence is not an error at the library level, but the CLI
        // should still exit non-zero so scripts can tell.
        None => Err(KeyloomError::CommandFailed(format!(
            "no entry found for '{key}'"
        ))),
    }
}
