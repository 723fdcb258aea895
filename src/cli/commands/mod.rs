//! Command implementations, one module per subcommand.

pub mod completions;
pub mod entries;
pub mod export_key;
pub mod get;
pub mod init;
pub mod remove;
pub mod set;
pub mod verify;
