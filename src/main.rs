use clap::Parser;
use keyloom::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => keyloom::cli::commands::init::execute(&cli),
        Commands::Set { ref key, ref value } => {
            keyloom::cli::commands::set::execute(&cli, key, value.as_deref())
        }
        Commands::Get { ref key } => keyloom::cli::commands::get::execute(&cli, key),
        Commands::Remove { ref key, force } => {
            keyloom::cli::commands::remove::execute(&cli, key, force)
        }
        Commands::Entries => keyloom::cli::commands::entries::execute(&cli),
        Commands::Verify => keyloom::cli::commands::verify::execute(&cli),
        Commands::ExportKey { force } => keyloom::cli::commands::export_key::execute(&cli, force),
        Commands::Completions { ref shell } => keyloom::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        keyloom::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
