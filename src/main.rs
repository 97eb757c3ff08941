mod catalog;
mod commands;
mod config;
mod convert;
mod diagnostics;
mod error;
mod info;
mod source;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "refmd",
    about = "Convert Sphinx cross-references to Markdown links",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report references that would not resolve
    Check {
        /// Files or directories to scan; stdin when omitted
        paths: Vec<PathBuf>,
    },
    /// Rewrite references as Markdown links
    Convert {
        /// Files or directories to rewrite in place; stdin to stdout when omitted
        paths: Vec<PathBuf>,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the reference document for refmd
    Info {
        /// Output machine-readable state instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Inspect and edit the source catalog
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },
}

#[derive(Subcommand)]
enum SourceCommands {
    /// Declare a source's base URL in .refmd.toml
    Add {
        /// Source name as written in reference markup
        name: String,
        /// Root URL for the source's documentation
        base_url: String,
    },
    /// List all catalog sources
    List,
    /// Remove a declared source from .refmd.toml
    Remove {
        /// Source name to remove
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { paths } => commands::check(&paths),
        Commands::Convert { paths, dry_run } => commands::convert(&paths, dry_run),
        Commands::Info { json } => {
            info::run(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Source { command } => match command {
            SourceCommands::Add { name, base_url } => {
                source::cmd_add(&name, &base_url).map(|()| return ExitCode::SUCCESS)
            },
            SourceCommands::List => source::cmd_list().map(|()| return ExitCode::SUCCESS),
            SourceCommands::Remove { name } => {
                source::cmd_remove(&name).map(|()| return ExitCode::SUCCESS)
            },
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    }
}
