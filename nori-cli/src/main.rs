mod build;
mod tokenize;

use clap::Parser;
use thiserror::Error;

use crate::{build::BuildError, tokenize::TokenizeError};

#[derive(Parser, Debug)]
#[clap(name = "nori", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Build the binary dictionary from MeCab-ko-dic source files.
    Build(build::Args),

    /// Tokenize text read from stdin using a built dictionary.
    Tokenize(tokenize::Args),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

fn main() -> Result<(), CliError> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Tokenize(args) => Ok(tokenize::run(args)?),
    }
}
