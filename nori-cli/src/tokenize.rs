use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use nori_core::dictionary::Dictionary;
use nori_core::errors::NoriError;
use nori_core::tokenizer::Tokenizer;

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Tokenizes text read from stdin, one sentence per line.")]
pub struct Args {
    /// Path to a binary dictionary built by `nori build`.
    #[clap(short = 'd', long)]
    dict: PathBuf,

    /// Optional user dictionary (plain text, one entry per line).
    #[clap(long)]
    user_dict: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("dictionary error: {0}")]
    Nori(#[from] NoriError),
}

pub fn run(args: Args) -> Result<(), TokenizeError> {
    let mut dictionary = Dictionary::from_path(&args.dict)?;
    if let Some(user_dict) = &args.user_dict {
        let file = std::fs::File::open(user_dict)?;
        dictionary.load_user_dictionary(file)?;
    }
    info!("loaded dictionary from {}", args.dict.display());

    let tokenizer = Tokenizer::new(dictionary);
    let mut worker = tokenizer.new_worker();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        worker.reset_sentence(&line);
        worker.tokenize();
        for token in worker.tokens() {
            writeln!(
                out,
                "{}\t{:?}\t{:?}",
                token.surface(),
                token.pos_type(),
                token.pos_tags()
            )?;
        }
        writeln!(out, "EOS")?;
    }
    Ok(())
}
