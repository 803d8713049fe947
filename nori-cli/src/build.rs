use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use nori_core::compiler::SystemDictionaryBuilder;
use nori_core::errors::NoriError;
use nori_core::unicode::NormalizationForm;

#[derive(Parser, Debug)]
#[clap(name = "build", about = "Builds the binary system dictionary from MeCab-ko-dic source files.")]
pub struct Args {
    /// MeCab-ko-dic source directory, containing `*.csv` lexicon files plus
    /// `matrix.def`, `char.def`, `unk.def`, `left-id.def`, `right-id.def`.
    ///
    /// Mutually exclusive with the individual `--lexicon-in`/etc. flags.
    #[clap(long)]
    mecab_dir: Option<PathBuf>,

    /// Lexicon CSV file(s), concatenated if more than one is given.
    #[clap(short = 'l', long, num_args = 1..)]
    lexicon_in: Vec<PathBuf>,

    /// Matrix definition file (matrix.def).
    #[clap(short = 'm', long)]
    matrix_in: Option<PathBuf>,

    /// Character definition file (char.def).
    #[clap(short = 'c', long)]
    char_in: Option<PathBuf>,

    /// Unknown word definition file (unk.def).
    #[clap(short = 'u', long)]
    unk_in: Option<PathBuf>,

    /// Left id legend file (left-id.def).
    #[clap(long)]
    left_id_in: Option<PathBuf>,

    /// Right id legend file (right-id.def).
    #[clap(long)]
    right_id_in: Option<PathBuf>,

    /// File to which the binary dictionary is written.
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,

    /// Compress the output with zstd.
    #[clap(long)]
    compress: bool,

    /// Apply NFKC normalization to dictionary surfaces at build time.
    #[clap(long)]
    nfkc: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(
        "either --mecab-dir or all of --lexicon-in/--matrix-in/--char-in/--unk-in/--left-id-in/--right-id-in must be given"
    )]
    InvalidSourceArguments,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("dictionary build failed: {0}")]
    Nori(#[from] NoriError),
}

pub fn run(args: Args) -> Result<(), BuildError> {
    let normalization = if args.nfkc { NormalizationForm::Nfkc } else { NormalizationForm::None };

    let dict = if let Some(dir) = &args.mecab_dir {
        info!("building from mecab directory {}", dir.display());
        SystemDictionaryBuilder::from_mecab_dir(dir, normalization)?
    } else if !args.lexicon_in.is_empty() {
        let (matrix, char_def, unk, left_id, right_id) = match (
            &args.matrix_in,
            &args.char_in,
            &args.unk_in,
            &args.left_id_in,
            &args.right_id_in,
        ) {
            (Some(m), Some(c), Some(u), Some(l), Some(r)) => (m, c, u, l, r),
            _ => return Err(BuildError::InvalidSourceArguments),
        };

        let mut lexicon = String::new();
        for path in &args.lexicon_in {
            use std::io::Read;
            File::open(path)?.read_to_string(&mut lexicon)?;
            lexicon.push('\n');
        }
        info!("building from {} lexicon file(s)", args.lexicon_in.len());

        SystemDictionaryBuilder::from_readers(
            lexicon.as_bytes(),
            File::open(matrix)?,
            File::open(char_def)?,
            File::open(unk)?,
            File::open(left_id)?,
            File::open(right_id)?,
            normalization,
        )?
    } else {
        return Err(BuildError::InvalidSourceArguments);
    };

    let file = File::create(&args.sysdic_out)?;
    dict.write(file, args.compress)?;
    info!("wrote dictionary to {}", args.sysdic_out.display());
    println!("built dictionary: {}", args.sysdic_out.display());
    Ok(())
}
