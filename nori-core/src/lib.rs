//! # Nori
//!
//! Nori is a Korean morphological analyzer in the MeCab/Nori tradition: a
//! dictionary compiler plus a Viterbi lattice tokenizer.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nori_core::{Dictionary, SystemDictionaryBuilder, Tokenizer};
//! use nori_core::unicode::NormalizationForm;
//!
//! let lexicon_csv = "화학,0,0,100,NNG,*,F,*,*,*,*,*\n이외,0,0,100,NNG,*,F,*,*,*,*,*";
//! let matrix_def = "1 1\n0 0 0";
//! let char_def = "DEFAULT 0 1 0\nHANGUL 1 1 0";
//! let unk_def = "HANGUL,0,0,500,SY,*,*,*,*,*,*,*";
//! let left_id_def = "0 NNG,*,*,*,*,*,*,*";
//! let right_id_def = "0 NNG,*,*,*,*,*,*,*\n1 NNG,*,T,*,*,*,*,*\n2 NNG,*,F,*,*,*,*,*";
//!
//! let dict_inner = SystemDictionaryBuilder::from_readers(
//!     lexicon_csv.as_bytes(),
//!     matrix_def.as_bytes(),
//!     char_def.as_bytes(),
//!     unk_def.as_bytes(),
//!     left_id_def.as_bytes(),
//!     right_id_def.as_bytes(),
//!     NormalizationForm::None,
//! )?;
//!
//! let mut buffer = Vec::new();
//! dict_inner.write(&mut buffer, false)?;
//!
//! let dict = Dictionary::read(buffer.as_slice())?;
//! let tokenizer = Tokenizer::new(dict);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_sentence("화학이외");
//! worker.tokenize();
//! assert_eq!(worker.num_tokens(), 2);
//! assert_eq!(worker.token(0).surface(), "화학");
//! assert_eq!(worker.token(1).surface(), "이외");
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub mod calibration;
pub mod character;
pub mod common;
pub mod compiler;
pub mod connector;
mod csv;
pub mod dictionary;
pub mod errors;
pub mod morpheme;
pub mod pos;
pub mod token;
pub mod tokenizer;
pub mod trie;
pub mod unicode;
mod unknown;
pub mod user_dictionary;
pub mod word_idx;

pub use compiler::SystemDictionaryBuilder;
pub use dictionary::Dictionary;
pub use token::{Token, TokenIter};
pub use tokenizer::{Tokenizer, Worker};

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
