//! Definition of errors.

use std::fmt;
use std::path::PathBuf;

/// A specialized Result type for this crate.
pub type Result<T, E = NoriError> = std::result::Result<T, E>;

/// The error type returned by dictionary compilation, loading, and tokenization.
#[derive(Debug, thiserror::Error)]
pub enum NoriError {
    /// A source file or directory was missing, or the compiled artifact
    /// could not be read from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A source file (CSV, `char.def`, `matrix.def`, `unk.def`, an id legend,
    /// or a user-dictionary entry) failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The compiled binary artifact is not in the expected shape.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// NFKC normalization reported a failure.
    #[error("normalization failed: {0}")]
    Normalization(String),

    /// An internal invariant was violated; indicates corrupted or
    /// inconsistent dictionary data.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl NoriError {
    pub(crate) fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::Invariant(msg.into())
    }
}

/// Error raised while parsing a MeCab-ko-dic source file or a user-dictionary file.
#[derive(Debug)]
pub struct ParseError {
    /// Path of the file being parsed, if known.
    pub file: Option<PathBuf>,
    /// 1-based line number of the offending line, if known.
    pub line: Option<usize>,
    /// Description of what went wrong.
    pub message: String,
}

impl ParseError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            file: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn at<S: Into<String>>(file: impl Into<PathBuf>, line: usize, message: S) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                write!(f, "parse error in {}:{}: {}", file.display(), line, self.message)
            }
            (Some(file), None) => write!(f, "parse error in {}: {}", file.display(), self.message),
            _ => write!(f, "parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error raised when the binary artifact does not have the expected layout.
#[derive(Debug)]
pub enum FormatError {
    /// The artifact's version byte does not match this build.
    VersionMismatch { expected: u8, found: u8 },
    /// The artifact's recorded normalization policy does not match the
    /// policy requested by the caller.
    NormalizationMismatch,
    /// The trie section ended before the declared length was consumed.
    TruncatedTrie,
    /// Exact-match verification of a sample key failed after building the trie.
    TrieIntegrity,
    /// A decode error from the underlying bincode codec.
    Decode(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionMismatch { expected, found } => write!(
                f,
                "dictionary artifact version mismatch: expected {expected}, found {found}"
            ),
            Self::NormalizationMismatch => {
                write!(f, "dictionary's normalization policy does not match the requested policy")
            }
            Self::TruncatedTrie => write!(f, "trie section is shorter than its declared length"),
            Self::TrieIntegrity => write!(f, "trie failed exact-match verification after build"),
            Self::Decode(msg) => write!(f, "failed to decode dictionary artifact: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
