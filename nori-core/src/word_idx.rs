//! Identifies which of the three lexicons (pre-built, user, unknown) a
//! lattice node's morpheme came from (§2 item 7, §4.4).

use bincode::{Decode, Encode};

/// Which lexicon a word originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Decode, Encode)]
pub enum LexType {
    #[default]
    System,
    User,
    Unknown,
}

/// Sentinel `word_id` identifying the synthetic NGRAM fallback entry within
/// an [`LexType::Unknown`] node, as opposed to a specific character category.
pub const NGRAM_WORD_ID: u32 = u32::MAX;

/// A reference to a specific word: which lexicon, and its index within it.
///
/// For [`LexType::System`]/[`LexType::User`], `word_id` indexes the
/// lexicon's morpheme-list table. For [`LexType::Unknown`], `word_id` is
/// either a [`crate::character::CharacterClass`] index or [`NGRAM_WORD_ID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordIdx {
    pub lex_type: LexType,
    pub word_id: u32,
}

impl WordIdx {
    pub fn new(lex_type: LexType, word_id: u32) -> Self {
        Self { lex_type, word_id }
    }
}
