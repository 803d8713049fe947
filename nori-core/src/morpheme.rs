//! Morpheme and morpheme-list data structures (§3).

use bincode::{Decode, Encode};

use crate::pos::{POSTag, POSType};

/// The atomic unit in the dictionary.
#[derive(Debug, Clone, Decode, Encode)]
pub struct Morpheme {
    /// Left context id, used to look up the connection cost of the morpheme
    /// that precedes this one.
    pub left_id: u16,
    /// Right context id, used to look up the connection cost of the morpheme
    /// that follows this one.
    pub right_id: u16,
    /// Signed word cost; lower means more likely.
    pub word_cost: i16,
    /// Structural type of this entry.
    pub pos_type: POSType,
    /// Ordered part-of-speech tags.
    pub pos_tags: Vec<POSTag>,
    /// For compound/inflected/pre-analysis forms, the ordered decomposition
    /// into `(surface, tag)` sub-tokens. Empty for a simple morpheme.
    pub expression: Vec<(String, POSTag)>,
}

impl Morpheme {
    /// The reserved BOS/EOS sentinel morpheme: `left_id = right_id = word_cost = 0`.
    pub fn bos_eos() -> Self {
        Self {
            left_id: 0,
            right_id: 0,
            word_cost: 0,
            pos_type: POSType::Morpheme,
            pos_tags: Vec::new(),
            expression: Vec::new(),
        }
    }
}

/// A group of [`Morpheme`]s sharing the same surface form.
///
/// The trie stores one integer per distinct surface; that integer indexes
/// this list within the dictionary's morpheme table.
#[derive(Debug, Clone, Default, Decode, Encode)]
pub struct MorphemeList {
    pub morphemes: Vec<Morpheme>,
}

impl MorphemeList {
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }
}
