//! Crate-wide constants.

/// Connection id reserved for the BOS/EOS sentinel nodes.
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

/// Surface string emitted for the BOS/EOS sentinel tokens.
pub const BOS_EOS_SURFACE: &str = "BOS/EOS";

/// Penalty added to a node's cost when it follows whitespace and its
/// leading morpheme is a clitic/ending tag that should not float after a space.
///
/// Hard-coded in the source this algorithm is derived from; kept as a
/// compile-time tunable rather than a runtime option (see DESIGN.md).
pub const SPACE_PENALTY: i32 = 3000;

/// Word cost assigned to every user-dictionary entry, deliberately low so
/// user entries outrank the generic dictionary's decomposition of the same surface.
pub const USER_DICT_WORD_COST: i16 = -100_000;

/// Fixed parameters of the synthetic `NGRAM` unknown-token entry inserted
/// ahead of every other `unk.def` row.
pub const NGRAM_LEFT_ID: u16 = 1798;
pub const NGRAM_RIGHT_ID: u16 = 3559;
pub const NGRAM_WORD_COST: i16 = 3677;

/// Code point treated as punctuation regardless of its Unicode category:
/// U+318D HANGUL LETTER ARAEA (ㆍ).
pub const ARAEA: char = '\u{318D}';
