//! A single analyzed token, and the iterator over a worker's result (§3, §6).

use std::ops::Range;

use crate::morpheme::Morpheme;
use crate::pos::{POSTag, POSType};

/// One morpheme in a tokenized sentence, borrowing both its surface text and
/// its dictionary entry from the [`crate::tokenizer::Worker`] that produced it.
pub struct Token<'a> {
    pub(crate) surface: &'a str,
    pub(crate) range_char: Range<usize>,
    pub(crate) range_byte: Range<usize>,
    pub(crate) morpheme: &'a Morpheme,
}

impl<'a> Token<'a> {
    /// The token's surface text, as a slice of the original input.
    pub fn surface(&self) -> &'a str {
        self.surface
    }

    /// The token's span, in characters, within the original input.
    pub fn range_char(&self) -> Range<usize> {
        self.range_char.clone()
    }

    /// The token's span, in bytes, within the original input.
    pub fn range_byte(&self) -> Range<usize> {
        self.range_byte.clone()
    }

    /// The token's ordered part-of-speech tags.
    pub fn pos_tags(&self) -> &'a [POSTag] {
        &self.morpheme.pos_tags
    }

    /// The token's structural type.
    pub fn pos_type(&self) -> POSType {
        self.morpheme.pos_type
    }

    /// For compound/inflected/pre-analysis tokens, the decomposition into
    /// `(surface, tag)` sub-tokens; empty for a simple morpheme.
    pub fn expression(&self) -> &'a [(String, POSTag)] {
        &self.morpheme.expression
    }

    /// The dictionary entry backing this token.
    pub fn morpheme(&self) -> &'a Morpheme {
        self.morpheme
    }
}

/// Iterator over a worker's tokens, in left-to-right order.
pub struct TokenIter<'a> {
    pub(crate) worker: &'a crate::tokenizer::Worker,
    pub(crate) pos: usize,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.worker.num_tokens() {
            return None;
        }
        let token = self.worker.token(self.pos);
        self.pos += 1;
        Some(token)
    }
}
