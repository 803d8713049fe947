//! Tokenizer: builds a Viterbi lattice over an input sentence and extracts
//! its minimum-cost path (§4.4).

pub mod lattice;

use crate::character::InvokeRule;
use crate::common::SPACE_PENALTY;
use crate::dictionary::Dictionary;
use crate::morpheme::Morpheme;
use crate::token::{Token, TokenIter};
use crate::unicode;
use crate::word_idx::{LexType, WordIdx, NGRAM_WORD_ID};

use lattice::Lattice;

/// Holds a loaded dictionary and produces [`Worker`]s. Cheap to clone: the
/// dictionary itself is reference-counted (§5).
#[derive(Clone)]
pub struct Tokenizer {
    dictionary: Dictionary,
}

impl Tokenizer {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// Creates a worker with its own scratch lattice state. Workers do not
    /// share mutable state and are meant one-per-thread (§5).
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.dictionary.clone())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

struct TokenRecord {
    start_char: usize,
    end_char: usize,
    word_idx: WordIdx,
    morpheme_index: u16,
}

/// Per-thread tokenization state: the current sentence and its lattice
/// result. Not `Sync`; create one [`Worker`] per thread via [`Tokenizer::new_worker`].
pub struct Worker {
    dictionary: Dictionary,
    sentence: String,
    chars: Vec<char>,
    char_offsets: Vec<usize>,
    tokens: Vec<TokenRecord>,
}

impl Worker {
    fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            sentence: String::new(),
            chars: Vec::new(),
            char_offsets: vec![0],
            tokens: Vec::new(),
        }
    }

    /// Loads a new sentence to tokenize, discarding any previous result.
    pub fn reset_sentence(&mut self, text: &str) {
        self.sentence = text.to_string();
        self.chars = text.chars().collect();
        self.char_offsets = Vec::with_capacity(self.chars.len() + 1);
        self.char_offsets.push(0);
        let mut offset = 0;
        for c in &self.chars {
            offset += c.len_utf8();
            self.char_offsets.push(offset);
        }
        self.tokens.clear();
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn token(&self, i: usize) -> Token<'_> {
        let rec = &self.tokens[i];
        let start_byte = self.char_offsets[rec.start_char];
        let end_byte = self.char_offsets[rec.end_char];
        let surface = &self.sentence[start_byte..end_byte];
        let morpheme = self
            .dictionary
            .resolve_morpheme(rec.word_idx, rec.morpheme_index)
            .expect("lattice node referenced a non-existent morpheme");
        Token {
            surface,
            range_char: rec.start_char..rec.end_char,
            range_byte: start_byte..end_byte,
            morpheme,
        }
    }

    pub fn tokens(&self) -> TokenIter<'_> {
        TokenIter { worker: self, pos: 0 }
    }

    /// Runs the Viterbi search over the current sentence (§4.4).
    pub fn tokenize(&mut self) {
        let n = self.chars.len();
        let mut lattice = Lattice::new(n);
        let inner = self.dictionary.inner();
        let connector = inner.connector();
        let char_prop = inner.char_prop();
        let unknown = inner.unknown();

        let mut p = 0usize;
        while p < n {
            if unicode::is_space(self.chars[p]) {
                let start = p;
                while p < n && unicode::is_space(self.chars[p]) {
                    p += 1;
                }
                lattice.bridge(start, p);
                continue;
            }

            let preceded_by_space = p > 0 && unicode::is_space(self.chars[p - 1]);
            let remaining: String = self.chars[p..].iter().collect();
            let remaining_bytes = remaining.as_bytes();
            let mut matched = false;

            // Pre-built dictionary, then user dictionary, then unknown-word
            // fallback — in that order (§4.4 ordering).
            for m in inner.trie().common_prefix_search(remaining_bytes) {
                let end_char = p + char_count(&remaining, m.length);
                if let Some(list) = inner.morpheme_list(m.value) {
                    for (idx, morph) in list.morphemes.iter().enumerate() {
                        matched = true;
                        add_word_node(
                            &mut lattice,
                            p,
                            end_char,
                            WordIdx::new(LexType::System, m.value),
                            idx as u16,
                            morph,
                            preceded_by_space,
                            connector,
                        );
                    }
                }
            }

            if let Some(user) = self.dictionary.user() {
                for m in user.trie().common_prefix_search(remaining_bytes) {
                    let end_char = p + char_count(&remaining, m.length);
                    if let Some(list) = user.morpheme_list(m.value) {
                        for (idx, morph) in list.morphemes.iter().enumerate() {
                            matched = true;
                            add_word_node(
                                &mut lattice,
                                p,
                                end_char,
                                WordIdx::new(LexType::User, m.value),
                                idx as u16,
                                morph,
                                preceded_by_space,
                                connector,
                            );
                        }
                    }
                }
            }

            let category = char_prop.category_of(self.chars[p]);
            let invoke_rule = char_prop.invoke_rule(category);

            if invoke_rule.invoke || !matched {
                if let Some(template) = unknown.template_for(category) {
                    let run_len = self.group_run_length(p, &invoke_rule);
                    for len in 1..=run_len {
                        add_word_node(
                            &mut lattice,
                            p,
                            p + len,
                            WordIdx::new(LexType::Unknown, category.index() as u32),
                            0,
                            template,
                            preceded_by_space,
                            connector,
                        );
                    }
                } else if !matched {
                    // No dictionary match and no unknown-word template for
                    // this category: fall back to the synthetic NGRAM entry
                    // so the lattice stays connected at this position.
                    add_word_node(
                        &mut lattice,
                        p,
                        p + 1,
                        WordIdx::new(LexType::Unknown, NGRAM_WORD_ID),
                        0,
                        &unknown.ngram,
                        preceded_by_space,
                        connector,
                    );
                }
            }

            p += 1;
        }

        lattice.insert_eos(n, connector);

        self.tokens = lattice
            .best_path()
            .into_iter()
            .map(|node| TokenRecord {
                start_char: node.start_char,
                end_char: node.end_char,
                word_idx: node.word_idx,
                morpheme_index: node.morpheme_index,
            })
            .collect();
    }

    /// Extends a run starting at `start` while each next character shares
    /// its script, punctuation-ness and digit-ness with the first one and
    /// is not whitespace, bounded by `rule.length` when set (§4.4 step 5).
    fn group_run_length(&self, start: usize, rule: &InvokeRule) -> usize {
        if !rule.group {
            return 1;
        }
        let remaining = self.chars.len() - start;
        let max = if rule.length == 0 {
            remaining
        } else {
            (rule.length as usize).min(remaining)
        };
        let script = unicode::script_of(self.chars[start]);
        let first_is_punct = unicode::is_punctuation(self.chars[start]);
        let first_is_digit = unicode::is_digit(self.chars[start]);
        let mut len = 1;
        while len < max {
            let next = self.chars[start + len];
            if unicode::is_space(next) {
                break;
            }
            if unicode::is_punctuation(next) != first_is_punct {
                break;
            }
            if unicode::is_digit(next) != first_is_digit {
                break;
            }
            if !unicode::scripts_compatible(script, unicode::script_of(next)) {
                break;
            }
            len += 1;
        }
        len
    }
}

#[allow(clippy::too_many_arguments)]
fn add_word_node(
    lattice: &mut Lattice,
    start_char: usize,
    end_char: usize,
    word_idx: WordIdx,
    morpheme_index: u16,
    morph: &Morpheme,
    preceded_by_space: bool,
    connector: &crate::connector::ConnectionCost,
) {
    let mut cost = morph.word_cost as i32;
    if preceded_by_space {
        if let Some(first_tag) = morph.pos_tags.first() {
            if first_tag.is_space_sensitive() {
                cost += SPACE_PENALTY;
            }
        }
    }
    lattice.add_node(
        start_char,
        end_char,
        word_idx,
        morpheme_index,
        morph.left_id,
        morph.right_id,
        cost,
        connector,
    );
}

fn char_count(s: &str, byte_len: usize) -> usize {
    s[..byte_len].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SystemDictionaryBuilder;
    use crate::unicode::NormalizationForm;

    fn tokenizer() -> Tokenizer {
        let lexicon = "화학,0,0,100,NNG,*,F,*,*,*,*,*\n이외,0,0,100,NNG,*,F,*,*,*,*,*";
        // Sized past the fixed NGRAM left/right ids so a synthetic unknown
        // node's connection cost lookup stays in bounds; unlisted cells
        // default to 0.
        let matrix = "3560 1799\n0 0 0";
        let chardef = "DEFAULT 0 1 0\nHANGUL 1 1 0";
        let unkdef = "HANGUL,0,0,500,SY,*,*,*,*,*,*,*";
        let left = "0 NNG,*,*,*,*,*,*,*";
        let right = "0 NNG,*,*,*,*,*,*,*\n1 NNG,*,T,*,*,*,*,*\n2 NNG,*,F,*,*,*,*,*";
        let inner = SystemDictionaryBuilder::from_readers(
            lexicon.as_bytes(),
            matrix.as_bytes(),
            chardef.as_bytes(),
            unkdef.as_bytes(),
            left.as_bytes(),
            right.as_bytes(),
            NormalizationForm::None,
        )
        .unwrap();
        Tokenizer::new(Dictionary::new(inner))
    }

    #[test]
    fn tokenizes_known_words() {
        let tokenizer = tokenizer();
        let mut worker = tokenizer.new_worker();
        worker.reset_sentence("화학이외");
        worker.tokenize();
        assert_eq!(worker.num_tokens(), 2);
        assert_eq!(worker.token(0).surface(), "화학");
        assert_eq!(worker.token(1).surface(), "이외");
    }

    #[test]
    fn falls_back_to_unknown_for_unmapped_text() {
        let tokenizer = tokenizer();
        let mut worker = tokenizer.new_worker();
        worker.reset_sentence("모름");
        worker.tokenize();
        assert!(worker.num_tokens() >= 1);
        let surfaces: String = worker.tokens().map(|t| t.surface()).collect();
        assert_eq!(surfaces, "모름");
    }

    #[test]
    fn skips_whitespace_without_emitting_a_token() {
        let tokenizer = tokenizer();
        let mut worker = tokenizer.new_worker();
        worker.reset_sentence("화학 이외");
        worker.tokenize();
        let surfaces: Vec<&str> = worker.tokens().map(|t| t.surface()).collect();
        assert_eq!(surfaces, vec!["화학", "이외"]);
    }

    #[test]
    fn empty_sentence_yields_no_tokens() {
        let tokenizer = tokenizer();
        let mut worker = tokenizer.new_worker();
        worker.reset_sentence("");
        worker.tokenize();
        assert_eq!(worker.num_tokens(), 0);
    }
}
