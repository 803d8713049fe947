//! Per-process user dictionary: a small, user-supplied lexicon consulted
//! after the pre-built dictionary and before the unknown-word fallback (§4.5).

use std::io::{BufRead, BufReader, Read};

use crate::calibration::CalibrationIds;
use crate::common::USER_DICT_WORD_COST;
use crate::errors::{ParseError, Result};
use crate::morpheme::{Morpheme, MorphemeList};
use crate::pos::{POSTag, POSType};
use crate::trie::Trie;

/// A compiled user lexicon: a second trie plus its morpheme table, built the
/// same way as the pre-built dictionary's but from a much smaller,
/// plain-text source file.
pub struct UserLexicon {
    trie: Trie,
    morpheme_lists: Vec<MorphemeList>,
}

impl UserLexicon {
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn morpheme_list(&self, id: u32) -> Option<&MorphemeList> {
        self.morpheme_lists.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.morpheme_lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morpheme_lists.is_empty()
    }

    /// Compiles a user dictionary from a plain-text source.
    ///
    /// One entry per non-blank, non-comment line: a surface followed by one
    /// or more whitespace-separated sub-surfaces giving its decomposition.
    /// Every sub-surface is tagged `NNG`; a single sub-surface produces a
    /// simple morpheme, more than one a compound (§4.5). Lines starting with
    /// `#` are comments.
    pub fn compile<R: Read>(reader: R, calibration: &CalibrationIds) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut rows: Vec<(String, Morpheme)> = Vec::new();

        for (lineno, raw_line) in reader.lines().enumerate() {
            let line = raw_line.map_err(crate::errors::NoriError::Io)?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let surface = fields
                .next()
                .ok_or_else(|| ParseError::at("user.dic", lineno + 1, "missing surface column"))?
                .to_string();
            let sub_surfaces: Vec<String> = fields.map(|s| s.to_string()).collect();
            if sub_surfaces.is_empty() {
                return Err(ParseError::at("user.dic", lineno + 1, "entry has no sub-surfaces").into());
            }

            let right_id = if last_char_has_jongsung(&surface) {
                calibration.right_id_nng_with_jongsung
            } else {
                calibration.right_id_nng_without_jongsung
            };

            let pos_type = if sub_surfaces.len() == 1 {
                POSType::Morpheme
            } else {
                POSType::Compound
            };

            let expression: Vec<(String, POSTag)> =
                sub_surfaces.iter().map(|s| (s.clone(), POSTag::NNG)).collect();
            let pos_tags = vec![POSTag::NNG; sub_surfaces.len()];

            rows.push((
                surface,
                Morpheme {
                    left_id: calibration.left_id_nng,
                    right_id,
                    word_cost: USER_DICT_WORD_COST,
                    pos_type,
                    pos_tags,
                    expression,
                },
            ));
        }

        if rows.is_empty() {
            return Ok(Self {
                trie: Trie::build::<&str>(&[])?,
                morpheme_lists: Vec::new(),
            });
        }

        rows.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let mut morpheme_lists: Vec<MorphemeList> = Vec::new();
        let mut trie_entries: Vec<(String, u32)> = Vec::new();
        let mut i = 0;
        while i < rows.len() {
            let surface = rows[i].0.clone();
            let mut list = MorphemeList::default();
            while i < rows.len() && rows[i].0 == surface {
                list.morphemes.push(rows[i].1.clone());
                i += 1;
            }
            trie_entries.push((surface, morpheme_lists.len() as u32));
            morpheme_lists.push(list);
        }

        let trie = Trie::build(&trie_entries)?;

        Ok(Self { trie, morpheme_lists })
    }
}

/// Whether the last syllable of `surface` carries a final consonant
/// (batchim). Non-Hangul-syllable endings are treated as lacking one.
fn last_char_has_jongsung(surface: &str) -> bool {
    match surface.chars().last() {
        Some(c) if ('\u{AC00}'..='\u{D7A3}').contains(&c) => (c as u32 - 0xAC00) % 28 != 0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibration() -> CalibrationIds {
        CalibrationIds {
            left_id_nng: 5,
            right_id_nng: 5,
            right_id_nng_with_jongsung: 6,
            right_id_nng_without_jongsung: 7,
        }
    }

    #[test]
    fn compiles_simple_and_compound_entries() {
        let source = "# comment\n\n강남역 강남역\n놀이방 놀이 방\n";
        let lexicon = UserLexicon::compile(source.as_bytes(), &calibration()).unwrap();
        assert_eq!(lexicon.len(), 2);
        let id = lexicon.trie().exact_match("강남역".as_bytes()).unwrap();
        let list = lexicon.morpheme_list(id).unwrap();
        assert_eq!(list.morphemes[0].word_cost, USER_DICT_WORD_COST);
        assert_eq!(list.morphemes[0].pos_type, POSType::Morpheme);
        assert_eq!(list.morphemes[0].pos_tags, vec![POSTag::NNG]);
        assert_eq!(list.morphemes[0].expression, vec![("강남역".to_string(), POSTag::NNG)]);
        // 역 (0xC5ED) carries a jongsung, so the right id should reflect that.
        assert_eq!(list.morphemes[0].right_id, 6);

        let id2 = lexicon.trie().exact_match("놀이방".as_bytes()).unwrap();
        let list2 = lexicon.morpheme_list(id2).unwrap();
        assert_eq!(list2.morphemes[0].pos_type, POSType::Compound);
        assert_eq!(list2.morphemes[0].pos_tags, vec![POSTag::NNG, POSTag::NNG]);
        assert_eq!(
            list2.morphemes[0].expression,
            vec![("놀이".to_string(), POSTag::NNG), ("방".to_string(), POSTag::NNG)]
        );
    }

    #[test]
    fn empty_source_yields_empty_lexicon() {
        let lexicon = UserLexicon::compile("# only comments\n".as_bytes(), &calibration()).unwrap();
        assert!(lexicon.is_empty());
    }

    #[test]
    fn rejects_entry_with_no_sub_surfaces() {
        let err = UserLexicon::compile("강남역".as_bytes(), &calibration());
        assert!(err.is_err());
    }
}
