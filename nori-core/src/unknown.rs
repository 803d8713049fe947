//! Unknown-token map: category → morpheme template (§3, §4.3 step 6).

use hashbrown::HashMap;

use crate::character::CharacterClass;
use crate::common::{NGRAM_LEFT_ID, NGRAM_RIGHT_ID, NGRAM_WORD_COST};
use crate::csv::{morpheme_from_fields, parse_csv_line};
use crate::errors::{ParseError, Result};
use crate::morpheme::Morpheme;
use crate::pos::{POSTag, POSType};

/// Category → morpheme template used to fabricate a lattice node for a run
/// of unknown input. `ngram` is the synthetic fallback entry inserted ahead
/// of the per-category rows by the original builder algorithm.
pub struct UnknownTokens {
    by_category: HashMap<CharacterClass, Morpheme>,
    pub ngram: Morpheme,
}

impl UnknownTokens {
    pub fn template_for(&self, category: CharacterClass) -> Option<&Morpheme> {
        self.by_category.get(&category)
    }

    /// Clones out a serializable shape for the binary codec (§4.6).
    pub(crate) fn template_entries(&self) -> Vec<(CharacterClass, Morpheme)> {
        self.by_category
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect()
    }

    pub(crate) fn from_parts(entries: Vec<(CharacterClass, Morpheme)>, ngram: Morpheme) -> Self {
        Self {
            by_category: entries.into_iter().collect(),
            ngram,
        }
    }
}

fn synthetic_ngram_entry() -> Morpheme {
    Morpheme {
        left_id: NGRAM_LEFT_ID,
        right_id: NGRAM_RIGHT_ID,
        word_cost: NGRAM_WORD_COST,
        pos_type: POSType::Morpheme,
        pos_tags: vec![POSTag::SY],
        expression: Vec::new(),
    }
}

/// Parses `unk.def`: one row per character class plus the synthetic NGRAM
/// row, each in the same 12-field shape as a lexicon CSV row with the
/// category name standing in for the surface column.
pub fn parse_unk_def(content: &str) -> Result<UnknownTokens> {
    let mut by_category = HashMap::new();
    let ngram = synthetic_ngram_entry();

    for (lineno, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);
        let category_name = fields
            .first()
            .ok_or_else(|| ParseError::at("unk.def", lineno + 1, "missing category column"))?;
        if category_name.eq_ignore_ascii_case("NGRAM") {
            // The synthetic entry is fixed (§4.3 step 6); a matching row in
            // the source file, if present, is not re-parsed.
            continue;
        }
        let category = CharacterClass::resolve(category_name)
            .ok_or_else(|| ParseError::at("unk.def", lineno + 1, format!("unknown category '{category_name}'")))?;
        let morpheme = morpheme_from_fields(&fields, "unk.def", lineno + 1)?;
        by_category.insert(category, morpheme);
    }

    Ok(UnknownTokens { by_category, ngram })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngram_entry_is_always_present() {
        let unk = parse_unk_def("DEFAULT,0,0,100,SY,*,*,*,*,*,*,*").unwrap();
        assert_eq!(unk.ngram.left_id, NGRAM_LEFT_ID);
        assert_eq!(unk.ngram.word_cost, NGRAM_WORD_COST);
    }

    #[test]
    fn parses_category_rows() {
        let unk = parse_unk_def("HANGUL,0,0,100,NNG,*,*,*,*,*,*,*\nALPHA,1,1,200,SL,*,*,*,*,*,*,*").unwrap();
        assert_eq!(unk.template_for(CharacterClass::Hangul).unwrap().word_cost, 100);
        assert_eq!(unk.template_for(CharacterClass::Alpha).unwrap().word_cost, 200);
        assert!(unk.template_for(CharacterClass::Kanji).is_none());
    }
}
