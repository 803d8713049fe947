//! Dictionary compiler: converts MeCab-ko-dic source files into a
//! [`DictionaryInner`] (§4.3).

use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::calibration;
use crate::character;
use crate::connector;
use crate::csv::{morpheme_from_fields, parse_csv_line};
use crate::dictionary::DictionaryInner;
use crate::errors::{ParseError, Result};
use crate::morpheme::MorphemeList;
use crate::trie::Trie;
use crate::unicode::{self, NormalizationForm};
use crate::unknown;

/// Builds a [`DictionaryInner`] from MeCab-ko-dic source material.
pub struct SystemDictionaryBuilder;

impl SystemDictionaryBuilder {
    /// Builds from already-read source text, as a caller with an arbitrary
    /// source layout (e.g. an in-memory test fixture, §4.3 tests) would.
    ///
    /// `lexicon_csv` may contain the concatenated contents of multiple
    /// `*.csv` files; rows are otherwise independent of which file they
    /// came from.
    #[allow(clippy::too_many_arguments)]
    pub fn from_readers<R1, R2, R3, R4, R5, R6>(
        lexicon_csv: R1,
        matrix_def: R2,
        char_def: R3,
        unk_def: R4,
        left_id_def: R5,
        right_id_def: R6,
        normalization: NormalizationForm,
    ) -> Result<DictionaryInner>
    where
        R1: Read,
        R2: Read,
        R3: Read,
        R4: Read,
        R5: Read,
        R6: Read,
    {
        let lexicon_csv = read_to_string(lexicon_csv)?;
        let matrix_def = read_to_string(matrix_def)?;
        let char_def = read_to_string(char_def)?;
        let unk_def = read_to_string(unk_def)?;
        let left_id_def = read_to_string(left_id_def)?;
        let right_id_def = read_to_string(right_id_def)?;

        Self::build(
            &lexicon_csv,
            &matrix_def,
            &char_def,
            &unk_def,
            &left_id_def,
            &right_id_def,
            normalization,
        )
    }

    /// Builds from a MeCab-ko-dic source directory: every `*.csv` file in
    /// the directory is treated as a lexicon file, and `unk.def`,
    /// `char.def`, `matrix.def`, `left-id.def`, `right-id.def` are read by
    /// their conventional names.
    pub fn from_mecab_dir(dir: impl AsRef<Path>, normalization: NormalizationForm) -> Result<DictionaryInner> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("mecab directory not found: {}", dir.display()),
            )
            .into());
        }

        let mut lexicon_csv = String::new();
        let mut csv_count = 0usize;
        for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                let content = std::fs::read_to_string(path)?;
                lexicon_csv.push_str(&content);
                lexicon_csv.push('\n');
                csv_count += 1;
            }
        }
        if csv_count == 0 {
            return Err(ParseError::new(format!("no *.csv lexicon files found in {}", dir.display())).into());
        }
        info!("found {csv_count} lexicon csv files in {}", dir.display());

        let matrix_def = std::fs::read_to_string(dir.join("matrix.def"))?;
        let char_def = std::fs::read_to_string(dir.join("char.def"))?;
        let unk_def = std::fs::read_to_string(dir.join("unk.def"))?;
        let left_id_def = std::fs::read_to_string(dir.join("left-id.def"))?;
        let right_id_def = std::fs::read_to_string(dir.join("right-id.def"))?;

        Self::build(
            &lexicon_csv,
            &matrix_def,
            &char_def,
            &unk_def,
            &left_id_def,
            &right_id_def,
            normalization,
        )
    }

    fn build(
        lexicon_csv: &str,
        matrix_def: &str,
        char_def: &str,
        unk_def: &str,
        left_id_def: &str,
        right_id_def: &str,
        normalization: NormalizationForm,
    ) -> Result<DictionaryInner> {
        let lexicon_csv = normalize_lines(lexicon_csv, normalization);

        let mut rows: Vec<(String, crate::morpheme::Morpheme)> = Vec::new();
        for (lineno, raw_line) in lexicon_csv.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let fields = parse_csv_line(line);
            let surface = fields
                .first()
                .ok_or_else(|| ParseError::at("lexicon.csv", lineno + 1, "missing surface column"))?
                .trim()
                .to_string();
            let morpheme = morpheme_from_fields(&fields, "lexicon.csv", lineno + 1)?;
            rows.push((surface, morpheme));
        }
        if rows.is_empty() {
            return Err(ParseError::new("lexicon csv set is empty").into());
        }
        debug!("parsed {} lexicon rows", rows.len());

        // Stable sort by surface (bytewise); rows sharing a surface form one
        // MorphemeList, in post-sort order (§4.3 step 4).
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
        info!("built {} morpheme lists from {} rows", morpheme_lists.len(), rows.len());

        let trie = Trie::build(&trie_entries)?;

        let unk_def = normalize_lines(unk_def, normalization);
        let unknown = unknown::parse_unk_def(&unk_def)?;

        let char_def = normalize_lines(char_def, normalization);
        let char_prop = character::parse_char_def(&char_def)?;

        let connector = connector::parse_matrix_def(matrix_def)?;

        let calibration = calibration::calibrate(left_id_def, right_id_def)?;

        Ok(DictionaryInner::new(
            trie,
            morpheme_lists,
            connector,
            char_prop,
            unknown,
            calibration,
            normalization,
        ))
    }
}

fn read_to_string(mut r: impl Read) -> Result<String> {
    let mut s = String::new();
    r.read_to_string(&mut s)?;
    Ok(s)
}

fn normalize_lines(content: &str, form: NormalizationForm) -> String {
    if form == NormalizationForm::None {
        return content.to_string();
    }
    content
        .lines()
        .map(|line| unicode::normalize(line, form))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (String, String, String, String, String, String) {
        let lexicon = "화학,0,0,100,NNG,*,F,*,*,*,*,*\n이외,0,0,100,NNG,*,F,*,*,*,*,*\n의,0,0,50,J,*,F,*,*,*,*,*\n것,0,0,80,NNB,*,F,*,*,*,*,*".to_string();
        let matrix = "1 1\n0 0 0".to_string();
        let chardef = "DEFAULT 0 1 0\nHANGUL 1 1 0".to_string();
        let unkdef = "DEFAULT,0,0,100,SY,*,*,*,*,*,*,*\nHANGUL,0,0,100,NNG,*,*,*,*,*,*,*".to_string();
        let left = "0 NNG,*,*,*,*,*,*,*".to_string();
        let right = "0 NNG,*,*,*,*,*,*,*\n1 NNG,*,T,*,*,*,*,*\n2 NNG,*,F,*,*,*,*,*".to_string();
        (lexicon, matrix, chardef, unkdef, left, right)
    }

    #[test]
    fn builds_dictionary_from_readers() {
        let (lexicon, matrix, chardef, unkdef, left, right) = fixture();
        let dict = SystemDictionaryBuilder::from_readers(
            lexicon.as_bytes(),
            matrix.as_bytes(),
            chardef.as_bytes(),
            unkdef.as_bytes(),
            left.as_bytes(),
            right.as_bytes(),
            NormalizationForm::None,
        )
        .unwrap();
        assert!(dict.trie().exact_match("화학".as_bytes()).is_some());
        assert!(dict.trie().exact_match("없음".as_bytes()).is_none());
        assert_eq!(dict.calibration().left_id_nng, 0);
    }

    #[test]
    fn rejects_empty_lexicon() {
        let (_, matrix, chardef, unkdef, left, right) = fixture();
        let err = SystemDictionaryBuilder::from_readers(
            "".as_bytes(),
            matrix.as_bytes(),
            chardef.as_bytes(),
            unkdef.as_bytes(),
            left.as_bytes(),
            right.as_bytes(),
            NormalizationForm::None,
        );
        assert!(err.is_err());
    }
}
