//! The compiled dictionary: trie, morpheme table, connection costs,
//! character classes, unknown-token templates and calibration ids, plus the
//! binary artifact codec that serializes all of them together (§3, §4.6).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use bincode::{Decode, Encode};
use log::{info, warn};
use memmap2::Mmap;

use crate::calibration::CalibrationIds;
use crate::character::CharProperty;
use crate::connector::ConnectionCost;
use crate::errors::{FormatError, NoriError, Result};
use crate::morpheme::MorphemeList;
use crate::trie::Trie;
use crate::unicode::NormalizationForm;
use crate::unknown::UnknownTokens;
use crate::user_dictionary::UserLexicon;

/// Version byte stamped into every artifact written by this crate. Bumped
/// whenever the on-disk layout changes in a way old readers can't handle.
const ARTIFACT_VERSION: u8 = 1;

/// Magic bytes identifying a zstd-compressed stream, checked so
/// [`Dictionary::from_path`] can transparently decompress either a raw or a
/// compressed artifact (§4.6).
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// The pre-built, read-only half of a dictionary: everything compiled from
/// MeCab-ko-dic source material (§3, §4.3).
pub struct DictionaryInner {
    trie: Trie,
    morpheme_lists: Vec<MorphemeList>,
    connector: ConnectionCost,
    char_prop: CharProperty,
    unknown: UnknownTokens,
    calibration: CalibrationIds,
    normalization: NormalizationForm,
}

impl DictionaryInner {
    pub fn new(
        trie: Trie,
        morpheme_lists: Vec<MorphemeList>,
        connector: ConnectionCost,
        char_prop: CharProperty,
        unknown: UnknownTokens,
        calibration: CalibrationIds,
        normalization: NormalizationForm,
    ) -> Self {
        Self {
            trie,
            morpheme_lists,
            connector,
            char_prop,
            unknown,
            calibration,
            normalization,
        }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn morpheme_list(&self, id: u32) -> Option<&MorphemeList> {
        self.morpheme_lists.get(id as usize)
    }

    pub fn connector(&self) -> &ConnectionCost {
        &self.connector
    }

    pub fn char_prop(&self) -> &CharProperty {
        &self.char_prop
    }

    pub fn unknown(&self) -> &UnknownTokens {
        &self.unknown
    }

    pub fn calibration(&self) -> &CalibrationIds {
        &self.calibration
    }

    pub fn normalization(&self) -> NormalizationForm {
        self.normalization
    }

    /// Serializes this dictionary as a bincode-encoded artifact (§4.6).
    /// `compress` wraps the stream in zstd, trading write/read time for size.
    pub fn write<W: Write>(&self, writer: W, compress: bool) -> Result<()> {
        let artifact = Artifact {
            version: ARTIFACT_VERSION,
            normalization: self.normalization,
            trie_bytes: self.trie.as_bytes().to_vec(),
            morpheme_lists: self.morpheme_lists.clone(),
            connector: self.connector.clone(),
            unknown_categories: self.unknown.template_entries(),
            unknown_ngram: self.unknown.ngram.clone(),
            char_prop: self.char_prop.clone(),
            calibration: self.calibration,
        };

        let config = bincode::config::standard();
        if compress {
            let mut encoder = zstd::Encoder::new(writer, 0).map_err(NoriError::Io)?;
            bincode::encode_into_std_write(&artifact, &mut encoder, config)
                .map_err(|e| FormatError::Decode(e.to_string()))?;
            encoder.finish().map_err(NoriError::Io)?;
        } else {
            let mut writer = writer;
            bincode::encode_into_std_write(&artifact, &mut writer, config)
                .map_err(|e| FormatError::Decode(e.to_string()))?;
        }
        Ok(())
    }

    /// Decodes a dictionary previously written by [`DictionaryInner::write`].
    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut header = [0u8; 4];
        let n = reader.read(&mut header).map_err(NoriError::Io)?;
        let rest_after_header = &header[..n];

        let config = bincode::config::standard();
        let mut chained = std::io::Cursor::new(rest_after_header.to_vec()).chain(reader);
        let artifact: Artifact = if rest_after_header == ZSTD_MAGIC {
            let mut decoder = zstd::Decoder::new(chained).map_err(NoriError::Io)?;
            bincode::decode_from_std_read(&mut decoder, config)
                .map_err(|e| FormatError::Decode(e.to_string()))?
        } else {
            bincode::decode_from_std_read(&mut chained, config)
                .map_err(|e| FormatError::Decode(e.to_string()))?
        };

        if artifact.version != ARTIFACT_VERSION {
            return Err(FormatError::VersionMismatch {
                expected: ARTIFACT_VERSION,
                found: artifact.version,
            }
            .into());
        }

        let trie = Trie::from_bytes(artifact.trie_bytes);
        let unknown = UnknownTokens::from_parts(artifact.unknown_categories, artifact.unknown_ngram);

        info!(
            "loaded dictionary artifact: {} morpheme lists, {:?} normalization",
            artifact.morpheme_lists.len(),
            artifact.normalization
        );

        Ok(Self {
            trie,
            morpheme_lists: artifact.morpheme_lists,
            connector: artifact.connector,
            char_prop: artifact.char_prop,
            unknown,
            calibration: artifact.calibration,
            normalization: artifact.normalization,
        })
    }
}

/// On-disk representation of a [`DictionaryInner`]. Kept separate from the
/// runtime-facing types so those types stay free to use non-bincode-friendly
/// shapes (e.g. `Trie`'s `yada::DoubleArray`, `UnknownTokens`'s hash map)
/// internally.
#[derive(Decode, Encode)]
struct Artifact {
    version: u8,
    normalization: NormalizationForm,
    trie_bytes: Vec<u8>,
    morpheme_lists: Vec<MorphemeList>,
    connector: ConnectionCost,
    unknown_categories: Vec<(crate::character::CharacterClass, crate::morpheme::Morpheme)>,
    unknown_ngram: crate::morpheme::Morpheme,
    char_prop: CharProperty,
    calibration: CalibrationIds,
}

/// The compiled, pre-built dictionary plus an optional per-process user
/// lexicon, shared read-only across tokenizer workers (§5).
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<DictionaryInner>,
    user: Option<Arc<UserLexicon>>,
}

impl Dictionary {
    pub fn new(inner: DictionaryInner) -> Self {
        Self {
            inner: Arc::new(inner),
            user: None,
        }
    }

    /// Decodes a dictionary from an arbitrary reader.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(DictionaryInner::read(reader)?))
    }

    /// Memory-maps and decodes a dictionary artifact from disk (§4.6, §5).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(NoriError::Io)?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(NoriError::Io)?;
        Self::read(&mmap[..])
    }

    pub fn write(&self, writer: impl Write, compress: bool) -> Result<()> {
        self.inner.write(writer, compress)
    }

    /// Loads a user dictionary (§4.5), replacing any previously loaded one.
    /// An empty file logs a warning rather than erroring (§8).
    pub fn load_user_dictionary<R: Read>(&mut self, reader: R) -> Result<()> {
        let lexicon = UserLexicon::compile(reader, self.inner.calibration())?;
        if lexicon.is_empty() {
            warn!("user dictionary is empty after parsing");
        } else {
            info!("loaded user dictionary with {} entries", lexicon.len());
        }
        self.user = Some(Arc::new(lexicon));
        Ok(())
    }

    pub fn inner(&self) -> &DictionaryInner {
        &self.inner
    }

    pub fn user(&self) -> Option<&UserLexicon> {
        self.user.as_deref()
    }

    /// Looks up the morpheme a lattice node refers to, across all three
    /// lexicons (§2 item 7, §4.4).
    pub fn resolve_morpheme(
        &self,
        word_idx: crate::word_idx::WordIdx,
        morpheme_index: u16,
    ) -> Option<&crate::morpheme::Morpheme> {
        use crate::word_idx::LexType;
        match word_idx.lex_type {
            LexType::System => self
                .inner
                .morpheme_list(word_idx.word_id)?
                .morphemes
                .get(morpheme_index as usize),
            LexType::User => self
                .user
                .as_ref()?
                .morpheme_list(word_idx.word_id)?
                .morphemes
                .get(morpheme_index as usize),
            LexType::Unknown => {
                if word_idx.word_id == crate::word_idx::NGRAM_WORD_ID {
                    Some(&self.inner.unknown().ngram)
                } else {
                    let category = crate::character::CharacterClass::from_index(word_idx.word_id as usize);
                    self.inner.unknown().template_for(category)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationIds;
    use crate::morpheme::Morpheme;
    use crate::pos::{POSTag, POSType};

    fn sample_inner() -> DictionaryInner {
        let trie = Trie::build(&[("가".to_string(), 0u32)]).unwrap();
        let morpheme_lists = vec![MorphemeList {
            morphemes: vec![Morpheme {
                left_id: 0,
                right_id: 0,
                word_cost: 100,
                pos_type: POSType::Morpheme,
                pos_tags: vec![POSTag::NNG],
                expression: Vec::new(),
            }],
        }];
        let connector = ConnectionCost::from_flat(1, 1, vec![0]).unwrap();
        let char_prop = crate::character::parse_char_def("DEFAULT 0 1 0\nHANGUL 1 1 0").unwrap();
        let unknown = crate::unknown::parse_unk_def("HANGUL,0,0,100,NNG,*,*,*,*,*,*,*").unwrap();
        let calibration = CalibrationIds {
            left_id_nng: 0,
            right_id_nng: 0,
            right_id_nng_with_jongsung: 0,
            right_id_nng_without_jongsung: 0,
        };
        DictionaryInner::new(trie, morpheme_lists, connector, char_prop, unknown, calibration, NormalizationForm::None)
    }

    #[test]
    fn round_trips_through_artifact_bytes() {
        let inner = sample_inner();
        let mut buf = Vec::new();
        inner.write(&mut buf, false).unwrap();
        let reloaded = DictionaryInner::read(&buf[..]).unwrap();
        assert_eq!(reloaded.trie().exact_match("가".as_bytes()), Some(0));
        assert_eq!(reloaded.morpheme_list(0).unwrap().len(), 1);
        assert_eq!(reloaded.connector().cost(0, 0), 0);
    }

    #[test]
    fn round_trips_through_compressed_artifact_bytes() {
        let inner = sample_inner();
        let mut buf = Vec::new();
        inner.write(&mut buf, true).unwrap();
        let reloaded = DictionaryInner::read(&buf[..]).unwrap();
        assert_eq!(reloaded.trie().exact_match("가".as_bytes()), Some(0));
    }

    #[test]
    fn rejects_version_mismatch() {
        let inner = sample_inner();
        let mut buf = Vec::new();
        inner.write(&mut buf, false).unwrap();
        buf[0] = ARTIFACT_VERSION.wrapping_add(1);
        assert!(DictionaryInner::read(&buf[..]).is_err());
    }
}
