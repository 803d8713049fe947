//! Part-of-speech tag and type enums.
//!
//! The tag set is closed and fixed at build time; resolution from the
//! string spellings used in MeCab-ko-dic source files happens only in the
//! compiler (`dictionary::compiler`), never on the tokenize hot path.

use bincode::{Decode, Encode};

/// A part-of-speech tag, following the Sejong/mecab-ko-dic tag set.
///
/// The trailing comment on each variant carries the legacy numeric code
/// from the original implementation's `constant.h`, for documentation
/// purposes only; it is never encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Decode, Encode)]
pub enum POSTag {
    /// Verbal endings. (100)
    E,
    /// Interjection. (110)
    IC,
    /// Ending particle. (120)
    J,
    /// General adverb. (130)
    MAG,
    /// Conjunctive adverb. (131)
    MAJ,
    /// Modifier. (140)
    MM,
    /// General noun. (150)
    NNG,
    /// Proper noun. (151)
    NNP,
    /// Dependent noun. (152)
    NNB,
    /// Dependent noun (unit/classifier). (153)
    NNBC,
    /// Pronoun. (154)
    NP,
    /// Numeral. (155)
    NR,
    /// Terminal punctuation. (160)
    SF,
    /// Chinese character. (161)
    SH,
    /// Foreign language. (162)
    SL,
    /// Number. (163)
    SN,
    /// Space. (164)
    SP,
    /// Closing brackets. (165)
    SSC,
    /// Opening brackets. (166)
    SSO,
    /// Separator. (167)
    SC,
    /// Other symbol. (168)
    SY,
    /// Ellipsis. (169)
    SE,
    /// Adjective. (170)
    VA,
    /// Negative designator. (171)
    VCN,
    /// Positive designator. (172)
    VCP,
    /// Verb. (173)
    VV,
    /// Auxiliary verb or adjective. (174)
    VX,
    /// Prefix. (181)
    XPN,
    /// Root. (182)
    XR,
    /// Adjective suffix. (183)
    XSA,
    /// Noun suffix. (184)
    XSN,
    /// Verb suffix. (185)
    XSV,
    /// Unresolved or out-of-dictionary tag. (999)
    UNKNOWN,
    /// Unanalyzed morpheme. (-1)
    UNA,
    /// Not applicable. (-1)
    NA,
    /// Unanalyzed verb. (-1)
    VSV,
}

impl POSTag {
    /// Resolves a tag spelling as it appears in a mecab-ko-dic CSV row.
    ///
    /// Per the compiler algorithm: tags beginning with `J` fold to [`POSTag::J`]
    /// and tags beginning with `E` fold to [`POSTag::E`] (mecab-ko-dic subdivides
    /// both into many suffixed variants, e.g. `JKS`, `EC`, that this closed
    /// enum does not distinguish). All other names are matched case-insensitively.
    pub fn resolve(raw: &str) -> Option<Self> {
        let upper = raw.to_ascii_uppercase();
        if upper.starts_with('J') {
            return Some(Self::J);
        }
        if upper.starts_with('E') {
            return Some(Self::E);
        }
        Some(match upper.as_str() {
            "IC" => Self::IC,
            "MAG" => Self::MAG,
            "MAJ" => Self::MAJ,
            "MM" => Self::MM,
            "NNG" => Self::NNG,
            "NNP" => Self::NNP,
            "NNB" => Self::NNB,
            "NNBC" => Self::NNBC,
            "NP" => Self::NP,
            "NR" => Self::NR,
            "SF" => Self::SF,
            "SH" => Self::SH,
            "SL" => Self::SL,
            "SN" => Self::SN,
            "SP" => Self::SP,
            "SSC" => Self::SSC,
            "SSO" => Self::SSO,
            "SC" => Self::SC,
            "SY" => Self::SY,
            "SE" => Self::SE,
            "VA" => Self::VA,
            "VCN" => Self::VCN,
            "VCP" => Self::VCP,
            "VV" => Self::VV,
            "VX" => Self::VX,
            "XPN" => Self::XPN,
            "XR" => Self::XR,
            "XSA" => Self::XSA,
            "XSN" => Self::XSN,
            "XSV" => Self::XSV,
            "UNA" => Self::UNA,
            "NA" => Self::NA,
            "VSV" => Self::VSV,
            _ => return None,
        })
    }

    /// `true` for the clitic/ending tags that should not float after a
    /// space (used by the tokenizer's space-penalty rule, §4.4 step 7).
    pub fn is_space_sensitive(self) -> bool {
        matches!(
            self,
            Self::E | Self::J | Self::VCP | Self::XSA | Self::XSN | Self::XSV
        )
    }
}

/// Structural type of a morpheme entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Decode, Encode)]
pub enum POSType {
    /// A simple, indivisible morpheme.
    #[default]
    Morpheme,
    /// A compound noun, decomposable into an ordered `expression` of sub-tokens.
    Compound,
    /// An inflected token.
    Inflect,
    /// A pre-analysis token.
    Preanalysis,
}

impl POSType {
    /// Resolves a `pos_type` CSV field: `*` means [`POSType::Morpheme`],
    /// matching is case-insensitive otherwise.
    pub fn resolve(raw: &str) -> Option<Self> {
        if raw == "*" {
            return Some(Self::Morpheme);
        }
        Some(match raw.to_ascii_lowercase().as_str() {
            "compound" => Self::Compound,
            "inflect" => Self::Inflect,
            "preanalysis" => Self::Preanalysis,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_tags() {
        assert_eq!(POSTag::resolve("NNG"), Some(POSTag::NNG));
        assert_eq!(POSTag::resolve("nng"), Some(POSTag::NNG));
        assert_eq!(POSTag::resolve("SY"), Some(POSTag::SY));
    }

    #[test]
    fn folds_j_and_e_families() {
        assert_eq!(POSTag::resolve("JKS"), Some(POSTag::J));
        assert_eq!(POSTag::resolve("JKB"), Some(POSTag::J));
        assert_eq!(POSTag::resolve("EC"), Some(POSTag::E));
        assert_eq!(POSTag::resolve("ETM"), Some(POSTag::E));
    }

    #[test]
    fn rejects_unknown_spelling() {
        assert_eq!(POSTag::resolve("ZZZ"), None);
    }

    #[test]
    fn resolves_pos_type() {
        assert_eq!(POSType::resolve("*"), Some(POSType::Morpheme));
        assert_eq!(POSType::resolve("Compound"), Some(POSType::Compound));
        assert_eq!(POSType::resolve("INFLECT"), Some(POSType::Inflect));
    }

    #[test]
    fn space_sensitive_tags() {
        assert!(POSTag::J.is_space_sensitive());
        assert!(POSTag::E.is_space_sensitive());
        assert!(!POSTag::NNG.is_space_sensitive());
    }
}
