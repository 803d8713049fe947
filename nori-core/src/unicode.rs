//! Unicode normalization, code-point iteration, and script/category queries.
//!
//! The tokenizer and compiler share this single entry point rather than
//! each rolling their own normalization or classification logic (§4.1).

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Which normalization form (if any) is applied to dictionary surfaces and
/// tokenizer input. Recorded in the compiled artifact's header so a runtime
/// can refuse a mismatched policy (§9 open question).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, bincode::Decode, bincode::Encode)]
pub enum NormalizationForm {
    /// No normalization; bytes pass through unchanged.
    #[default]
    None,
    /// Unicode Normalization Form KC.
    Nfkc,
}

/// Normalizes `input` according to `form`.
pub fn normalize(input: &str, form: NormalizationForm) -> String {
    match form {
        NormalizationForm::None => input.to_string(),
        NormalizationForm::Nfkc => input.nfkc().collect(),
    }
}

/// A coarse Unicode script classification, sufficient to drive the unknown-token
/// grouping rule (§4.4 step 5). `Common` and `Inherited` are pass-through: they
/// are considered compatible with any other script when deciding whether to
/// extend a grouping run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hangul,
    Hanja,
    Hiragana,
    Katakana,
    Latin,
    Greek,
    Cyrillic,
    Common,
    Inherited,
    Other,
}

/// Classifies the script of a single code point by range membership, in the
/// style of the reference Japanese tokenizer's `is_hiragana`/`is_katakana`/`is_kanji`
/// helpers, generalized to the broader set of scripts this analyzer must
/// distinguish (Hangul text mixed with Hanja, Latin, Cyrillic, Greek runs).
pub fn script_of(c: char) -> Script {
    match c {
        '\u{AC00}'..='\u{D7A3}' // Hangul syllables
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{3130}'..='\u{318E}' // Hangul Compatibility Jamo
        | '\u{A960}'..='\u{A97F}' // Hangul Jamo Extended-A
        | '\u{D7B0}'..='\u{D7FF}' => Script::Hangul, // Hangul Jamo Extended-B
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' => {
            Script::Hanja
        }
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309F}' => Script::Hiragana,
        '\u{30A1}'..='\u{30FA}' | '\u{30FD}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' => {
            Script::Katakana
        }
        '\u{0041}'..='\u{005A}'
        | '\u{0061}'..='\u{007A}'
        | '\u{00C0}'..='\u{00FF}'
        | '\u{0100}'..='\u{024F}' => Script::Latin,
        '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Script::Greek,
        '\u{0400}'..='\u{04FF}' => Script::Cyrillic,
        '\u{0300}'..='\u{036F}' => Script::Inherited,
        _ if c.is_whitespace() || c.is_ascii_punctuation() || c.is_numeric() => Script::Common,
        _ => Script::Other,
    }
}

/// Whether two scripts are compatible for the purposes of the unknown-token
/// grouping rule: identical, or either side is `Common`/`Inherited`.
pub fn scripts_compatible(a: Script, b: Script) -> bool {
    a == b
        || matches!(a, Script::Common | Script::Inherited)
        || matches!(b, Script::Common | Script::Inherited)
}

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\p{P}$").expect("valid punctuation regex"))
}

/// Whether `c` is punctuation under the Unicode general category, with the
/// Araea exception carried from the algorithm this is grounded on (§4.4 step 5).
pub fn is_punctuation(c: char) -> bool {
    if c == crate::common::ARAEA {
        return true;
    }
    let mut buf = [0u8; 4];
    punctuation_regex().is_match(c.encode_utf8(&mut buf))
}

/// Whether `c` has the Unicode `Nd`/numeric property.
pub fn is_digit(c: char) -> bool {
    c.is_numeric()
}

/// Whether `c` has the Unicode whitespace property.
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfkc_normalizes_compatibility_forms() {
        // Fullwidth 'Ａ' (U+FF21) normalizes to ASCII 'A' under NFKC.
        assert_eq!(normalize("\u{FF21}", NormalizationForm::Nfkc), "A");
        assert_eq!(normalize("\u{FF21}", NormalizationForm::None), "\u{FF21}");
    }

    #[test]
    fn hangul_and_hanja_are_distinct_scripts() {
        assert_eq!(script_of('가'), Script::Hangul);
        assert_eq!(script_of('漢'), Script::Hanja);
        assert_eq!(script_of('A'), Script::Latin);
        assert_eq!(script_of('α'), Script::Greek);
    }

    #[test]
    fn araea_is_punctuation_by_exception() {
        assert!(is_punctuation(crate::common::ARAEA));
    }

    #[test]
    fn common_script_is_compatible_with_anything() {
        assert!(scripts_compatible(Script::Common, Script::Hangul));
        assert!(scripts_compatible(Script::Hangul, Script::Common));
        assert!(!scripts_compatible(Script::Hangul, Script::Latin));
    }
}
