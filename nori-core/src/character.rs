//! Character-class table: code-point → category mapping, plus per-category
//! invoke/group/length rules driving unknown-token segmentation (§3, §4.3).

use bincode::{Decode, Encode};

use crate::errors::{ParseError, Result};

/// A character category, as named in `char.def`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Decode, Encode)]
pub enum CharacterClass {
    Default,
    Space,
    Hangul,
    Hanja,
    Hanjanumeric,
    Hiragana,
    Katakana,
    Kanji,
    Numeric,
    Alpha,
    Greek,
    Cyrillic,
    Symbol,
    Emoji,
}

impl CharacterClass {
    const ALL: [CharacterClass; 14] = [
        Self::Default,
        Self::Space,
        Self::Hangul,
        Self::Hanja,
        Self::Hanjanumeric,
        Self::Hiragana,
        Self::Katakana,
        Self::Kanji,
        Self::Numeric,
        Self::Alpha,
        Self::Greek,
        Self::Cyrillic,
        Self::Symbol,
        Self::Emoji,
    ];

    pub(crate) fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap()
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Self::ALL[idx]
    }

    pub(crate) fn resolve(raw: &str) -> Option<Self> {
        Some(match raw.to_ascii_uppercase().as_str() {
            "DEFAULT" => Self::Default,
            "SPACE" => Self::Space,
            "HANGUL" => Self::Hangul,
            "HANJA" => Self::Hanja,
            "HANJANUMERIC" => Self::Hanjanumeric,
            "HIRAGANA" => Self::Hiragana,
            "KATAKANA" => Self::Katakana,
            "KANJI" => Self::Kanji,
            "NUMERIC" => Self::Numeric,
            "ALPHA" => Self::Alpha,
            "GREEK" => Self::Greek,
            "CYRILLIC" => Self::Cyrillic,
            "SYMBOL" => Self::Symbol,
            "EMOJI" => Self::Emoji,
            _ => return None,
        })
    }
}

/// Per-category segmentation rule.
#[derive(Debug, Clone, Copy, Default, Decode, Encode)]
pub struct InvokeRule {
    /// Always try the unknown rule at this position, even if the trie matched.
    pub invoke: bool,
    /// Extend the unknown match across adjacent, script-compatible characters.
    pub group: bool,
    /// Maximum run length considered when grouping (0 means unbounded).
    pub length: u32,
}

/// The compiled character-class table.
#[derive(Debug, Clone, Decode, Encode)]
pub struct CharProperty {
    /// Sorted by code point, to permit binary search on lookup (§4.6).
    code_to_category: Vec<(u32, CharacterClass)>,
    /// Dense, indexed by [`CharacterClass`] position.
    invoke_map: [InvokeRule; CharacterClass::ALL.len()],
}

impl CharProperty {
    /// Looks up the category of a code point. Code points absent from the
    /// table default to [`CharacterClass::Hangul`], matching the reference
    /// implementation's fallback (see DESIGN.md / SPEC_FULL.md §3).
    pub fn category_of(&self, c: char) -> CharacterClass {
        let cp = c as u32;
        match self.code_to_category.binary_search_by_key(&cp, |(k, _)| *k) {
            Ok(i) => self.code_to_category[i].1,
            Err(_) => CharacterClass::Hangul,
        }
    }

    pub fn invoke_rule(&self, category: CharacterClass) -> InvokeRule {
        self.invoke_map[category.index()]
    }
}

/// Parses `char.def`. Comments (`# ...`) and blank lines are ignored;
/// internal whitespace runs collapse to a single space before field splitting.
pub fn parse_char_def(content: &str) -> Result<CharProperty> {
    let mut invoke_map = [InvokeRule::default(); CharacterClass::ALL.len()];
    let mut code_to_category: Vec<(u32, CharacterClass)> = Vec::new();

    for (lineno, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let collapsed = collapse_whitespace(line);
        let fields: Vec<&str> = collapsed.split(' ').collect();

        if let Some(hex) = fields.first().filter(|f| f.starts_with("0x") || f.starts_with("0X")) {
            let category_name = fields
                .get(1)
                .ok_or_else(|| ParseError::at("char.def", lineno + 1, "code-point rule missing category"))?;
            let category = CharacterClass::resolve(category_name)
                .ok_or_else(|| ParseError::at("char.def", lineno + 1, format!("unknown category '{category_name}'")))?;
            let (start, end) = if let Some((lo, hi)) = hex.split_once("..") {
                (parse_hex(lo, lineno)?, parse_hex(hi, lineno)?)
            } else {
                let v = parse_hex(hex, lineno)?;
                (v, v)
            };
            for cp in start..=end {
                code_to_category.push((cp, category));
            }
        } else {
            let category_name = fields[0];
            let category = CharacterClass::resolve(category_name)
                .ok_or_else(|| ParseError::at("char.def", lineno + 1, format!("unknown category '{category_name}'")))?;
            let invoke = fields.get(1).map(|f| *f == "1").unwrap_or(false);
            let group = fields.get(2).map(|f| *f == "1").unwrap_or(false);
            let length = fields
                .get(3)
                .map(|f| f.parse::<u32>())
                .transpose()
                .map_err(|_| ParseError::at("char.def", lineno + 1, "length is not an integer"))?
                .unwrap_or(0);
            invoke_map[category.index()] = InvokeRule { invoke, group, length };
        }
    }

    code_to_category.sort_by_key(|(cp, _)| *cp);
    code_to_category.dedup_by_key(|(cp, _)| *cp);

    Ok(CharProperty {
        code_to_category,
        invoke_map,
    })
}

fn strip_comment(line: &str) -> &str {
    line.find('#').map(|i| &line[..i]).unwrap_or(line)
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_hex(field: &str, lineno: usize) -> Result<u32> {
    let trimmed = field.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(trimmed, 16)
        .map_err(|_| ParseError::at("char.def", lineno + 1, format!("malformed hex code point '{field}'")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_and_range_rules() {
        let def = "DEFAULT 0 1 0\nHANGUL 1 1 0\n# a comment\n0x0030..0x0039 NUMERIC\n0xAC00 HANGUL";
        let prop = parse_char_def(def).unwrap();
        assert_eq!(prop.category_of('5'), CharacterClass::Numeric);
        assert_eq!(prop.category_of('\u{AC00}'), CharacterClass::Hangul);
        let rule = prop.invoke_rule(CharacterClass::Hangul);
        assert!(rule.invoke);
        assert!(rule.group);
    }

    #[test]
    fn unmapped_code_point_defaults_to_hangul() {
        let def = "DEFAULT 0 1 0";
        let prop = parse_char_def(def).unwrap();
        assert_eq!(prop.category_of('\u{0041}'), CharacterClass::Hangul);
    }

    #[test]
    fn rejects_unknown_category() {
        let def = "NOTACATEGORY 0 0 0";
        assert!(parse_char_def(def).is_err());
    }
}
