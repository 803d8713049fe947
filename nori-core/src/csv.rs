//! Quote-aware CSV line splitting and morpheme-field resolution (§4.3 steps 2–3).
//!
//! Shared between lexicon CSV parsing and `unk.def` parsing, since both use
//! the same 12-field row shape (surface/category, then 11 shared fields).

use crate::errors::{ParseError, Result};
use crate::morpheme::Morpheme;
use crate::pos::{POSTag, POSType};

/// Splits one CSV line into fields.
///
/// `"` toggles "inside quotes"; an unescaped comma outside quotes is a field
/// separator; a field wholly wrapped in a matching pair of quotes has that
/// pair stripped.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    for field in &mut fields {
        let trimmed = field.trim();
        let stripped = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed);
        *field = stripped.to_string();
    }
    fields
}

/// Number of fields in a mecab-ko-dic lexicon/unk.def row.
pub const ROW_FIELD_COUNT: usize = 12;

/// Builds a [`Morpheme`] from the 11 fields following the surface/category
/// column of a 12-field CSV row: `left_cost, right_cost, word_cost, pos_tags,
/// semantic_class, has_coda, reading, pos_type, left_pos, right_pos, expression`.
pub fn morpheme_from_fields(fields: &[String], file: &str, lineno: usize) -> Result<Morpheme> {
    if fields.len() != ROW_FIELD_COUNT {
        return Err(ParseError::at(
            file,
            lineno,
            format!("expected {ROW_FIELD_COUNT} fields, found {}", fields.len()),
        )
        .into());
    }

    let left_id: u16 = fields[1]
        .parse()
        .map_err(|_| ParseError::at(file, lineno, "left_cost is not an integer"))?;
    let right_id: u16 = fields[2]
        .parse()
        .map_err(|_| ParseError::at(file, lineno, "right_cost is not an integer"))?;
    let word_cost: i16 = fields[3]
        .parse()
        .map_err(|_| ParseError::at(file, lineno, "word_cost is not an integer"))?;

    let pos_tags = fields[4]
        .split('+')
        .map(|raw| {
            POSTag::resolve(raw)
                .ok_or_else(|| ParseError::at(file, lineno, format!("unknown POS tag '{raw}'")).into())
        })
        .collect::<Result<Vec<_>>>()?;

    let pos_type_raw = &fields[8];
    let pos_type = POSType::resolve(pos_type_raw)
        .ok_or_else(|| ParseError::at(file, lineno, format!("unknown pos_type '{pos_type_raw}'")))?;

    let expression_raw = &fields[11];
    let expression = if expression_raw == "*" || expression_raw.is_empty() {
        Vec::new()
    } else {
        expression_raw
            .split('+')
            .map(|sub| parse_expression_subtoken(sub, file, lineno))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(Morpheme {
        left_id,
        right_id,
        word_cost,
        pos_type,
        pos_tags,
        expression,
    })
}

fn parse_expression_subtoken(sub: &str, file: &str, lineno: usize) -> Result<(String, POSTag)> {
    let mut parts = sub.splitn(3, '/');
    let surface = parts
        .next()
        .ok_or_else(|| ParseError::at(file, lineno, "expression sub-token missing surface"))?;
    let tag_raw = parts
        .next()
        .ok_or_else(|| ParseError::at(file, lineno, "expression sub-token missing tag"))?;
    let tag = POSTag::resolve(tag_raw)
        .ok_or_else(|| ParseError::at(file, lineno, format!("unknown POS tag '{tag_raw}' in expression")))?;
    Ok((surface.to_string(), tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_line() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn strips_symmetric_quotes() {
        assert_eq!(parse_csv_line("\"a,b\",c"), vec!["a,b", "c"]);
    }

    #[test]
    fn builds_morpheme_from_row() {
        let row = "화학,0,0,100,NNG,*,F,*,*,*,*,*";
        let fields = parse_csv_line(row);
        let m = morpheme_from_fields(&fields, "lex.csv", 1).unwrap();
        assert_eq!(m.left_id, 0);
        assert_eq!(m.word_cost, 100);
        assert_eq!(m.pos_tags, vec![POSTag::NNG]);
        assert!(m.expression.is_empty());
    }

    #[test]
    fn parses_compound_expression() {
        let row = "가락지나물,0,0,100,NNG,*,F,*,Compound,*,*,가락지/NNG/*+나물/NNG/*";
        let fields = parse_csv_line(row);
        let m = morpheme_from_fields(&fields, "lex.csv", 1).unwrap();
        assert_eq!(m.expression, vec![
            ("가락지".to_string(), POSTag::NNG),
            ("나물".to_string(), POSTag::NNG),
        ]);
    }
}
