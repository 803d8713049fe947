//! Calibration IDs derived from the `left-id.def`/`right-id.def` legends,
//! used to assign connection ids to user-dictionary entries (§3, §4.3 step 9).

use bincode::{Decode, Encode};

use crate::errors::{ParseError, Result};

const LEFT_NNG_LEGEND: &str = "NNG,*,*,*,*,*,*,*";
const RIGHT_NNG_LEGEND: &str = "NNG,*,*,*,*,*,*,*";
const RIGHT_NNG_WITH_JONGSUNG_LEGEND: &str = "NNG,*,T,*,*,*,*,*";
const RIGHT_NNG_WITHOUT_JONGSUNG_LEGEND: &str = "NNG,*,F,*,*,*,*,*";

/// Context ids calibrated from the dictionary's id legends, used when
/// compiling user-dictionary entries (§4.5).
#[derive(Debug, Clone, Copy, Decode, Encode)]
pub struct CalibrationIds {
    pub left_id_nng: u16,
    pub right_id_nng: u16,
    pub right_id_nng_with_jongsung: u16,
    pub right_id_nng_without_jongsung: u16,
}

fn find_legend(content: &str, file: &str, legend: &str) -> Result<u16> {
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, char::is_whitespace);
        let id_str = parts
            .next()
            .ok_or_else(|| ParseError::at(file, lineno + 1, "missing id column"))?;
        let rest = parts.next().unwrap_or("").trim();
        if rest == legend {
            return id_str
                .parse()
                .map_err(|_| ParseError::at(file, lineno + 1, "id is not an integer").into());
        }
    }
    Err(ParseError::new(format!("no row matching legend '{legend}' found in {file}")).into())
}

/// Scans the two legend files for the rows identifying the general-noun
/// (NNG) context ids, with and without a final-consonant (jongsung).
pub fn calibrate(left_id_def: &str, right_id_def: &str) -> Result<CalibrationIds> {
    Ok(CalibrationIds {
        left_id_nng: find_legend(left_id_def, "left-id.def", LEFT_NNG_LEGEND)?,
        right_id_nng: find_legend(right_id_def, "right-id.def", RIGHT_NNG_LEGEND)?,
        right_id_nng_with_jongsung: find_legend(
            right_id_def,
            "right-id.def",
            RIGHT_NNG_WITH_JONGSUNG_LEGEND,
        )?,
        right_id_nng_without_jongsung: find_legend(
            right_id_def,
            "right-id.def",
            RIGHT_NNG_WITHOUT_JONGSUNG_LEGEND,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_calibration_ids() {
        let left = "0 NNG,*,*,*,*,*,*,*\n1 NNP,*,*,*,*,*,*,*";
        let right = "10 NNG,*,*,*,*,*,*,*\n11 NNG,*,T,*,*,*,*,*\n12 NNG,*,F,*,*,*,*,*";
        let ids = calibrate(left, right).unwrap();
        assert_eq!(ids.left_id_nng, 0);
        assert_eq!(ids.right_id_nng, 10);
        assert_eq!(ids.right_id_nng_with_jongsung, 11);
        assert_eq!(ids.right_id_nng_without_jongsung, 12);
    }

    #[test]
    fn errors_when_legend_missing() {
        let left = "0 NNP,*,*,*,*,*,*,*";
        let right = "10 NNG,*,*,*,*,*,*,*";
        assert!(calibrate(left, right).is_err());
    }
}
