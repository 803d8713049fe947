//! Dense connection-cost matrix (§3, §4.6).

use bincode::{Decode, Encode};

use crate::errors::{ParseError, Result};

/// A dense `forward_size` × `backward_size` connection-cost matrix.
///
/// `cost(right_id_of_previous, left_id_of_current)` is
/// `matrix[backward_size * right_id + left_id]`.
#[derive(Debug, Clone, Decode, Encode)]
pub struct ConnectionCost {
    forward_size: u32,
    backward_size: u32,
    matrix: Vec<i16>,
}

impl ConnectionCost {
    /// Builds a matrix from a flat, row-major-by-forward-id vector.
    pub fn from_flat(forward_size: u32, backward_size: u32, matrix: Vec<i16>) -> Result<Self> {
        let expected = forward_size as usize * backward_size as usize;
        if matrix.len() != expected {
            return Err(ParseError::new(format!(
                "matrix.def declared {forward_size}x{backward_size} ({expected} cells) but found {} cells",
                matrix.len()
            ))
            .into());
        }
        Ok(Self {
            forward_size,
            backward_size,
            matrix,
        })
    }

    pub fn forward_size(&self) -> u32 {
        self.forward_size
    }

    pub fn backward_size(&self) -> u32 {
        self.backward_size
    }

    /// Cost of connecting a morpheme whose right id is `right_id` to one
    /// whose left id is `left_id`.
    #[inline]
    pub fn cost(&self, right_id: u16, left_id: u16) -> i32 {
        let idx = self.backward_size as usize * right_id as usize + left_id as usize;
        i32::from(self.matrix[idx])
    }
}

/// Parses a `matrix.def` file: first line `forward_size backward_size`,
/// following lines `forward_id backward_id cost`.
pub fn parse_matrix_def(content: &str) -> Result<ConnectionCost> {
    let mut lines = content.lines().enumerate();
    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::new("matrix.def is empty, expected a size header"))?;
    let mut header_fields = header.split_whitespace();
    let forward_size: u32 = header_fields
        .next()
        .ok_or_else(|| ParseError::new("matrix.def header missing forward_size"))?
        .parse()
        .map_err(|_| ParseError::at("matrix.def", 1, "forward_size is not an integer"))?;
    let backward_size: u32 = header_fields
        .next()
        .ok_or_else(|| ParseError::new("matrix.def header missing backward_size"))?
        .parse()
        .map_err(|_| ParseError::at("matrix.def", 1, "backward_size is not an integer"))?;

    let mut matrix = vec![0i16; forward_size as usize * backward_size as usize];
    for (lineno, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let fwd: u32 = fields
            .next()
            .ok_or_else(|| ParseError::at("matrix.def", lineno + 1, "missing forward_id"))?
            .parse()
            .map_err(|_| ParseError::at("matrix.def", lineno + 1, "forward_id is not an integer"))?;
        let bwd: u32 = fields
            .next()
            .ok_or_else(|| ParseError::at("matrix.def", lineno + 1, "missing backward_id"))?
            .parse()
            .map_err(|_| ParseError::at("matrix.def", lineno + 1, "backward_id is not an integer"))?;
        let cost: i16 = fields
            .next()
            .ok_or_else(|| ParseError::at("matrix.def", lineno + 1, "missing cost"))?
            .parse()
            .map_err(|_| ParseError::at("matrix.def", lineno + 1, "cost is not an integer"))?;
        let idx = backward_size as usize * fwd as usize + bwd as usize;
        *matrix.get_mut(idx).ok_or_else(|| {
            ParseError::at("matrix.def", lineno + 1, "forward_id/backward_id out of bounds")
        })? = cost;
    }

    ConnectionCost::from_flat(forward_size, backward_size, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_looks_up_cells() {
        let def = "2 2\n0 0 -5\n0 1 3\n1 0 7\n1 1 -2";
        let matrix = parse_matrix_def(def).unwrap();
        assert_eq!(matrix.cost(0, 0), -5);
        assert_eq!(matrix.cost(0, 1), 3);
        assert_eq!(matrix.cost(1, 0), 7);
        assert_eq!(matrix.cost(1, 1), -2);
    }

    #[test]
    fn rejects_out_of_bounds_cells() {
        let def = "1 1\n0 1 5";
        assert!(parse_matrix_def(def).is_err());
    }
}
