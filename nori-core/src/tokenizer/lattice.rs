//! The Viterbi lattice: an arena of nodes plus an end-position index,
//! replacing the raw-pointer node/path graph this module is grounded on
//! with plain `Vec`s and integer indices (§4.4, §9 redesign note).

use crate::connector::ConnectionCost;
use crate::word_idx::{LexType, WordIdx};

/// A candidate morpheme occupying `[start_char, end_char)` of the input.
#[derive(Debug, Clone)]
pub struct Node {
    pub start_char: usize,
    pub end_char: usize,
    pub word_idx: WordIdx,
    /// Index of the specific morpheme within the `word_idx`'s list, for
    /// `System`/`User` nodes. Unused (`0`) for `Unknown` nodes.
    pub morpheme_index: u16,
    pub left_id: u16,
    pub right_id: u16,
    /// This node's own word cost, including any space penalty (§4.4 step 7).
    pub word_cost: i32,
    /// Total cost of the best path from BOS through this node.
    pub min_cost: i32,
    /// Arena index of the best predecessor, or `None` for the BOS sentinel.
    pub back: Option<usize>,
}

fn sentinel(start_char: usize, end_char: usize, min_cost: i32, back: Option<usize>) -> Node {
    Node {
        start_char,
        end_char,
        word_idx: WordIdx::new(LexType::System, 0),
        morpheme_index: 0,
        left_id: crate::common::BOS_EOS_CONNECTION_ID,
        right_id: crate::common::BOS_EOS_CONNECTION_ID,
        word_cost: 0,
        min_cost,
        back,
    }
}

/// Arena-backed Viterbi lattice over a sentence of `len_chars` characters.
pub struct Lattice {
    nodes: Vec<Node>,
    /// `ends_at[p]` holds the arena indices of every node ending at char
    /// position `p`. Index `0` always holds just the BOS sentinel.
    ends_at: Vec<Vec<usize>>,
    bos_id: usize,
    eos_id: Option<usize>,
}

impl Lattice {
    /// Starts a new lattice for a sentence `len_chars` characters long, with
    /// the BOS sentinel node already inserted at position 0.
    pub fn new(len_chars: usize) -> Self {
        let bos = sentinel(0, 0, 0, None);
        let mut ends_at = vec![Vec::new(); len_chars + 1];
        ends_at[0].push(0);
        Self {
            nodes: vec![bos],
            ends_at,
            bos_id: 0,
            eos_id: None,
        }
    }

    /// Copies the node list ending at `from` onto position `to`, so that a
    /// span of skipped characters (whitespace, §4.4 step 6) does not break
    /// predecessor lookups for the node that resumes after it.
    pub fn bridge(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let carried = self.ends_at[from].clone();
        self.ends_at[to].extend(carried);
    }

    /// Adds a candidate node connecting to the best-cost predecessor among
    /// the nodes ending at `start_char`, per the Viterbi recurrence. Ties are
    /// broken in favor of the first candidate found. Returns `None` if no
    /// predecessor is reachable (a malformed lattice).
    #[allow(clippy::too_many_arguments)]
    pub fn add_node(
        &mut self,
        start_char: usize,
        end_char: usize,
        word_idx: WordIdx,
        morpheme_index: u16,
        left_id: u16,
        right_id: u16,
        word_cost: i32,
        connector: &ConnectionCost,
    ) -> Option<usize> {
        let (back, best_cost) = self.best_predecessor(start_char, left_id, word_cost, connector)?;

        let id = self.nodes.len();
        self.nodes.push(Node {
            start_char,
            end_char,
            word_idx,
            morpheme_index,
            left_id,
            right_id,
            word_cost,
            min_cost: best_cost,
            back: Some(back),
        });
        self.ends_at[end_char].push(id);
        Some(id)
    }

    fn best_predecessor(
        &self,
        start_char: usize,
        left_id: u16,
        word_cost: i32,
        connector: &ConnectionCost,
    ) -> Option<(usize, i32)> {
        let mut best = None;
        for &cand in &self.ends_at[start_char] {
            let prev = &self.nodes[cand];
            let cost = prev.min_cost + connector.cost(prev.right_id, left_id) as i32 + word_cost;
            match best {
                None => best = Some((cand, cost)),
                Some((_, best_cost)) if cost < best_cost => best = Some((cand, cost)),
                _ => {}
            }
        }
        best
    }

    /// Closes the lattice by connecting every node ending at `len_chars` to
    /// an EOS sentinel, and returns the id of the cheapest overall path's
    /// terminal node (the EOS sentinel).
    pub fn insert_eos(&mut self, len_chars: usize, connector: &ConnectionCost) -> Option<usize> {
        let (back, best_cost) =
            self.best_predecessor(len_chars, crate::common::BOS_EOS_CONNECTION_ID, 0, connector)?;
        let id = self.nodes.len();
        self.nodes.push(sentinel(len_chars, len_chars, best_cost, Some(back)));
        self.eos_id = Some(id);
        self.eos_id
    }

    /// Backtraces from EOS to BOS, returning the winning nodes in
    /// left-to-right order (BOS and EOS sentinels excluded).
    pub fn best_path(&self) -> Vec<&Node> {
        let mut path = Vec::new();
        let mut cur = self.eos_id;
        while let Some(id) = cur {
            if id != self.bos_id && Some(id) != self.eos_id {
                path.push(&self.nodes[id]);
            }
            cur = self.nodes[id].back;
        }
        path.reverse();
        path
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_path_connects_bos_to_eos() {
        let connector = ConnectionCost::from_flat(1, 1, vec![0]).unwrap();
        let mut lattice = Lattice::new(2);
        lattice
            .add_node(0, 2, WordIdx::new(LexType::System, 0), 0, 0, 0, 10, &connector)
            .unwrap();
        lattice.insert_eos(2, &connector);
        let path = lattice.best_path();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].start_char, 0);
        assert_eq!(path[0].end_char, 2);
    }

    #[test]
    fn picks_lower_cost_path() {
        let connector = ConnectionCost::from_flat(1, 1, vec![0]).unwrap();
        let mut lattice = Lattice::new(2);
        lattice
            .add_node(0, 1, WordIdx::new(LexType::System, 0), 0, 0, 0, 100, &connector)
            .unwrap();
        lattice
            .add_node(1, 2, WordIdx::new(LexType::System, 0), 0, 0, 0, 100, &connector)
            .unwrap();
        lattice
            .add_node(0, 2, WordIdx::new(LexType::System, 1), 0, 0, 0, 50, &connector)
            .unwrap();
        lattice.insert_eos(2, &connector);
        let path = lattice.best_path();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].word_idx.word_id, 1);
    }

    #[test]
    fn bridging_skips_a_gap() {
        let connector = ConnectionCost::from_flat(1, 1, vec![0]).unwrap();
        let mut lattice = Lattice::new(3);
        lattice
            .add_node(0, 1, WordIdx::new(LexType::System, 0), 0, 0, 0, 10, &connector)
            .unwrap();
        // position 1 is a skipped whitespace character
        lattice.bridge(1, 2);
        lattice
            .add_node(2, 3, WordIdx::new(LexType::System, 0), 0, 0, 0, 10, &connector)
            .unwrap();
        lattice.insert_eos(3, &connector);
        let path = lattice.best_path();
        assert_eq!(path.len(), 2);
    }
}
