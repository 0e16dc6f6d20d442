//! Pre-order flattening of a board forest for tabular display.

use std::iter::Enumerate;
use std::slice;

use serde::Serialize;

use super::builder::{BoardNode, Forest};
use crate::board::Board;

/// One row of the flattened board table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatBoard {
    /// The stored record.
    pub board: Board,
    /// Depth in the tree (roots are 0).
    pub level: usize,
    /// First in its sibling group; "move up" does not apply.
    pub is_first_sibling: bool,
    /// Last in its sibling group; "move down" does not apply.
    pub is_last_sibling: bool,
}

/// Walk the forest depth-first, each board immediately followed by its
/// children.
pub fn flatten(forest: &Forest) -> Vec<FlatBoard> {
    let mut rows = Vec::with_capacity(forest.len());

    // One entry per open sibling group: remaining members and the last index.
    let mut stack: Vec<(Enumerate<slice::Iter<'_, BoardNode>>, usize)> =
        vec![group(forest.roots())];

    while let Some((members, last)) = stack.last_mut() {
        let last = *last;
        let Some((i, node)) = members.next() else {
            stack.pop();
            continue;
        };

        rows.push(FlatBoard {
            board: node.board.clone(),
            level: node.level,
            is_first_sibling: i == 0,
            is_last_sibling: i == last,
        });
        if !node.children.is_empty() {
            stack.push(group(&node.children));
        }
    }
    rows
}

fn group(nodes: &[BoardNode]) -> (Enumerate<slice::Iter<'_, BoardNode>>, usize) {
    (nodes.iter().enumerate(), nodes.len().saturating_sub(1))
}
