//! Test helpers for integration tests.
//!
//! Provides board fixtures and helpers for applying planned writes to a
//! snapshot.

#![allow(dead_code)]

use boardtree::hierarchy::{build_hierarchy, flatten};
use boardtree::{Board, BoardId, MemoryBoardRepository, OrderAssignment};

/// Build a board record with the fields the hierarchy looks at.
pub fn board(id: BoardId, parent_id: Option<BoardId>, display_order: i32, name: &str) -> Board {
    let mut board = Board::new(id, name).with_order(display_order);
    board.parent_id = parent_id;
    board
}

/// Sports with two children, Football before Basketball.
pub fn sports_boards() -> Vec<Board> {
    vec![
        board(1, None, 10, "Sports"),
        board(2, Some(1), 10, "Football"),
        board(3, Some(1), 20, "Basketball"),
    ]
}

/// A deeper set: two roots, three levels under the first.
///
/// ```text
/// Sports (1)
///   Football (2)
///     Premier League (4)
///       Liverpool (6)
///   Basketball (3)
/// News (5)
/// ```
pub fn league_boards() -> Vec<Board> {
    vec![
        board(1, None, 10, "Sports"),
        board(2, Some(1), 10, "Football"),
        board(3, Some(1), 20, "Basketball"),
        board(4, Some(2), 10, "Premier League"),
        board(5, None, 20, "News"),
        board(6, Some(4), 10, "Liverpool"),
    ]
}

/// Repository seeded with the given boards.
pub fn seeded_repo(boards: Vec<Board>) -> MemoryBoardRepository {
    MemoryBoardRepository::with_boards(boards)
}

/// Apply order writes to a snapshot copy.
pub fn apply_orders(boards: &[Board], assignments: &[OrderAssignment]) -> Vec<Board> {
    boards
        .iter()
        .cloned()
        .map(|mut b| {
            if let Some(a) = assignments.iter().find(|a| a.id == b.id) {
                b.display_order = a.order;
            }
            b
        })
        .collect()
}

/// Names in flattened order.
pub fn flat_names(boards: &[Board]) -> Vec<String> {
    flatten(&build_hierarchy(boards))
        .into_iter()
        .map(|row| row.board.name)
        .collect()
}

/// IDs in flattened order.
pub fn flat_ids(boards: &[Board]) -> Vec<BoardId> {
    flatten(&build_hierarchy(boards))
        .into_iter()
        .map(|row| row.board.id)
        .collect()
}
