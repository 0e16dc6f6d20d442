//! Structural guards: parent assignment and deletion.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::board::{Board, BoardId};

/// Reasons a parent assignment is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentError {
    /// The board was asked to be its own parent.
    #[error("a board cannot be its own parent")]
    SelfParent,

    /// The proposed parent is a descendant of the board.
    #[error("board {parent_id} is a descendant of board {board_id}")]
    CycleDetected {
        /// Board being moved.
        board_id: BoardId,
        /// Rejected parent.
        parent_id: BoardId,
    },
}

/// A board cannot be deleted while it still has children.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("board {board_id} still has {} child board(s)", .children.len())]
pub struct HasChildren {
    /// Board that was to be deleted.
    pub board_id: BoardId,
    /// IDs of its direct children.
    pub children: Vec<BoardId>,
}

/// Collect every descendant of a board by breadth-first expansion over the
/// flat snapshot. The board itself is not included.
pub fn descendants(boards: &[Board], id: BoardId) -> HashSet<BoardId> {
    let mut by_parent: HashMap<BoardId, Vec<BoardId>> = HashMap::new();
    for board in boards {
        if let Some(parent_id) = board.parent_id {
            by_parent.entry(parent_id).or_default().push(board.id);
        }
    }

    let mut found = HashSet::new();
    let mut queue = VecDeque::from([id]);

    while let Some(current) = queue.pop_front() {
        let Some(kids) = by_parent.get(&current) else {
            continue;
        };
        for &child in kids {
            if child != id && found.insert(child) {
                queue.push_back(child);
            }
        }
    }

    found
}

/// Decide whether `proposed_parent` may become the parent of `board_id`.
///
/// Making a board a root (`None`) is always allowed. This must pass before
/// any write that changes `parent_id`.
///
/// # Examples
///
/// ```
/// use boardtree::board::Board;
/// use boardtree::hierarchy::{validate_parent_assignment, ParentError};
///
/// let boards = vec![Board::new(1, "Sports"), Board::new(2, "Football").with_parent(1)];
///
/// assert!(validate_parent_assignment(&boards, 2, Some(1)).is_ok());
/// assert_eq!(validate_parent_assignment(&boards, 1, Some(1)), Err(ParentError::SelfParent));
/// assert!(validate_parent_assignment(&boards, 1, Some(2)).is_err());
/// ```
pub fn validate_parent_assignment(
    boards: &[Board],
    board_id: BoardId,
    proposed_parent: Option<BoardId>,
) -> Result<(), ParentError> {
    let Some(parent_id) = proposed_parent else {
        return Ok(());
    };

    if parent_id == board_id {
        return Err(ParentError::SelfParent);
    }

    if descendants(boards, board_id).contains(&parent_id) {
        return Err(ParentError::CycleDetected {
            board_id,
            parent_id,
        });
    }

    Ok(())
}

/// Check that a board has no children and may be deleted.
pub fn ensure_deletable(boards: &[Board], board_id: BoardId) -> Result<(), HasChildren> {
    let children: Vec<BoardId> = boards
        .iter()
        .filter(|b| b.parent_id == Some(board_id) && b.id != board_id)
        .map(|b| b.id)
        .collect();

    if children.is_empty() {
        Ok(())
    } else {
        Err(HasChildren { board_id, children })
    }
}
