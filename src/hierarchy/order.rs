//! Display order allocation and sibling reordering.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::builder::resolved_parent;
use super::children_of;
use crate::board::{Board, BoardId};

/// Gap between display orders of consecutively created boards.
///
/// The gap leaves room to slot boards in later without renumbering.
pub const ORDER_STEP: i32 = 10;

/// Direction of a manual reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the start of the sibling group.
    Up,
    /// Towards the end of the sibling group.
    Down,
}

impl MoveDirection {
    /// Convert direction to its string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            _ => Err(format!("unknown move direction: {s}")),
        }
    }
}

/// Reasons a move cannot be planned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The board is not in the snapshot.
    #[error("board {0} not found")]
    NotFound(BoardId),

    /// The board is already first (up) or last (down) among its siblings.
    #[error("board {board_id} cannot move {direction}: already at the boundary")]
    BoundaryReached {
        /// Board that was to move.
        board_id: BoardId,
        /// Requested direction.
        direction: MoveDirection,
    },
}

/// A new display order for one board, with the value it was planned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    /// Board to update.
    pub id: BoardId,
    /// Display order to write.
    pub order: i32,
    /// Display order read from the snapshot when the plan was made.
    pub expected: i32,
}

/// Two display order writes that exchange the positions of adjacent siblings.
///
/// `a` is the neighbour taking the moved board's old order; `b` is the moved
/// board taking the neighbour's. Both writes belong to one atomic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    /// The neighbouring sibling.
    pub a: OrderAssignment,
    /// The board that was asked to move.
    pub b: OrderAssignment,
}

impl SwapPlan {
    /// Both writes, neighbour first.
    pub fn assignments(&self) -> [OrderAssignment; 2] {
        [self.a, self.b]
    }
}

/// The writes that carry out a move.
///
/// `swap` names the two boards that trade places, with the orders they end
/// up with. When the pair shared a display order the whole sibling group is
/// respaced first, so `writes` can hold more than the two swapped rows. Every
/// write carries the order read from the snapshot, and all of them belong to
/// one atomic update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    /// The exchange itself.
    pub swap: SwapPlan,
    /// Every display order that changes.
    pub writes: Vec<OrderAssignment>,
}

impl MovePlan {
    /// Check if the sibling group had to be respaced.
    pub fn renumbered(&self) -> bool {
        self.swap.a.expected == self.swap.b.expected
    }
}

/// Display order for a new board appended to the given sibling group.
///
/// `max(display_order) + 10`, or `10` for an empty group.
pub fn next_display_order(boards: &[Board], parent_id: Option<BoardId>) -> i32 {
    next_display_order_with_step(boards, parent_id, ORDER_STEP)
}

/// Same as [`next_display_order`] with a custom gap.
pub fn next_display_order_with_step(
    boards: &[Board],
    parent_id: Option<BoardId>,
    step: i32,
) -> i32 {
    children_of(boards, parent_id)
        .into_iter()
        .map(|b| b.display_order)
        .max()
        .map_or(step, |max| max.saturating_add(step))
}

/// Plan moving a board one position up or down among its siblings.
///
/// Only the board and its neighbour change; every other sibling keeps its
/// display order.
///
/// # Examples
///
/// ```
/// use boardtree::board::Board;
/// use boardtree::hierarchy::{compute_move_swap, MoveDirection};
///
/// let boards = vec![
///     Board::new(1, "Sports").with_order(10),
///     Board::new(2, "Football").with_parent(1).with_order(10),
///     Board::new(3, "Basketball").with_parent(1).with_order(20),
/// ];
///
/// let plan = compute_move_swap(&boards, 3, MoveDirection::Up).unwrap();
/// assert_eq!((plan.a.id, plan.a.order), (2, 20));
/// assert_eq!((plan.b.id, plan.b.order), (3, 10));
/// ```
pub fn compute_move_swap(
    boards: &[Board],
    board_id: BoardId,
    direction: MoveDirection,
) -> Result<SwapPlan, MoveError> {
    let board = boards
        .iter()
        .find(|b| b.id == board_id)
        .ok_or(MoveError::NotFound(board_id))?;

    let ids: HashSet<BoardId> = boards.iter().map(|b| b.id).collect();
    let siblings = children_of(boards, resolved_parent(&ids, board));
    let index = siblings
        .iter()
        .position(|b| b.id == board_id)
        .ok_or(MoveError::NotFound(board_id))?;

    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|&i| i < siblings.len()),
    }
    .ok_or(MoveError::BoundaryReached {
        board_id,
        direction,
    })?;

    let current = siblings[index];
    let neighbour = siblings[target];

    Ok(SwapPlan {
        a: OrderAssignment {
            id: neighbour.id,
            order: current.display_order,
            expected: neighbour.display_order,
        },
        b: OrderAssignment {
            id: current.id,
            order: neighbour.display_order,
            expected: current.display_order,
        },
    })
}

/// Plan a move that always changes the display sequence.
///
/// Same as [`compute_move_swap`], except that a board tied with its
/// neighbour on `display_order` would swap equal values. The sibling group is
/// then respaced to `step, 2*step, ...` and the swap is planned on the
/// respaced orders.
///
/// # Examples
///
/// ```
/// use boardtree::board::Board;
/// use boardtree::hierarchy::{plan_move, MoveDirection};
///
/// let boards = vec![
///     Board::new(1, "Alpha").with_order(10),
///     Board::new(2, "Beta").with_order(10),
/// ];
///
/// let plan = plan_move(&boards, 2, MoveDirection::Up, 10).unwrap();
/// assert_eq!((plan.swap.a.id, plan.swap.a.order), (1, 20));
/// assert_eq!((plan.swap.b.id, plan.swap.b.order), (2, 10));
/// ```
pub fn plan_move(
    boards: &[Board],
    board_id: BoardId,
    direction: MoveDirection,
    step: i32,
) -> Result<MovePlan, MoveError> {
    let swap = compute_move_swap(boards, board_id, direction)?;
    if swap.a.expected != swap.b.expected {
        return Ok(MovePlan {
            swap,
            writes: swap.assignments().to_vec(),
        });
    }

    let ids: HashSet<BoardId> = boards.iter().map(|b| b.id).collect();
    let parent_id = boards
        .iter()
        .find(|b| b.id == board_id)
        .and_then(|b| resolved_parent(&ids, b));

    let respaced = renumber_siblings(boards, parent_id, step.max(1));
    let new_orders: HashMap<BoardId, i32> = respaced.iter().map(|a| (a.id, a.order)).collect();
    let respaced_boards: Vec<Board> = boards
        .iter()
        .map(|b| {
            let mut b = b.clone();
            if let Some(&order) = new_orders.get(&b.id) {
                b.display_order = order;
            }
            b
        })
        .collect();
    let moved = compute_move_swap(&respaced_boards, board_id, direction)?;

    let stored: HashMap<BoardId, i32> = boards.iter().map(|b| (b.id, b.display_order)).collect();
    let stored_order = |id: BoardId| stored.get(&id).copied().unwrap_or_default();

    let mut finals: BTreeMap<BoardId, i32> = new_orders.into_iter().collect();
    for assignment in moved.assignments() {
        finals.insert(assignment.id, assignment.order);
    }

    let writes = finals
        .into_iter()
        .filter(|&(id, order)| {
            id == moved.a.id || id == moved.b.id || order != stored_order(id)
        })
        .map(|(id, order)| OrderAssignment {
            id,
            order,
            expected: stored_order(id),
        })
        .collect();

    Ok(MovePlan {
        swap: SwapPlan {
            a: OrderAssignment {
                expected: stored_order(moved.a.id),
                ..moved.a
            },
            b: OrderAssignment {
                expected: stored_order(moved.b.id),
                ..moved.b
            },
        },
        writes,
    })
}

/// Respace a sibling group to `step, 2*step, ...` in its current display
/// sequence.
///
/// Returns only the boards whose order changes. Used to repair groups whose
/// orders collided.
pub fn renumber_siblings(
    boards: &[Board],
    parent_id: Option<BoardId>,
    step: i32,
) -> Vec<OrderAssignment> {
    children_of(boards, parent_id)
        .into_iter()
        .zip(1..)
        .filter_map(|(board, position): (&Board, i32)| {
            let order = position.saturating_mul(step);
            (order != board.display_order).then_some(OrderAssignment {
                id: board.id,
                order,
                expected: board.display_order,
            })
        })
        .collect()
}
