//! Repository trait definitions for boardtree.
//!
//! The hierarchy engine never persists anything itself. Storage backends
//! implement [`BoardRepository`] and the admin service drives them.
//!
//! # Contract
//!
//! - `list_all` returns every board ordered by `(display_order, name)`.
//! - `insert` and `update` enforce slug uniqueness and report a clash as
//!   [`RepositoryError::SlugConflict`], whatever the in-memory check said.
//! - `apply_orders` writes all assignments or none, and only if every row
//!   still has its `expected` order.
//! - `delete` also removes the board's posts.

use thiserror::Error;

use crate::board::{Board, BoardId, BoardUpdate, NewBoard};
use crate::hierarchy::OrderAssignment;

/// Errors reported by a board repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The slug is already stored on another board.
    #[error("slug \"{0}\" is already in use")]
    SlugConflict(String),

    /// A row changed since the snapshot the write was planned from.
    #[error("board {id} changed concurrently (expected display order {expected}, found {found})")]
    Conflict {
        /// Board whose row changed.
        id: BoardId,
        /// Value the plan was made from.
        expected: i32,
        /// Value currently stored.
        found: i32,
    },

    /// A board named by an order assignment does not exist.
    #[error("board {0} not found")]
    Missing(BoardId),

    /// Any other backend failure.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Trait for board repository operations.
pub trait BoardRepository {
    /// List all boards ordered by `(display_order, name)`.
    fn list_all(&self) -> Result<Vec<Board>, RepositoryError>;

    /// Get a board by ID.
    fn get_by_id(&self, id: BoardId) -> Result<Option<Board>, RepositoryError>;

    /// Insert a board and return it with its assigned ID.
    fn insert(&self, new_board: &NewBoard) -> Result<Board, RepositoryError>;

    /// Update a board by ID. Returns None if the board does not exist.
    fn update(&self, id: BoardId, update: &BoardUpdate) -> Result<Option<Board>, RepositoryError>;

    /// Delete a board and its posts. Returns false if it did not exist.
    fn delete(&self, id: BoardId) -> Result<bool, RepositoryError>;

    /// Atomically write display orders, compare-and-swap on `expected`.
    fn apply_orders(&self, assignments: &[OrderAssignment]) -> Result<(), RepositoryError>;
}
