//! boardtree - board hierarchy and ordering engine
//!
//! Turns a flat list of boards with parent links into an ordered forest,
//! guards parent assignments against cycles, allocates unique slugs and
//! plans reorder swaps between siblings.

pub mod admin;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod hierarchy;
pub mod logging;

pub use admin::{AdminError, BoardAdminService};
pub use board::{AccessLevel, Board, BoardId, BoardUpdate, NewBoard, ValidationError};
pub use config::Config;
pub use db::{BoardRepository, MemoryBoardRepository, RepositoryError};
pub use error::{BoardTreeError, Result};
pub use hierarchy::{
    allocate_slug, build_hierarchy, compute_move_swap, flatten, next_display_order,
    validate_parent_assignment, BoardNode, FlatBoard, Forest, MoveDirection, MoveError,
    OrderAssignment, ParentError, SlugError, SwapPlan,
};
