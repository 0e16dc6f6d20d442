//! Board hierarchy and ordering engine.
//!
//! Every function here is a pure function of a board snapshot:
//! - Hierarchy building (flat parent-pointer list to a sorted forest)
//! - Parent assignment and deletion guards
//! - Slug derivation and deduplication
//! - Display order allocation and sibling swaps
//! - Pre-order flattening for tabular display
//!
//! None of them mutate their input or keep state between calls.

mod builder;
mod flatten;
mod guard;
mod order;
mod slug;

use std::cmp::Ordering;

use crate::board::Board;

pub use builder::{ancestors, build_hierarchy, children_of, depth_of, BoardNode, Forest, Walk};
pub use flatten::{flatten, FlatBoard};
pub use guard::{
    descendants, ensure_deletable, validate_parent_assignment, HasChildren, ParentError,
};
pub use order::{
    compute_move_swap, next_display_order, next_display_order_with_step, plan_move,
    renumber_siblings, MoveDirection, MoveError, MovePlan, OrderAssignment, SwapPlan, ORDER_STEP,
};
pub use slug::{allocate_slug, is_valid_slug, slugify, SlugError, FALLBACK_SLUG};

/// Display ordering within a sibling group: `display_order`, then name,
/// then id so that equal rows still sort deterministically.
pub(crate) fn sibling_cmp(a: &Board, b: &Board) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
