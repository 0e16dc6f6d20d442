//! Administration module for boardtree.
//!
//! This module provides the board management operations behind the admin
//! screens:
//! - Board listing as a flattened tree
//! - Create, update and delete with hierarchy and slug checks
//! - Manual reordering within a sibling group
//!
//! Every rejection carries a reason code (see [`AdminError::code`]) so that
//! callers can show a precise message.

mod board;

pub use board::BoardAdminService;

use thiserror::Error;

use crate::board::ValidationError;
use crate::db::RepositoryError;
use crate::hierarchy::{HasChildren, MoveError, ParentError, SlugError};

/// Admin-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Form input is invalid.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Target resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Parent assignment rejected.
    #[error("{0}")]
    Parent(#[from] ParentError),

    /// Slug rejected.
    #[error("{0}")]
    Slug(#[from] SlugError),

    /// Reorder rejected.
    #[error("{0}")]
    Move(#[from] MoveError),

    /// Board still has children.
    #[error("{0}")]
    HasChildren(#[from] HasChildren),

    /// The board would sit deeper than the configured limit.
    #[error("boards may be nested at most {max_depth} levels deep")]
    DepthExceeded {
        /// Configured limit.
        max_depth: usize,
    },

    /// Storage failure, passed through unchanged.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}

impl AdminError {
    /// Stable reason code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            AdminError::Validation(_) => "VALIDATION",
            AdminError::NotFound(_) => "NOT_FOUND",
            AdminError::Parent(ParentError::SelfParent) => "SELF_PARENT",
            AdminError::Parent(ParentError::CycleDetected { .. }) => "CYCLE_DETECTED",
            AdminError::Slug(SlugError::InvalidFormat(_)) => "INVALID_FORMAT",
            AdminError::Slug(SlugError::Duplicate(_)) => "DUPLICATE_SLUG",
            AdminError::Move(MoveError::NotFound(_)) => "NOT_FOUND",
            AdminError::Move(MoveError::BoundaryReached { .. }) => "BOUNDARY_REACHED",
            AdminError::HasChildren(_) => "HAS_CHILDREN",
            AdminError::DepthExceeded { .. } => "DEPTH_EXCEEDED",
            AdminError::Repository(RepositoryError::Conflict { .. }) => "CONFLICT",
            AdminError::Repository(_) => "PERSISTENCE",
        }
    }
}

/// Map a write failure, turning the repository's slug constraint into the
/// canonical duplicate-slug error.
pub(crate) fn from_write_error(err: RepositoryError) -> AdminError {
    match err {
        RepositoryError::SlugConflict(slug) => AdminError::Slug(SlugError::Duplicate(slug)),
        other => AdminError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::MoveDirection;

    #[test]
    fn test_codes() {
        assert_eq!(
            AdminError::from(ValidationError::NameEmpty).code(),
            "VALIDATION"
        );
        assert_eq!(
            AdminError::from(ParentError::SelfParent).code(),
            "SELF_PARENT"
        );
        assert_eq!(
            AdminError::from(ParentError::CycleDetected {
                board_id: 1,
                parent_id: 2
            })
            .code(),
            "CYCLE_DETECTED"
        );
        assert_eq!(
            AdminError::from(SlugError::Duplicate("x".to_string())).code(),
            "DUPLICATE_SLUG"
        );
        assert_eq!(
            AdminError::from(MoveError::BoundaryReached {
                board_id: 1,
                direction: MoveDirection::Up
            })
            .code(),
            "BOUNDARY_REACHED"
        );
        assert_eq!(
            AdminError::from(HasChildren {
                board_id: 1,
                children: vec![2]
            })
            .code(),
            "HAS_CHILDREN"
        );
        assert_eq!(
            AdminError::DepthExceeded { max_depth: 2 }.code(),
            "DEPTH_EXCEEDED"
        );
        assert_eq!(
            AdminError::from(RepositoryError::Backend("down".to_string())).code(),
            "PERSISTENCE"
        );
    }

    #[test]
    fn test_slug_conflict_maps_to_duplicate() {
        let err = from_write_error(RepositoryError::SlugConflict("sports".to_string()));
        assert_eq!(err, AdminError::Slug(SlugError::Duplicate("sports".to_string())));

        let err = from_write_error(RepositoryError::Backend("disk full".to_string()));
        assert_eq!(err.code(), "PERSISTENCE");
    }

    #[test]
    fn test_display_passes_through() {
        let err = AdminError::from(ValidationError::NameEmpty);
        assert_eq!(err.to_string(), "board name is required");

        let err = AdminError::NotFound("board 7".to_string());
        assert_eq!(err.to_string(), "board 7 not found");
    }
}
