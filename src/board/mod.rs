//! Board module for boardtree.
//!
//! This module provides the board record and the input it is built from:
//! - Board entity and access levels
//! - Create/update command builders
//! - Name and description validation

mod types;
mod validation;

pub use types::{AccessLevel, Board, BoardId, BoardUpdate, NewBoard};
pub use validation::{
    validate_description, validate_name, ValidationError, MAX_DESCRIPTION_LENGTH,
    MAX_NAME_LENGTH,
};
