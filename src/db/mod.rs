//! Persistence interface for boardtree.
//!
//! This module defines the board repository contract and an in-memory
//! implementation of it.

mod memory;
mod repository_traits;

pub use memory::MemoryBoardRepository;
pub use repository_traits::{BoardRepository, RepositoryError};
