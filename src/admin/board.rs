//! Board management for administrators.
//!
//! Each operation reads a fresh snapshot, runs the pure hierarchy decisions
//! against it and only then calls the repository. Nothing is retried: a
//! failed write is reported as is.

use tracing::{debug, info, warn};

use crate::board::{validate_description, validate_name, Board, BoardId, BoardUpdate, NewBoard};
use crate::config::BoardsConfig;
use crate::db::BoardRepository;
use crate::hierarchy::{
    allocate_slug, ancestors, build_hierarchy, depth_of, ensure_deletable, flatten,
    next_display_order_with_step, plan_move, renumber_siblings, validate_parent_assignment,
    BoardNode, FlatBoard, Forest, MoveDirection, SwapPlan, ORDER_STEP,
};

use super::{from_write_error, AdminError};

fn board_not_found(id: BoardId) -> AdminError {
    AdminError::NotFound(format!("board {id}"))
}

fn log_failure(action: &str, err: &AdminError) {
    match err {
        AdminError::Repository(e) => warn!("{} failed: {}", action, e),
        other => debug!("{} rejected ({}): {}", action, other.code(), other),
    }
}

/// Admin service for board management.
pub struct BoardAdminService<'a, R: BoardRepository> {
    repo: &'a R,
    order_step: i32,
    max_depth: Option<usize>,
}

impl<'a, R: BoardRepository> BoardAdminService<'a, R> {
    /// Create a new BoardAdminService with default settings.
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            order_step: ORDER_STEP,
            max_depth: None,
        }
    }

    /// Create a new BoardAdminService using the `[boards]` configuration.
    pub fn with_config(repo: &'a R, config: &BoardsConfig) -> Self {
        Self {
            repo,
            order_step: config.order_step,
            max_depth: config.max_depth,
        }
    }

    fn logged<T>(
        &self,
        action: &str,
        op: impl FnOnce() -> Result<T, AdminError>,
    ) -> Result<T, AdminError> {
        op().map_err(|err| {
            log_failure(action, &err);
            err
        })
    }

    fn snapshot(&self) -> Result<Vec<Board>, AdminError> {
        Ok(self.repo.list_all()?)
    }

    fn check_depth(
        &self,
        snapshot: &[Board],
        parent_id: Option<BoardId>,
        subtree_height: usize,
    ) -> Result<(), AdminError> {
        let Some(max_depth) = self.max_depth else {
            return Ok(());
        };
        let level = parent_id.map_or(0, |p| depth_of(snapshot, p) + 1);
        if level + subtree_height > max_depth {
            return Err(AdminError::DepthExceeded { max_depth });
        }
        Ok(())
    }

    /// List all boards as a flattened tree for the management table.
    pub fn list_boards(&self) -> Result<Vec<FlatBoard>, AdminError> {
        self.logged("list boards", || {
            Ok(flatten(&build_hierarchy(&self.snapshot()?)))
        })
    }

    /// Get the board forest.
    pub fn board_tree(&self) -> Result<Forest, AdminError> {
        self.logged("load board tree", || Ok(build_hierarchy(&self.snapshot()?)))
    }

    /// Get a board by ID.
    pub fn get_board(&self, id: BoardId) -> Result<Board, AdminError> {
        self.logged("get board", || {
            self.repo.get_by_id(id)?.ok_or_else(|| board_not_found(id))
        })
    }

    /// Get the path from the root down to a board.
    pub fn breadcrumb(&self, id: BoardId) -> Result<Vec<Board>, AdminError> {
        self.logged("build breadcrumb", || {
            let snapshot = self.snapshot()?;
            let path: Vec<Board> = ancestors(&snapshot, id).into_iter().cloned().collect();
            if path.is_empty() {
                return Err(board_not_found(id));
            }
            Ok(path)
        })
    }

    /// Create a new board.
    ///
    /// The slug is allocated from the snapshot and the board is appended to
    /// the end of its sibling group. The requested `display_order` is ignored.
    pub fn create_board(&self, board: &NewBoard) -> Result<Board, AdminError> {
        self.logged("create board", || {
            validate_name(&board.name)?;
            validate_description(board.description.as_deref())?;

            let snapshot = self.snapshot()?;

            if let Some(parent_id) = board.parent_id {
                if !snapshot.iter().any(|b| b.id == parent_id) {
                    return Err(AdminError::NotFound(format!("parent board {parent_id}")));
                }
            }
            self.check_depth(&snapshot, board.parent_id, 0)?;

            let slug = allocate_slug(&snapshot, &board.name, board.slug.as_deref(), None)?;
            let display_order =
                next_display_order_with_step(&snapshot, board.parent_id, self.order_step);

            let record = board
                .clone()
                .with_slug(slug)
                .with_display_order(display_order);
            let created = self.repo.insert(&record).map_err(from_write_error)?;

            info!(
                "Created board {} \"{}\" (slug {:?}, parent {:?}, order {})",
                created.id, created.name, created.slug, created.parent_id, created.display_order
            );
            Ok(created)
        })
    }

    /// Update an existing board.
    ///
    /// A parent change is checked against the cycle guard and moves the
    /// board to the end of its new sibling group unless the update sets a
    /// display order itself. `slug: Some(None)` derives a fresh slug from the
    /// name; leaving `slug` unset keeps the current one even when the name
    /// changes.
    pub fn update_board(&self, id: BoardId, update: &BoardUpdate) -> Result<Board, AdminError> {
        self.logged("update board", || {
            let snapshot = self.snapshot()?;
            let existing = snapshot
                .iter()
                .find(|b| b.id == id)
                .ok_or_else(|| board_not_found(id))?;

            if update.is_empty() {
                return Ok(existing.clone());
            }

            if let Some(ref name) = update.name {
                validate_name(name)?;
            }
            if let Some(Some(ref description)) = update.description {
                validate_description(Some(description.as_str()))?;
            }

            let mut resolved = update.clone();

            if let Some(new_parent) = update.parent_id {
                if new_parent != existing.parent_id {
                    validate_parent_assignment(&snapshot, id, new_parent)?;

                    if let Some(parent_id) = new_parent {
                        if !snapshot.iter().any(|b| b.id == parent_id) {
                            return Err(AdminError::NotFound(format!(
                                "parent board {parent_id}"
                            )));
                        }
                    }

                    let height = build_hierarchy(&snapshot)
                        .find(id)
                        .map_or(0, BoardNode::height);
                    self.check_depth(&snapshot, new_parent, height)?;

                    if update.display_order.is_none() {
                        resolved.display_order = Some(next_display_order_with_step(
                            &snapshot,
                            new_parent,
                            self.order_step,
                        ));
                    }
                }
            }

            if let Some(ref desired) = update.slug {
                let name = update.name.as_deref().unwrap_or(&existing.name);
                let slug = allocate_slug(&snapshot, name, desired.as_deref(), Some(id))?;
                resolved.slug = Some(Some(slug));
            }

            let updated = self
                .repo
                .update(id, &resolved)
                .map_err(from_write_error)?
                .ok_or_else(|| board_not_found(id))?;

            info!("Updated board {} \"{}\"", updated.id, updated.name);
            Ok(updated)
        })
    }

    /// Delete a board.
    ///
    /// Refused while the board has children. The repository removes the
    /// board's posts along with it.
    pub fn delete_board(&self, id: BoardId) -> Result<(), AdminError> {
        self.logged("delete board", || {
            let snapshot = self.snapshot()?;
            if !snapshot.iter().any(|b| b.id == id) {
                return Err(board_not_found(id));
            }

            ensure_deletable(&snapshot, id)?;

            if !self.repo.delete(id)? {
                return Err(board_not_found(id));
            }

            info!("Deleted board {}", id);
            Ok(())
        })
    }

    /// Move a board one position up or down among its siblings.
    ///
    /// All display order writes go to the repository as one compare-and-swap;
    /// if any row changed since the snapshot nothing is written. A board tied
    /// with its neighbour gets its sibling group respaced in the same write.
    pub fn move_board(&self, id: BoardId, direction: MoveDirection) -> Result<SwapPlan, AdminError> {
        self.logged("move board", || {
            let snapshot = self.snapshot()?;
            let plan = plan_move(&snapshot, id, direction, self.order_step)?;

            self.repo.apply_orders(&plan.writes)?;

            if plan.renumbered() {
                info!(
                    "Renumbered {} sibling(s) of board {} to break a display order tie",
                    plan.writes.len(),
                    id
                );
            }
            info!(
                "Moved board {} {} (swapped with board {})",
                id, direction, plan.swap.a.id
            );
            Ok(plan.swap)
        })
    }

    /// Respace a sibling group to even gaps. Returns how many boards changed.
    pub fn normalize_order(&self, parent_id: Option<BoardId>) -> Result<usize, AdminError> {
        self.logged("normalize order", || {
            let snapshot = self.snapshot()?;
            let plan = renumber_siblings(&snapshot, parent_id, self.order_step);

            if !plan.is_empty() {
                self.repo.apply_orders(&plan)?;
                info!(
                    "Renumbered {} board(s) under parent {:?}",
                    plan.len(),
                    parent_id
                );
            }
            Ok(plan.len())
        })
    }
}
