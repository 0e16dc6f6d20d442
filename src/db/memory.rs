//! In-memory board repository.
//!
//! Backs tests and the snapshot viewer binary. All writes happen under one
//! lock, which gives `apply_orders` its all-or-nothing behaviour.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::repository_traits::{BoardRepository, RepositoryError};
use crate::board::{Board, BoardId, BoardUpdate, NewBoard};
use crate::hierarchy::OrderAssignment;

#[derive(Debug, Default)]
struct State {
    boards: BTreeMap<BoardId, Board>,
    next_id: BoardId,
}

impl State {
    fn slug_taken(&self, slug: &str, except: Option<BoardId>) -> bool {
        self.boards
            .values()
            .any(|b| Some(b.id) != except && b.slug.as_deref() == Some(slug))
    }
}

/// Board repository held in process memory.
#[derive(Debug)]
pub struct MemoryBoardRepository {
    state: Mutex<State>,
}

impl Default for MemoryBoardRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBoardRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                boards: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a repository seeded with existing boards.
    ///
    /// New boards get IDs above the largest seeded one.
    pub fn with_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        let boards: BTreeMap<BoardId, Board> = boards.into_iter().map(|b| (b.id, b)).collect();
        let next_id = boards.keys().next_back().map_or(1, |max| max + 1);
        Self {
            state: Mutex::new(State { boards, next_id }),
        }
    }

    /// Create a repository from a JSON array of boards.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let boards: Vec<Board> = serde_json::from_str(json)?;
        Ok(Self::with_boards(boards))
    }

    /// Load a repository from a JSON snapshot file.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let repo = Self::from_json(&content)?;
        debug!(
            "Loaded {} board(s) from {}",
            repo.len(),
            path.as_ref().display()
        );
        Ok(repo)
    }

    /// Number of stored boards.
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.boards.len()).unwrap_or(0)
    }

    /// Check if no boards are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Backend("board store lock poisoned".to_string()))
    }
}

impl BoardRepository for MemoryBoardRepository {
    fn list_all(&self) -> Result<Vec<Board>, RepositoryError> {
        let state = self.lock()?;
        let mut boards: Vec<Board> = state.boards.values().cloned().collect();
        boards.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(boards)
    }

    fn get_by_id(&self, id: BoardId) -> Result<Option<Board>, RepositoryError> {
        Ok(self.lock()?.boards.get(&id).cloned())
    }

    fn insert(&self, new_board: &NewBoard) -> Result<Board, RepositoryError> {
        let mut state = self.lock()?;

        if let Some(ref slug) = new_board.slug {
            if state.slug_taken(slug, None) {
                return Err(RepositoryError::SlugConflict(slug.clone()));
            }
        }

        let id = state.next_id;
        state.next_id += 1;
        let board = new_board.clone().into_board(id);
        state.boards.insert(id, board.clone());
        debug!("Inserted board {} ({})", id, board.name);
        Ok(board)
    }

    fn update(&self, id: BoardId, update: &BoardUpdate) -> Result<Option<Board>, RepositoryError> {
        let mut state = self.lock()?;

        if let Some(Some(ref slug)) = update.slug {
            if state.slug_taken(slug, Some(id)) {
                return Err(RepositoryError::SlugConflict(slug.clone()));
            }
        }

        let Some(board) = state.boards.get_mut(&id) else {
            return Ok(None);
        };
        board.apply(update);
        Ok(Some(board.clone()))
    }

    fn delete(&self, id: BoardId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.boards.remove(&id).is_some())
    }

    fn apply_orders(&self, assignments: &[OrderAssignment]) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;

        for assignment in assignments {
            let board = state
                .boards
                .get(&assignment.id)
                .ok_or(RepositoryError::Missing(assignment.id))?;
            if board.display_order != assignment.expected {
                return Err(RepositoryError::Conflict {
                    id: assignment.id,
                    expected: assignment.expected,
                    found: board.display_order,
                });
            }
        }

        for assignment in assignments {
            if let Some(board) = state.boards.get_mut(&assignment.id) {
                board.display_order = assignment.order;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryBoardRepository {
        MemoryBoardRepository::with_boards(vec![
            Board::new(1, "Sports").with_order(10).with_slug("sports"),
            Board::new(2, "Football")
                .with_parent(1)
                .with_order(10)
                .with_slug("football"),
            Board::new(3, "Basketball")
                .with_parent(1)
                .with_order(20)
                .with_slug("basketball"),
        ])
    }

    #[test]
    fn test_from_json() {
        let repo = MemoryBoardRepository::from_json(
            r#"[
                {"id": 1, "name": "Sports", "slug": "sports", "display_order": 10},
                {"id": 2, "name": "Football", "parent_id": 1, "display_order": 10}
            ]"#,
        )
        .unwrap();

        assert_eq!(repo.len(), 2);
        let football = repo.get_by_id(2).unwrap().unwrap();
        assert_eq!(football.parent_id, Some(1));
        assert_eq!(football.slug, None);

        assert!(MemoryBoardRepository::from_json("{not json").is_err());
    }

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"[{"id": 5, "name": "News"}]"#).unwrap();

        let repo = MemoryBoardRepository::load_snapshot(file.path()).unwrap();
        assert_eq!(repo.insert(&NewBoard::new("More")).unwrap().id, 6);
    }

    #[test]
    fn test_list_all_ordered() {
        let repo = seeded();
        let names: Vec<String> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names, vec!["Football", "Sports", "Basketball"]);
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let repo = seeded();
        let board = repo
            .insert(&NewBoard::new("Tennis").with_slug("tennis"))
            .unwrap();

        assert_eq!(board.id, 4);
        assert_eq!(repo.len(), 4);
        assert_eq!(repo.get_by_id(4).unwrap().unwrap().name, "Tennis");
    }

    #[test]
    fn test_insert_into_empty() {
        let repo = MemoryBoardRepository::new();
        assert!(repo.is_empty());

        let board = repo.insert(&NewBoard::new("First")).unwrap();
        assert_eq!(board.id, 1);
    }

    #[test]
    fn test_insert_slug_conflict() {
        let repo = seeded();
        let result = repo.insert(&NewBoard::new("Sports 2").with_slug("sports"));

        assert_eq!(
            result,
            Err(RepositoryError::SlugConflict("sports".to_string()))
        );
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_update() {
        let repo = seeded();
        let updated = repo
            .update(2, &BoardUpdate::new().name("Soccer").slug(Some("soccer")))
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Soccer");
        assert_eq!(updated.slug.as_deref(), Some("soccer"));
        assert!(repo.update(99, &BoardUpdate::new().name("x")).unwrap().is_none());
    }

    #[test]
    fn test_update_keeps_own_slug() {
        let repo = seeded();
        assert!(repo
            .update(2, &BoardUpdate::new().slug(Some("football")))
            .is_ok());
        assert_eq!(
            repo.update(2, &BoardUpdate::new().slug(Some("basketball"))),
            Err(RepositoryError::SlugConflict("basketball".to_string()))
        );
    }

    #[test]
    fn test_delete() {
        let repo = seeded();
        assert!(repo.delete(3).unwrap());
        assert!(!repo.delete(3).unwrap());
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_apply_orders() {
        let repo = seeded();
        repo.apply_orders(&[
            OrderAssignment {
                id: 2,
                order: 20,
                expected: 10,
            },
            OrderAssignment {
                id: 3,
                order: 10,
                expected: 20,
            },
        ])
        .unwrap();

        assert_eq!(repo.get_by_id(2).unwrap().unwrap().display_order, 20);
        assert_eq!(repo.get_by_id(3).unwrap().unwrap().display_order, 10);
    }

    #[test]
    fn test_apply_orders_stale_writes_nothing() {
        let repo = seeded();
        let result = repo.apply_orders(&[
            OrderAssignment {
                id: 2,
                order: 20,
                expected: 10,
            },
            OrderAssignment {
                id: 3,
                order: 10,
                expected: 30,
            },
        ]);

        assert_eq!(
            result,
            Err(RepositoryError::Conflict {
                id: 3,
                expected: 30,
                found: 20
            })
        );
        assert_eq!(repo.get_by_id(2).unwrap().unwrap().display_order, 10);
    }

    #[test]
    fn test_apply_orders_missing_board() {
        let repo = seeded();
        let result = repo.apply_orders(&[OrderAssignment {
            id: 42,
            order: 10,
            expected: 10,
        }]);

        assert_eq!(result, Err(RepositoryError::Missing(42)));
    }
}
