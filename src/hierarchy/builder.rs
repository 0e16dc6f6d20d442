//! Hierarchy building: flat board list to an ordered forest.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, warn};

use super::sibling_cmp;
use crate::board::{Board, BoardId};

/// A board placed in the hierarchy, with its derived level and children.
///
/// Walks over a node use an explicit stack, so a chain of any length can be
/// built, traversed and dropped.
pub struct BoardNode {
    /// The stored record.
    pub board: Board,
    /// Depth in the tree (roots are 0).
    pub level: usize,
    /// Child boards, sorted by display order then name.
    pub children: Vec<BoardNode>,
}

impl BoardNode {
    /// ID of the board at this node.
    pub fn id(&self) -> BoardId {
        self.board.id
    }

    /// Visit this node and every node below it, parents before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of edges on the longest path down to a leaf (a leaf is 0).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Number of boards in this subtree, including this one.
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Find a board in this subtree.
    pub fn find(&self, id: BoardId) -> Option<&BoardNode> {
        self.walk().find(|node| node.board.id == id)
    }
}

impl fmt::Debug for BoardNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<BoardId> = self.children.iter().map(BoardNode::id).collect();
        f.debug_struct("BoardNode")
            .field("board", &self.board)
            .field("level", &self.level)
            .field("children", &children)
            .finish()
    }
}

impl Drop for BoardNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a subtree. See [`BoardNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a BoardNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a BoardNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// An ordered set of board trees, one per root.
#[derive(Debug, Default)]
pub struct Forest {
    roots: Vec<BoardNode>,
}

impl Forest {
    /// Root nodes in display order.
    pub fn roots(&self) -> &[BoardNode] {
        &self.roots
    }

    /// Iterate over root nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, BoardNode> {
        self.roots.iter()
    }

    /// Number of trees.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Total number of boards in the forest.
    pub fn len(&self) -> usize {
        self.roots.iter().map(BoardNode::size).sum()
    }

    /// Check if the forest holds no boards.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a board anywhere in the forest.
    pub fn find(&self, id: BoardId) -> Option<&BoardNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a BoardNode;
    type IntoIter = std::slice::Iter<'a, BoardNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// Build the board forest from a flat snapshot.
///
/// A board becomes a root when its `parent_id` is unset, points at a board
/// missing from the snapshot, or points at itself. Every sibling group is
/// sorted by `(display_order, name)` and each node's level is its parent's
/// level plus one.
///
/// Boards caught in a parent cycle cannot be reached from any root. They are
/// promoted to roots so that nothing is dropped from the listing.
pub fn build_hierarchy(boards: &[Board]) -> Forest {
    let index: HashMap<BoardId, usize> = boards
        .iter()
        .enumerate()
        .map(|(i, board)| (board.id, i))
        .collect();

    let mut children: HashMap<BoardId, Vec<usize>> = HashMap::new();
    let mut root_indices = Vec::new();

    for (i, board) in boards.iter().enumerate() {
        match board.parent_id {
            Some(parent_id) if parent_id == board.id => {
                warn!("Board {} is its own parent; showing it as a root", board.id);
                root_indices.push(i);
            }
            Some(parent_id) if index.contains_key(&parent_id) => {
                children.entry(parent_id).or_default().push(i);
            }
            Some(parent_id) => {
                debug!(
                    "Board {} points at missing parent {}; showing it as a root",
                    board.id, parent_id
                );
                root_indices.push(i);
            }
            None => root_indices.push(i),
        }
    }

    root_indices.sort_by(|&a, &b| sibling_cmp(&boards[a], &boards[b]));

    let mut placed = HashSet::with_capacity(boards.len());
    let mut roots = Vec::with_capacity(root_indices.len());
    build_trees(boards, &children, root_indices, &mut placed, &mut roots);

    if placed.len() < boards.len() {
        let mut stranded: Vec<usize> = (0..boards.len()).filter(|i| !placed.contains(i)).collect();
        stranded.sort_by(|&a, &b| sibling_cmp(&boards[a], &boards[b]));

        for i in stranded {
            if placed.contains(&i) {
                continue;
            }
            warn!(
                "Board {} is part of a parent cycle; showing it as a root",
                boards[i].id
            );
            build_trees(boards, &children, [i], &mut placed, &mut roots);
        }
        roots.sort_by(|a, b| sibling_cmp(&a.board, &b.board));
    }

    Forest { roots }
}

/// A node under construction: its sorted children not yet visited and the
/// subtrees already finished.
struct Frame {
    index: usize,
    level: usize,
    pending: std::vec::IntoIter<usize>,
    built: Vec<BoardNode>,
}

impl Frame {
    fn open(
        boards: &[Board],
        children: &HashMap<BoardId, Vec<usize>>,
        index: usize,
        level: usize,
    ) -> Self {
        let mut child_indices = children.get(&boards[index].id).cloned().unwrap_or_default();
        child_indices.sort_by(|&a, &b| sibling_cmp(&boards[a], &boards[b]));
        Self {
            index,
            level,
            pending: child_indices.into_iter(),
            built: Vec::new(),
        }
    }

    fn close(self, boards: &[Board]) -> BoardNode {
        BoardNode {
            board: boards[self.index].clone(),
            level: self.level,
            children: self.built,
        }
    }
}

/// Build one tree per start index, depth-first with an explicit stack.
/// Finished trees are appended to `out`; boards already placed are skipped.
fn build_trees(
    boards: &[Board],
    children: &HashMap<BoardId, Vec<usize>>,
    starts: impl IntoIterator<Item = usize>,
    placed: &mut HashSet<usize>,
    out: &mut Vec<BoardNode>,
) {
    for start in starts {
        if !placed.insert(start) {
            continue;
        }

        let mut stack = vec![Frame::open(boards, children, start, 0)];
        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.pending.find(|c| !placed.contains(c)) {
                let level = top.level + 1;
                placed.insert(child);
                stack.push(Frame::open(boards, children, child, level));
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            let node = done.close(boards);
            match stack.last_mut() {
                Some(parent) => parent.built.push(node),
                None => out.push(node),
            }
        }
    }
}

/// Get the path from the root down to a board, including the board itself.
///
/// Returns an empty list if the board is not in the snapshot. The walk stops
/// at a missing parent or a repeated board, so a corrupt snapshot cannot
/// loop.
pub fn ancestors(boards: &[Board], id: BoardId) -> Vec<&Board> {
    let index: HashMap<BoardId, &Board> = boards.iter().map(|b| (b.id, b)).collect();

    let mut path = Vec::new();
    let mut seen = HashSet::new();
    let mut current = index.get(&id).copied();

    while let Some(board) = current {
        if !seen.insert(board.id) {
            break;
        }
        path.push(board);
        current = board.parent_id.and_then(|parent| index.get(&parent).copied());
    }

    path.reverse();
    path
}

/// Get the depth of a board (0 for roots and for boards not in the snapshot).
pub fn depth_of(boards: &[Board], id: BoardId) -> usize {
    ancestors(boards, id).len().saturating_sub(1)
}

/// The parent a board is shown under: `None` when it is stored as a root,
/// points at itself, or points at a board missing from the snapshot.
pub(crate) fn resolved_parent(ids: &HashSet<BoardId>, board: &Board) -> Option<BoardId> {
    board
        .parent_id
        .filter(|&parent_id| parent_id != board.id && ids.contains(&parent_id))
}

/// List the sibling group under `parent_id`, in display order.
///
/// Groups are resolved the way [`build_hierarchy`] places boards: `None`
/// lists the roots, including orphans and self-parented boards.
pub fn children_of(boards: &[Board], parent_id: Option<BoardId>) -> Vec<&Board> {
    let ids: HashSet<BoardId> = boards.iter().map(|b| b.id).collect();
    let mut group: Vec<&Board> = boards
        .iter()
        .filter(|b| resolved_parent(&ids, b) == parent_id)
        .collect();
    group.sort_by(|a, b| sibling_cmp(a, b));
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(id: BoardId, parent: Option<BoardId>, order: i32, name: &str) -> Board {
        let mut b = Board::new(id, name).with_order(order);
        b.parent_id = parent;
        b
    }

    fn names(nodes: &[BoardNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.board.name.as_str()).collect()
    }

    #[test]
    fn test_build_empty() {
        let forest = build_hierarchy(&[]);
        assert!(forest.is_empty());
        assert_eq!(forest.len(), 0);
    }

    #[test]
    fn test_build_sorts_roots_and_children() {
        let boards = vec![
            board(1, None, 20, "News"),
            board(2, None, 10, "Sports"),
            board(3, Some(2), 20, "Basketball"),
            board(4, Some(2), 10, "Football"),
            board(5, Some(2), 10, "Cricket"),
        ];

        let forest = build_hierarchy(&boards);

        assert_eq!(names(forest.roots()), vec!["Sports", "News"]);
        let sports = &forest.roots()[0];
        assert_eq!(names(&sports.children), vec!["Cricket", "Football", "Basketball"]);
        assert_eq!(forest.len(), 5);
        assert_eq!(forest.root_count(), 2);
    }

    #[test]
    fn test_build_assigns_levels() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 10, "Child"),
            board(3, Some(2), 10, "Grandchild"),
            board(4, Some(3), 10, "Great"),
        ];

        let forest = build_hierarchy(&boards);

        assert_eq!(forest.find(1).unwrap().level, 0);
        assert_eq!(forest.find(2).unwrap().level, 1);
        assert_eq!(forest.find(3).unwrap().level, 2);
        assert_eq!(forest.find(4).unwrap().level, 3);
        assert_eq!(forest.roots()[0].height(), 3);
    }

    #[test]
    fn test_build_input_order_irrelevant() {
        let boards = vec![
            board(3, Some(2), 10, "Grandchild"),
            board(2, Some(1), 10, "Child"),
            board(1, None, 10, "Root"),
        ];

        let forest = build_hierarchy(&boards);

        assert_eq!(forest.root_count(), 1);
        assert_eq!(forest.find(3).unwrap().level, 2);
    }

    #[test]
    fn test_build_orphan_becomes_root() {
        let boards = vec![board(1, None, 10, "Root"), board(2, Some(99), 5, "Orphan")];

        let forest = build_hierarchy(&boards);

        assert_eq!(names(forest.roots()), vec!["Orphan", "Root"]);
        assert_eq!(forest.find(2).unwrap().level, 0);
    }

    #[test]
    fn test_build_self_parent_becomes_root() {
        let boards = vec![board(1, Some(1), 10, "Loop")];

        let forest = build_hierarchy(&boards);

        assert_eq!(forest.root_count(), 1);
        assert!(forest.roots()[0].children.is_empty());
    }

    #[test]
    fn test_build_cycle_is_not_dropped() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(3), 10, "A"),
            board(3, Some(2), 20, "B"),
        ];

        let forest = build_hierarchy(&boards);

        assert_eq!(forest.len(), 3);
        let a = forest.find(2).unwrap();
        assert_eq!(a.level, 0);
        assert_eq!(names(&a.children), vec!["B"]);
    }

    #[test]
    fn test_node_size_and_find() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 10, "Child"),
            board(3, Some(1), 20, "Other"),
        ];

        let forest = build_hierarchy(&boards);
        let root = &forest.roots()[0];

        assert_eq!(root.size(), 3);
        assert_eq!(root.find(3).unwrap().board.name, "Other");
        assert!(forest.find(42).is_none());
        assert_eq!((&forest).into_iter().count(), 1);
    }

    #[test]
    fn test_ancestors() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 10, "Level1"),
            board(3, Some(2), 10, "Level2"),
        ];

        let path: Vec<&str> = ancestors(&boards, 3).iter().map(|b| b.name.as_str()).collect();
        assert_eq!(path, vec!["Root", "Level1", "Level2"]);
        assert!(ancestors(&boards, 99).is_empty());
    }

    #[test]
    fn test_ancestors_stops_on_cycle() {
        let boards = vec![board(1, Some(2), 10, "A"), board(2, Some(1), 10, "B")];

        assert_eq!(ancestors(&boards, 1).len(), 2);
    }

    #[test]
    fn test_depth_of() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 10, "Level1"),
            board(3, Some(2), 10, "Level2"),
            board(4, Some(77), 10, "Orphan"),
        ];

        assert_eq!(depth_of(&boards, 1), 0);
        assert_eq!(depth_of(&boards, 2), 1);
        assert_eq!(depth_of(&boards, 3), 2);
        assert_eq!(depth_of(&boards, 4), 0);
        assert_eq!(depth_of(&boards, 99), 0);
    }

    #[test]
    fn test_children_of_includes_orphans_in_roots() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(99), 20, "Orphan"),
            board(3, Some(3), 30, "Mirror"),
            board(4, Some(1), 10, "Child"),
        ];

        let roots: Vec<BoardId> = children_of(&boards, None).iter().map(|b| b.id).collect();
        assert_eq!(roots, vec![1, 2, 3]);
        assert!(children_of(&boards, Some(99)).is_empty());
        assert!(children_of(&boards, Some(3)).is_empty());
    }

    #[test]
    fn test_deep_chain() {
        let depth = 10_000;
        let boards: Vec<Board> = (1..=depth)
            .map(|id| board(id, (id > 1).then_some(id - 1), 10, "Level"))
            .collect();

        let forest = build_hierarchy(&boards);

        assert_eq!(forest.root_count(), 1);
        assert_eq!(forest.len(), depth as usize);
        let root = &forest.roots()[0];
        assert_eq!(root.height(), depth as usize - 1);
        assert_eq!(root.find(depth).unwrap().level, depth as usize - 1);
        assert_eq!(root.walk().last().unwrap().id(), depth);
        drop(forest);
    }

    #[test]
    fn test_walk_pre_order() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 10, "A"),
            board(3, Some(2), 10, "A1"),
            board(4, Some(1), 20, "B"),
        ];

        let forest = build_hierarchy(&boards);
        let ids: Vec<BoardId> = forest.roots()[0].walk().map(BoardNode::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_children_of() {
        let boards = vec![
            board(1, None, 10, "Root"),
            board(2, Some(1), 20, "Second"),
            board(3, Some(1), 10, "First"),
            board(4, None, 5, "Other root"),
        ];

        let kids: Vec<BoardId> = children_of(&boards, Some(1)).iter().map(|b| b.id).collect();
        assert_eq!(kids, vec![3, 2]);

        let roots: Vec<BoardId> = children_of(&boards, None).iter().map(|b| b.id).collect();
        assert_eq!(roots, vec![4, 1]);
    }
}
