//! Board model for boardtree.
//!
//! This module defines the Board struct, the AccessLevel enum and the
//! command builders used to create and edit boards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Board identifier (database row id).
pub type BoardId = i64;

/// Who may see a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Visible to everyone, including anonymous visitors.
    #[default]
    Public,
    /// Visible to signed-in members.
    Members,
    /// Visible to administrators only.
    Admin,
}

impl AccessLevel {
    /// Convert access level to its stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Members => "members",
            AccessLevel::Admin => "admin",
        }
    }

    /// Get display name for the access level.
    pub fn display_name(&self) -> &'static str {
        match self {
            AccessLevel::Public => "Public",
            AccessLevel::Members => "Members only",
            AccessLevel::Admin => "Admins only",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(AccessLevel::Public),
            "members" => Ok(AccessLevel::Members),
            "admin" => Ok(AccessLevel::Admin),
            _ => Err(format!("unknown access level: {s}")),
        }
    }
}

/// Board entity representing a discussion board.
///
/// `level` and `children` are not stored here; they are derived by
/// [`build_hierarchy`](crate::hierarchy::build_hierarchy) on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique board ID.
    pub id: BoardId,
    /// Display name.
    pub name: String,
    /// URL identifier, unique across all boards when set.
    #[serde(default)]
    pub slug: Option<String>,
    /// Board description.
    #[serde(default)]
    pub description: Option<String>,
    /// Who may see the board.
    #[serde(default)]
    pub access_level: AccessLevel,
    /// Parent board ID (None for root boards).
    #[serde(default)]
    pub parent_id: Option<BoardId>,
    /// Position within the sibling group.
    #[serde(default)]
    pub display_order: i32,
    /// Associated team, if any.
    #[serde(default)]
    pub team_id: Option<i64>,
    /// Presentation hint for the board page.
    #[serde(default)]
    pub view_type: Option<String>,
}

impl Board {
    /// Create a root board with the given ID and name.
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
            description: None,
            access_level: AccessLevel::Public,
            parent_id: None,
            display_order: 0,
            team_id: None,
            view_type: None,
        }
    }

    /// Set the parent board.
    pub fn with_parent(mut self, parent_id: BoardId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the display order.
    pub fn with_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Whether this board sits at the top of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Apply an update in place. Fields not set in the update are kept.
    pub fn apply(&mut self, update: &BoardUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
        if let Some(ref slug) = update.slug {
            self.slug = slug.clone();
        }
        if let Some(ref description) = update.description {
            self.description = description.clone();
        }
        if let Some(access_level) = update.access_level {
            self.access_level = access_level;
        }
        if let Some(parent_id) = update.parent_id {
            self.parent_id = parent_id;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        if let Some(team_id) = update.team_id {
            self.team_id = team_id;
        }
        if let Some(ref view_type) = update.view_type {
            self.view_type = view_type.clone();
        }
    }
}

/// Data for creating a new board.
///
/// `slug` is the desired slug; when it is None the slug is derived from the
/// name. `display_order` is filled in by the admin service before insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Desired slug.
    pub slug: Option<String>,
    /// Board description.
    pub description: Option<String>,
    /// Who may see the board (defaults to Public).
    pub access_level: AccessLevel,
    /// Parent board ID (None for root boards).
    pub parent_id: Option<BoardId>,
    /// Position within the sibling group.
    pub display_order: i32,
    /// Associated team.
    pub team_id: Option<i64>,
    /// Presentation hint.
    pub view_type: Option<String>,
}

impl NewBoard {
    /// Create a new root board with minimal required fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: None,
            access_level: AccessLevel::Public,
            parent_id: None,
            display_order: 0,
            team_id: None,
            view_type: None,
        }
    }

    /// Set the desired slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the access level.
    pub fn with_access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    /// Set the parent board.
    pub fn with_parent(mut self, parent_id: BoardId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the display order.
    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Set the team.
    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Set the view type.
    pub fn with_view_type(mut self, view_type: impl Into<String>) -> Self {
        self.view_type = Some(view_type.into());
        self
    }

    /// Turn the request into a stored record with the given ID.
    pub fn into_board(self, id: BoardId) -> Board {
        Board {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            access_level: self.access_level,
            parent_id: self.parent_id,
            display_order: self.display_order,
            team_id: self.team_id,
            view_type: self.view_type,
        }
    }
}

/// Data for updating an existing board.
///
/// For `slug`, `Some(None)` asks the admin service to derive a fresh slug
/// from the (possibly new) name. By the time an update reaches a repository
/// the slug has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardUpdate {
    /// New name.
    pub name: Option<String>,
    /// New slug.
    pub slug: Option<Option<String>>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New access level.
    pub access_level: Option<AccessLevel>,
    /// New parent board.
    pub parent_id: Option<Option<BoardId>>,
    /// New display order.
    pub display_order: Option<i32>,
    /// New team.
    pub team_id: Option<Option<i64>>,
    /// New view type.
    pub view_type: Option<Option<String>>,
}

impl BoardUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new slug (None = derive from name).
    pub fn slug(mut self, slug: Option<impl Into<String>>) -> Self {
        self.slug = Some(slug.map(|s| s.into()));
        self
    }

    /// Set new description.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|s| s.into()));
        self
    }

    /// Set new access level.
    pub fn access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = Some(access_level);
        self
    }

    /// Set new parent (None = make root).
    pub fn parent_id(mut self, parent_id: Option<BoardId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set new display order.
    pub fn display_order(mut self, display_order: i32) -> Self {
        self.display_order = Some(display_order);
        self
    }

    /// Set new team.
    pub fn team_id(mut self, team_id: Option<i64>) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Set new view type.
    pub fn view_type(mut self, view_type: Option<impl Into<String>>) -> Self {
        self.view_type = Some(view_type.map(|s| s.into()));
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.access_level.is_none()
            && self.parent_id.is_none()
            && self.display_order.is_none()
            && self.team_id.is_none()
            && self.view_type.is_none()
    }
}
