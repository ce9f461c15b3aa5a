use egui::{Pos2, Rect, Vec2};

/// Stable identity of a [`Tile`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TileId(String);

impl TileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a tile shows. Opaque to the engine apart from duplicate detection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TileContent {
    Name(String),

    /// An image reference (usually a URL) rendered as the tile background.
    Image(String),
}

impl TileContent {
    pub(super) fn is_blank(&self) -> bool {
        match self {
            Self::Name(s) | Self::Image(s) => s.trim().is_empty(),
        }
    }
}

impl From<&str> for TileContent {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for TileContent {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl std::fmt::Display for TileContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Image(url) => write!(f, "url({url})"),
        }
    }
}

/// The draggable unit of content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Tile {
    pub id: TileId,
    pub content: TileContent,
}

impl Tile {
    pub fn new(id: impl Into<TileId>, content: TileContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn named(id: impl Into<TileId>, name: impl Into<String>) -> Self {
        Self::new(id, TileContent::Name(name.into()))
    }
}

/// A named, ordered holder of tiles. The title doubles as its key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Tier {
    pub title: String,
    pub tiles: Vec<Tile>,
}

impl Tier {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tiles: Vec::new(),
        }
    }

    pub fn with_tiles(title: impl Into<String>, tiles: Vec<Tile>) -> Self {
        Self {
            title: title.into(),
            tiles,
        }
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = &TileId> + '_ {
        self.tiles.iter().map(|t| &t.id)
    }
}

/// The full collection state: the unassigned pool plus the ordered tiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BoardState {
    pub pool: Vec<Tile>,
    pub tiers: Vec<Tier>,
}

impl BoardState {
    /// Every tile id in board order: pool first, then tiers top to bottom.
    pub fn tile_ids(&self) -> impl Iterator<Item = &TileId> + '_ {
        self.pool
            .iter()
            .map(|t| &t.id)
            .chain(self.tiers.iter().flat_map(Tier::tile_ids))
    }

    pub fn tile_count(&self) -> usize {
        self.pool.len() + self.tiers.iter().map(|t| t.tiles.len()).sum::<usize>()
    }
}

/// Where a tile lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TileLocation {
    Pool,
    Tier(String),
}

impl TileLocation {
    pub fn tier(title: impl Into<String>) -> Self {
        Self::Tier(title.into())
    }

    pub fn tier_title(&self) -> Option<&str> {
        match self {
            Self::Pool => None,
            Self::Tier(title) => Some(title),
        }
    }
}

impl std::fmt::Display for TileLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pool => f.write_str("pool"),
            Self::Tier(title) => write!(f, "tier {title:?}"),
        }
    }
}

/// Insert-before or insert-after, relative to a drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Placement {
    Before,
    After,
}

/// Axis along which the midpoint of a target is compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Tiles are laid out in rows.
    Horizontal,

    /// Tiers are stacked.
    Vertical,
}

/// What the user grabbed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragHandle {
    Tile(TileId),
    Tier(String),
}

/// Snapshot of the dragged thing, taken at gesture start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Tile(Tile),
    Tier(Tier),
}

impl DragPayload {
    pub fn kind(&self) -> DragKind {
        match self {
            Self::Tile(_) => DragKind::Tile,
            Self::Tier(_) => DragKind::Tier,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Tile,
    Tier,
}

/// Which input pipeline started a drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Platform drag-and-drop callbacks.
    Native,

    /// Pointer-down/move/up emulation, used on touch devices.
    Pointer,
}

/// The element a drag is currently over (or was released on).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// The pool background.
    Pool,

    /// A tier background (header, empty area, footer).
    Tier(String),

    /// A specific tile, wherever it lives.
    Tile(TileId),
}

/// A region of the work surface used by the boundary policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Pool,
    Tiers,
}

/// "Is screen point P inside region R", answered by the rendering layer.
pub trait RegionQuery {
    fn contains(&self, region: Region, point: Pos2) -> bool;
}

/// Presentation-only follower for touch drags. Not part of the data model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub pointer_id: u64,

    /// Where to paint the follower, in screen space.
    pub rect: Rect,

    /// Pointer position relative to the top-left of the grabbed element.
    pub grab_offset: Vec2,
}

/// Result of a transfer engine call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Applied,

    /// The target is the dragged thing itself; nothing moves.
    SelfTarget,

    /// A referenced tile or tier no longer exists (e.g. a stale session).
    NotFound,
}

impl TransferOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Result of the boundary policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eviction {
    Kept,
    ReturnedToPool,
    Deleted,
}
