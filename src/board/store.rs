use super::error::BoardError;
use super::types::{
    BoardState, DragHandle, DragPayload, Tier, Tile, TileContent, TileId, TileLocation,
};

fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Owner of the pool and the tiers. The single source of truth for the board.
///
/// Lifecycle operations live here; drag-driven mutations are in `transfer.rs`.
#[derive(Debug, Default)]
pub(crate) struct CollectionStore {
    pub(super) state: BoardState,
    next_tile_serial: u64,
}

impl CollectionStore {
    pub(crate) fn new(state: BoardState) -> Self {
        Self {
            state,
            next_tile_serial: 1,
        }
    }

    pub(crate) fn state(&self) -> &BoardState {
        &self.state
    }

    pub(super) fn tier_index(&self, title: &str) -> Option<usize> {
        self.state.tiers.iter().position(|t| t.title == title)
    }

    pub(crate) fn tier(&self, title: &str) -> Option<&Tier> {
        self.state.tiers.iter().find(|t| t.title == title)
    }

    /// Is `title` taken by a tier other than the one at `except`?
    fn title_taken(&self, title: &str, except: Option<usize>) -> bool {
        self.state
            .tiers
            .iter()
            .enumerate()
            .any(|(i, t)| Some(i) != except && same_title(&t.title, title))
    }

    pub(crate) fn location_of(&self, id: &TileId) -> Option<TileLocation> {
        if self.state.pool.iter().any(|t| &t.id == id) {
            return Some(TileLocation::Pool);
        }
        self.state
            .tiers
            .iter()
            .find(|tier| tier.tiles.iter().any(|t| &t.id == id))
            .map(|tier| TileLocation::Tier(tier.title.clone()))
    }

    pub(crate) fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.state
            .pool
            .iter()
            .chain(self.state.tiers.iter().flat_map(|t| t.tiles.iter()))
            .find(|t| &t.id == id)
    }

    /// Snapshot of whatever `handle` grabs, plus where it currently sits.
    pub(crate) fn snapshot_payload(
        &self,
        handle: &DragHandle,
    ) -> Option<(DragPayload, TileLocation)> {
        match handle {
            DragHandle::Tile(id) => Some((
                DragPayload::Tile(self.tile(id)?.clone()),
                self.location_of(id)?,
            )),
            DragHandle::Tier(title) => Some((
                DragPayload::Tier(self.tier(title)?.clone()),
                TileLocation::Tier(title.clone()),
            )),
        }
    }

    pub(super) fn list(&self, location: &TileLocation) -> Option<&Vec<Tile>> {
        match location {
            TileLocation::Pool => Some(&self.state.pool),
            TileLocation::Tier(title) => self.tier(title).map(|t| &t.tiles),
        }
    }

    pub(super) fn list_mut(&mut self, location: &TileLocation) -> Option<&mut Vec<Tile>> {
        match location {
            TileLocation::Pool => Some(&mut self.state.pool),
            TileLocation::Tier(title) => self
                .state
                .tiers
                .iter_mut()
                .find(|t| &t.title == title)
                .map(|t| &mut t.tiles),
        }
    }

    // ------------------------------------------------------------------------
    // Tiers

    pub(crate) fn create_tier(&mut self, title: &str) -> Result<(), BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if self.title_taken(title, None) {
            return Err(BoardError::DuplicateTitle {
                title: title.to_owned(),
            });
        }
        self.state.tiers.push(Tier::new(title));
        log::debug!("tier created title={title:?}");
        Ok(())
    }

    /// Delete every tier. All their tiles are appended to the pool, tier by tier.
    pub(crate) fn clear_tiers(&mut self) -> usize {
        let tiers = std::mem::take(&mut self.state.tiers);
        let before = self.state.pool.len();
        self.state
            .pool
            .extend(tiers.into_iter().flat_map(|tier| tier.tiles));
        let freed = self.state.pool.len() - before;
        log::debug!("tiers cleared, {freed} tiles returned to pool");
        freed
    }

    // ------------------------------------------------------------------------
    // Tiles

    fn content_taken(&self, content: &TileContent) -> bool {
        self.state
            .pool
            .iter()
            .chain(self.state.tiers.iter().flat_map(|t| t.tiles.iter()))
            .any(|t| &t.content == content)
    }

    fn allocate_tile_id(&mut self) -> TileId {
        loop {
            let serial = self.next_tile_serial.max(1);
            self.next_tile_serial = serial.saturating_add(1);
            let id = TileId::new(format!("tile{serial}"));
            if self.location_of(&id).is_none() {
                return id;
            }
        }
    }

    /// Add a new tile at the end of the pool.
    pub(crate) fn create_tile(&mut self, content: TileContent) -> Result<TileId, BoardError> {
        if content.is_blank() {
            return Err(BoardError::EmptyTile);
        }
        if self.content_taken(&content) {
            return Err(BoardError::DuplicateTile { content });
        }
        let id = self.allocate_tile_id();
        log::debug!("tile created id={id} content={content}");
        self.state.pool.push(Tile::new(id.clone(), content));
        Ok(id)
    }

    /// Remove a tile entirely, wherever it is. Returns `false` if it wasn't found.
    pub(crate) fn delete_tile(&mut self, id: &TileId) -> bool {
        self.take_tile(id).is_some()
    }

    /// Empty the pool. Tiles in tiers are untouched.
    pub(crate) fn delete_pool_tiles(&mut self) -> usize {
        let removed = self.state.pool.len();
        self.state.pool.clear();
        removed
    }

    /// Detach a tile from its current list, returning it with where it was.
    pub(super) fn take_tile(&mut self, id: &TileId) -> Option<(Tile, TileLocation)> {
        let location = self.location_of(id)?;
        let list = self.list_mut(&location)?;
        let index = list.iter().position(|t| &t.id == id)?;
        Some((list.remove(index), location))
    }

    // ------------------------------------------------------------------------
    // Renames

    pub(super) fn title_conflicts(&self, title: &str, index: usize) -> Option<BoardError> {
        if title.trim().is_empty() {
            return Some(BoardError::EmptyTitle);
        }
        self.title_taken(title, Some(index))
            .then(|| BoardError::DuplicateTitle {
                title: title.to_owned(),
            })
    }

    pub(crate) fn replace_state(&mut self, state: BoardState) {
        self.state = state;
    }
}
