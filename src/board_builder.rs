use crate::board::{BoardError, BoardOptions, CollectionStore, TierBoard, TileContent, TileLocation};

/// Build a [`TierBoard`] from code: tiers with their tiles, plus pool tiles.
///
/// Everything goes through the same validation as the interactive operations (non-empty and
/// unique tier titles, non-empty and unique tile contents). The first failure is remembered and
/// returned from [`BoardBuilder::build`]; later calls are skipped.
///
/// ```
/// use egui_tierlist::{BoardBuilder, TileContent};
///
/// let board = BoardBuilder::new()
///     .tier("S", ["ferris"])
///     .tier("A", ["gopher", "duke"])
///     .pool(["tux"])
///     .build()
///     .unwrap();
///
/// assert_eq!(board.tiers().len(), 2);
/// assert_eq!(board.pool()[0].content, TileContent::Name("tux".to_owned()));
/// ```
pub struct BoardBuilder {
    options: BoardOptions,
    store: CollectionStore,
    error: Option<BoardError>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// A builder for a board with default options. `default_tier_titles` is not applied:
    /// the scripted tiers replace it.
    pub fn new() -> Self {
        Self::with_options(BoardOptions::default())
    }

    pub fn with_options(options: BoardOptions) -> Self {
        Self {
            options,
            store: CollectionStore::default(),
            error: None,
        }
    }

    fn step(mut self, f: impl FnOnce(&mut CollectionStore) -> Result<(), BoardError>) -> Self {
        if self.error.is_none() {
            self.error = f(&mut self.store).err();
        }
        self
    }

    /// Append a tier holding the given tiles, top to bottom.
    #[must_use]
    pub fn tier<C: Into<TileContent>>(
        self,
        title: &str,
        tiles: impl IntoIterator<Item = C>,
    ) -> Self {
        let location = TileLocation::tier(title);
        self.step(|store| {
            store.create_tier(title)?;
            for content in tiles {
                let id = store.create_tile(content.into())?;
                store.move_tile(&id, &TileLocation::Pool, &location, None);
            }
            Ok(())
        })
    }

    /// Append tiles to the pool.
    #[must_use]
    pub fn pool<C: Into<TileContent>>(self, tiles: impl IntoIterator<Item = C>) -> Self {
        self.step(|store| {
            for content in tiles {
                store.create_tile(content.into())?;
            }
            Ok(())
        })
    }

    /// Finish building, producing the board.
    pub fn build(self) -> Result<TierBoard, BoardError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(TierBoard::from_parts(self.options, self.store)),
        }
    }
}
