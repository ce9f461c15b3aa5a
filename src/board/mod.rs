use egui::Pos2;

mod debug;
mod drop_policy;
mod drop_sanitize;
mod error;
mod geometry;
mod input;
mod integrity;
mod native;
mod options;
mod plan;
mod pointer;
mod release;
mod session;
mod store;
mod surface;
mod transfer;
mod types;

#[cfg(feature = "persistence")]
mod persistence;


pub use drop_sanitize::SanitizeReport;
pub use error::BoardError;
pub use geometry::resolve_placement;
pub use input::{Gesture, GestureOutcome};
pub use native::{DataTransfer, NativeGesture};
pub use options::BoardOptions;
pub use plan::DropPlan;
pub use pointer::PointerGesture;
pub use release::Resolution;
pub use session::SessionPhase;
pub use surface::BoardLayout;
pub use types::{
    Axis, BoardState, DragHandle, DragKind, DragPayload, DropTarget, Eviction, InputSource,
    Placement, Region, RegionQuery, Shadow, Tier, Tile, TileContent, TileId, TileLocation,
    TransferOutcome,
};

#[cfg(feature = "persistence")]
pub use persistence::{BOARD_SNAPSHOT_VERSION, BoardSnapshot, PersistenceError};

use debug::DebugLog;
use input::{DragInputPort as _, EngineContext, GestureContext};
use native::NativeDragAdapter;
use pointer::PointerDragAdapter;
use session::DragSession;
pub(crate) use store::CollectionStore;

/// A tier list: a pool of unassigned tiles plus an ordered list of titled tiers.
///
/// The board owns the data, the drag session and both input adapters. The host reports
/// element bounding boxes with [`Self::set_layout`] and forwards platform events to
/// [`Self::handle`]; it never mutates the lists itself.
///
/// Notes:
/// - At most one drag is in progress; a second start (from either input) is ignored.
/// - Native drag-and-drop and pointer/touch dragging end in the same release logic, so the
///   same gesture produces the same board on either path.
/// - Tiles released outside every region follow the boundary policy
///   (see [`BoardOptions::delete_pool_tiles_released_outside`]).
#[derive(Debug)]
pub struct TierBoard {
    pub options: BoardOptions,

    store: CollectionStore,
    session: DragSession,
    layout: BoardLayout,

    native: NativeDragAdapter,
    pointer: PointerDragAdapter,

    debug_log: DebugLog,
    debug_last_integrity_hash: u64,
}

impl Default for TierBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TierBoard {
    pub fn new() -> Self {
        Self::new_with_options(BoardOptions::default())
    }

    pub fn new_with_options(options: BoardOptions) -> Self {
        let mut store = CollectionStore::new(BoardState::default());
        for title in &options.default_tier_titles {
            if let Err(err) = store.create_tier(title) {
                log::warn!("skipping default tier {title:?}: {err}");
            }
        }
        Self::from_parts(options, store)
    }

    pub(crate) fn from_parts(options: BoardOptions, store: CollectionStore) -> Self {
        let debug_log = DebugLog::new(options.debug_event_log, options.debug_event_log_capacity);
        Self {
            options,
            store,
            session: DragSession::default(),
            layout: BoardLayout::default(),
            native: NativeDragAdapter::default(),
            pointer: PointerDragAdapter::default(),
            debug_log,
            debug_last_integrity_hash: integrity::hash_issues(&[]),
        }
    }

    // ------------------------------------------------------------------------
    // Queries

    pub fn state(&self) -> &BoardState {
        self.store.state()
    }

    pub fn pool(&self) -> &[Tile] {
        &self.store.state().pool
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.store.state().tiers
    }

    /// Exact (case-sensitive) lookup.
    pub fn tier(&self, title: &str) -> Option<&Tier> {
        self.store.tier(title)
    }

    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.store.tile(id)
    }

    pub fn location_of(&self, id: &TileId) -> Option<TileLocation> {
        self.store.location_of(id)
    }

    // ------------------------------------------------------------------------
    // Tier and tile lifecycle

    pub fn create_tier(&mut self, title: &str) -> Result<(), BoardError> {
        self.begin_event();
        self.store.create_tier(title)?;
        self.debug_log.push(format!("create_tier {title:?}"));
        self.after_mutation("create_tier");
        Ok(())
    }

    /// Delete a tier; its tiles go to the end of the pool.
    pub fn remove_tier(&mut self, title: &str) -> TransferOutcome {
        self.begin_event();
        let outcome = self.store.remove_tier(title);
        self.debug_log
            .push(format!("remove_tier {title:?} -> {outcome:?}"));
        self.after_mutation("remove_tier");
        outcome
    }

    /// Delete every tier; all their tiles flow back into the pool in tier order.
    pub fn clear_tiers(&mut self) -> usize {
        self.begin_event();
        let freed = self.store.clear_tiers();
        self.debug_log.push(format!("clear_tiers freed={freed}"));
        self.after_mutation("clear_tiers");
        freed
    }

    pub fn rename_tier(
        &mut self,
        old_title: &str,
        new_title: &str,
    ) -> Result<TransferOutcome, BoardError> {
        self.begin_event();
        let outcome = self.store.rename_tier(old_title, new_title)?;
        self.debug_log
            .push(format!("rename_tier {old_title:?} -> {new_title:?}: {outcome:?}"));
        self.after_mutation("rename_tier");
        Ok(outcome)
    }

    /// Add a tile at the end of the pool and return its generated id.
    pub fn create_tile(&mut self, content: TileContent) -> Result<TileId, BoardError> {
        self.begin_event();
        let id = self.store.create_tile(content)?;
        self.debug_log.push(format!("create_tile {id}"));
        self.after_mutation("create_tile");
        Ok(id)
    }

    pub fn delete_tile(&mut self, id: &TileId) -> bool {
        self.begin_event();
        let deleted = self.store.delete_tile(id);
        self.debug_log
            .push(format!("delete_tile {id} deleted={deleted}"));
        self.after_mutation("delete_tile");
        deleted
    }

    /// Empty the pool. Returns how many tiles were removed.
    pub fn delete_pool_tiles(&mut self) -> usize {
        self.begin_event();
        let removed = self.store.delete_pool_tiles();
        self.debug_log
            .push(format!("delete_pool_tiles removed={removed}"));
        self.after_mutation("delete_pool_tiles");
        removed
    }

    /// Replace the whole board, e.g. with a loaded preset.
    ///
    /// Any drag in progress is aborted. The state is sanitized so the board invariants hold:
    /// tiers with empty or repeated titles are dropped (their tiles join the pool) and repeated
    /// tile ids keep only their first occurrence.
    pub fn override_state(&mut self, state: BoardState) -> SanitizeReport {
        self.abort_drag();
        self.begin_event();
        let (state, report) = drop_sanitize::sanitize_board_state(state);
        self.debug_log.push(format!(
            "override_state tiers={} tiles={} clean={}",
            state.tiers.len(),
            state.tile_count(),
            report.is_clean()
        ));
        self.store.replace_state(state);
        self.after_mutation("override_state");
        report
    }

    // ------------------------------------------------------------------------
    // Transfer engine

    pub fn reposition_tier(
        &mut self,
        dragged: &str,
        target: &str,
        placement: Placement,
    ) -> TransferOutcome {
        self.begin_event();
        let outcome = self.store.reposition_tier(dragged, target, placement);
        self.debug_log.push(format!(
            "reposition_tier {dragged:?} {placement:?} {target:?} -> {outcome:?}"
        ));
        self.after_mutation("reposition_tier");
        outcome
    }

    pub fn move_tile(
        &mut self,
        tile_id: &TileId,
        origin: &TileLocation,
        destination: &TileLocation,
        anchor: Option<(&TileId, Placement)>,
    ) -> TransferOutcome {
        self.begin_event();
        let outcome = self.store.move_tile(tile_id, origin, destination, anchor);
        self.debug_log.push(format!(
            "move_tile {tile_id} {origin} -> {destination} anchor={anchor:?}: {outcome:?}"
        ));
        self.after_mutation("move_tile");
        outcome
    }

    /// Apply the boundary policy to a tile released at `point`.
    pub fn evict_tile_if_outside(
        &mut self,
        tile_id: &TileId,
        origin: &TileLocation,
        point: Pos2,
        regions: &impl RegionQuery,
    ) -> Eviction {
        self.begin_event();
        let eviction = self.store.evict_tile_if_outside(
            tile_id,
            origin,
            point,
            regions,
            self.options.delete_pool_tiles_released_outside,
        );
        self.debug_log
            .push(format!("evict_tile_if_outside {tile_id} at {point:?}: {eviction:?}"));
        self.after_mutation("evict_tile_if_outside");
        eviction
    }

    // ------------------------------------------------------------------------
    // Dragging

    /// Report where everything was drawn. Used for placement and pointer hit-testing.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Feed one platform gesture event to the matching input adapter.
    pub fn handle(&mut self, gesture: impl Into<Gesture>) -> GestureOutcome {
        self.begin_event();
        let mut cx = GestureContext {
            session: &mut self.session,
            engine: EngineContext {
                store: &mut self.store,
                layout: &self.layout,
                options: &self.options,
                log: &mut self.debug_log,
            },
        };
        let outcome = match gesture.into() {
            Gesture::Native(event) => self.native.handle(&mut cx, event),
            Gesture::Pointer(event) => self.pointer.handle(&mut cx, event),
        };
        if matches!(
            outcome,
            GestureOutcome::Resolved(Resolution::Transferred(_) | Resolution::Boundary(_))
        ) {
            self.after_mutation("release");
        }
        outcome
    }

    pub fn session_phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// What is being dragged, if anything.
    pub fn drag_payload(&self) -> Option<&DragPayload> {
        self.session.current().map(|s| &s.payload)
    }

    /// Which input owns the drag in progress.
    pub fn drag_source(&self) -> Option<InputSource> {
        self.session.source()
    }

    /// Where the top-left corner of the dragged element follows the pointer, keeping the grab
    /// point under it. Updated by pointer moves and native drag-overs.
    pub fn drag_position(&self) -> Option<Pos2> {
        self.session
            .current()
            .map(|s| s.last_pointer - s.pointer_offset)
    }

    /// The touch-drag follower to draw, if a pointer drag is in progress.
    pub fn shadow(&self) -> Option<&Shadow> {
        self.pointer.shadow()
    }

    /// Forget the current drag (if any) without touching the board.
    pub fn abort_drag(&mut self) {
        self.native.reset();
        self.pointer.reset();
        if let Some(session) = self.session.clear() {
            self.debug_log
                .push(format!("abort_drag session={}", session.id));
        }
    }

    // ------------------------------------------------------------------------
    // Debugging

    pub fn debug_log_text(&self) -> String {
        self.debug_log.text()
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    fn begin_event(&mut self) {
        self.debug_log.configure(
            self.options.debug_event_log,
            self.options.debug_event_log_capacity,
        );
        self.debug_log.next_event();
    }

    fn after_mutation(&mut self, operation: &str) {
        if !self.options.debug_integrity {
            return;
        }
        let issues = integrity::board_integrity_issues(self.store.state());
        let hash = integrity::hash_issues(&issues);
        let prev = std::mem::replace(&mut self.debug_last_integrity_hash, hash);
        if prev == hash {
            return;
        }

        if issues.is_empty() {
            self.debug_log
                .push(format!("integrity OK after {operation}"));
            return;
        }

        log::warn!(
            "integrity FAIL after {operation}: {} issues\n{}",
            issues.len(),
            issues.join("\n")
        );
        self.debug_log
            .push(format!("integrity FAIL after {operation} issues={}", issues.len()));
        for issue in &issues {
            self.debug_log.push(issue.clone());
        }
        let summary = integrity::board_summary(self.store.state(), 32);
        self.debug_log
            .push(format!("integrity board_summary:\n{summary}"));

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!(
                "egui_tierlist integrity failure after {operation}\n{}",
                issues.join("\n")
            );
        }
    }
}
