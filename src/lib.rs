//! A tier list for `egui`: titled tiers of tiles plus a pool of unassigned tiles, with a
//! drag-and-reorder engine that treats platform drag-and-drop and pointer/touch dragging the same.
//!
//! Start with [`TierBoard`] (or [`BoardBuilder`] for a scripted board), report the drawn
//! bounding boxes with [`TierBoard::set_layout`] and forward gestures to [`TierBoard::handle`].

#![forbid(unsafe_code)]

pub mod board;
pub mod board_builder;

pub use board::{
    Axis, BoardError, BoardLayout, BoardOptions, BoardState, DataTransfer, DragHandle, DragKind,
    DragPayload, DropPlan, DropTarget, Eviction, Gesture, GestureOutcome, InputSource,
    NativeGesture, Placement, PointerGesture, Region, RegionQuery, Resolution, SanitizeReport,
    SessionPhase, Shadow, Tier, TierBoard, Tile, TileContent, TileId, TileLocation,
    TransferOutcome, resolve_placement,
};
pub use board_builder::BoardBuilder;

#[cfg(feature = "persistence")]
pub use board::{BOARD_SNAPSHOT_VERSION, BoardSnapshot, PersistenceError};
