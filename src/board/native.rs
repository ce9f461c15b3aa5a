use std::collections::BTreeMap;

use egui::{Pos2, Rect};

use super::geometry::offset_within;
use super::input::{DragInputPort, GestureContext, GestureOutcome};
use super::plan::plan_drop;
use super::release::resolve_release;
use super::store::CollectionStore;
use super::types::{DragHandle, DragPayload, DropTarget, InputSource, TileId, TileLocation};

const FORMAT_TIER: &str = "tier";
const FORMAT_TILE: &str = "tile";
const FORMAT_TILE_TIER: &str = "tile-tier";

/// The platform's drag data store: string values keyed by format.
///
/// Only identities travel through it; the board is the source of truth for contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DataTransfer {
    data: BTreeMap<String, String>,
}

impl DataTransfer {
    pub fn set_data(&mut self, format: &str, value: &str) {
        self.data.insert(format.to_owned(), value.to_owned());
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.data.get(format).map(String::as_str)
    }

    /// Formats present, as exposed by the platform during drag-over.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    fn for_payload(payload: &DragPayload, origin: &TileLocation) -> Self {
        let mut data = Self::default();
        match payload {
            DragPayload::Tier(tier) => data.set_data(FORMAT_TIER, &tier.title),
            DragPayload::Tile(tile) => {
                data.set_data(FORMAT_TILE, tile.id.as_str());
                if let Some(title) = origin.tier_title() {
                    data.set_data(FORMAT_TILE_TIER, title);
                }
            }
        }
        data
    }

    /// Read the dragged identity back and look it up on the board.
    fn payload(&self, store: &CollectionStore) -> Option<DragPayload> {
        if let Some(title) = self.get_data(FORMAT_TIER) {
            return store.tier(title).cloned().map(DragPayload::Tier);
        }
        let id = TileId::from(self.get_data(FORMAT_TILE)?);
        store.tile(&id).cloned().map(DragPayload::Tile)
    }

    fn origin(&self) -> TileLocation {
        self.get_data(FORMAT_TILE_TIER)
            .map_or(TileLocation::Pool, TileLocation::tier)
    }
}

/// Platform drag-and-drop callbacks.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeGesture {
    DragStart {
        handle: DragHandle,
        pointer: Pos2,
        element_rect: Rect,
    },

    /// The drag is over a drop-enabled element.
    DragOver { target: DropTarget, pointer: Pos2 },

    /// The platform delivered a drop on `target`.
    Drop {
        target: DropTarget,
        pointer: Pos2,
        data: DataTransfer,
    },

    /// Fires after `Drop`, or alone when the drag was released over nothing or cancelled.
    DragEnd { pointer: Pos2 },
}

#[derive(Debug, Default)]
pub(crate) struct NativeDragAdapter {
    hovered: Option<DropTarget>,
}

impl DragInputPort for NativeDragAdapter {
    type Event = NativeGesture;

    fn handle(&mut self, cx: &mut GestureContext<'_>, event: NativeGesture) -> GestureOutcome {
        match event {
            NativeGesture::DragStart {
                handle,
                pointer,
                element_rect,
            } => {
                let Some((payload, origin)) = cx.engine.store.snapshot_payload(&handle) else {
                    return GestureOutcome::Ignored;
                };
                let data = DataTransfer::for_payload(&payload, &origin);
                let Some(session) = cx.session.try_arm(
                    InputSource::Native,
                    payload,
                    origin,
                    pointer,
                    offset_within(pointer, element_rect),
                ) else {
                    return GestureOutcome::Ignored;
                };
                self.hovered = None;
                cx.engine
                    .log
                    .push(format!("native drag_start session={session} handle={handle:?}"));
                GestureOutcome::Started {
                    session,
                    data: Some(data),
                }
            }

            NativeGesture::DragOver { target, pointer } => {
                if !cx.session.observe_move(InputSource::Native, pointer) {
                    return GestureOutcome::Ignored;
                }
                if self.hovered.as_ref() != Some(&target) {
                    cx.engine.log.push(format!("native drag_over {target:?}"));
                    self.hovered = Some(target.clone());
                }
                // Drag data is unreadable during drag-over, so preview from the session snapshot.
                let plan = cx.session.current().and_then(|s| {
                    plan_drop(
                        cx.engine.store,
                        cx.engine.layout,
                        &s.payload,
                        &target,
                        pointer,
                    )
                });
                GestureOutcome::Preview(plan)
            }

            NativeGesture::Drop {
                target,
                pointer,
                data,
            } => {
                let payload = data.payload(cx.engine.store);
                if let Some(session) = cx.session.current() {
                    let origin = data.origin();
                    if payload.is_some() && origin != session.origin {
                        log::debug!(
                            "native drop: drag data origin {origin} differs from session origin {}",
                            session.origin
                        );
                    }
                }
                self.hovered = None;
                resolve_release(cx, InputSource::Native, Some(&target), payload, pointer)
                    .map_or(GestureOutcome::Ignored, GestureOutcome::Resolved)
            }

            NativeGesture::DragEnd { pointer } => {
                self.hovered = None;
                // Still open: nothing accepted the drop.
                resolve_release(cx, InputSource::Native, None, None, pointer)
                    .map_or(GestureOutcome::Ignored, GestureOutcome::Resolved)
            }
        }
    }

    fn reset(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::{BoardState, Tier, Tile};

    fn store() -> CollectionStore {
        CollectionStore::new(BoardState {
            pool: vec![Tile::named("p", "p")],
            tiers: vec![Tier::with_tiles("S", vec![Tile::named("a", "a")])],
        })
    }

    #[test]
    fn tile_in_tier_carries_its_origin() {
        let store = store();
        let (payload, origin) = store
            .snapshot_payload(&DragHandle::Tile("a".into()))
            .expect("tile exists");
        let data = DataTransfer::for_payload(&payload, &origin);
        assert_eq!(data.get_data("tile"), Some("a"));
        assert_eq!(data.get_data("tile-tier"), Some("S"));
        assert_eq!(data.types().collect::<Vec<_>>(), ["tile", "tile-tier"]);
        assert_eq!(data.payload(&store), Some(payload));
        assert_eq!(data.origin(), TileLocation::tier("S"));
    }

    #[test]
    fn pool_tile_has_no_tier_entry() {
        let store = store();
        let (payload, origin) = store
            .snapshot_payload(&DragHandle::Tile("p".into()))
            .expect("tile exists");
        let data = DataTransfer::for_payload(&payload, &origin);
        assert_eq!(data.get_data("tile-tier"), None);
        assert_eq!(data.origin(), TileLocation::Pool);
    }

    #[test]
    fn tier_payload_round_trips_through_the_board() {
        let store = store();
        let mut data = DataTransfer::default();
        data.set_data("tier", "S");
        assert!(matches!(data.payload(&store), Some(DragPayload::Tier(t)) if t.title == "S"));
    }

    #[test]
    fn stale_or_foreign_data_has_no_payload() {
        let store = store();
        let mut data = DataTransfer::default();
        assert_eq!(data.payload(&store), None);
        data.set_data("tile", "deleted");
        assert_eq!(data.payload(&store), None);
        data.set_data("text/uri-list", "file:///tmp/list.ron");
        assert_eq!(data.payload(&store), None);
    }
}
