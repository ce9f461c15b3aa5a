use egui::Pos2;

use super::geometry::resolve_placement;
use super::store::CollectionStore;
use super::surface::BoardLayout;
use super::types::{Axis, DragPayload, DropTarget, Placement, TileId, TileLocation};

/// The transfer engine call a drop would make. Used for both the placement indicator
/// (while hovering) and the actual release, so the two can never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropPlan {
    RepositionTier {
        dragged: String,
        target: String,
        placement: Placement,
    },
    MoveTile {
        tile: TileId,
        destination: TileLocation,

        /// `None` appends to the end of `destination`.
        anchor: Option<(TileId, Placement)>,
    },
}

/// Decide what dropping `payload` on `target` at `pointer` would do.
///
/// `None` means the drop is meaningless (self-target, tier over the pool, unknown target).
pub(crate) fn plan_drop(
    store: &CollectionStore,
    layout: &BoardLayout,
    payload: &DragPayload,
    target: &DropTarget,
    pointer: Pos2,
) -> Option<DropPlan> {
    match payload {
        DragPayload::Tile(tile) => plan_tile_drop(store, layout, &tile.id, target, pointer),
        DragPayload::Tier(tier) => plan_tier_drop(store, layout, &tier.title, target, pointer),
    }
}

fn plan_tile_drop(
    store: &CollectionStore,
    layout: &BoardLayout,
    dragged: &TileId,
    target: &DropTarget,
    pointer: Pos2,
) -> Option<DropPlan> {
    let (destination, anchor) = match target {
        DropTarget::Pool => (TileLocation::Pool, None),
        DropTarget::Tier(title) => {
            store.tier(title)?;
            (TileLocation::Tier(title.clone()), None)
        }
        DropTarget::Tile(id) if id == dragged => return None,
        DropTarget::Tile(id) => {
            let destination = store.location_of(id)?;
            let anchor = layout
                .tile_rect(id)
                .map(|rect| (id.clone(), resolve_placement(pointer, rect, Axis::Horizontal)));
            (destination, anchor)
        }
    };
    Some(DropPlan::MoveTile {
        tile: dragged.clone(),
        destination,
        anchor,
    })
}

fn plan_tier_drop(
    store: &CollectionStore,
    layout: &BoardLayout,
    dragged: &str,
    target: &DropTarget,
    pointer: Pos2,
) -> Option<DropPlan> {
    let target_title = match target {
        DropTarget::Pool => return None,
        DropTarget::Tier(title) => title.clone(),
        DropTarget::Tile(id) => match store.location_of(id)? {
            TileLocation::Pool => return None,
            TileLocation::Tier(title) => title,
        },
    };
    if target_title == dragged {
        return None;
    }
    let rect = layout.tier_rect(&target_title)?;
    Some(DropPlan::RepositionTier {
        dragged: dragged.to_owned(),
        placement: resolve_placement(pointer, rect, Axis::Vertical),
        target: target_title,
    })
}
