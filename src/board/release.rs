use egui::Pos2;

use super::drop_policy::{ReleaseAction, cancel_action, release_action};
use super::input::{EngineContext, GestureContext};
use super::plan::{DropPlan, plan_drop};
use super::session::ActiveSession;
use super::types::{DragPayload, DropTarget, Eviction, InputSource, TransferOutcome};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Transferred(TransferOutcome),
    Boundary(Eviction),
    Discarded,
}

fn apply_plan(
    engine: &mut EngineContext<'_>,
    plan: &DropPlan,
    session: &ActiveSession,
) -> TransferOutcome {
    match plan {
        DropPlan::RepositionTier {
            dragged,
            target,
            placement,
        } => engine.store.reposition_tier(dragged, target, *placement),
        DropPlan::MoveTile {
            tile,
            destination,
            anchor,
        } => engine.store.move_tile(
            tile,
            &session.origin,
            destination,
            anchor.as_ref().map(|(id, placement)| (id, *placement)),
        ),
    }
}

fn run(
    engine: &mut EngineContext<'_>,
    session: &ActiveSession,
    payload: &DragPayload,
    action: ReleaseAction,
    pointer: Pos2,
) -> Resolution {
    let resolution = match action {
        ReleaseAction::Apply(plan) => Resolution::Transferred(apply_plan(engine, &plan, session)),
        ReleaseAction::Boundary => match payload {
            DragPayload::Tile(tile) => Resolution::Boundary(engine.store.evict_tile_if_outside(
                &tile.id,
                &session.origin,
                pointer,
                engine.layout,
                engine.options.delete_pool_tiles_released_outside,
            )),
            DragPayload::Tier(_) => Resolution::Discarded,
        },
        ReleaseAction::Discard => Resolution::Discarded,
    };
    engine.log.push(format!(
        "release session={} source={:?} pointer=({:.1},{:.1}) -> {resolution:?}",
        session.id, session.source, pointer.x, pointer.y
    ));
    resolution
}

/// End the `source` session with a drop, or a release over nothing when `target` is `None`.
///
/// `payload` overrides the session snapshot; the native path reads it back from the platform
/// drag data. Returns `None` when `source` owns no session.
pub(super) fn resolve_release(
    cx: &mut GestureContext<'_>,
    source: InputSource,
    target: Option<&DropTarget>,
    payload: Option<DragPayload>,
    pointer: Pos2,
) -> Option<Resolution> {
    let resolving = cx.session.begin_resolve(source)?;
    let payload = payload.unwrap_or_else(|| resolving.payload.clone());
    let plan =
        target.and_then(|t| plan_drop(cx.engine.store, cx.engine.layout, &payload, t, pointer));
    let action = release_action(payload.kind(), target, plan);
    Some(run(&mut cx.engine, &resolving, &payload, action, pointer))
}

/// End the `source` session without a drop.
pub(super) fn resolve_cancel(
    cx: &mut GestureContext<'_>,
    source: InputSource,
    pointer: Pos2,
) -> Option<Resolution> {
    let resolving = cx.session.begin_resolve(source)?;
    let action = cancel_action(resolving.payload.kind());
    Some(run(
        &mut cx.engine,
        &resolving,
        &resolving.payload,
        action,
        pointer,
    ))
}
