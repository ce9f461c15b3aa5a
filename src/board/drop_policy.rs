use super::plan::DropPlan;
use super::types::{DragKind, DropTarget};

/// What to do when a session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum ReleaseAction {
    /// Run the transfer engine.
    Apply(DropPlan),

    /// No recognized drop target: let the boundary policy decide the tile's fate.
    Boundary,

    /// Leave everything as is.
    Discard,
}

/// A small, testable policy helper shared by both input adapters.
///
/// - A plan always wins.
/// - A release over a recognized target without a plan (self-drop, tier over the pool) keeps
///   things where they are.
/// - A tile released over nothing goes through the boundary policy; tiers have none.
pub(super) fn release_action(
    kind: DragKind,
    target: Option<&DropTarget>,
    plan: Option<DropPlan>,
) -> ReleaseAction {
    if let Some(plan) = plan {
        return ReleaseAction::Apply(plan);
    }
    match (kind, target) {
        (DragKind::Tile, None) => ReleaseAction::Boundary,
        _ => ReleaseAction::Discard,
    }
}

/// Cancellation never repositions, but a tile still gets the boundary policy.
pub(super) fn cancel_action(kind: DragKind) -> ReleaseAction {
    match kind {
        DragKind::Tile => ReleaseAction::Boundary,
        DragKind::Tier => ReleaseAction::Discard,
    }
}
