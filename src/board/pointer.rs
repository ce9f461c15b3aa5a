use egui::{Pos2, Rect};

use super::geometry::{offset_within, shadow_rect};
use super::input::{DragInputPort, GestureContext, GestureOutcome};
use super::plan::plan_drop;
use super::release::{resolve_cancel, resolve_release};
use super::types::{DragHandle, InputSource, Shadow};

/// Pointer callbacks used to emulate dragging where the platform has no native drag (touch).
#[derive(Clone, Debug, PartialEq)]
pub enum PointerGesture {
    Down {
        pointer_id: u64,
        pointer: Pos2,
        handle: DragHandle,
        element_rect: Rect,
    },
    Move {
        pointer_id: u64,
        pointer: Pos2,
    },
    Up {
        pointer_id: u64,
        pointer: Pos2,
    },
    Cancel {
        pointer_id: u64,
        pointer: Pos2,
    },

    /// The pointer left the work surface mid-drag.
    Leave {
        pointer_id: u64,
        pointer: Pos2,
    },
}

impl PointerGesture {
    fn pointer_id(&self) -> u64 {
        match self {
            Self::Down { pointer_id, .. }
            | Self::Move { pointer_id, .. }
            | Self::Up { pointer_id, .. }
            | Self::Cancel { pointer_id, .. }
            | Self::Leave { pointer_id, .. } => *pointer_id,
        }
    }
}

/// Replicates the native drag lifecycle by hand: no drag payload, no "current drop target",
/// so it keeps its own shadow and hit-tests the last reported layout.
#[derive(Debug, Default)]
pub(crate) struct PointerDragAdapter {
    shadow: Option<Shadow>,
}

impl PointerDragAdapter {
    pub(crate) fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    fn owns(&self, pointer_id: u64) -> bool {
        self.shadow.is_some_and(|s| s.pointer_id == pointer_id)
    }
}

impl DragInputPort for PointerDragAdapter {
    type Event = PointerGesture;

    fn handle(&mut self, cx: &mut GestureContext<'_>, event: PointerGesture) -> GestureOutcome {
        if !matches!(event, PointerGesture::Down { .. }) && !self.owns(event.pointer_id()) {
            return GestureOutcome::Ignored;
        }

        match event {
            PointerGesture::Down {
                pointer_id,
                pointer,
                handle,
                element_rect,
            } => {
                let Some((payload, origin)) = cx.engine.store.snapshot_payload(&handle) else {
                    return GestureOutcome::Ignored;
                };
                let grab_offset = offset_within(pointer, element_rect);
                let Some(session) = cx.session.try_arm(
                    InputSource::Pointer,
                    payload,
                    origin,
                    pointer,
                    grab_offset,
                ) else {
                    // Busy: no shadow for the second gesture.
                    return GestureOutcome::Ignored;
                };
                self.shadow = Some(Shadow {
                    pointer_id,
                    rect: shadow_rect(pointer, grab_offset, element_rect.size()),
                    grab_offset,
                });
                cx.engine.log.push(format!(
                    "pointer down id={pointer_id} session={session} handle={handle:?}"
                ));
                GestureOutcome::Started {
                    session,
                    data: None,
                }
            }

            PointerGesture::Move { pointer, .. } => {
                if !cx.session.observe_move(InputSource::Pointer, pointer) {
                    // The session was cleared under us; don't leave a follower behind.
                    self.shadow = None;
                    return GestureOutcome::Ignored;
                }
                if let Some(shadow) = &mut self.shadow {
                    shadow.rect = shadow_rect(pointer, shadow.grab_offset, shadow.rect.size());
                }
                let plan = cx.session.current().and_then(|s| {
                    let target = cx.engine.layout.target_at(pointer)?;
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

            PointerGesture::Up { pointer, .. } => {
                self.shadow = None;
                let target = cx.engine.layout.target_at(pointer);
                resolve_release(cx, InputSource::Pointer, target.as_ref(), None, pointer)
                    .map_or(GestureOutcome::Ignored, GestureOutcome::Resolved)
            }

            PointerGesture::Cancel { pointer, .. } | PointerGesture::Leave { pointer, .. } => {
                self.shadow = None;
                resolve_cancel(cx, InputSource::Pointer, pointer)
                    .map_or(GestureOutcome::Ignored, GestureOutcome::Resolved)
            }
        }
    }

    fn reset(&mut self) {
        self.shadow = None;
    }
}
