use super::debug::DebugLog;
use super::native::{DataTransfer, NativeGesture};
use super::options::BoardOptions;
use super::plan::DropPlan;
use super::pointer::PointerGesture;
use super::release::Resolution;
use super::session::DragSession;
use super::store::CollectionStore;
use super::surface::BoardLayout;

/// A platform gesture event, tagged by the pipeline it came from.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Native(NativeGesture),
    Pointer(PointerGesture),
}

impl From<NativeGesture> for Gesture {
    fn from(gesture: NativeGesture) -> Self {
        Self::Native(gesture)
    }
}

impl From<PointerGesture> for Gesture {
    fn from(gesture: PointerGesture) -> Self {
        Self::Pointer(gesture)
    }
}

/// What handling a gesture did.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Not ours: no session, another source's session, another pointer, or a busy slot.
    Ignored,

    /// A session was armed. Native drags get the payload to hand to the platform.
    Started {
        session: u64,
        data: Option<DataTransfer>,
    },

    /// Still dragging. The plan (if any) is what releasing here would do.
    Preview(Option<DropPlan>),

    /// The session ended.
    Resolved(Resolution),
}

/// Everything but the drag slot. Split out so the slot can stay borrowed while resolving.
pub(crate) struct EngineContext<'a> {
    pub(crate) store: &'a mut CollectionStore,
    pub(crate) layout: &'a BoardLayout,
    pub(crate) options: &'a BoardOptions,
    pub(crate) log: &'a mut DebugLog,
}

pub(crate) struct GestureContext<'a> {
    pub(crate) session: &'a mut DragSession,
    pub(crate) engine: EngineContext<'a>,
}

/// One input pipeline. Implementations translate their own event shapes into the same drag
/// session lifecycle and the same release resolution.
pub(crate) trait DragInputPort {
    type Event;

    fn handle(&mut self, cx: &mut GestureContext<'_>, event: Self::Event) -> GestureOutcome;

    /// Drop any presentation state tied to the current session.
    fn reset(&mut self);
}
