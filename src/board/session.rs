use egui::{Pos2, Vec2};

use super::types::{DragPayload, InputSource, TileLocation};

/// Lifecycle of the single drag slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,

    /// Gesture started, no hover/move observed yet.
    Armed,

    /// The pointer is moving over the work surface; previews only.
    Active,

    /// A drop/release is being applied.
    Resolving,
}

#[derive(Debug, Default)]
pub(crate) struct DragSession {
    next_id: u64,
    active: Option<ActiveSession>,
    resolving: Option<u64>,
}

#[derive(Clone, Debug)]
pub(crate) struct ActiveSession {
    pub(crate) id: u64,
    pub(crate) source: InputSource,
    pub(crate) payload: DragPayload,
    pub(crate) origin: TileLocation,
    pub(crate) pointer_offset: Vec2,
    pub(crate) last_pointer: Pos2,
    moved: bool,
}

impl DragSession {
    pub(crate) fn phase(&self) -> SessionPhase {
        if self.resolving.is_some() {
            return SessionPhase::Resolving;
        }
        match &self.active {
            None => SessionPhase::Idle,
            Some(active) if active.moved => SessionPhase::Active,
            Some(_) => SessionPhase::Armed,
        }
    }

    pub(crate) fn current(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub(crate) fn source(&self) -> Option<InputSource> {
        self.active.as_ref().map(|a| a.source)
    }

    /// Arm a new session. Returns `None` (and keeps the existing one) if the slot is taken.
    pub(crate) fn try_arm(
        &mut self,
        source: InputSource,
        payload: DragPayload,
        origin: TileLocation,
        pointer: Pos2,
        pointer_offset: Vec2,
    ) -> Option<u64> {
        if let Some(active) = &self.active {
            log::debug!(
                "session START ignored source={source:?}: session id={} source={:?} still open",
                active.id,
                active.source
            );
            return None;
        }
        if self.resolving.is_some() {
            return None;
        }

        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        log::debug!(
            "session START id={id} source={source:?} kind={:?} origin={origin}",
            payload.kind()
        );
        self.active = Some(ActiveSession {
            id,
            source,
            payload,
            origin,
            pointer_offset,
            last_pointer: pointer,
            moved: false,
        });
        Some(id)
    }

    /// Record pointer movement from `source`. Armed sessions become Active.
    ///
    /// Returns `false` if there is no session or it belongs to another source.
    pub(crate) fn observe_move(&mut self, source: InputSource, pointer: Pos2) -> bool {
        match &mut self.active {
            Some(active) if active.source == source => {
                active.last_pointer = pointer;
                active.moved = true;
                true
            }
            _ => false,
        }
    }

    /// Take the session out of the slot for resolution.
    ///
    /// The slot reports [`SessionPhase::Resolving`] until the returned guard is dropped, and is
    /// `Idle` afterwards, whatever happens while resolving.
    pub(crate) fn begin_resolve(&mut self, source: InputSource) -> Option<ResolvingSession<'_>> {
        if self.active.as_ref().map(|a| a.source) != Some(source) {
            return None;
        }
        let session = self.active.take()?;
        self.resolving = Some(session.id);
        Some(ResolvingSession {
            slot: self,
            session,
        })
    }

    /// Drop the session without resolving it.
    pub(crate) fn clear(&mut self) -> Option<ActiveSession> {
        let ended = self.active.take();
        if let Some(ended) = &ended {
            log::debug!("session CLEAR id={} source={:?}", ended.id, ended.source);
        }
        ended
    }
}

/// Scoped ownership of a session being resolved.
pub(crate) struct ResolvingSession<'a> {
    slot: &'a mut DragSession,
    session: ActiveSession,
}

impl std::ops::Deref for ResolvingSession<'_> {
    type Target = ActiveSession;

    fn deref(&self) -> &ActiveSession {
        &self.session
    }
}

impl Drop for ResolvingSession<'_> {
    fn drop(&mut self) {
        self.slot.resolving = None;
        log::debug!(
            "session END id={} source={:?}",
            self.session.id,
            self.session.source
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Tile;
    use egui::{pos2, vec2};

    fn payload() -> DragPayload {
        DragPayload::Tile(Tile::named("tile1", "a"))
    }

    fn arm(session: &mut DragSession, source: InputSource) -> Option<u64> {
        session.try_arm(
            source,
            payload(),
            TileLocation::Pool,
            pos2(1.0, 1.0),
            vec2(1.0, 1.0),
        )
    }

    #[test]
    fn walks_through_all_phases() {
        let mut session = DragSession::default();
        assert_eq!(session.phase(), SessionPhase::Idle);

        assert_eq!(arm(&mut session, InputSource::Native), Some(1));
        assert_eq!(session.phase(), SessionPhase::Armed);

        assert!(session.observe_move(InputSource::Native, pos2(5.0, 5.0)));
        assert_eq!(session.phase(), SessionPhase::Active);

        {
            let guard = session
                .begin_resolve(InputSource::Native)
                .expect("native session should resolve");
            assert_eq!(guard.id, 1);
            assert_eq!(guard.last_pointer, pos2(5.0, 5.0));
        }
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn second_start_is_ignored() {
        let mut session = DragSession::default();
        assert_eq!(arm(&mut session, InputSource::Pointer), Some(1));
        assert_eq!(arm(&mut session, InputSource::Native), None);
        assert_eq!(arm(&mut session, InputSource::Pointer), None);
        assert_eq!(session.source(), Some(InputSource::Pointer));
    }

    #[test]
    fn only_the_starting_source_can_resolve() {
        let mut session = DragSession::default();
        arm(&mut session, InputSource::Pointer);
        assert!(!session.observe_move(InputSource::Native, pos2(0.0, 0.0)));
        assert!(session.begin_resolve(InputSource::Native).is_none());
        assert_eq!(session.phase(), SessionPhase::Armed);
        assert!(session.begin_resolve(InputSource::Pointer).is_some());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn ids_keep_increasing() {
        let mut session = DragSession::default();
        assert_eq!(arm(&mut session, InputSource::Native), Some(1));
        session.clear();
        assert_eq!(arm(&mut session, InputSource::Native), Some(2));
    }

    #[test]
    fn guard_releases_slot_when_resolution_panics() {
        let mut session = DragSession::default();
        arm(&mut session, InputSource::Native);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = session.begin_resolve(InputSource::Native);
            panic!("handler failed");
        }));
        assert!(result.is_err(), "closure should have panicked");
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(arm(&mut session, InputSource::Pointer), Some(2));
    }
}
