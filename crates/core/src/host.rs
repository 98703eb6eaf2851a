//! Session host - the loading lifecycle around sessions
//!
//! The host owns at most one live [`SessionState`]. Loading a puzzle is the
//! only asynchronous step, so the host tracks it as a pending request:
//!
//! 1. [`SessionHost::begin_load`] hands out a request id and blocks interaction.
//! 2. [`SessionHost::finish_load`] with that id either installs a fresh session
//!    (replacing the old one) or records the error and keeps the old state.
//!
//! Results and timer ticks that belong to superseded requests/sessions are
//! dropped, so a late response or a leaked tick can never touch the live game.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::LoadError;
use crate::puzzle::Puzzle;
use crate::session::SessionState;
use crate::snapshot::SessionSnapshot;
use crate::types::CrosswordAction;

/// What [`SessionHost::finish_load`] did with a load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new session was installed under this id.
    Installed(u64),
    /// The load failed; see [`SessionHost::last_error`].
    Failed,
    /// The result belongs to a request that is no longer pending.
    Stale,
}

#[derive(Debug, Default)]
pub struct SessionHost {
    session: Option<SessionState>,
    pending_request: Option<u64>,
    last_request_id: u64,
    last_session_id: u64,
    last_error: Option<LoadError>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session.as_ref().map(SessionState::session_id)
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// Live session is finished (false when there is none).
    pub fn is_finished(&self) -> bool {
        self.session.as_ref().is_some_and(SessionState::finished)
    }

    /// Start loading. Returns the request id, or `None` if a load is already
    /// in flight.
    pub fn begin_load(&mut self) -> Option<u64> {
        if self.pending_request.is_some() {
            return None;
        }
        self.last_request_id += 1;
        self.pending_request = Some(self.last_request_id);
        self.last_error = None;
        Some(self.last_request_id)
    }

    /// Deliver the result of request `request_id`.
    pub fn finish_load(
        &mut self,
        request_id: u64,
        result: Result<Puzzle, LoadError>,
    ) -> LoadOutcome {
        if self.pending_request != Some(request_id) {
            warn!(request_id, "dropping result of superseded puzzle request");
            return LoadOutcome::Stale;
        }
        self.pending_request = None;

        match result {
            Ok(puzzle) => LoadOutcome::Installed(self.install(puzzle)),
            Err(e) => {
                warn!(request_id, error = %e, "puzzle load failed");
                self.last_error = Some(e);
                LoadOutcome::Failed
            }
        }
    }

    /// Replace the live session with a fresh one for `puzzle`.
    pub fn install(&mut self, puzzle: Puzzle) -> u64 {
        self.last_session_id += 1;
        let id = self.last_session_id;
        info!(
            session_id = id,
            rows = puzzle.rows(),
            cols = puzzle.cols(),
            words = puzzle.placements().len(),
            "session installed"
        );
        self.session = Some(SessionState::new(Arc::new(puzzle), id));
        id
    }

    /// Apply an event to the live session. Ignored while loading.
    pub fn apply_action(&mut self, action: CrosswordAction) -> bool {
        if self.is_loading() {
            return false;
        }
        match self.session.as_mut() {
            Some(session) => session.apply_action(action),
            None => false,
        }
    }

    /// One timer second for session `session_id`.
    pub fn tick(&mut self, session_id: u64) -> bool {
        match self.session.as_mut() {
            Some(session) if session.session_id() == session_id => session.tick(),
            _ => false,
        }
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(SessionState::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::puzzle::Placement;
    use crate::types::{CellKey, Direction};

    fn cat() -> Puzzle {
        Puzzle::from_ascii_rows(
            &["CAT"],
            vec![Placement::new(0, 0, Direction::Across, "CAT", "feline")],
        )
        .unwrap()
    }

    #[test]
    fn test_load_installs_session() {
        let mut host = SessionHost::new();
        assert!(host.session().is_none());
        assert!(!host.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 }));

        let req = host.begin_load().unwrap();
        assert!(host.is_loading());
        assert_eq!(host.begin_load(), None);

        assert_eq!(host.finish_load(req, Ok(cat())), LoadOutcome::Installed(1));
        assert!(!host.is_loading());
        assert!(host.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 }));
    }

    #[test]
    fn test_actions_ignored_while_loading() {
        let mut host = SessionHost::new();
        host.install(cat());
        host.begin_load();
        assert!(!host.apply_action(CrosswordAction::ClickCell { row: 0, col: 1 }));
        let session = host.session().unwrap();
        assert_eq!(session.selected_cell(), None);
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let mut host = SessionHost::new();
        let first = host.install(cat());
        host.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 });
        host.apply_action(CrosswordAction::EnterLetter('c'));

        let req = host.begin_load().unwrap();
        let outcome = host.finish_load(req, Err(LoadError::from(PuzzleError::NoPlacements)));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(!host.is_loading());
        assert_eq!(host.session_id(), Some(first));
        assert_eq!(host.session().unwrap().score(), 1);
        assert!(matches!(host.last_error(), Some(LoadError::Invalid(_))));

        // Retrying clears the error.
        host.begin_load();
        assert!(host.last_error().is_none());
    }

    #[test]
    fn test_new_load_replaces_session_and_drops_stale() {
        let mut host = SessionHost::new();
        let req = host.begin_load().unwrap();
        assert_eq!(host.finish_load(req, Ok(cat())), LoadOutcome::Installed(1));
        host.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 });
        host.tick(1);

        assert_eq!(host.finish_load(req, Ok(cat())), LoadOutcome::Stale);
        assert_eq!(host.session_id(), Some(1));

        let req2 = host.begin_load().unwrap();
        assert_eq!(host.finish_load(req2, Ok(cat())), LoadOutcome::Installed(2));
        let s = host.session().unwrap();
        assert_eq!(s.selected_cell(), None);
        assert_eq!(s.elapsed_seconds(), 0);

        // A tick from the old session's timer is ignored.
        assert!(!host.tick(1));
        assert!(host.tick(2));
        assert_eq!(host.session().unwrap().elapsed_seconds(), 1);
    }

    #[test]
    fn test_finished_flag_passthrough() {
        let mut host = SessionHost::new();
        host.install(cat());
        assert!(!host.is_finished());
        host.apply_action(CrosswordAction::RevealAll);
        assert!(host.is_finished());
        assert!(host.session().unwrap().is_revealed(CellKey::new(0, 2)));
    }
}
