use super::clock::{Clock, GestureTimer, SystemClock};
use super::{
    Decision, DecisionEntry, Gesture, PhotoId, PhotoRecord, TriageState, TriageStatistics,
    TriageSummary,
};
use crate::deletion::{DeletionOutcome, DeletionRequest, DeletionRequester};
use crate::error::{Result, TriageError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a decision did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub index: usize,
    pub photo_id: PhotoId,
    pub decision: Decision,
    /// The decision exhausted the batch
    pub completed: bool,
}

/// State of one triage run. Replaced wholesale on start/restart.
#[derive(Debug)]
struct Session {
    epoch: u64,
    items: Vec<PhotoRecord>,
    cursor: usize,
    decisions: Vec<DecisionEntry>,
    kept_count: usize,
    deleted_count: usize,
    reverted_count: usize,
    pending_undo: Option<usize>,
    confirmed_deletions: usize,
    failed_deletions: usize,
    bytes_freed: u64,
}

impl Session {
    fn new(epoch: u64, items: Vec<PhotoRecord>) -> Self {
        Self {
            epoch,
            items,
            cursor: 0,
            decisions: Vec::new(),
            kept_count: 0,
            deleted_count: 0,
            reverted_count: 0,
            pending_undo: None,
            confirmed_deletions: 0,
            failed_deletions: 0,
            bytes_freed: 0,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.cursor == self.items.len()
    }

    fn summary(&self) -> TriageSummary {
        TriageSummary {
            total_processed: self.items.len(),
            deleted_count: self.deleted_count,
            kept_count: self.kept_count,
        }
    }
}

/// Drives a batch of photos through keep/delete decisions.
///
/// Mutating operations take `&mut self`, so a session has exactly one
/// writer. Operations called in the wrong state return an error and change
/// nothing.
///
/// Undo only corrects the tally: a photo whose deletion was requested stays
/// deleted, and the cursor never moves backwards.
#[derive(Debug)]
pub struct TriageEngine<R, C = SystemClock> {
    state: TriageState,
    session: Option<Session>,
    epoch: u64,
    gesture: GestureTimer,
    requester: R,
    clock: C,
}

impl<R: DeletionRequester> TriageEngine<R, SystemClock> {
    /// Creates an engine in the `Empty` state using the wall clock
    pub fn new(requester: R) -> Self {
        Self::with_clock(requester, SystemClock)
    }
}

impl<R: DeletionRequester, C: Clock> TriageEngine<R, C> {
    pub fn with_clock(requester: R, clock: C) -> Self {
        Self {
            state: TriageState::Empty,
            session: None,
            epoch: 0,
            gesture: GestureTimer::default(),
            requester,
            clock,
        }
    }

    /// Sets how long a gesture stays visible after a decision
    pub fn set_gesture_display(&mut self, display_for: Duration) {
        self.gesture = GestureTimer::new(display_for);
    }

    pub fn state(&self) -> &TriageState {
        &self.state
    }

    /// Generation of the live session. Bumped by every load, start and restart.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.state == TriageState::Active
    }

    pub fn items(&self) -> &[PhotoRecord] {
        self.session
            .as_ref()
            .map(|s| s.items.as_slice())
            .unwrap_or_default()
    }

    pub fn cursor(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.cursor)
    }

    pub fn kept_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.kept_count)
    }

    pub fn deleted_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.deleted_count)
    }

    pub fn decisions(&self) -> &[DecisionEntry] {
        self.session
            .as_ref()
            .map(|s| s.decisions.as_slice())
            .unwrap_or_default()
    }

    /// The decision recorded for the item at `index`, if it has been decided
    pub fn decision_for(&self, index: usize) -> Option<Decision> {
        self.decisions()
            .iter()
            .find(|entry| entry.index == index)
            .map(|entry| entry.decision)
    }

    pub fn last_gesture(&self) -> Gesture {
        self.gesture.gesture()
    }

    /// The delete that `undo_last_delete` would reverse
    pub fn pending_undo(&self) -> Option<&PhotoRecord> {
        let session = self.session.as_ref()?;
        session.pending_undo.map(|index| &session.items[index])
    }

    /// The photo awaiting a decision. `None` unless `Active`.
    pub fn current_item(&self) -> Option<&PhotoRecord> {
        if !self.is_active() {
            return None;
        }
        let session = self.session.as_ref()?;
        session.items.get(session.cursor)
    }

    /// `Some` only once every photo has been decided
    pub fn summary(&self) -> Option<TriageSummary> {
        match self.state {
            TriageState::Complete => self.session.as_ref().map(Session::summary),
            _ => None,
        }
    }

    pub fn statistics(&self) -> TriageStatistics {
        match &self.session {
            Some(session) => TriageStatistics {
                total: session.items.len(),
                cursor: session.cursor,
                kept: session.kept_count,
                deleted: session.deleted_count,
                reverted: session.reverted_count,
                confirmed_deletions: session.confirmed_deletions,
                failed_deletions: session.failed_deletions,
                bytes_freed: session.bytes_freed,
            },
            None => TriageStatistics::default(),
        }
    }

    /// Discards the current session and waits for a batch. Results of
    /// deletions requested before this call are ignored from now on.
    pub fn begin_loading(&mut self) {
        self.discard_session();
        self.state = TriageState::Loading;
        info!(epoch = self.epoch, "loading batch");
    }

    /// Records a batch acquisition failure. The error is kept verbatim in
    /// the `Error` state. Only fatal errors are accepted.
    pub fn fail(&mut self, error: TriageError) -> Result<()> {
        if self.is_active() || !error.is_fatal() {
            return Err(self.invalid("fail"));
        }
        warn!(error = %error, "batch acquisition failed");
        self.discard_session();
        self.state = TriageState::Error(error);
        Ok(())
    }

    /// Starts a session over `items`.
    ///
    /// An empty batch puts the engine into `Error(NoItems)` rather than an
    /// empty `Complete`. Not allowed while a session is `Active`; use
    /// [`TriageEngine::restart`] to abandon one.
    pub fn start(&mut self, items: Vec<PhotoRecord>) -> Result<()> {
        if self.is_active() {
            return Err(self.invalid("start"));
        }
        self.start_session(items)
    }

    /// Starts a fresh session from any state, dropping the previous one
    /// together with its pending undo
    pub fn restart(&mut self, items: Vec<PhotoRecord>) -> Result<()> {
        self.start_session(items)
    }

    fn start_session(&mut self, items: Vec<PhotoRecord>) -> Result<()> {
        self.discard_session();

        if items.is_empty() {
            warn!(epoch = self.epoch, "batch is empty");
            self.state = TriageState::Error(TriageError::NoItems);
            return Err(TriageError::NoItems);
        }

        info!(epoch = self.epoch, photos = items.len(), "session started");
        self.session = Some(Session::new(self.epoch, items));
        self.state = TriageState::Active;
        Ok(())
    }

    fn discard_session(&mut self) {
        self.epoch += 1;
        self.session = None;
        self.gesture.cancel();
    }

    /// Keeps the current photo and advances
    pub fn decide_keep(&mut self) -> Result<DecisionOutcome> {
        self.decide(Decision::Keep)
    }

    /// Marks the current photo deleted, requests its physical deletion and
    /// advances. The request is not awaited; its result arrives later
    /// through [`TriageEngine::apply_deletion_outcome`].
    pub fn decide_delete(&mut self) -> Result<DecisionOutcome> {
        self.decide(Decision::Delete)
    }

    fn decide(&mut self, decision: Decision) -> Result<DecisionOutcome> {
        let operation = match decision {
            Decision::Keep => "keep",
            Decision::Delete => "delete",
        };
        let session = match (&self.state, self.session.as_mut()) {
            (TriageState::Active, Some(session)) => session,
            (state, _) => return Err(invalid_operation(operation, state)),
        };

        let index = session.cursor;
        let photo = &session.items[index];
        let photo_id = photo.id;

        session.decisions.push(DecisionEntry { index, decision });
        let gesture = match decision {
            Decision::Keep => {
                session.kept_count += 1;
                Gesture::Skip
            }
            Decision::Delete => {
                session.deleted_count += 1;
                session.pending_undo = Some(index);
                debug!(photo = %photo.name, epoch = session.epoch, "requesting deletion");
                self.requester.request_delete(DeletionRequest {
                    epoch: session.epoch,
                    photo: photo.clone(),
                });
                Gesture::Delete
            }
        };
        session.cursor += 1;
        self.gesture.schedule(gesture, self.clock.now());

        let completed = session.is_exhausted();
        if completed {
            let summary = session.summary();
            info!(
                total = summary.total_processed,
                deleted = summary.deleted_count,
                kept = summary.kept_count,
                "session complete"
            );
            self.state = TriageState::Complete;
        }

        Ok(DecisionOutcome {
            index,
            photo_id,
            decision,
            completed,
        })
    }

    /// Reverses the accounting of the most recent delete.
    ///
    /// Decrements the deleted count and clears the pending undo. The photo is
    /// not put back in the queue and the deletion request already issued is
    /// not reversed. Only the single most recent delete is undoable.
    pub fn undo_last_delete(&mut self) -> Result<PhotoRecord> {
        let session = self.session.as_mut().ok_or(TriageError::NothingToUndo)?;
        let index = session.pending_undo.take().ok_or(TriageError::NothingToUndo)?;

        session.deleted_count -= 1;
        session.reverted_count += 1;

        let photo = session.items[index].clone();
        info!(photo = %photo.name, "undid delete accounting, file is not restored");
        Ok(photo)
    }

    /// Clears the gesture immediately and cancels its scheduled reset
    pub fn reset_gesture(&mut self) {
        self.gesture.cancel();
    }

    /// Clears the gesture if its display window has elapsed. Returns true
    /// if it was cleared by this call.
    pub fn poll_gesture(&mut self) -> bool {
        self.gesture.poll(self.clock.now())
    }

    /// When the current gesture is due to clear
    pub fn gesture_deadline(&self) -> Option<std::time::Instant> {
        self.gesture.deadline()
    }

    /// Applies the completion of a deletion request.
    ///
    /// Completions from an earlier epoch are dropped. A failure is returned
    /// as a [`TriageError::DeletionFailed`] notice; counts are never rolled
    /// back because the triage decision stands.
    pub fn apply_deletion_outcome(&mut self, outcome: DeletionOutcome) -> Option<TriageError> {
        let session = match self.session.as_mut() {
            Some(session) if session.epoch == outcome.epoch => session,
            _ => {
                debug!(
                    photo_id = %outcome.photo_id,
                    epoch = outcome.epoch,
                    live_epoch = self.epoch,
                    "ignoring stale deletion outcome"
                );
                return None;
            }
        };

        let Some(photo) = session.items.iter().find(|p| p.id == outcome.photo_id) else {
            warn!(photo_id = %outcome.photo_id, "deletion outcome for unknown photo");
            return None;
        };

        match outcome.result {
            Ok(()) => {
                session.confirmed_deletions += 1;
                session.bytes_freed += photo.size;
                debug!(photo = %photo.name, "deletion confirmed");
                None
            }
            Err(reason) => {
                session.failed_deletions += 1;
                warn!(photo = %photo.name, reason = %reason, "deletion failed");
                Some(TriageError::DeletionFailed {
                    photo_id: photo.id,
                    name: photo.name.clone(),
                    reason,
                })
            }
        }
    }

    fn invalid(&self, operation: &'static str) -> TriageError {
        invalid_operation(operation, &self.state)
    }
}

fn invalid_operation(operation: &'static str, state: &TriageState) -> TriageError {
    debug!(operation, state = state.name(), "ignoring invalid operation");
    TriageError::InvalidOperation {
        operation,
        state: state.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use chrono::Utc;
    use std::path::PathBuf;
    use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

    type TestEngine = TriageEngine<UnboundedSender<DeletionRequest>, ManualClock>;

    fn create_test_photo(id: u64, name: &str) -> PhotoRecord {
        PhotoRecord {
            id: PhotoId(id),
            path: PathBuf::from(format!("/photos/{}", name)),
            name: name.to_string(),
            size: 1000 * (id + 1),
            taken_at: Utc::now(),
            width: 4032,
            height: 3024,
        }
    }

    fn create_batch(len: u64) -> Vec<PhotoRecord> {
        (0..len)
            .map(|id| create_test_photo(id, &format!("IMG_{:04}.jpg", id)))
            .collect()
    }

    fn create_engine() -> (TestEngine, UnboundedReceiver<DeletionRequest>, ManualClock) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = ManualClock::new();
        let engine = TriageEngine::with_clock(tx, clock.clone());
        (engine, rx, clock)
    }

    fn drain(rx: &mut UnboundedReceiver<DeletionRequest>) -> Vec<DeletionRequest> {
        let mut requests = Vec::new();
        while let Ok(request) = rx.try_recv() {
            requests.push(request);
        }
        requests
    }

    /// Checks the counting invariants that must hold between any two operations
    fn assert_invariants(engine: &TestEngine) {
        let stats = engine.statistics();
        assert!(stats.cursor <= stats.total);
        assert_eq!(stats.kept + stats.deleted + stats.reverted, stats.cursor);
        assert_eq!(engine.decisions().len(), stats.cursor);
        for index in 0..stats.total {
            assert_eq!(engine.decision_for(index).is_some(), index < stats.cursor);
        }
        if stats.total > 0 {
            assert_eq!(
                *engine.state() == TriageState::Complete,
                stats.cursor == stats.total
            );
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_new_engine_is_empty() {
            let (engine, _rx, _clock) = create_engine();

            assert_eq!(*engine.state(), TriageState::Empty);
            assert!(engine.current_item().is_none());
            assert!(engine.summary().is_none());
            assert_eq!(engine.statistics(), TriageStatistics::default());
            assert_eq!(engine.last_gesture(), Gesture::None);
        }

        #[test]
        fn test_start_initializes_session() {
            let (mut engine, _rx, _clock) = create_engine();

            engine.start(create_batch(3)).unwrap();

            assert_eq!(*engine.state(), TriageState::Active);
            assert_eq!(engine.cursor(), 0);
            assert_eq!(engine.kept_count(), 0);
            assert_eq!(engine.deleted_count(), 0);
            assert!(engine.pending_undo().is_none());
            assert_eq!(engine.last_gesture(), Gesture::None);
            assert_eq!(engine.current_item().unwrap().name, "IMG_0000.jpg");
            assert_invariants(&engine);
        }

        #[test]
        fn test_start_empty_batch_is_error() {
            let (mut engine, _rx, _clock) = create_engine();

            let result = engine.start(vec![]);

            assert_eq!(result, Err(TriageError::NoItems));
            assert_eq!(*engine.state(), TriageState::Error(TriageError::NoItems));
            assert!(engine.summary().is_none());
            assert!(engine.current_item().is_none());
        }

        #[test]
        fn test_start_while_active_is_rejected() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();

            let result = engine.start(create_batch(5));

            assert!(matches!(
                result,
                Err(TriageError::InvalidOperation {
                    operation: "start",
                    ..
                })
            ));
            assert_eq!(engine.items().len(), 3);
            assert_eq!(engine.cursor(), 1);
        }

        #[test]
        fn test_start_after_complete_and_error() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(1)).unwrap();
            engine.decide_keep().unwrap();
            assert_eq!(*engine.state(), TriageState::Complete);

            engine.start(create_batch(2)).unwrap();
            assert_eq!(*engine.state(), TriageState::Active);

            engine.restart(vec![]).unwrap_err();
            engine.start(create_batch(2)).unwrap();
            assert_eq!(*engine.state(), TriageState::Active);
        }

        #[test]
        fn test_loading_then_start() {
            let (mut engine, _rx, _clock) = create_engine();

            engine.begin_loading();
            assert_eq!(*engine.state(), TriageState::Loading);
            assert!(engine.current_item().is_none());

            engine.start(create_batch(2)).unwrap();
            assert_eq!(*engine.state(), TriageState::Active);
        }

        #[test]
        fn test_provider_failure_surfaced_verbatim() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.begin_loading();

            let error = TriageError::PermissionDenied("read access to ~/Pictures".to_string());
            engine.fail(error.clone()).unwrap();

            assert_eq!(*engine.state(), TriageState::Error(error));
        }

        #[test]
        fn test_retry_after_error() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.begin_loading();
            engine
                .fail(TriageError::Unavailable("disk unmounted".to_string()))
                .unwrap();

            engine.begin_loading();
            assert_eq!(*engine.state(), TriageState::Loading);
            engine.start(create_batch(1)).unwrap();
            assert_eq!(*engine.state(), TriageState::Active);
        }

        #[test]
        fn test_fail_while_active_is_rejected() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();

            let result = engine.fail(TriageError::Unavailable("late".to_string()));

            assert!(result.is_err());
            assert_eq!(*engine.state(), TriageState::Active);
        }

        #[test]
        fn test_fail_with_non_fatal_error_is_rejected() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.begin_loading();

            let result = engine.fail(TriageError::NothingToUndo);

            assert!(matches!(
                result,
                Err(TriageError::InvalidOperation {
                    operation: "fail",
                    ..
                })
            ));
            assert_eq!(*engine.state(), TriageState::Loading);

            engine.fail(TriageError::NoItems).unwrap();
            assert_eq!(*engine.state(), TriageState::Error(TriageError::NoItems));
        }

        #[test]
        fn test_restart_discards_everything() {
            let (mut engine, _rx, clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();
            engine.decide_delete().unwrap();
            let old_epoch = engine.epoch();

            engine.restart(create_batch(4)).unwrap();

            assert_eq!(*engine.state(), TriageState::Active);
            assert!(engine.epoch() > old_epoch);
            assert_eq!(engine.items().len(), 4);
            assert_eq!(engine.cursor(), 0);
            assert_eq!(engine.kept_count(), 0);
            assert_eq!(engine.deleted_count(), 0);
            assert!(engine.pending_undo().is_none());
            assert_eq!(engine.undo_last_delete(), Err(TriageError::NothingToUndo));
            assert_eq!(engine.last_gesture(), Gesture::None);

            // The cancelled gesture reset must not fire later
            clock.advance(Duration::from_secs(1));
            assert!(!engine.poll_gesture());
        }

        #[test]
        fn test_each_session_gets_new_epoch() {
            let (mut engine, _rx, _clock) = create_engine();
            let mut epochs = vec![engine.epoch()];

            engine.begin_loading();
            epochs.push(engine.epoch());
            engine.start(create_batch(1)).unwrap();
            epochs.push(engine.epoch());
            engine.restart(create_batch(1)).unwrap();
            epochs.push(engine.epoch());

            assert!(epochs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    mod decision_tests {
        use super::*;

        #[test]
        fn test_keep_advances() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();

            let outcome = engine.decide_keep().unwrap();

            assert_eq!(
                outcome,
                DecisionOutcome {
                    index: 0,
                    photo_id: PhotoId(0),
                    decision: Decision::Keep,
                    completed: false,
                }
            );
            assert_eq!(engine.cursor(), 1);
            assert_eq!(engine.kept_count(), 1);
            assert_eq!(engine.decision_for(0), Some(Decision::Keep));
            assert_eq!(engine.last_gesture(), Gesture::Skip);
            assert!(drain(&mut rx).is_empty());
            assert_invariants(&engine);
        }

        #[test]
        fn test_delete_advances_and_requests_deletion() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();

            let outcome = engine.decide_delete().unwrap();

            assert_eq!(outcome.decision, Decision::Delete);
            assert_eq!(engine.cursor(), 1);
            assert_eq!(engine.deleted_count(), 1);
            assert_eq!(engine.decision_for(0), Some(Decision::Delete));
            assert_eq!(engine.pending_undo().unwrap().id, PhotoId(0));
            assert_eq!(engine.last_gesture(), Gesture::Delete);

            let requests = drain(&mut rx);
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].photo.id, PhotoId(0));
            assert_eq!(requests[0].epoch, engine.epoch());
            assert_invariants(&engine);
        }

        #[test]
        fn test_deletion_requests_in_decision_order() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(4)).unwrap();

            engine.decide_delete().unwrap();
            engine.decide_keep().unwrap();
            engine.decide_delete().unwrap();
            engine.decide_delete().unwrap();

            let ids: Vec<_> = drain(&mut rx).iter().map(|r| r.photo.id).collect();
            assert_eq!(ids, vec![PhotoId(0), PhotoId(2), PhotoId(3)]);
        }

        #[test]
        fn test_last_decision_completes_with_final_counts() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();

            engine.decide_delete().unwrap();
            assert!(engine.summary().is_none());
            let outcome = engine.decide_keep().unwrap();

            assert!(outcome.completed);
            assert_eq!(*engine.state(), TriageState::Complete);
            assert!(engine.current_item().is_none());
            assert_eq!(
                engine.summary(),
                Some(TriageSummary {
                    total_processed: 2,
                    deleted_count: 1,
                    kept_count: 1,
                })
            );
            assert_invariants(&engine);
        }

        #[test]
        fn test_single_delete_completes_with_one_request() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(1)).unwrap();

            engine.decide_delete().unwrap();

            assert_eq!(*engine.state(), TriageState::Complete);
            assert_eq!(
                engine.summary(),
                Some(TriageSummary {
                    total_processed: 1,
                    deleted_count: 1,
                    kept_count: 0,
                })
            );
            let requests = drain(&mut rx);
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].photo.id, PhotoId(0));
        }

        #[test]
        fn test_decide_outside_active_is_noop() {
            let (mut engine, mut rx, _clock) = create_engine();

            assert!(engine.decide_keep().is_err());
            assert!(engine.decide_delete().is_err());

            engine.start(create_batch(1)).unwrap();
            engine.decide_keep().unwrap();
            let before = engine.statistics();

            let result = engine.decide_delete();
            assert_eq!(
                result,
                Err(TriageError::InvalidOperation {
                    operation: "delete",
                    state: "complete",
                })
            );
            assert!(engine.decide_keep().is_err());
            assert_eq!(engine.statistics(), before);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_decide_while_loading_or_error_is_noop() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.begin_loading();
            assert!(engine.decide_keep().is_err());

            engine.fail(TriageError::NoItems).unwrap();
            assert!(engine.decide_delete().is_err());
            assert_eq!(*engine.state(), TriageState::Error(TriageError::NoItems));
        }

        #[test]
        fn test_every_decision_sequence_keeps_invariants() {
            let len = 4;
            for pattern in 0u32..(1 << len) {
                let (mut engine, mut rx, _clock) = create_engine();
                engine.start(create_batch(len as u64)).unwrap();

                for step in 0..len {
                    if pattern & (1 << step) != 0 {
                        engine.decide_delete().unwrap();
                    } else {
                        engine.decide_keep().unwrap();
                    }
                    assert_invariants(&engine);
                }

                let deletes = pattern.count_ones() as usize;
                let summary = engine.summary().unwrap();
                assert_eq!(summary.total_processed, len);
                assert_eq!(summary.deleted_count, deletes);
                assert_eq!(summary.kept_count, len - deletes);
                assert_eq!(summary.deleted_count + summary.kept_count, len);
                assert_eq!(drain(&mut rx).len(), deletes);
            }
        }
    }

    mod undo_tests {
        use super::*;

        #[test]
        fn test_undo_without_delete_is_noop() {
            let (mut engine, _rx, _clock) = create_engine();
            assert_eq!(engine.undo_last_delete(), Err(TriageError::NothingToUndo));

            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();

            assert_eq!(engine.undo_last_delete(), Err(TriageError::NothingToUndo));
            assert_eq!(engine.deleted_count(), 0);
            assert_eq!(engine.kept_count(), 1);
            assert_eq!(engine.cursor(), 1);
        }

        #[test]
        fn test_undo_right_after_delete() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();
            engine.decide_delete().unwrap();

            let undone = engine.undo_last_delete().unwrap();

            assert_eq!(undone.id, PhotoId(1));
            assert_eq!(engine.deleted_count(), 0);
            assert_eq!(engine.kept_count(), 1);
            assert_eq!(engine.cursor(), 2);
            assert!(engine.pending_undo().is_none());
            assert_invariants(&engine);
        }

        #[test]
        fn test_undo_does_not_restore_photo() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();
            engine.decide_delete().unwrap();

            engine.undo_last_delete().unwrap();

            // The photo is not back in the queue and its deletion request
            // was not withdrawn
            assert_eq!(engine.current_item().unwrap().id, PhotoId(1));
            assert_eq!(engine.decision_for(0), Some(Decision::Delete));
            assert_eq!(drain(&mut rx).len(), 1);
        }

        #[test]
        fn test_only_most_recent_delete_is_undoable() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(4)).unwrap();
            engine.decide_delete().unwrap();
            engine.decide_delete().unwrap();

            assert_eq!(engine.pending_undo().unwrap().id, PhotoId(1));
            engine.undo_last_delete().unwrap();
            assert_eq!(engine.deleted_count(), 1);

            assert_eq!(engine.undo_last_delete(), Err(TriageError::NothingToUndo));
            assert_eq!(engine.deleted_count(), 1);
        }

        #[test]
        fn test_keep_does_not_clear_pending_undo() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_delete().unwrap();
            engine.decide_keep().unwrap();

            assert_eq!(engine.pending_undo().unwrap().id, PhotoId(0));
            engine.undo_last_delete().unwrap();
            assert_eq!(engine.deleted_count(), 0);
        }

        #[test]
        fn test_keep_delete_undo_delete_scenario() {
            let (mut engine, mut rx, _clock) = create_engine();
            let batch = vec![
                create_test_photo(10, "A.jpg"),
                create_test_photo(11, "B.jpg"),
                create_test_photo(12, "C.jpg"),
            ];
            engine.start(batch).unwrap();

            engine.decide_keep().unwrap();
            assert_eq!((engine.cursor(), engine.kept_count()), (1, 1));

            engine.decide_delete().unwrap();
            assert_eq!((engine.cursor(), engine.deleted_count()), (2, 1));
            assert_eq!(engine.pending_undo().unwrap().name, "B.jpg");

            engine.undo_last_delete().unwrap();
            assert_eq!(engine.deleted_count(), 0);
            assert!(engine.pending_undo().is_none());

            engine.decide_delete().unwrap();
            assert_eq!(engine.cursor(), 3);
            assert_eq!(engine.deleted_count(), 1);
            assert_eq!(*engine.state(), TriageState::Complete);
            assert_eq!(
                engine.summary(),
                Some(TriageSummary {
                    total_processed: 3,
                    deleted_count: 1,
                    kept_count: 1,
                })
            );
            assert_invariants(&engine);

            let names: Vec<_> = drain(&mut rx).into_iter().map(|r| r.photo.name).collect();
            assert_eq!(names, vec!["B.jpg", "C.jpg"]);
        }

        #[test]
        fn test_undo_after_complete_corrects_summary() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(1)).unwrap();
            engine.decide_delete().unwrap();

            engine.undo_last_delete().unwrap();

            assert_eq!(*engine.state(), TriageState::Complete);
            assert_eq!(
                engine.summary(),
                Some(TriageSummary {
                    total_processed: 1,
                    deleted_count: 0,
                    kept_count: 0,
                })
            );
        }
    }

    mod gesture_tests {
        use super::*;

        #[test]
        fn test_gesture_clears_after_display_window() {
            let (mut engine, _rx, clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_delete().unwrap();

            clock.advance(Duration::from_millis(100));
            assert!(!engine.poll_gesture());
            assert_eq!(engine.last_gesture(), Gesture::Delete);

            clock.advance(Duration::from_millis(200));
            assert!(engine.poll_gesture());
            assert_eq!(engine.last_gesture(), Gesture::None);
        }

        #[test]
        fn test_gesture_does_not_affect_counts() {
            let (mut engine, _rx, clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();
            let before = engine.statistics();

            engine.reset_gesture();
            clock.advance(Duration::from_secs(1));
            engine.poll_gesture();

            assert_eq!(engine.statistics(), before);
            assert_eq!(engine.cursor(), 1);
        }

        #[test]
        fn test_reset_gesture_cancels_schedule() {
            let (mut engine, _rx, clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();

            engine.reset_gesture();
            assert_eq!(engine.last_gesture(), Gesture::None);
            assert!(engine.gesture_deadline().is_none());

            clock.advance(Duration::from_secs(1));
            assert!(!engine.poll_gesture());
        }

        #[test]
        fn test_custom_display_window() {
            let (mut engine, _rx, clock) = create_engine();
            engine.set_gesture_display(Duration::from_millis(50));
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();

            clock.advance(Duration::from_millis(50));
            assert!(engine.poll_gesture());
        }

        #[test]
        fn test_completing_decision_sets_gesture() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(1)).unwrap();
            engine.decide_keep().unwrap();

            assert_eq!(engine.last_gesture(), Gesture::Skip);
        }
    }

    mod deletion_outcome_tests {
        use super::*;

        fn outcome_for(
            request: &DeletionRequest,
            result: std::result::Result<(), String>,
        ) -> DeletionOutcome {
            DeletionOutcome {
                epoch: request.epoch,
                photo_id: request.photo.id,
                result,
            }
        }

        #[test]
        fn test_success_is_tallied() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_keep().unwrap();
            engine.decide_delete().unwrap();
            let request = drain(&mut rx).remove(0);

            let notice = engine.apply_deletion_outcome(outcome_for(&request, Ok(())));

            assert!(notice.is_none());
            let stats = engine.statistics();
            assert_eq!(stats.confirmed_deletions, 1);
            assert_eq!(stats.bytes_freed, 2000);
        }

        #[test]
        fn test_failure_reported_without_rollback() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_delete().unwrap();
            let request = drain(&mut rx).remove(0);

            let notice = engine.apply_deletion_outcome(outcome_for(
                &request,
                Err("permission denied".to_string()),
            ));

            assert_eq!(
                notice,
                Some(TriageError::DeletionFailed {
                    photo_id: PhotoId(0),
                    name: "IMG_0000.jpg".to_string(),
                    reason: "permission denied".to_string(),
                })
            );
            assert_eq!(engine.deleted_count(), 1);
            assert_eq!(engine.cursor(), 1);
            assert_eq!(engine.statistics().failed_deletions, 1);
            assert_eq!(engine.statistics().bytes_freed, 0);
            assert_invariants(&engine);
        }

        #[test]
        fn test_out_of_order_completions() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(3)).unwrap();
            engine.decide_delete().unwrap();
            engine.decide_delete().unwrap();
            engine.decide_delete().unwrap();
            let requests = drain(&mut rx);

            engine.apply_deletion_outcome(outcome_for(&requests[2], Ok(())));
            engine.apply_deletion_outcome(outcome_for(&requests[0], Err("busy".to_string())));
            engine.apply_deletion_outcome(outcome_for(&requests[1], Ok(())));

            let stats = engine.statistics();
            assert_eq!(stats.confirmed_deletions, 2);
            assert_eq!(stats.failed_deletions, 1);
            assert_eq!(stats.bytes_freed, 2000 + 3000);
            assert_eq!(engine.summary().unwrap().deleted_count, 3);
        }

        #[test]
        fn test_stale_failure_after_restart_is_ignored() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();
            engine.decide_delete().unwrap();
            let stale = drain(&mut rx).remove(0);

            engine.restart(create_batch(2)).unwrap();
            engine.decide_delete().unwrap();

            let notice =
                engine.apply_deletion_outcome(outcome_for(&stale, Err("gone".to_string())));

            assert!(notice.is_none());
            assert_eq!(engine.deleted_count(), 1);
            assert_eq!(engine.statistics().failed_deletions, 0);
        }

        #[test]
        fn test_stale_success_after_restart_is_ignored() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();
            engine.decide_delete().unwrap();
            let stale = drain(&mut rx).remove(0);

            engine.restart(create_batch(2)).unwrap();
            engine.apply_deletion_outcome(outcome_for(&stale, Ok(())));

            assert_eq!(engine.statistics().confirmed_deletions, 0);
            assert_eq!(engine.statistics().bytes_freed, 0);
        }

        #[test]
        fn test_outcome_while_loading_is_ignored() {
            let (mut engine, mut rx, _clock) = create_engine();
            engine.start(create_batch(2)).unwrap();
            engine.decide_delete().unwrap();
            let stale = drain(&mut rx).remove(0);

            engine.begin_loading();

            assert!(engine
                .apply_deletion_outcome(outcome_for(&stale, Err("gone".to_string())))
                .is_none());
            assert_eq!(*engine.state(), TriageState::Loading);
        }

        #[test]
        fn test_outcome_for_unknown_photo_is_ignored() {
            let (mut engine, _rx, _clock) = create_engine();
            engine.start(create_batch(1)).unwrap();

            let notice = engine.apply_deletion_outcome(DeletionOutcome {
                epoch: engine.epoch(),
                photo_id: PhotoId(99),
                result: Err("nope".to_string()),
            });

            assert!(notice.is_none());
            assert_eq!(engine.statistics().failed_deletions, 0);
        }
    }
}
