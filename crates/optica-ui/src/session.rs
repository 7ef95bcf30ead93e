//! Screen-level exam state.
//!
//! One `ExamSession` backs one screen: it owns the renderable list state,
//! adapts the service's async contract, and emits notifications on
//! completion. Call sites interleave freely on the runtime; fetches carry a
//! monotonic sequence number so a slow, stale response never overwrites the
//! result of a newer request.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use optica_core::{
    ExamDraft, ExamPatch, ExamRecord, ExamService, NotificationCenter, ServiceResult,
};

#[derive(Default)]
struct SessionState {
    exams: Vec<ExamRecord>,
    loading: bool,
    error: Option<String>,
}

/// Single source of truth for a screen's exam list and operations.
pub struct ExamSession {
    service: Arc<ExamService>,
    notifier: NotificationCenter,
    state: Mutex<SessionState>,
    /// Sequence of the most recently issued fetch
    fetch_seq: AtomicU64,
}

impl ExamSession {
    /// Create a session and run the initial exam fetch.
    pub async fn open(service: Arc<ExamService>, notifier: NotificationCenter) -> Self {
        let session = Self {
            service,
            notifier,
            state: Mutex::new(SessionState::default()),
            fetch_seq: AtomicU64::new(0),
        };
        session.fetch_exams().await;
        session
    }

    fn locked(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current list snapshot, possibly stale relative to the store.
    pub fn exams(&self) -> Vec<ExamRecord> {
        self.locked().exams.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.locked().loading
    }

    /// Last fetch failure, shown as an inline banner.
    pub fn error(&self) -> Option<String> {
        self.locked().error.clone()
    }

    /// Reload the full exam list.
    pub async fn fetch_exams(&self) {
        self.run_fetch(self.service.get_all()).await;
    }

    /// Reload the list scoped to one patient.
    pub async fn fetch_by_patient(&self, patient_id: &str) {
        self.run_fetch(self.service.get_by_patient(patient_id)).await;
    }

    /// Replace the list with search results.
    pub async fn search(&self, query: &str) {
        self.run_fetch(self.service.search(query)).await;
    }

    /// Shared fetch path. Read failures are captured into session state and
    /// toasted; they are never re-thrown. Only the latest issued fetch may
    /// apply its response or clear the loading flag.
    async fn run_fetch<F>(&self, request: F)
    where
        F: Future<Output = ServiceResult<Vec<ExamRecord>>>,
    {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.locked();
            state.loading = true;
            state.error = None;
        }

        let outcome = request.await;

        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "dropping stale fetch response");
            return;
        }

        let mut state = self.locked();
        state.loading = false;
        match outcome {
            Ok(exams) => {
                debug!(seq, count = exams.len(), "applied fetch response");
                state.exams = exams;
            }
            Err(err) => {
                let text = err.to_string();
                warn!(seq, error = %text, "exam fetch failed");
                state.error = Some(text.clone());
                drop(state);
                self.notifier.error(text);
            }
        }
    }

    /// Store a new exam. On success the record is prepended locally and a
    /// success toast is shown; on failure the error is toasted and returned
    /// so the calling form stays on screen.
    pub async fn create(&self, draft: ExamDraft) -> ServiceResult<ExamRecord> {
        match self.service.create(draft).await {
            Ok(record) => {
                self.locked().exams.insert(0, record.clone());
                self.notifier.success("Exam saved");
                Ok(record)
            }
            Err(err) => {
                self.notifier.error(format!("Could not save exam: {}", err));
                Err(err)
            }
        }
    }

    /// Update an exam; the local copy with the matching ID is replaced.
    pub async fn update(&self, id: &str, patch: ExamPatch) -> ServiceResult<ExamRecord> {
        match self.service.update(id, patch).await {
            Ok(record) => {
                let mut state = self.locked();
                if let Some(existing) = state.exams.iter_mut().find(|e| e.id == record.id) {
                    *existing = record.clone();
                }
                drop(state);
                self.notifier.success("Exam updated");
                Ok(record)
            }
            Err(err) => {
                self.notifier.error(format!("Could not update exam: {}", err));
                Err(err)
            }
        }
    }

    /// Delete an exam; the local copy with the matching ID is removed.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.locked().exams.retain(|e| e.id != id);
                self.notifier.success("Exam deleted");
                Ok(())
            }
            Err(err) => {
                self.notifier.error(format!("Could not delete exam: {}", err));
                Err(err)
            }
        }
    }
}
