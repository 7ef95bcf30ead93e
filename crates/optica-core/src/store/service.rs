//! Mock exam service: the repository behind a simulated network round-trip.
//!
//! UI code talks to this the way it would talk to a real remote API: every
//! operation is async, takes a fixed latency, and can fail. Swapping in a
//! real client later should not change any caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::{ExamStore, ServiceError, ServiceResult};
use crate::models::{ExamDraft, ExamPatch, ExamRecord};

/// Placeholder until a patient directory lookup exists.
const UNKNOWN_PATIENT: &str = "Unknown patient";
/// Placeholder until an examiner directory lookup exists.
const UNKNOWN_EXAMINER: &str = "Unknown examiner";

/// Service tuning.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Simulated round-trip latency applied to every operation
    pub latency: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(350),
        }
    }
}

/// Async CRUD + search over the exam collection.
pub struct ExamService {
    store: Arc<ExamStore>,
    config: ServiceConfig,
}

impl ExamService {
    /// Create a service over the given store with default latency.
    pub fn new(store: Arc<ExamStore>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: Arc<ExamStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// The store backing this service.
    pub fn store(&self) -> &Arc<ExamStore> {
        &self.store
    }

    async fn round_trip(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    /// All exams, newest creation first.
    pub async fn get_all(&self) -> ServiceResult<Vec<ExamRecord>> {
        self.round_trip().await;
        let exams = self.store.all_sorted()?;
        debug!(count = exams.len(), "listed exams");
        Ok(exams)
    }

    /// Exams for one patient, newest creation first.
    pub async fn get_by_patient(&self, patient_id: &str) -> ServiceResult<Vec<ExamRecord>> {
        self.round_trip().await;
        let exams = self.store.by_patient(patient_id)?;
        debug!(patient_id, count = exams.len(), "listed patient exams");
        Ok(exams)
    }

    /// A single exam by ID.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<ExamRecord> {
        self.round_trip().await;
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Store a new exam. Assigns identity and audit stamps; synthesizes the
    /// exam number from the record count when the draft carries none.
    pub async fn create(&self, mut draft: ExamDraft) -> ServiceResult<ExamRecord> {
        self.round_trip().await;

        let exam_number = match draft.exam_number.take() {
            Some(number) if !number.trim().is_empty() => number,
            // Count-based, not reserved: concurrent creates can collide.
            _ => format!("EXM{:04}", self.store.len()? + 1),
        };
        if draft.patient_name.trim().is_empty() {
            draft.patient_name = UNKNOWN_PATIENT.to_string();
        }
        if draft.examiner_name.trim().is_empty() {
            draft.examiner_name = UNKNOWN_EXAMINER.to_string();
        }

        let record = ExamRecord::from_draft(draft, exam_number);
        self.store.insert(record.clone())?;
        debug!(exam_id = %record.id, exam_number = %record.exam_number, "created exam");
        Ok(record)
    }

    /// Shallow-merge a patch onto an existing exam and refresh its
    /// updated_at stamp.
    pub async fn update(&self, id: &str, patch: ExamPatch) -> ServiceResult<ExamRecord> {
        self.round_trip().await;
        let record = self
            .store
            .apply(id, patch)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        debug!(exam_id = %record.id, "updated exam");
        Ok(record)
    }

    /// Remove an exam.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.round_trip().await;
        if !self.store.remove(id)? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        debug!(exam_id = id, "deleted exam");
        Ok(())
    }

    /// Case-insensitive substring search on exam number and patient name.
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<ExamRecord>> {
        self.round_trip().await;
        let exams = self.store.search(query)?;
        debug!(query, count = exams.len(), "searched exams");
        Ok(exams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_service() -> ExamService {
        ExamService::with_config(
            Arc::new(ExamStore::new()),
            ServiceConfig {
                latency: Duration::ZERO,
            },
        )
    }

    fn make_draft(patient: &str) -> ExamDraft {
        ExamDraft {
            patient_id: patient.into(),
            patient_name: format!("Patient {}", patient),
            examiner_id: "examiner-1".into(),
            examiner_name: "Dr. Lima".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_synthesizes_exam_number_from_count() {
        let service = instant_service();

        service.create(make_draft("patient-1")).await.unwrap();
        let second = service.create(make_draft("patient-2")).await.unwrap();

        assert_eq!(second.exam_number, "EXM0002");
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_exam_number() {
        let service = instant_service();

        let mut draft = make_draft("patient-1");
        draft.exam_number = Some("ELB5091".into());
        let record = service.create(draft).await.unwrap();

        assert_eq!(record.exam_number, "ELB5091");
    }

    #[tokio::test]
    async fn test_create_fills_placeholder_names() {
        let service = instant_service();

        let record = service
            .create(ExamDraft {
                patient_id: "patient-1".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(record.patient_name, UNKNOWN_PATIENT);
        assert_eq!(record.examiner_name, UNKNOWN_EXAMINER);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let service = instant_service();
        let err = service.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let service = instant_service();
        let err = service.delete("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
