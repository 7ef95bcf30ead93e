//! Exam repository and mock service layer.

mod service;

pub use service::*;

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::models::{ExamPatch, ExamRecord};

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Exam not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl<T> From<PoisonError<T>> for ServiceError {
    fn from(e: PoisonError<T>) -> Self {
        ServiceError::Internal(format!("Lock poisoned: {}", e))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// In-memory exam repository. Owns the canonical collection; constructed
/// with explicit seed data and reset explicitly in tests, never reached
/// through hidden process-wide state.
#[derive(Debug, Default)]
pub struct ExamStore {
    records: Mutex<Vec<ExamRecord>>,
}

impl ExamStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with seed records.
    pub fn with_seed(seed: Vec<ExamRecord>) -> Self {
        Self {
            records: Mutex::new(seed),
        }
    }

    /// Replace the whole collection (for tests).
    pub fn reset(&self, seed: Vec<ExamRecord>) -> ServiceResult<()> {
        *self.records.lock()? = seed;
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> ServiceResult<usize> {
        Ok(self.records.lock()?.len())
    }

    pub fn is_empty(&self) -> ServiceResult<bool> {
        Ok(self.records.lock()?.is_empty())
    }

    /// All records, newest creation first. Never reorders the stored
    /// collection; callers get a sorted copy.
    pub fn all_sorted(&self) -> ServiceResult<Vec<ExamRecord>> {
        let mut exams = self.records.lock()?.clone();
        exams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exams)
    }

    /// Records for one patient (exact ID match), newest creation first.
    pub fn by_patient(&self, patient_id: &str) -> ServiceResult<Vec<ExamRecord>> {
        let mut exams: Vec<ExamRecord> = self
            .records
            .lock()?
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .cloned()
            .collect();
        exams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exams)
    }

    /// Look up a record by ID.
    pub fn get(&self, id: &str) -> ServiceResult<Option<ExamRecord>> {
        Ok(self.records.lock()?.iter().find(|e| e.id == id).cloned())
    }

    /// Append a record.
    pub fn insert(&self, record: ExamRecord) -> ServiceResult<()> {
        self.records.lock()?.push(record);
        Ok(())
    }

    /// Shallow-merge a patch onto a record. Returns the merged record, or
    /// `None` when the ID is absent.
    pub fn apply(&self, id: &str, patch: ExamPatch) -> ServiceResult<Option<ExamRecord>> {
        let mut records = self.records.lock()?;
        match records.iter_mut().find(|e| e.id == id) {
            Some(record) => {
                record.apply_patch(patch);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove a record. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> ServiceResult<bool> {
        let mut records = self.records.lock()?;
        let before = records.len();
        records.retain(|e| e.id != id);
        Ok(records.len() < before)
    }

    /// Case-insensitive substring match against exam number and patient
    /// name, in collection iteration order.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<ExamRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .records
            .lock()?
            .iter()
            .filter(|e| {
                e.exam_number.to_lowercase().contains(&needle)
                    || e.patient_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
