//! Exam record models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Refraction measurements for a single eye.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EyeMeasurement {
    /// Spherical correction in diopters (signed)
    pub sphere: f64,
    /// Cylindrical correction in diopters (signed)
    pub cylinder: f64,
    /// Cylinder axis in degrees (0-180)
    pub axis: f64,
    /// Prismatic correction in diopters
    pub prism: f64,
    /// Prism base direction code (free text, e.g. "BU", "BI")
    pub base: String,
    /// Near addition in diopters
    pub addition: Option<f64>,
}

/// Right/left pair of refraction measurements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RefractionPair {
    pub right: EyeMeasurement,
    pub left: EyeMeasurement,
}

/// Near-vision pupillary distance sub-pair in millimeters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PupillaryNear {
    pub right: f64,
    pub left: f64,
}

/// Pupillary distances in millimeters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PupillaryDistance {
    pub right: f64,
    pub left: f64,
    /// Near-vision sub-pair, when measured separately
    pub near: Option<PupillaryNear>,
}

/// Physical frame dimensions in millimeters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FrameMeasurements {
    pub height: f64,
    pub right: f64,
    pub left: f64,
}

/// A recorded optical exam with bilateral measurements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamRecord {
    /// Unique exam ID, immutable after creation
    pub id: String,
    /// Human-facing ticket code (e.g. "EXM0002")
    pub exam_number: String,
    /// Calendar date of the exam
    pub date: NaiveDate,
    /// Patient local ID
    pub patient_id: String,
    /// Patient display name
    pub patient_name: String,
    /// Examiner local ID
    pub examiner_id: String,
    /// Examiner display name
    pub examiner_name: String,
    /// Distance-correction refraction, always present
    pub far_vision: RefractionPair,
    /// Close-up-correction refraction, when measured
    pub near_vision: Option<RefractionPair>,
    /// Pupillary distances
    pub pupillary_distance: PupillaryDistance,
    /// Frame dimensions for lens fitting
    pub frame_measurements: FrameMeasurements,
    /// Free-text clinical observations
    pub observations: Option<String>,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ExamRecord {
    /// Build a stored record from a create payload. The service decides the
    /// exam number; everything else carries over from the draft.
    pub fn from_draft(draft: ExamDraft, exam_number: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            exam_number,
            date: draft.date,
            patient_id: draft.patient_id,
            patient_name: draft.patient_name,
            examiner_id: draft.examiner_id,
            examiner_name: draft.examiner_name,
            far_vision: draft.far_vision,
            near_vision: draft.near_vision,
            pupillary_distance: draft.pupillary_distance,
            frame_measurements: draft.frame_measurements,
            observations: draft.observations,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge a patch onto this record: every `Some` field replaces
    /// the whole corresponding field. Refreshes `updated_at`.
    pub fn apply_patch(&mut self, patch: ExamPatch) {
        if let Some(exam_number) = patch.exam_number {
            self.exam_number = exam_number;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(patient_name) = patch.patient_name {
            self.patient_name = patient_name;
        }
        if let Some(examiner_id) = patch.examiner_id {
            self.examiner_id = examiner_id;
        }
        if let Some(examiner_name) = patch.examiner_name {
            self.examiner_name = examiner_name;
        }
        if let Some(far_vision) = patch.far_vision {
            self.far_vision = far_vision;
        }
        if let Some(near_vision) = patch.near_vision {
            self.near_vision = Some(near_vision);
        }
        if let Some(pupillary_distance) = patch.pupillary_distance {
            self.pupillary_distance = pupillary_distance;
        }
        if let Some(frame_measurements) = patch.frame_measurements {
            self.frame_measurements = frame_measurements;
        }
        if let Some(observations) = patch.observations {
            self.observations = Some(observations);
        }
        self.touch();
    }

    /// Refresh the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Create payload: an exam as entered, before the service assigns identity
/// and audit stamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamDraft {
    /// Ticket code; synthesized by the service when absent
    pub exam_number: Option<String>,
    pub date: NaiveDate,
    pub patient_id: String,
    pub patient_name: String,
    pub examiner_id: String,
    pub examiner_name: String,
    pub far_vision: RefractionPair,
    pub near_vision: Option<RefractionPair>,
    pub pupillary_distance: PupillaryDistance,
    pub frame_measurements: FrameMeasurements,
    pub observations: Option<String>,
}

impl Default for ExamDraft {
    fn default() -> Self {
        Self {
            exam_number: None,
            date: Utc::now().date_naive(),
            patient_id: String::new(),
            patient_name: String::new(),
            examiner_id: String::new(),
            examiner_name: String::new(),
            far_vision: RefractionPair::default(),
            near_vision: None,
            pupillary_distance: PupillaryDistance::default(),
            frame_measurements: FrameMeasurements::default(),
            observations: None,
        }
    }
}

/// Shallow update payload: `Some` replaces the whole top-level field, `None`
/// leaves it untouched. Optional record fields cannot be cleared back to
/// absent through a patch; callers replace the group instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExamPatch {
    pub exam_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub examiner_id: Option<String>,
    pub examiner_name: Option<String>,
    pub far_vision: Option<RefractionPair>,
    pub near_vision: Option<RefractionPair>,
    pub pupillary_distance: Option<PupillaryDistance>,
    pub frame_measurements: Option<FrameMeasurements>,
    pub observations: Option<String>,
}
