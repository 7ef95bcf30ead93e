//! Controlled form state for one exam record.
//!
//! Every input field maps to one scoped setter; setters replace only the
//! targeted leaf. Numeric fields parse user text to f64 and fall back to
//! zero on garbage, matching how a controlled input keeps rendering.

use std::future::Future;

use chrono::{NaiveDate, Utc};

use optica_core::{
    ExamDraft, ExamRecord, EyeMeasurement, FrameMeasurements, PupillaryDistance, PupillaryNear,
    RefractionPair, ServiceResult,
};

/// Which refraction group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionType {
    Far,
    Near,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Right,
    Left,
}

/// One leaf of an eye's refraction measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefractionField {
    Sphere,
    Cylinder,
    Axis,
    Prism,
    Base,
    Addition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    Height,
    Right,
    Left,
}

fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Editable state for the exam form. Unset numerics default to zero, unset
/// text to the empty string; the near-vision group is always concrete here
/// even though the stored record keeps it optional.
#[derive(Debug, Clone)]
pub struct ExamForm {
    pub exam_number: String,
    pub date: NaiveDate,
    pub patient_id: String,
    pub patient_name: String,
    pub examiner_id: String,
    pub examiner_name: String,
    pub observations: String,
    pub far_vision: RefractionPair,
    pub near_vision: RefractionPair,
    pub pupillary_distance: PupillaryDistance,
    pub frame_measurements: FrameMeasurements,
    submitting: bool,
    error: Option<String>,
}

impl Default for ExamForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamForm {
    /// Blank form dated today.
    pub fn new() -> Self {
        Self {
            exam_number: String::new(),
            date: Utc::now().date_naive(),
            patient_id: String::new(),
            patient_name: String::new(),
            examiner_id: String::new(),
            examiner_name: String::new(),
            observations: String::new(),
            far_vision: RefractionPair::default(),
            near_vision: RefractionPair::default(),
            pupillary_distance: PupillaryDistance::default(),
            frame_measurements: FrameMeasurements::default(),
            submitting: false,
            error: None,
        }
    }

    /// Form pre-filled from an existing record (edit flow).
    pub fn from_record(record: &ExamRecord) -> Self {
        Self {
            exam_number: record.exam_number.clone(),
            date: record.date,
            patient_id: record.patient_id.clone(),
            patient_name: record.patient_name.clone(),
            examiner_id: record.examiner_id.clone(),
            examiner_name: record.examiner_name.clone(),
            observations: record.observations.clone().unwrap_or_default(),
            far_vision: record.far_vision.clone(),
            near_vision: record.near_vision.clone().unwrap_or_default(),
            pupillary_distance: record.pupillary_distance.clone(),
            frame_measurements: record.frame_measurements.clone(),
            submitting: false,
            error: None,
        }
    }

    fn eye_mut(&mut self, vision: VisionType, eye: Eye) -> &mut EyeMeasurement {
        let pair = match vision {
            VisionType::Far => &mut self.far_vision,
            VisionType::Near => &mut self.near_vision,
        };
        match eye {
            Eye::Right => &mut pair.right,
            Eye::Left => &mut pair.left,
        }
    }

    /// Set one refraction leaf from raw input text.
    pub fn set_refraction(
        &mut self,
        vision: VisionType,
        eye: Eye,
        field: RefractionField,
        raw: &str,
    ) {
        let measurement = self.eye_mut(vision, eye);
        match field {
            RefractionField::Sphere => measurement.sphere = parse_decimal(raw),
            RefractionField::Cylinder => measurement.cylinder = parse_decimal(raw),
            RefractionField::Axis => measurement.axis = parse_decimal(raw),
            RefractionField::Prism => measurement.prism = parse_decimal(raw),
            RefractionField::Base => measurement.base = raw.to_string(),
            RefractionField::Addition => {
                measurement.addition = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_decimal(raw))
                };
            }
        }
    }

    /// Set one side of the distance pupillary measurement.
    pub fn set_pupillary(&mut self, eye: Eye, raw: &str) {
        let value = parse_decimal(raw);
        match eye {
            Eye::Right => self.pupillary_distance.right = value,
            Eye::Left => self.pupillary_distance.left = value,
        }
    }

    /// Set one side of the near pupillary sub-pair, creating it on first use.
    pub fn set_pupillary_near(&mut self, eye: Eye, raw: &str) {
        let value = parse_decimal(raw);
        let near = self.pupillary_distance.near.get_or_insert_with(PupillaryNear::default);
        match eye {
            Eye::Right => near.right = value,
            Eye::Left => near.left = value,
        }
    }

    /// Set one frame dimension.
    pub fn set_frame(&mut self, field: FrameField, raw: &str) {
        let value = parse_decimal(raw);
        match field {
            FrameField::Height => self.frame_measurements.height = value,
            FrameField::Right => self.frame_measurements.right = value,
            FrameField::Left => self.frame_measurements.left = value,
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Inline submit error, shown next to the form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The create/update payload for the current field state. Blank text
    /// fields become absent rather than empty strings.
    pub fn to_draft(&self) -> ExamDraft {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| s.to_string())
        };
        ExamDraft {
            exam_number: non_blank(&self.exam_number),
            date: self.date,
            patient_id: self.patient_id.clone(),
            patient_name: self.patient_name.clone(),
            examiner_id: self.examiner_id.clone(),
            examiner_name: self.examiner_name.clone(),
            far_vision: self.far_vision.clone(),
            near_vision: Some(self.near_vision.clone()),
            pupillary_distance: self.pupillary_distance.clone(),
            frame_measurements: self.frame_measurements.clone(),
            observations: non_blank(&self.observations),
        }
    }

    /// Run the caller-supplied persistence op with this form's draft.
    /// Returns the saved record on success (caller navigates to the
    /// listing); on failure stores the error inline and returns `None` so
    /// the form stays mounted with the entered data intact.
    pub async fn submit<F, Fut>(&mut self, op: F) -> Option<ExamRecord>
    where
        F: FnOnce(ExamDraft) -> Fut,
        Fut: Future<Output = ServiceResult<ExamRecord>>,
    {
        self.submitting = true;
        self.error = None;
        let outcome = op(self.to_draft()).await;
        self.submitting = false;
        match outcome {
            Ok(record) => Some(record),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
