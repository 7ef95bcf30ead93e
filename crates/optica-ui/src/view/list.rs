//! Exam listing: aggregate counters, row projection and the two-step
//! delete confirmation.

use chrono::{Datelike, NaiveDate};

use optica_core::ExamRecord;

use super::format_signed;

/// Whole months between the first day of `from`'s month and `to`'s month.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let span =
        i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month());
    span.max(0)
}

/// Derived counters shown above the exam table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamStats {
    pub total: usize,
    /// Exams dated in the current calendar month
    pub this_month: usize,
    /// Exams dated within the trailing 7 days (inclusive of today)
    pub last_7_days: usize,
    /// Total averaged over the months spanned by the collection
    pub monthly_average: f64,
}

impl ExamStats {
    pub fn compute(exams: &[ExamRecord], today: NaiveDate) -> Self {
        let total = exams.len();
        let this_month = exams
            .iter()
            .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
            .count();
        let week_start = today - chrono::Duration::days(6);
        let last_7_days = exams
            .iter()
            .filter(|e| e.date >= week_start && e.date <= today)
            .count();

        let months_spanned = exams
            .iter()
            .map(|e| e.date)
            .min()
            .map(|earliest| months_between(earliest, today) + 1)
            .unwrap_or(1);
        let monthly_average = total as f64 / months_spanned as f64;

        Self {
            total,
            this_month,
            last_7_days,
            monthly_average,
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamRow {
    pub id: String,
    pub exam_number: String,
    pub date: NaiveDate,
    pub patient_name: String,
    pub examiner_name: String,
    /// Far-vision spheres, e.g. "R +1.50 / L -1.00"
    pub sphere_summary: String,
}

impl ExamRow {
    pub fn project(exam: &ExamRecord) -> Self {
        Self {
            id: exam.id.clone(),
            exam_number: exam.exam_number.clone(),
            date: exam.date,
            patient_name: exam.patient_name.clone(),
            examiner_name: exam.examiner_name.clone(),
            sphere_summary: format!(
                "R {} / L {}",
                format_signed(exam.far_vision.right.sphere),
                format_signed(exam.far_vision.left.sphere)
            ),
        }
    }
}

/// Two-step per-row delete: first click arms one row, second click on the
/// same row executes. Arming is exclusive, so switching rows disarms the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteConfirmation {
    armed: Option<String>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the confirmation for one row.
    pub fn arm(&mut self, id: impl Into<String>) {
        self.armed = Some(id.into());
    }

    /// Disarm whatever is armed.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.as_deref() == Some(id)
    }

    /// Confirm against one row. True only when that exact row was armed;
    /// always leaves the state disarmed afterwards in that case.
    pub fn confirm(&mut self, id: &str) -> bool {
        if self.is_armed(id) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
