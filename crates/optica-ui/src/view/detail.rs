//! Detail view formatting for a single exam.

use optica_core::{ExamRecord, EyeMeasurement};

/// Format a signed measurement with two decimals and an explicit "+" on
/// positive values, the way prescriptions are written.
pub fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// One eye's prescription line, e.g.
/// `sph -1.25  cyl -0.50  axis 90°  prism +0.50  base BU  add +2.00`.
pub fn prescription_line(measurement: &EyeMeasurement) -> String {
    let mut line = format!(
        "sph {}  cyl {}  axis {:.0}°",
        format_signed(measurement.sphere),
        format_signed(measurement.cylinder),
        measurement.axis
    );
    if measurement.prism != 0.0 {
        line.push_str(&format!("  prism {}", format_signed(measurement.prism)));
        if !measurement.base.is_empty() {
            line.push_str(&format!("  base {}", measurement.base));
        }
    }
    if let Some(addition) = measurement.addition {
        line.push_str(&format!("  add {}", format_signed(addition)));
    }
    line
}

/// Plain-text rendering of a full exam, one section per measurement group.
pub fn render_detail(exam: &ExamRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Exam {}  ({})\n", exam.exam_number, exam.date));
    out.push_str(&format!("Patient:  {}\n", exam.patient_name));
    out.push_str(&format!("Examiner: {}\n", exam.examiner_name));

    out.push_str("\nFar vision\n");
    out.push_str(&format!("  OD  {}\n", prescription_line(&exam.far_vision.right)));
    out.push_str(&format!("  OS  {}\n", prescription_line(&exam.far_vision.left)));

    if let Some(near) = &exam.near_vision {
        out.push_str("\nNear vision\n");
        out.push_str(&format!("  OD  {}\n", prescription_line(&near.right)));
        out.push_str(&format!("  OS  {}\n", prescription_line(&near.left)));
    }

    let pd = &exam.pupillary_distance;
    out.push_str(&format!("\nPD: R {:.1} mm / L {:.1} mm", pd.right, pd.left));
    if let Some(near) = &pd.near {
        out.push_str(&format!("  (near R {:.1} / L {:.1})", near.right, near.left));
    }
    out.push('\n');

    let frame = &exam.frame_measurements;
    out.push_str(&format!(
        "Frame: height {:.1} mm, R {:.1} mm, L {:.1} mm\n",
        frame.height, frame.right, frame.left
    ));

    if let Some(observations) = &exam.observations {
        out.push_str(&format!("\nObservations: {}\n", observations));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use optica_core::{ExamDraft, RefractionPair};

    #[test]
    fn test_format_signed_prefixes_positive_values() {
        assert_eq!(format_signed(1.5), "+1.50");
        assert_eq!(format_signed(-1.0), "-1.00");
        assert_eq!(format_signed(0.0), "0.00");
        assert_eq!(format_signed(0.25), "+0.25");
    }

    #[test]
    fn test_prescription_line_hides_unused_prism_and_addition() {
        let plain = EyeMeasurement {
            sphere: -1.25,
            cylinder: -0.5,
            axis: 90.0,
            ..Default::default()
        };
        assert_eq!(prescription_line(&plain), "sph -1.25  cyl -0.50  axis 90°");

        let full = EyeMeasurement {
            prism: 0.5,
            base: "BU".into(),
            addition: Some(2.0),
            ..plain
        };
        assert_eq!(
            prescription_line(&full),
            "sph -1.25  cyl -0.50  axis 90°  prism +0.50  base BU  add +2.00"
        );
    }

    #[test]
    fn test_render_detail_includes_optional_sections_when_present() {
        let draft = ExamDraft {
            date: NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(),
            patient_id: "patient-1".into(),
            patient_name: "Ana Souza".into(),
            examiner_name: "Dr. Lima".into(),
            near_vision: Some(RefractionPair::default()),
            observations: Some("stable".into()),
            ..Default::default()
        };
        let exam = ExamRecord::from_draft(draft, "EXM0001".into());

        let text = render_detail(&exam);
        assert!(text.contains("Exam EXM0001"));
        assert!(text.contains("Ana Souza"));
        assert!(text.contains("Near vision"));
        assert!(text.contains("Observations: stable"));

        let mut bare = exam.clone();
        bare.near_vision = None;
        bare.observations = None;
        let text = render_detail(&bare);
        assert!(!text.contains("Near vision"));
        assert!(!text.contains("Observations"));
    }
}
