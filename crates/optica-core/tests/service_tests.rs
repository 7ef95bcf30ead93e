//! Exam service integration tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use optica_core::{
    ExamDraft, ExamPatch, ExamRecord, ExamService, ExamStore, EyeMeasurement, FrameMeasurements,
    PupillaryDistance, PupillaryNear, RefractionPair, ServiceConfig, ServiceError,
};

fn make_service(store: Arc<ExamStore>) -> ExamService {
    // 2ms round trip: fast tests, but consecutive writes still get
    // distinguishable timestamps.
    ExamService::with_config(
        store,
        ServiceConfig {
            latency: Duration::from_millis(2),
        },
    )
}

fn make_draft(patient: &str, name: &str) -> ExamDraft {
    ExamDraft {
        exam_number: None,
        date: NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(),
        patient_id: patient.into(),
        patient_name: name.into(),
        examiner_id: "examiner-1".into(),
        examiner_name: "Dr. Lima".into(),
        far_vision: RefractionPair {
            right: EyeMeasurement {
                sphere: -1.25,
                cylinder: -0.5,
                axis: 90.0,
                prism: 0.0,
                base: String::new(),
                addition: None,
            },
            left: EyeMeasurement {
                sphere: -1.0,
                cylinder: -0.25,
                axis: 85.0,
                prism: 0.0,
                base: String::new(),
                addition: None,
            },
        },
        near_vision: Some(RefractionPair {
            right: EyeMeasurement {
                sphere: 0.75,
                addition: Some(2.0),
                ..Default::default()
            },
            left: EyeMeasurement {
                sphere: 1.0,
                addition: Some(2.0),
                ..Default::default()
            },
        }),
        pupillary_distance: PupillaryDistance {
            right: 31.5,
            left: 31.0,
            near: Some(PupillaryNear {
                right: 30.0,
                left: 29.5,
            }),
        },
        frame_measurements: FrameMeasurements {
            height: 38.0,
            right: 52.0,
            left: 52.0,
        },
        observations: Some("mild astigmatism".into()),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips_every_field() {
    let service = make_service(Arc::new(ExamStore::new()));

    let draft = make_draft("patient-1", "Ana Souza");
    let created = service.create(draft.clone()).await.unwrap();
    let fetched = service.get_by_id(&created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.date, draft.date);
    assert_eq!(fetched.patient_name, "Ana Souza");
    assert_eq!(fetched.far_vision, draft.far_vision);
    assert_eq!(fetched.near_vision, draft.near_vision);
    assert_eq!(fetched.pupillary_distance, draft.pupillary_distance);
    assert_eq!(fetched.frame_measurements, draft.frame_measurements);
    assert_eq!(fetched.observations, draft.observations);
    // Server-assigned pieces.
    assert_eq!(fetched.id.len(), 36);
    assert_eq!(fetched.exam_number, "EXM0001");
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn test_update_touches_only_observations_and_stamp() {
    let service = make_service(Arc::new(ExamStore::new()));
    let created = service.create(make_draft("patient-1", "Ana Souza")).await.unwrap();

    let updated = service
        .update(
            &created.id,
            ExamPatch {
                observations: Some("cleared at follow-up".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.observations.as_deref(), Some("cleared at follow-up"));
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.exam_number, created.exam_number);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.patient_id, created.patient_id);
    assert_eq!(updated.patient_name, created.patient_name);
    assert_eq!(updated.examiner_id, created.examiner_id);
    assert_eq!(updated.examiner_name, created.examiner_name);
    assert_eq!(updated.far_vision, created.far_vision);
    assert_eq!(updated.near_vision, created.near_vision);
    assert_eq!(updated.pupillary_distance, created.pupillary_distance);
    assert_eq!(updated.frame_measurements, created.frame_measurements);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let service = make_service(Arc::new(ExamStore::new()));
    let created = service.create(make_draft("patient-1", "Ana Souza")).await.unwrap();

    service.delete(&created.id).await.unwrap();

    let err = service.get_by_id(&created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_get_all_sorted_newest_first_regardless_of_insertion_order() {
    // Seed in scrambled creation order.
    let base = Utc::now();
    let mut seed = Vec::new();
    let offsets = [(30i64, "EXM0002"), (5, "EXM0004"), (60, "EXM0001"), (15, "EXM0003")];
    for (offset_minutes, number) in offsets {
        let mut record =
            ExamRecord::from_draft(make_draft("patient-1", "Ana Souza"), number.into());
        record.created_at = base - chrono::Duration::minutes(offset_minutes);
        record.updated_at = record.created_at;
        seed.push(record);
    }
    let service = make_service(Arc::new(ExamStore::with_seed(seed)));

    let exams = service.get_all().await.unwrap();
    let numbers: Vec<_> = exams.iter().map(|e| e.exam_number.as_str()).collect();
    assert_eq!(numbers, vec!["EXM0004", "EXM0003", "EXM0002", "EXM0001"]);

    // A freshly created record carries the most recent stamp, so it lands first.
    let newest = service.create(make_draft("patient-2", "Bruno Alves")).await.unwrap();
    let exams = service.get_all().await.unwrap();
    assert_eq!(exams[0].id, newest.id);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let service = make_service(Arc::new(ExamStore::new()));
    let mut draft = make_draft("patient-1", "Ana Souza");
    draft.exam_number = Some("ELB5091".into());
    service.create(draft).await.unwrap();
    service.create(make_draft("patient-2", "Bruno Alves")).await.unwrap();

    let lower = service.search("elb5091").await.unwrap();
    let upper = service.search("ELB5091").await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].exam_number, "ELB5091");

    let by_name = service.search("souza").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].patient_name, "Ana Souza");
}

#[tokio::test]
async fn test_exam_number_synthesized_from_existing_count() {
    let service = make_service(Arc::new(ExamStore::new()));
    service.create(make_draft("patient-1", "Ana Souza")).await.unwrap();

    // One record on file: the next synthesized number is EXM + zero-padded 2.
    let second = service.create(make_draft("patient-2", "Bruno Alves")).await.unwrap();
    assert_eq!(second.exam_number, "EXM0002");
}

#[tokio::test]
async fn test_get_by_patient_filters_exactly() {
    let service = make_service(Arc::new(ExamStore::new()));
    service.create(make_draft("patient-1", "Ana Souza")).await.unwrap();
    service.create(make_draft("patient-10", "Bruno Alves")).await.unwrap();
    service.create(make_draft("patient-1", "Ana Souza")).await.unwrap();

    let exams = service.get_by_patient("patient-1").await.unwrap();
    assert_eq!(exams.len(), 2);
    assert!(exams.iter().all(|e| e.patient_id == "patient-1"));
    // Newest first within the patient slice too.
    assert!(exams[0].created_at >= exams[1].created_at);
}

#[tokio::test]
async fn test_update_missing_id_is_not_found() {
    let service = make_service(Arc::new(ExamStore::new()));
    let err = service
        .update("missing", ExamPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
