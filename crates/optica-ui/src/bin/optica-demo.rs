//! Scripted walkthrough of the exam screens against the mock service.
//!
//! Run with `RUST_LOG=debug` to watch the service and session traffic.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use optica_core::{ExamService, ExamStore, NotificationCenter, ServiceConfig};
use optica_ui::{
    render_detail, DeleteConfirmation, ExamForm, ExamRow, ExamSession, ExamStats, Eye,
    RefractionField, VisionType,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(ExamStore::new());
    let service = Arc::new(ExamService::with_config(
        store,
        ServiceConfig {
            latency: Duration::from_millis(120),
        },
    ));
    let notifier = NotificationCenter::new();
    let session = ExamSession::open(Arc::clone(&service), notifier.clone()).await;

    // Fill the form the way the create screen would.
    let mut form = ExamForm::new();
    form.patient_id = "patient-1".into();
    form.patient_name = "Ana Souza".into();
    form.examiner_id = "examiner-1".into();
    form.examiner_name = "Dr. Lima".into();
    form.set_refraction(VisionType::Far, Eye::Right, RefractionField::Sphere, "-1.25");
    form.set_refraction(VisionType::Far, Eye::Right, RefractionField::Cylinder, "-0.50");
    form.set_refraction(VisionType::Far, Eye::Right, RefractionField::Axis, "90");
    form.set_refraction(VisionType::Far, Eye::Left, RefractionField::Sphere, "1.50");
    form.set_pupillary(Eye::Right, "31.5");
    form.set_pupillary(Eye::Left, "31.0");

    let session_ref = &session;
    let saved = form
        .submit(|draft| async move { session_ref.create(draft).await })
        .await;
    let first = saved.ok_or_else(|| anyhow::anyhow!("create failed"))?;
    println!("saved {}\n", first.exam_number);

    let mut second = ExamForm::new();
    second.patient_id = "patient-2".into();
    second.patient_name = "Bruno Alves".into();
    second.examiner_name = "Dr. Lima".into();
    second
        .submit(|draft| async move { session_ref.create(draft).await })
        .await;

    println!("-- listing --");
    for row in session.exams().iter().map(ExamRow::project) {
        println!("{}  {}  {}  {}", row.exam_number, row.date, row.patient_name, row.sphere_summary);
    }
    let stats = ExamStats::compute(&session.exams(), Utc::now().date_naive());
    println!(
        "total {}, this month {}, last 7 days {}, avg/month {:.1}\n",
        stats.total, stats.this_month, stats.last_7_days, stats.monthly_average
    );

    println!("-- detail --");
    print!("{}", render_detail(&first));

    // Two-step delete on the second exam.
    let victim_id = session.exams()[0].id.clone();
    let mut confirm = DeleteConfirmation::new();
    confirm.arm(&victim_id);
    if confirm.confirm(&victim_id) {
        session.delete(&victim_id).await?;
    }
    println!("\nafter delete: {} exam(s) left", session.exams().len());

    println!("\n-- toasts --");
    for toast in notifier.snapshot() {
        println!("[{}] {}", toast.severity.label(), toast.text);
    }

    Ok(())
}
