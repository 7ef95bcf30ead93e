//! Optica Core Library
//!
//! Recording and review of optical clinical exams: refraction measurements,
//! pupillary distances and frame measurements, behind a mock asynchronous
//! service contract.
//!
//! # Architecture
//!
//! ```text
//!   screen state (optica-ui) ── async calls ──▶ ExamService
//!                  │                                │ fixed simulated latency
//!                  │                                ▼
//!                  │                            ExamStore
//!                  │                     (injected in-memory repository)
//!                  ▼
//!          NotificationCenter
//!     (timed, dismissable toasts)
//! ```
//!
//! The service exposes the same contract a real network API would: every
//! operation is async, incurs a round-trip delay and has a failure path.
//! The store is injected with explicit seed data so tests never depend on
//! hidden process-wide state.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ExamRecord, ExamDraft, Notification, etc.)
//! - [`store`]: In-memory repository and the async mock service over it
//! - [`notify`]: Transient notification center with timed expiry

pub mod models;
pub mod notify;
pub mod store;

// Re-export commonly used types
pub use models::{
    ExamDraft, ExamPatch, ExamRecord, EyeMeasurement, FrameMeasurements, Notification,
    PupillaryDistance, PupillaryNear, RefractionPair, Severity,
};
pub use notify::{NotificationCenter, NotifyConfig};
pub use store::{ExamService, ExamStore, ServiceConfig, ServiceError, ServiceResult};
