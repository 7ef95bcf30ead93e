//! Optica UI state layer.
//!
//! Screen-facing state machines over [`optica_core`]: the per-screen
//! [`ExamSession`], the controlled [`ExamForm`], and pure view projections
//! for the listing and detail screens. Nothing here renders; a UI toolkit
//! reads these types and calls back into them on user action.

pub mod form;
pub mod session;
pub mod view;

pub use form::{ExamForm, Eye, FrameField, RefractionField, VisionType};
pub use session::ExamSession;
pub use view::{
    format_signed, prescription_line, render_detail, DeleteConfirmation, ExamRow, ExamStats,
};
