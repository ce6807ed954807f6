//! dropgrade-core — Placement tracking, acceptance and grading for
//! drag-and-drop questions.
//!
//! This crate defines the task data model, the per-session placement store,
//! and the grading pass that the rest of dropgrade builds on.

pub mod acceptance;
pub mod error;
pub mod gesture;
pub mod grading;
pub mod layout;
pub mod model;
pub mod parser;
pub mod placement;
pub mod report;
pub mod session;
pub mod traits;

pub use error::TaskError;
pub use grading::{grade, GradeOutcome, ScoreResult, Verdict};
pub use model::{ElementId, TaskDefinition, ZoneId};
pub use placement::PlacementStore;
pub use session::QuestionSession;
