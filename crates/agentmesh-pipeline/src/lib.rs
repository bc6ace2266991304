//! Pipeline orchestration: plan parsing, the four-stage run loop, and the
//! result bundle returned to the caller.
//!
//! A run moves a task through planning, per-subtask coding and debugging,
//! and a final review, accumulating everything into a [`ResultBundle`]. A
//! generation failure anywhere aborts the remaining stages but never loses
//! work completed before it.
//!
//! # Main types
//!
//! - [`Pipeline`] — Drives one task through the four stages.
//! - [`Plan`] — Parsed task breakdown, with a safe fallback for malformed
//!   planner replies.
//! - [`ResultBundle`] — The run's terminal record.
//! - [`SavedRun`] — Flat persistence format for a run.

/// Result bundle and run status types.
pub mod bundle;
/// Plan document parsing and the fallback plan.
pub mod plan;
/// Run orchestration.
pub mod pipeline;
/// Saved-run persistence format and artifact extraction.
pub mod report;

pub use bundle::{join_artifacts, ResultBundle, RunFailure, RunStatus, SubtaskResult};
pub use pipeline::{NullSink, Pipeline, ProgressSink};
pub use plan::{Complexity, Plan, SubtaskDescriptor};
pub use report::{extract_fenced_blocks, SavedRun};
