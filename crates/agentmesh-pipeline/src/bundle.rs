use crate::plan::{Plan, SubtaskDescriptor};
use agentmesh_core::{Message, Stage};
use serde::{Deserialize, Serialize};

/// One subtask paired with the coder's artifact and the debugger's
/// feedback. Appended to the bundle only once both fields exist; never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskResult {
    /// The subtask this result belongs to.
    pub subtask: SubtaskDescriptor,
    /// The coder's artifact text.
    pub code: String,
    /// The debugger's feedback text.
    pub feedback: String,
}

/// Why a run stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    /// The stage that was executing when the failure occurred.
    pub stage: Stage,
    /// The subtask being processed, when applicable.
    pub subtask: Option<String>,
    /// Human-readable description of the fault.
    pub reason: String,
}

/// Terminal status of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All stages ran to completion.
    Completed,
    /// A stage failed; the bundle keeps everything produced before it.
    Failed(RunFailure),
}

/// The complete output record of one pipeline run.
///
/// Fields are populated in stage order; after a failure, everything
/// produced before the failure point is present and the rest stays absent.
/// The caller owns the bundle once `run` returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBundle {
    /// The task text the caller supplied.
    pub original_task: String,
    /// The planner's raw reply text.
    pub planner_output: Option<String>,
    /// The parsed (or fallback) plan.
    pub plan: Option<Plan>,
    /// Completed subtask results, in plan order.
    pub subtask_results: Vec<SubtaskResult>,
    /// The reviewer's final assessment.
    pub reviewer_output: Option<String>,
    /// All coder artifacts joined with a blank-line separator.
    pub final_code: Option<String>,
    /// Every agent reply, in send order.
    pub conversation: Vec<Message>,
    /// Terminal status, set when the run finishes.
    pub status: RunStatus,
}

impl ResultBundle {
    /// An empty bundle for a task, before any stage has run.
    pub fn new(original_task: impl Into<String>) -> Self {
        Self {
            original_task: original_task.into(),
            planner_output: None,
            plan: None,
            subtask_results: Vec::new(),
            reviewer_output: None,
            final_code: None,
            conversation: Vec::new(),
            status: RunStatus::Completed,
        }
    }

    /// Whether the run completed all stages.
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Joins the coder artifacts of completed results with one blank line
/// between them. Pure and idempotent over the same inputs.
pub fn join_artifacts(results: &[SubtaskResult]) -> String {
    results
        .iter()
        .map(|r| r.code.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
