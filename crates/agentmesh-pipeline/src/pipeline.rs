use crate::bundle::{join_artifacts, ResultBundle, RunFailure, RunStatus, SubtaskResult};
use crate::plan::Plan;
use agentmesh_agent::{default_profiles, generator_for, Agent, AgentRole, ModelConfig, TextGenerator};
use agentmesh_core::{MeshError, MeshResult, Message, Stage};
use std::sync::Arc;
use tracing::{error, info};

/// Observer for run progress.
///
/// Replaces a process-wide console: the pipeline reports through whatever
/// sink it was constructed with, so hosts can render output their own way
/// and tests can observe without capturing stdout.
pub trait ProgressSink: Send + Sync {
    /// A stage began executing.
    fn stage_started(&self, stage: Stage) {
        let _ = stage;
    }

    /// An agent produced a reply.
    fn agent_replied(&self, role: AgentRole, message: &Message) {
        let _ = (role, message);
    }
}

/// Sink that discards all progress events.
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Drives one task through the four-stage pipeline:
/// planning, then coding and debugging per subtask (strictly sequential),
/// then the final review.
///
/// Each pipeline owns exclusive agents; run state (conversation log, plan,
/// results) lives in the bundle built per call, so concurrent runs need
/// separate `Pipeline` instances.
pub struct Pipeline {
    planner: Agent,
    coder: Agent,
    debugger: Agent,
    reviewer: Agent,
    sink: Arc<dyn ProgressSink>,
}

impl Pipeline {
    /// Creates a pipeline with one HTTP generator backend per role, using
    /// the default role profiles derived from `base`.
    pub fn new(base: &ModelConfig) -> Self {
        Self::build(base, None)
    }

    /// Creates a pipeline whose four agents share the given generator.
    /// This is the seam for test doubles and custom providers.
    pub fn with_generator(base: &ModelConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self::build(base, Some(generator))
    }

    /// Replaces the progress sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    // default_profiles always covers all four roles
    #[allow(clippy::expect_used)]
    fn build(base: &ModelConfig, shared: Option<Arc<dyn TextGenerator>>) -> Self {
        let mut planner = None;
        let mut coder = None;
        let mut debugger = None;
        let mut reviewer = None;

        for profile in default_profiles(base) {
            let generator = match &shared {
                Some(generator) => Arc::clone(generator),
                None => generator_for(profile.model.clone()),
            };
            let agent = Agent::new(profile, generator);
            match agent.role() {
                AgentRole::Planner => planner = Some(agent),
                AgentRole::Coder => coder = Some(agent),
                AgentRole::Debugger => debugger = Some(agent),
                AgentRole::Reviewer => reviewer = Some(agent),
            }
        }

        Self {
            planner: planner.expect("planner profile"),
            coder: coder.expect("coder profile"),
            debugger: debugger.expect("debugger profile"),
            reviewer: reviewer.expect("reviewer profile"),
            sink: Arc::new(NullSink),
        }
    }

    /// Runs the full pipeline for a task.
    ///
    /// Never returns an error: a generation failure anywhere aborts the
    /// remaining stages, and the bundle comes back with everything produced
    /// before the failure point plus a [`RunStatus::Failed`] record.
    pub async fn run(&self, task: &str) -> ResultBundle {
        let mut bundle = ResultBundle::new(task);

        match self.drive(task, &mut bundle).await {
            Ok(()) => {
                info!(
                    subtasks = bundle.subtask_results.len(),
                    "pipeline run complete"
                );
                bundle.status = RunStatus::Completed;
            }
            Err(err) => {
                error!(error = %err, "pipeline run failed");
                bundle.status = RunStatus::Failed(RunFailure::from_error(err));
            }
        }

        bundle
    }

    async fn drive(&self, task: &str, bundle: &mut ResultBundle) -> MeshResult<()> {
        // Stage 1: planning
        self.sink.stage_started(Stage::Planning);
        info!(task, "pipeline: planning");

        let user_message = Message::new("User", self.planner.name(), task);
        let plan_reply = self
            .planner
            .respond(&user_message)
            .await
            .map_err(|e| MeshError::generation(Stage::Planning, None, &e))?;
        self.sink.agent_replied(AgentRole::Planner, &plan_reply);
        bundle.conversation.push(plan_reply.clone());
        bundle.planner_output = Some(plan_reply.content.clone());

        let plan = Plan::parse_or_fallback(&plan_reply.content, task);
        info!(subtasks = plan.subtasks.len(), "pipeline: plan ready");
        bundle.plan = Some(plan.clone());

        // Stage 2+3: coding and debugging, one subtask at a time in plan
        // order. Declared dependencies do not influence ordering.
        for (index, subtask) in plan.subtasks.iter().enumerate() {
            let ordinal = index + 1;

            self.sink.stage_started(Stage::Coding);
            info!(subtask = %subtask.id, ordinal, "pipeline: coding");

            let coder_message = Message::new(
                self.planner.name(),
                self.coder.name(),
                format!("Subtask {ordinal}: {}", subtask.work_description()),
            );
            let code_reply = self
                .coder
                .respond(&coder_message)
                .await
                .map_err(|e| MeshError::generation(Stage::Coding, Some(&subtask.id), &e))?;
            self.sink.agent_replied(AgentRole::Coder, &code_reply);
            bundle.conversation.push(code_reply.clone());

            self.sink.stage_started(Stage::Debugging);
            info!(subtask = %subtask.id, ordinal, "pipeline: debugging");

            let debug_message = Message::new(
                self.coder.name(),
                self.debugger.name(),
                code_reply.content.clone(),
            );
            let debug_reply = self
                .debugger
                .respond(&debug_message)
                .await
                .map_err(|e| MeshError::generation(Stage::Debugging, Some(&subtask.id), &e))?;
            self.sink.agent_replied(AgentRole::Debugger, &debug_reply);
            bundle.conversation.push(debug_reply.clone());

            // Recorded before the next subtask starts, so a later failure
            // keeps the completed work.
            bundle.subtask_results.push(SubtaskResult {
                subtask: subtask.clone(),
                code: code_reply.content,
                feedback: debug_reply.content,
            });
        }

        // Stage 4: final review over everything produced so far
        self.sink.stage_started(Stage::Review);
        info!("pipeline: review");

        let review_message = Message::new(
            "Coordinator",
            self.reviewer.name(),
            review_request(task, &plan, &bundle.subtask_results),
        );
        let review_reply = self
            .reviewer
            .respond(&review_message)
            .await
            .map_err(|e| MeshError::generation(Stage::Review, None, &e))?;
        self.sink.agent_replied(AgentRole::Reviewer, &review_reply);
        bundle.conversation.push(review_reply.clone());

        bundle.reviewer_output = Some(review_reply.content);
        bundle.final_code = Some(join_artifacts(&bundle.subtask_results));

        Ok(())
    }
}

impl RunFailure {
    fn from_error(err: MeshError) -> Self {
        match err {
            MeshError::Generation {
                stage,
                subtask,
                message,
            } => Self {
                stage,
                subtask,
                reason: message,
            },
            // Every fallible call in the run is stage-annotated; anything
            // else can only surface before subtask work begins.
            other => Self {
                stage: Stage::Planning,
                subtask: None,
                reason: other.to_string(),
            },
        }
    }
}

/// Builds the single review request: the original task, the plan's approach
/// summary, and each subtask's artifact-plus-feedback pair in order.
fn review_request(task: &str, plan: &Plan, results: &[SubtaskResult]) -> String {
    let mut request = format!(
        "Original Task: {task}\n\nOverall Approach:\n{}\n\nGenerated Code:\n",
        plan.overall_approach
    );
    for (index, result) in results.iter().enumerate() {
        let ordinal = index + 1;
        request.push_str(&format!("\nSubtask {ordinal} Code:\n{}\n", result.code));
        request.push_str(&format!(
            "\nDebugger Feedback for Subtask {ordinal}:\n{}\n",
            result.feedback
        ));
    }
    request
}
