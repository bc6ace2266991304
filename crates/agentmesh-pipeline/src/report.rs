use crate::bundle::ResultBundle;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Flat record of a run, sufficient to persist and later reconstruct a
/// human-readable report. Mirrors the bundle's headline fields without the
/// conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRun {
    /// The task text the caller supplied.
    pub original_task: String,
    /// The planner's raw reply text.
    pub planner_output: Option<String>,
    /// All coder artifacts joined with a blank-line separator.
    pub final_code: Option<String>,
    /// The reviewer's final assessment.
    pub reviewer_output: Option<String>,
}

impl From<&ResultBundle> for SavedRun {
    fn from(bundle: &ResultBundle) -> Self {
        Self {
            original_task: bundle.original_task.clone(),
            planner_output: bundle.planner_output.clone(),
            final_code: bundle.final_code.clone(),
            reviewer_output: bundle.reviewer_output.clone(),
        }
    }
}

#[allow(clippy::expect_used)]
fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```[\w.+-]*\n(.*?)\n```").expect("fence pattern is valid")
    })
}

/// Extracts every fenced code block from `text`, in order of appearance.
///
/// Artifacts embed their code in standard triple-backtick fences with an
/// optional language tag; this is the documented convention for recovering
/// them from the concatenated artifact text. Text without fences yields an
/// empty list.
pub fn extract_fenced_blocks(text: &str) -> Vec<String> {
    fence_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
