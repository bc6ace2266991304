use serde::{Deserialize, Serialize};

/// Subtask id used when a fallback plan is synthesized.
pub const FALLBACK_SUBTASK_ID: &str = "task_1";
/// Subtask title used when a fallback plan is synthesized.
pub const FALLBACK_SUBTASK_TITLE: &str = "Implement the requested functionality";

/// Estimated complexity of one subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    /// Straightforward, little risk.
    #[serde(alias = "low", alias = "LOW")]
    Low,
    /// Some moving parts.
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    /// Significant effort or risk.
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

/// One subtask extracted from a planner reply. Read-only after parsing.
///
/// Dependency identifiers are carried but never validated or used for
/// scheduling: the plan is advisory and execution order is always
/// declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskDescriptor {
    /// Identifier unique within one plan.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// Detailed description. May be empty; [`Self::work_description`] falls
    /// back to the title.
    #[serde(default)]
    pub description: String,
    /// Identifiers of subtasks this one claims to depend on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Estimated complexity, if the planner provided one.
    #[serde(default)]
    pub complexity: Option<Complexity>,
    /// Acceptance criteria, if the planner provided them.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl SubtaskDescriptor {
    /// The text handed to the coder: the description, or the title when the
    /// description is empty.
    pub fn work_description(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}

/// An ordered task breakdown plus a free-text approach summary, derived
/// from exactly one planner reply per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Subtasks in declaration order.
    pub subtasks: Vec<SubtaskDescriptor>,
    /// Free-text summary of the overall approach.
    #[serde(default)]
    pub overall_approach: String,
}

impl Plan {
    /// Interprets raw planner text as a structured plan document.
    pub fn parse(raw: &str) -> Result<Plan, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Synthesizes the single-subtask fallback plan from the original user
    /// task and the raw planner text.
    ///
    /// The subtask describes the user's task, not the planner's reply, so
    /// the coder always has real work to do; the raw reply is preserved
    /// verbatim as the approach summary. Pure function, independently
    /// testable.
    pub fn fallback(original_task: &str, raw_planner_text: &str) -> Plan {
        Plan {
            subtasks: vec![SubtaskDescriptor {
                id: FALLBACK_SUBTASK_ID.to_string(),
                title: FALLBACK_SUBTASK_TITLE.to_string(),
                description: original_task.to_string(),
                dependencies: Vec::new(),
                complexity: None,
                acceptance_criteria: Vec::new(),
            }],
            overall_approach: raw_planner_text.to_string(),
        }
    }

    /// Parses raw planner text, falling back to [`Plan::fallback`] when the
    /// text is malformed or yields zero subtasks. Never fails: the pipeline
    /// always gets at least one subtask to work on.
    pub fn parse_or_fallback(raw: &str, original_task: &str) -> Plan {
        match Plan::parse(raw) {
            Ok(plan) if !plan.subtasks.is_empty() => plan,
            _ => Plan::fallback(original_task, raw),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "subtasks": [
            {
                "id": "task_1",
                "title": "Set up input parsing",
                "description": "Read and tokenize the expression",
                "dependencies": [],
                "complexity": "Low",
                "acceptance_criteria": ["handles digits", "handles operators"]
            },
            {
                "id": "task_2",
                "title": "Evaluate expressions",
                "description": "Apply operator precedence",
                "dependencies": ["task_1"],
                "complexity": "Medium",
                "acceptance_criteria": []
            }
        ],
        "overall_approach": "Tokenize then evaluate"
    }"#;

    #[test]
    fn test_parse_retains_subtasks_in_declaration_order() {
        let plan = Plan::parse(WELL_FORMED).unwrap();
        assert_eq!(plan.subtasks.len(), 2);
        assert_eq!(plan.subtasks[0].id, "task_1");
        assert_eq!(plan.subtasks[0].title, "Set up input parsing");
        assert_eq!(
            plan.subtasks[0].description,
            "Read and tokenize the expression"
        );
        assert_eq!(plan.subtasks[1].id, "task_2");
        assert_eq!(plan.subtasks[1].dependencies, vec!["task_1"]);
        assert_eq!(plan.subtasks[1].complexity, Some(Complexity::Medium));
        assert_eq!(plan.overall_approach, "Tokenize then evaluate");
    }

    #[test]
    fn test_parse_tolerates_missing_optional_fields() {
        let plan = Plan::parse(r#"{"subtasks": [{"id": "t", "title": "Only title"}]}"#).unwrap();
        assert_eq!(plan.subtasks[0].description, "");
        assert_eq!(plan.subtasks[0].work_description(), "Only title");
        assert!(plan.subtasks[0].dependencies.is_empty());
        assert!(plan.subtasks[0].complexity.is_none());
        assert_eq!(plan.overall_approach, "");
    }

    #[test]
    fn test_complexity_case_insensitive() {
        let plan = Plan::parse(
            r#"{"subtasks": [{"id": "t", "title": "T", "complexity": "high"}]}"#,
        )
        .unwrap();
        assert_eq!(plan.subtasks[0].complexity, Some(Complexity::High));
    }

    #[test]
    fn test_fallback_describes_original_task() {
        let plan = Plan::fallback("Do X", "I cannot help");
        assert_eq!(plan.subtasks.len(), 1);
        let subtask = &plan.subtasks[0];
        assert_eq!(subtask.id, FALLBACK_SUBTASK_ID);
        assert_eq!(subtask.title, FALLBACK_SUBTASK_TITLE);
        assert_eq!(subtask.description, "Do X");
        assert!(subtask.dependencies.is_empty());
        assert!(subtask.complexity.is_none());
        assert!(subtask.acceptance_criteria.is_empty());
        assert_eq!(plan.overall_approach, "I cannot help");
    }

    #[test]
    fn test_parse_or_fallback_on_empty_string() {
        let plan = Plan::parse_or_fallback("", "Do X");
        assert_eq!(plan.subtasks[0].id, FALLBACK_SUBTASK_ID);
        assert_eq!(plan.subtasks[0].description, "Do X");
    }

    #[test]
    fn test_parse_or_fallback_on_broken_json() {
        let plan = Plan::parse_or_fallback("not json {", "Do X");
        assert_eq!(plan.subtasks[0].description, "Do X");
        assert_eq!(plan.overall_approach, "not json {");
    }

    #[test]
    fn test_parse_or_fallback_on_missing_subtasks_key() {
        let plan = Plan::parse_or_fallback(r#"{"overall_approach": "wing it"}"#, "Do X");
        assert_eq!(plan.subtasks[0].id, FALLBACK_SUBTASK_ID);
    }

    #[test]
    fn test_parse_or_fallback_on_empty_subtask_list() {
        let raw = r#"{"subtasks": [], "overall_approach": "trivial"}"#;
        let plan = Plan::parse_or_fallback(raw, "Do X");
        assert_eq!(plan.subtasks.len(), 1);
        assert_eq!(plan.subtasks[0].description, "Do X");
        // Raw text, not the parsed approach, is preserved verbatim.
        assert_eq!(plan.overall_approach, raw);
    }

    #[test]
    fn test_parse_or_fallback_keeps_well_formed_plan() {
        let plan = Plan::parse_or_fallback(WELL_FORMED, "Build a calculator");
        assert_eq!(plan.subtasks.len(), 2);
        assert_eq!(plan.subtasks[1].title, "Evaluate expressions");
    }

    #[test]
    fn test_unresolved_dependencies_are_accepted() {
        // Dependency identifiers are advisory; nothing validates them.
        let plan = Plan::parse(
            r#"{"subtasks": [{"id": "t", "title": "T", "dependencies": ["no_such_task"]}]}"#,
        )
        .unwrap();
        assert_eq!(plan.subtasks[0].dependencies, vec!["no_such_task"]);
    }
}
