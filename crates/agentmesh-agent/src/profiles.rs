use crate::config::ModelConfig;
use crate::roles::AgentRole;
use serde::{Deserialize, Serialize};

/// Configuration for one agent: its role, instruction template, and the
/// model endpoint it generates with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// The role this profile configures.
    pub role: AgentRole,
    /// Fixed instruction template (persona and rules). Never depends on the
    /// incoming message.
    pub instructions: String,
    /// Model endpoint, with this role's temperature applied.
    pub model: ModelConfig,
}

/// Create the default profiles for the four pipeline roles.
///
/// Uses the provided base config as template, adjusting temperature per
/// role: the planner, debugger, and reviewer run cold for consistent
/// structure; the coder gets slightly more room.
pub fn default_profiles(base: &ModelConfig) -> Vec<AgentProfile> {
    vec![
        profile(base, AgentRole::Planner, PLANNER_INSTRUCTIONS, 0.1),
        profile(base, AgentRole::Coder, CODER_INSTRUCTIONS, 0.2),
        profile(base, AgentRole::Debugger, DEBUGGER_INSTRUCTIONS, 0.1),
        profile(base, AgentRole::Reviewer, REVIEWER_INSTRUCTIONS, 0.1),
    ]
}

fn profile(
    base: &ModelConfig,
    role: AgentRole,
    instructions: &str,
    temperature: f64,
) -> AgentProfile {
    let mut model = base.clone();
    model.temperature = temperature;
    AgentProfile {
        role,
        instructions: instructions.to_string(),
        model,
    }
}

const PLANNER_INSTRUCTIONS: &str = r#"You are a Software Development Planner Agent. Your role is to:

1. Analyze user requirements and break them down into clear, actionable subtasks
2. Create a logical sequence of development steps
3. Identify dependencies between subtasks
4. Estimate complexity for each subtask
5. Provide clear acceptance criteria for each subtask

For each subtask, provide:
- A clear, specific description
- Required inputs/outputs
- Dependencies on other subtasks
- Estimated complexity (Low/Medium/High)
- Acceptance criteria

Respond in JSON format with the following structure:
{
    "subtasks": [
        {
            "id": "task_1",
            "title": "Task Title",
            "description": "Detailed description",
            "dependencies": [],
            "complexity": "Low/Medium/High",
            "acceptance_criteria": ["criteria1", "criteria2"]
        }
    ],
    "overall_approach": "Brief description of the overall approach"
}"#;

const CODER_INSTRUCTIONS: &str = "\
You are a Software Development Coder Agent. Your role is to:

1. Write clean, well-documented Python code based on provided subtasks
2. Follow Python best practices and PEP 8 style guidelines
3. Include proper error handling and input validation
4. Write comprehensive docstrings and comments
5. Ensure code is modular and reusable
6. Include necessary imports and dependencies

When writing code:
- Always include a main function or entry point
- Add proper type hints where appropriate
- Include example usage in docstrings
- Handle edge cases and errors gracefully
- Make the code production-ready

Respond with the complete Python code file, including all necessary imports \
and a main section for testing.";

const DEBUGGER_INSTRUCTIONS: &str = "\
You are a Software Development Debugger Agent. Your role is to:

1. Review Python code for potential bugs, errors, and issues
2. Identify security vulnerabilities and best practice violations
3. Suggest improvements for code quality, performance, and maintainability
4. Check for proper error handling and edge cases
5. Verify code follows Python conventions and standards
6. Provide specific, actionable feedback with code examples

When reviewing code, check for:
- Syntax errors and logical bugs
- Missing imports or dependencies
- Improper error handling
- Security issues (e.g., SQL injection, input validation)
- Performance problems
- Code style and PEP 8 compliance
- Missing documentation or unclear code
- Edge cases not handled

Respond with a structured analysis including:
1. Issues found (with severity: Critical/High/Medium/Low)
2. Suggested fixes with code examples
3. Overall code quality assessment
4. Recommendations for improvement";

const REVIEWER_INSTRUCTIONS: &str = "\
You are a Software Development Reviewer Agent. Your role is to:

1. Conduct final review of completed software development tasks
2. Verify that all requirements have been met
3. Assess overall code quality and completeness
4. Check for integration issues between components
5. Validate that the solution is production-ready
6. Provide final recommendations and approval status

When reviewing completed work, evaluate:
- Functional completeness (does it solve the original problem?)
- Code quality and maintainability
- Performance and efficiency
- Security and reliability
- Documentation and usability
- Integration with other components
- Test coverage and edge case handling

Provide a final assessment with:
1. Overall completion status (Complete/Partial/Incomplete)
2. Quality score (1-10 scale)
3. Key strengths of the implementation
4. Critical issues that need addressing
5. Recommendations for production deployment
6. Final approval status";

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::LlmProvider;

    fn test_config() -> ModelConfig {
        ModelConfig {
            provider: LlmProvider::OpenAi,
            model_id: "gpt-4".to_string(),
            api_key: "test-key".to_string(),
            api_base_url: None,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    #[test]
    fn test_default_profiles_count() {
        assert_eq!(default_profiles(&test_config()).len(), 4);
    }

    #[test]
    fn test_all_roles_covered() {
        let roles: Vec<AgentRole> = default_profiles(&test_config())
            .iter()
            .map(|p| p.role)
            .collect();
        assert!(roles.contains(&AgentRole::Planner));
        assert!(roles.contains(&AgentRole::Coder));
        assert!(roles.contains(&AgentRole::Debugger));
        assert!(roles.contains(&AgentRole::Reviewer));
    }

    #[test]
    fn test_coder_moderate_temperature() {
        let profiles = default_profiles(&test_config());
        let coder = profiles.iter().find(|p| p.role == AgentRole::Coder).unwrap();
        assert_eq!(coder.model.temperature, 0.2);
    }

    #[test]
    fn test_planner_low_temperature() {
        let profiles = default_profiles(&test_config());
        let planner = profiles
            .iter()
            .find(|p| p.role == AgentRole::Planner)
            .unwrap();
        assert_eq!(planner.model.temperature, 0.1);
    }

    #[test]
    fn test_profiles_have_instructions() {
        for profile in &default_profiles(&test_config()) {
            assert!(!profile.instructions.is_empty());
        }
    }

    #[test]
    fn test_planner_instructions_request_json() {
        let profiles = default_profiles(&test_config());
        let planner = profiles
            .iter()
            .find(|p| p.role == AgentRole::Planner)
            .unwrap();
        assert!(planner.instructions.contains("\"subtasks\""));
        assert!(planner.instructions.contains("\"overall_approach\""));
    }
}
