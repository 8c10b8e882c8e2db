//! Instructions sent to the completion service.

use serde_json::Value;

use super::CompletionRequest;

/// The four kinds of generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Plan,
    Timeline,
    Features,
    TechStack,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Timeline => "timeline",
            Self::Features => "features",
            Self::TechStack => "tech_stack",
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self {
            Self::Plan => {
                "You are an expert software development planner. Generate a detailed project plan \
                 with timeline, features, and technical requirements. Respond in JSON format with \
                 clean structure."
            }
            Self::Timeline => {
                "You are an expert software project manager. Generate a detailed timeline for the \
                 project with specific milestones, durations, and tasks. Respond in JSON format as \
                 {\"timeline\": [{\"id\": string, \"name\": string, \"duration\": string, \
                 \"order\": integer, \"tasks\": [string], \"color\": string (optional)}]}."
            }
            Self::Features => {
                "You are an expert software architect. Suggest relevant features for the software \
                 project based on the project requirements. Each feature should have a name, \
                 description, and category. Respond in JSON format."
            }
            Self::TechStack => {
                "You are an expert software architect. Suggest a suitable technology stack for the \
                 project based on the requirements and selected features. Each tech item should \
                 have a name, category, and brief description. Respond in JSON format."
            }
        }
    }

    fn user_prompt(&self, project: &Value, features: Option<&Value>) -> String {
        let features = features.cloned().unwrap_or(Value::Array(Vec::new()));
        match self {
            Self::Plan => format!(
                "Generate a comprehensive project plan for a software development project with the following details: {}",
                project
            ),
            Self::Timeline => format!(
                "Generate a timeline for a software project with the following details: Project: {}, Selected Features: {}",
                project, features
            ),
            Self::Features => format!(
                "Suggest features for a software project with the following details: {}",
                project
            ),
            Self::TechStack => format!(
                "Suggest a technology stack for a software project with the following details: Project: {}, Selected Features: {}",
                project, features
            ),
        }
    }

    pub fn build(&self, project: &Value, features: Option<&Value>) -> CompletionRequest {
        CompletionRequest {
            system_prompt: self.system_prompt().to_string(),
            user_prompt: self.user_prompt(project, features),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embeds_serialized_project() {
        let request = PromptKind::Plan.build(&json!({"name": "My App"}), None);
        assert!(request.user_prompt.ends_with(r#"{"name":"My App"}"#));
        assert!(request.system_prompt.contains("JSON"));
    }

    #[test]
    fn timeline_prompt_embeds_features_and_shape() {
        let request = PromptKind::Timeline.build(
            &json!({"name": "My App"}),
            Some(&json!([{"id": "auth"}])),
        );
        assert!(request
            .user_prompt
            .contains(r#"Selected Features: [{"id":"auth"}]"#));
        assert!(request.system_prompt.contains("\"timeline\""));
    }

    #[test]
    fn missing_features_render_as_empty_list() {
        let request = PromptKind::TechStack.build(&json!({}), None);
        assert!(request.user_prompt.ends_with("Selected Features: []"));
    }
}
