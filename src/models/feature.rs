use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to user-added features.
pub const CUSTOM_CATEGORY: &str = "custom";

/// Icon assigned to user-added features.
pub const CUSTOM_ICON: &str = "settings";

/// A capability the planned project will ship.
///
/// Features come either from the default catalogue or from a custom
/// addition. After creation only `selected` changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Symbolic icon name (e.g. `user`, `database`, `settings`).
    pub icon: String,
    pub category: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl Feature {
    fn catalogue(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        category: &str,
        selected: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category: category.to_string(),
            selected,
        }
    }

    /// Creates a selected custom feature with a fresh id.
    pub fn custom(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: format!("Custom feature: {}", name),
            icon: CUSTOM_ICON.to_string(),
            category: CUSTOM_CATEGORY.to_string(),
            selected: true,
        }
    }
}

/// The feature catalogue every new session starts with.
pub fn default_features() -> Vec<Feature> {
    vec![
        Feature::catalogue(
            "auth",
            "User Authentication",
            "Secure login, registration, and user profile management",
            "user",
            "security",
            true,
        ),
        Feature::catalogue(
            "database",
            "Database Integration",
            "PostgreSQL integration for persistent storage of application data",
            "database",
            "infrastructure",
            true,
        ),
        Feature::catalogue(
            "ai",
            "AI Integration",
            "OpenAI API integration for intelligent text and code generation",
            "sparkles",
            "intelligence",
            true,
        ),
        Feature::catalogue(
            "analytics",
            "Analytics Dashboard",
            "Visualize project metrics and performance data",
            "bar-chart",
            "reporting",
            true,
        ),
        Feature::catalogue(
            "3d",
            "3D Visualization",
            "Interactive 3D visualization of project components and designs",
            "cube",
            "visualization",
            false,
        ),
        Feature::catalogue(
            "testing",
            "Automated Testing",
            "Integrated testing framework for quality assurance",
            "check-circle",
            "quality",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue_has_unique_ids() {
        let features = default_features();
        let mut ids: Vec<_> = features.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), features.len());
    }

    #[test]
    fn custom_feature_is_selected() {
        let feature = Feature::custom("Chat Export");
        assert_eq!(feature.category, "custom");
        assert_eq!(feature.icon, "settings");
        assert_eq!(feature.description, "Custom feature: Chat Export");
        assert!(feature.selected);
    }

    #[test]
    fn selected_defaults_to_true_when_missing() {
        let feature: Feature = serde_json::from_str(
            r#"{"id":"x","name":"X","description":"d","icon":"user","category":"c"}"#,
        )
        .unwrap();
        assert!(feature.selected);
    }
}
