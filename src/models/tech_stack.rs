use serde::{Deserialize, Serialize};

/// A technology candidate for the planned project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechStackItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: String,
    #[serde(default)]
    pub selected: bool,
}

impl TechStackItem {
    fn catalogue(id: &str, name: &str, category: &str, icon: &str, selected: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            icon: icon.to_string(),
            selected,
        }
    }
}

/// The technology catalogue every new session starts with.
pub fn default_tech_stack() -> Vec<TechStackItem> {
    vec![
        TechStackItem::catalogue("react", "React", "frontend", "react", true),
        TechStackItem::catalogue("node", "Node.js", "backend", "server", true),
        TechStackItem::catalogue("postgres", "PostgreSQL", "database", "database", true),
        TechStackItem::catalogue("express", "Express.js", "backend", "server", true),
        TechStackItem::catalogue("tailwind", "Tailwind CSS", "styling", "paintbrush", true),
        TechStackItem::catalogue("typescript", "TypeScript", "language", "code", true),
        TechStackItem::catalogue("docker", "Docker", "deployment", "box", false),
        TechStackItem::catalogue("graphql", "GraphQL", "api", "git-merge", false),
    ]
}
