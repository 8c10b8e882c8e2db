use serde::{Deserialize, Serialize};

use super::{default_features, default_tech_stack, Feature, ProjectSetup, TechStackItem, TimelineItem};

/// A wizard step, in the order the user walks through them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Setup,
    Features,
    TechStack,
    Overview,
}

impl Step {
    pub const ALL: [Step; 4] = [Self::Setup, Self::Features, Self::TechStack, Self::Overview];

    pub fn index(&self) -> usize {
        match self {
            Self::Setup => 0,
            Self::Features => 1,
            Self::TechStack => 2,
            Self::Overview => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Setup => "Project Setup",
            Self::Features => "Features",
            Self::TechStack => "Tech Stack",
            Self::Overview => "Overview",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The plan document for one pass through the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub setup: Option<ProjectSetup>,
    pub features: Vec<Feature>,
    pub tech_stack: Vec<TechStackItem>,
    pub timeline: Vec<TimelineItem>,
    pub current_step: Step,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            setup: None,
            features: default_features(),
            tech_stack: default_tech_stack(),
            timeline: Vec::new(),
            current_step: Step::Setup,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_features(&self) -> Vec<Feature> {
        self.features.iter().filter(|f| f.selected).cloned().collect()
    }

    pub fn selected_tech_stack(&self) -> Vec<TechStackItem> {
        self.tech_stack.iter().filter(|t| t.selected).cloned().collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_indices_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(4), None);
    }

    #[test]
    fn steps_are_ordered() {
        assert!(Step::Setup < Step::Features);
        assert!(Step::TechStack < Step::Overview);
    }

    #[test]
    fn new_session_starts_on_setup_with_defaults() {
        let session = Session::new();
        assert!(session.setup.is_none());
        assert_eq!(session.current_step, Step::Setup);
        assert_eq!(session.selected_features().len(), 4);
        assert_eq!(session.selected_tech_stack().len(), 6);
        assert!(session.timeline.is_empty());
    }
}
