//! The four-step planning wizard.
//!
//! Steps run `Setup → Features → TechStack → Overview`. Each forward move
//! goes through the step's own operation, which checks that step's
//! precondition. Moving back to an earlier step is always allowed and does
//! not re-check anything. Without a submitted setup, every step but `Setup`
//! redirects to `Setup`.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::export::{ExportError, PlanExport};
use crate::generation::GenerationClient;
use crate::models::*;

/// Minimum trimmed length of a custom feature name.
pub const MIN_CUSTOM_FEATURE_LEN: usize = 3;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("Feature name too short")]
    FeatureNameTooShort,

    #[error("No features selected")]
    NoFeaturesSelected,

    #[error("No technologies selected")]
    NoTechnologiesSelected,

    #[error("Project setup is required")]
    SetupRequired,

    #[error("Only available on the {expected} step (currently on {current})")]
    WrongStep { expected: Step, current: Step },

    #[error("Cannot jump ahead to {requested} from {current}")]
    StepNotReached { requested: Step, current: Step },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Technology not found: {0}")]
    TechnologyNotFound(String),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to encode plan: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the session's timeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineOrigin {
    Generated,
    Fallback,
}

/// Drives one [`Session`] through the wizard.
pub struct Wizard {
    session: Session,
    generator: GenerationClient,
}

impl Wizard {
    pub fn new(generator: GenerationClient) -> Self {
        Self::with_session(Session::new(), generator)
    }

    pub fn with_session(session: Session, generator: GenerationClient) -> Self {
        Self { session, generator }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_step(&self) -> Step {
        self.session.current_step
    }

    fn expect_step(&self, expected: Step) -> Result<(), WizardError> {
        let current = self.session.current_step;
        if current == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep { expected, current })
        }
    }

    fn require_setup(&mut self) -> Result<ProjectSetup, WizardError> {
        match &self.session.setup {
            Some(setup) => Ok(setup.clone()),
            None => {
                self.session.current_step = Step::Setup;
                Err(WizardError::SetupRequired)
            }
        }
    }

    /// Navigates directly to `step` and returns the step actually entered.
    ///
    /// Only the current step or an earlier one may be entered this way.
    pub fn go_to(&mut self, step: Step) -> Result<Step, WizardError> {
        if step != Step::Setup && self.session.setup.is_none() {
            debug!(requested = %step, "No project setup, redirecting to setup");
            self.session.current_step = Step::Setup;
            return Ok(Step::Setup);
        }

        let current = self.session.current_step;
        if step > current {
            return Err(WizardError::StepNotReached {
                requested: step,
                current,
            });
        }

        self.session.current_step = step;
        Ok(step)
    }

    pub fn submit_setup(&mut self, input: ProjectSetupInput) -> Result<&ProjectSetup, WizardError> {
        self.expect_step(Step::Setup)?;
        let setup = ProjectSetup::validate(input)?;

        info!(name = %setup.name, project_type = setup.project_type.as_str(), "Project setup submitted");
        self.session.current_step = Step::Features;
        Ok(&*self.session.setup.insert(setup))
    }

    pub fn add_custom_feature(&mut self, name: &str) -> Result<&Feature, WizardError> {
        let name = name.trim();
        if name.chars().count() < MIN_CUSTOM_FEATURE_LEN {
            return Err(WizardError::FeatureNameTooShort);
        }

        let feature = Feature::custom(name);
        debug!(id = %feature.id, name = %feature.name, "Added custom feature");
        self.session.features.push(feature);
        Ok(&self.session.features[self.session.features.len() - 1])
    }

    /// Flips `selected` and returns the new value.
    pub fn toggle_feature(&mut self, id: &str) -> Result<bool, WizardError> {
        let feature = self
            .session
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| WizardError::FeatureNotFound(id.to_string()))?;
        feature.selected = !feature.selected;
        Ok(feature.selected)
    }

    /// Flips `selected` and returns the new value.
    pub fn toggle_tech_stack(&mut self, id: &str) -> Result<bool, WizardError> {
        let item = self
            .session
            .tech_stack
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| WizardError::TechnologyNotFound(id.to_string()))?;
        item.selected = !item.selected;
        Ok(item.selected)
    }

    /// Generates the timeline and moves on to the tech-stack step.
    ///
    /// Generation failures never block the move; the fallback timeline is
    /// stored instead. The session is only touched once the generation call
    /// has resolved, so dropping the returned future leaves it unchanged.
    pub async fn advance_from_features(&mut self) -> Result<TimelineOrigin, WizardError> {
        let setup = self.require_setup()?;
        self.expect_step(Step::Features)?;

        let selected = self.session.selected_features();
        if selected.is_empty() {
            return Err(WizardError::NoFeaturesSelected);
        }

        let reply = self.generator.generate_timeline(&setup, &selected).await;
        let origin = if reply.is_generated() {
            TimelineOrigin::Generated
        } else {
            TimelineOrigin::Fallback
        };

        self.session.timeline = reply.into_timeline();
        self.session.current_step = Step::TechStack;
        info!(?origin, phases = self.session.timeline.len(), "Timeline ready");
        Ok(origin)
    }

    pub fn advance_from_tech_stack(&mut self) -> Result<(), WizardError> {
        self.require_setup()?;
        self.expect_step(Step::TechStack)?;

        if self.session.tech_stack.iter().all(|t| !t.selected) {
            return Err(WizardError::NoTechnologiesSelected);
        }

        self.session.current_step = Step::Overview;
        Ok(())
    }

    /// Starts a new project from the default catalogues.
    pub fn reset(&mut self) {
        info!("Resetting wizard session");
        self.session.reset();
    }

    pub fn export(&self, now: DateTime<Utc>) -> Result<PlanExport, WizardError> {
        Ok(PlanExport::from_session(&self.session, now)?)
    }

    /// Builds the record to persist for this plan. Only selected features
    /// and technologies are kept.
    pub fn to_record(&self, created_at: DateTime<Utc>) -> Result<InsertProject, WizardError> {
        let setup = self.session.setup.as_ref().ok_or(WizardError::SetupRequired)?;

        Ok(InsertProject {
            name: setup.name.clone(),
            description: setup.description.clone(),
            project_type: setup.project_type.as_str().to_string(),
            features: serde_json::to_value(self.session.selected_features())?,
            tech_stack: serde_json::to_value(self.session.selected_tech_stack())?,
            timeline: serde_json::to_value(&self.session.timeline)?,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
