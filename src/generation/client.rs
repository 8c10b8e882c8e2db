use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{CompletionBackend, GenerationError, OpenAiBackend, PromptKind};
use crate::config::GenerationConfig;
use crate::models::{fallback_timeline, Feature, ProjectSetup, TimelineItem};

/// Outcome of a typed timeline request.
///
/// Both failure variants resolve to the same fallback; they stay distinct
/// so callers can log which path was taken.
#[derive(Debug)]
pub enum TimelineReply {
    Generated(Vec<TimelineItem>),
    /// The service answered, but not with a `timeline` array of items.
    Unparseable(String),
    Failed(GenerationError),
}

#[derive(Deserialize)]
struct TimelineEnvelope {
    timeline: Vec<TimelineItem>,
}

impl TimelineReply {
    pub fn parse(reply: Value) -> Self {
        match serde_json::from_value::<TimelineEnvelope>(reply) {
            Ok(envelope) => Self::Generated(envelope.timeline),
            Err(e) => Self::Unparseable(e.to_string()),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    /// The generated timeline, or the fixed fallback for either failure.
    pub fn into_timeline(self) -> Vec<TimelineItem> {
        match self {
            Self::Generated(timeline) => timeline,
            Self::Unparseable(reason) => {
                warn!(%reason, "Timeline reply had an unexpected shape, using fallback timeline");
                fallback_timeline()
            }
            Self::Failed(error) => {
                warn!(%error, "Timeline generation failed, using fallback timeline");
                fallback_timeline()
            }
        }
    }
}

/// Turns plan fragments into completion requests and parses the replies.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn CompletionBackend>,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let backend = OpenAiBackend::from_config(config)?;
        Ok(Self::new(Arc::new(backend), config.timeout))
    }

    async fn request(
        &self,
        kind: PromptKind,
        project: &Value,
        features: Option<&Value>,
    ) -> Result<Value, GenerationError> {
        debug!(kind = kind.as_str(), "Requesting generation");
        let request = kind.build(project, features);

        match tokio::time::timeout(self.timeout, self.backend.complete_json(request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        }
    }

    pub async fn generate_plan(&self, project: &Value) -> Result<Value, GenerationError> {
        self.request(PromptKind::Plan, project, None).await
    }

    /// Raw timeline reply, returned exactly as the service produced it.
    pub async fn request_timeline(
        &self,
        project: &Value,
        features: &Value,
    ) -> Result<Value, GenerationError> {
        self.request(PromptKind::Timeline, project, Some(features)).await
    }

    /// Typed timeline generation. Never returns an error; see [`TimelineReply`].
    pub async fn generate_timeline(
        &self,
        setup: &ProjectSetup,
        features: &[Feature],
    ) -> TimelineReply {
        let project = match serde_json::to_value(setup) {
            Ok(project) => project,
            Err(e) => return TimelineReply::Failed(GenerationError::Encode(e)),
        };
        let features = match serde_json::to_value(features) {
            Ok(features) => features,
            Err(e) => return TimelineReply::Failed(GenerationError::Encode(e)),
        };

        match self.request_timeline(&project, &features).await {
            Ok(reply) => TimelineReply::parse(reply),
            Err(e) => TimelineReply::Failed(e),
        }
    }

    pub async fn suggest_features(&self, project: &Value) -> Result<Value, GenerationError> {
        self.request(PromptKind::Features, project, None).await
    }

    pub async fn suggest_tech_stack(
        &self,
        project: &Value,
        features: &Value,
    ) -> Result<Value, GenerationError> {
        self.request(PromptKind::TechStack, project, Some(features)).await
    }
}
