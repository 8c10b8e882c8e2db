//! Stub completion backends shared by the integration specs.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use plan_wizard::generation::{CompletionBackend, CompletionRequest, GenerationClient, GenerationError};
use plan_wizard::models::{ProjectSetupInput, TimelineItem};
use serde_json::{json, Value};

/// How a stub backend answers every request.
pub enum Stub {
    /// Replies with this JSON value.
    Reply(Value),
    /// Fails as if the service were unreachable.
    Fail,
    /// Echoes the prompts back as `{"system": ..., "user": ...}`.
    Echo,
}

pub struct StubBackend {
    stub: Stub,
    calls: AtomicUsize,
}

impl StubBackend {
    pub fn new(stub: Stub) -> Arc<Self> {
        Arc::new(Self {
            stub,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete_json(&self, request: CompletionRequest) -> Result<Value, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.stub {
            Stub::Reply(value) => Ok(value.clone()),
            Stub::Fail => Err(GenerationError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            Stub::Echo => Ok(json!({
                "system": request.system_prompt,
                "user": request.user_prompt,
            })),
        }
    }
}

pub fn generator(backend: Arc<StubBackend>) -> GenerationClient {
    GenerationClient::new(backend, Duration::from_secs(5))
}

pub fn valid_setup(name: &str) -> ProjectSetupInput {
    ProjectSetupInput {
        name: name.to_string(),
        description: "Plans software projects end to end".to_string(),
        project_type: Some("web".to_string()),
        industry: Some("Productivity".to_string()),
        team_size: Some(2),
    }
}

pub fn generated_timeline() -> Vec<TimelineItem> {
    (1..=4)
        .map(|n| TimelineItem {
            id: format!("phase-{}", n),
            name: format!("Phase {}", n),
            duration: "1 week".to_string(),
            order: n,
            tasks: vec![format!("Task {}", n)],
            color: None,
        })
        .collect()
}
