//! Client for the external text-generation service.
//!
//! Four requests are supported: a full project plan, a timeline, feature
//! suggestions and tech-stack suggestions. Every request embeds the JSON of
//! the relevant plan fragment and asks for a JSON object back. Plan and
//! suggestion requests propagate failures; the typed timeline request
//! returns a [`TimelineReply`] instead, which the wizard resolves into
//! either the generated timeline or the fixed fallback.

mod backend;
mod client;
mod error;
mod prompts;

pub use backend::{CompletionBackend, CompletionRequest, OpenAiBackend};
pub use client::{GenerationClient, TimelineReply};
pub use error::GenerationError;
pub use prompts::PromptKind;
