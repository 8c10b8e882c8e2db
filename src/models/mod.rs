//! Domain models for the plan wizard.
//!
//! # Core Concepts
//!
//! ## Plan Document
//!
//! - [`ProjectSetup`]: Project metadata collected on the first wizard step.
//! - [`Feature`]: A capability the project will ship, toggled on or off.
//! - [`TechStackItem`]: A technology candidate, toggled on or off.
//! - [`TimelineItem`]: One phase of the generated delivery timeline.
//! - [`Session`]: The aggregate of the above plus the current [`Step`].
//!
//! ## Persisted Records
//!
//! - [`ProjectRecord`]: A finished plan stored in the record store.
//! - [`InsertProject`]: The payload used to create or replace a record.

mod feature;
mod project;
mod session;
mod setup;
mod tech_stack;
mod timeline;

pub use feature::*;
pub use project::*;
pub use session::*;
pub use setup::*;
pub use tech_stack::*;
pub use timeline::*;
