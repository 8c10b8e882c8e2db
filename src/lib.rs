//! Project-plan wizard: a four-step planning flow with generated timelines,
//! a JSON export, and an HTTP API over stored project records.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod export;
pub mod generation;
pub mod models;
pub mod wizard;
