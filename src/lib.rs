//! Publishing pipeline for court and tribunal hearing lists: tiered access
//! control over published artefacts and a schema-agnostic case search index.

pub mod config;
pub mod error;
pub mod publications;
pub mod telemetry;
