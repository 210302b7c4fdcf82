//! Adapters for external services and local storage.

pub mod openrouter;
pub mod schedule_store;
