#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # hktap-entities
//!
//! Reusable, agnostic domain entities for HKTAP.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod category;
pub mod chat;
pub mod geo;
pub mod id;
pub mod location;
pub mod schedule;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
