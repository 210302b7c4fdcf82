//! # hktap-core
//!
//! Business logic of HKTAP: repository and gateway abstractions
//! and the use cases built on top of them.

pub mod entities {
    pub use hktap_entities::{
        category::*, chat::*, geo::*, id::*, location::*, schedule::*, time::*,
    };
}
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;
