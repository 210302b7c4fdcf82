#![allow(proc_macro_derive_resolution_fallback)]
#![recursion_limit = "128"]

#[macro_use]
extern crate log;

use hktap_core::gateways::text_generation::TextGenerationGateway;
use hktap_db_sqlite::Connections;
use hktap_gateways::schedule_store::JsonScheduleStores;

mod adapters;
mod core;
mod web;

pub use web::{Cfg, ChatSessionLimits};

pub async fn run(
    connections: Connections,
    schedule_stores: JsonScheduleStores,
    enable_cors: bool,
    cfg: Cfg,
    text_generation: Box<dyn TextGenerationGateway + Send + Sync>,
    version: &'static str,
) {
    web::run(
        connections,
        schedule_stores,
        enable_cors,
        cfg,
        text_generation.into(),
        version,
    )
    .await;
}
