use std::sync::Arc;

use hktap_core::{gateways::text_generation::TextGenerationGateway, usecases::VotePolicy};
use hktap_gateways::schedule_store::JsonScheduleStores;
use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
mod chat_sessions;
mod guards;

use hktap_db_sqlite as sqlite;


use chat_sessions::ChatSessions;
pub use chat_sessions::ChatSessionLimits;

#[derive(Debug, Clone, Copy, Default)]
pub struct Cfg {
    pub vote_policy: VotePolicy,
    pub chat_sessions: ChatSessionLimits,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    text_generation: Arc<dyn TextGenerationGateway + Send + Sync>,
}

pub(crate) struct Connections {
    db: sqlite::Connections,
    schedule_stores: JsonScheduleStores,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    connections: Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Connections {
        db,
        schedule_stores,
    } = connections;
    let Gateways { text_generation } = gateways;

    info!(
        "Storing schedules in {}",
        schedule_stores.path().display()
    );
    info!("Votes are counted with policy {:?}", cfg.vote_policy);
    info!(
        "Keeping up to {} chat session(s) for {:?}",
        cfg.chat_sessions.max_sessions, cfg.chat_sessions.idle_timeout
    );
    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let text_generation = guards::TextGeneration(text_generation);
    let version = guards::Version(version);

    let mut instance = r
        .manage(db)
        .manage(schedule_stores)
        .manage(ChatSessions::new(cfg.chat_sessions))
        .manage(text_generation)
        .manage(cfg)
        .manage(version);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    schedule_stores: JsonScheduleStores,
    enable_cors: bool,
    cfg: Cfg,
    text_generation: Arc<dyn TextGenerationGateway + Send + Sync>,
    version: &'static str,
) {
    let mounts = mounts();
    let options = InstanceOptions {
        mounts,
        rocket_cfg: None,
        cfg,
        version,
    };
    let connections = Connections {
        db,
        schedule_stores,
    };
    let gateways = Gateways { text_generation };

    let instance = rocket_instance(options, connections, gateways);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                log::error!("Invalid CORS options: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        log::error!("Unable to run web server: {err}");
    }
}
