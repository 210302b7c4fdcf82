use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use hktap_application::prelude as flows;
use hktap_db_sqlite::{self as sqlite, Connections};
use hktap_gateways::schedule_store::JsonScheduleStores;

use crate::{config::Config, gateways::text_generation_gateway};

#[derive(Parser, Debug)]
#[command(name = "hktap", version, about = "Share, rank and plan Hong Kong locations")]
struct Args {
    /// Configuration file (default: hktap.toml)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,
    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,
    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Export a stored schedule as iCalendar file
    ExportCalendar {
        /// Chat session that created the schedule
        #[arg(long)]
        session: String,
        /// ID of the schedule
        #[arg(long)]
        schedule: String,
        /// Output file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut cfg = Config::try_load_from_file_or_default(args.config_file.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if args.enable_cors {
        cfg.webserver.enable_cors = true;
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::ExportCalendar {
            session,
            schedule,
            output,
        } => export_calendar(&cfg, &session, &schedule, output.as_deref()),
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite, cfg.db.conn_pool_size
    );
    let connections = Connections::init(
        &cfg.db.conn_sqlite,
        cfg.db.conn_pool_size.into(),
        cfg.db.conn_timeout,
    )?;

    info!("Running embedded database migrations");
    sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    info!(
        "Opening schedule stores in {}",
        cfg.schedules.dir.display()
    );
    let schedule_stores = JsonScheduleStores::try_new(&cfg.schedules.dir)?;

    let text_generation = text_generation_gateway(cfg.assistant.gateway);
    let web_cfg = hktap_webserver::Cfg {
        vote_policy: cfg.votes.policy,
        chat_sessions: hktap_webserver::ChatSessionLimits {
            max_sessions: cfg.chat.max_sessions,
            idle_timeout: cfg.chat.session_idle_timeout,
        },
    };
    hktap_webserver::run(
        connections,
        schedule_stores,
        cfg.webserver.enable_cors,
        web_cfg,
        text_generation,
        env!("CARGO_PKG_VERSION"),
    )
    .await;
    Ok(())
}

fn export_calendar(
    cfg: &Config,
    session: &str,
    schedule_id: &str,
    output: Option<&Path>,
) -> Result<()> {
    let stores = JsonScheduleStores::try_new(&cfg.schedules.dir)?;
    let store = stores.scoped(session)?;
    let (schedule, ics) = flows::export_schedule_calendar(&store, schedule_id)?;
    match output {
        Some(path) => {
            fs::write(path, &ics)?;
            info!(
                "Exported {} event(s) of schedule '{}' to {}",
                schedule.events.len(),
                schedule.title,
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&ics)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
