use anyhow::{anyhow, Result};
use hktap_core::usecases;
use std::{env, fs, io::ErrorKind, path::Path, path::PathBuf, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "hktap.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub votes: Votes,
    pub schedules: Schedules,
    pub chat: Chat,
    pub assistant: Assistant,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides(
            env::var(ENV_NAME_DB_URL).ok(),
            env::var(ENV_NAME_OPENROUTER_API_KEY).ok(),
        );
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self, db_url: Option<String>, openrouter_api_key: Option<String>) {
        if let Some(db_url) = db_url {
            self.db.conn_sqlite = db_url;
        }
        if let Some(key) = openrouter_api_key.filter(|key| !key.trim().is_empty()) {
            match &mut self.assistant.gateway {
                Some(AssistantGateway::OpenRouter { api_key, .. }) => {
                    *api_key = Some(key);
                }
                None => {
                    log::warn!("{ENV_NAME_OPENROUTER_API_KEY} is set but no assistant gateway is configured");
                }
            }
        }
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
    pub conn_timeout: Option<Duration>,
}

pub struct WebServer {
    pub enable_cors: bool,
}

pub struct Votes {
    pub policy: usecases::VotePolicy,
}

pub struct Schedules {
    /// File system directory for the JSON schedule stores.
    pub dir: PathBuf,
}

pub struct Chat {
    pub max_sessions: usize,
    pub session_idle_timeout: Duration,
}

pub struct Assistant {
    pub gateway: Option<AssistantGateway>,
}

#[derive(Clone)]
pub enum AssistantGateway {
    OpenRouter {
        api_key: Option<String>,
        api_base_url: String,
        model: String,
        max_tokens: u32,
        temperature: f64,
        referer: String,
        title: String,
        timeout: Option<Duration>,
    },
}

impl From<raw::VotePolicy> for usecases::VotePolicy {
    fn from(from: raw::VotePolicy) -> Self {
        match from {
            raw::VotePolicy::BestEffort => Self::BestEffort,
            raw::VotePolicy::Atomic => Self::Atomic,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            votes,
            schedules,
            chat,
            assistant,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
            connection_timeout,
        } = db.unwrap_or_default();

        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool size must not be 0"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
            conn_timeout: connection_timeout,
        };

        let raw::WebServer { cors } = webserver.unwrap_or_default();
        let webserver = WebServer { enable_cors: cors };

        let raw::Votes { policy } = votes.unwrap_or_default();
        let votes = Votes {
            policy: policy.into(),
        };

        let raw::Schedules { dir } = schedules.unwrap_or_default();
        let schedules = Schedules { dir };

        let raw::Chat {
            max_sessions,
            session_idle_timeout,
        } = chat.unwrap_or_default();
        if max_sessions == 0 {
            return Err(anyhow!("The maximum number of chat sessions must not be 0"));
        }
        let chat = Chat {
            max_sessions,
            session_idle_timeout,
        };

        let assistant_gateway = match assistant.and_then(|a| a.gateway) {
            Some(gw_name) => {
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::AssistantGateway::Openrouter => {
                        let raw::OpenRouter {
                            base_url,
                            model,
                            max_tokens,
                            temperature,
                            referer,
                            title,
                            api_key,
                            timeout,
                        } = gateway.openrouter.ok_or_else(|| {
                            anyhow!("Missing 'openrouter' gateway configuration")
                        })?;
                        log::info!("Use OpenRouter assistant gateway (model {model})");
                        AssistantGateway::OpenRouter {
                            api_key,
                            api_base_url: base_url,
                            model,
                            max_tokens,
                            temperature,
                            referer,
                            title,
                            timeout,
                        }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let assistant = Assistant {
            gateway: assistant_gateway,
        };

        Ok(Self {
            db,
            webserver,
            votes,
            schedules,
            chat,
            assistant,
        })
    }
}
