use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("hktap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub votes: Option<Votes>,
    pub schedules: Option<Schedules>,
    pub chat: Option<Chat>,
    pub assistant: Option<Assistant>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub connection_timeout: Option<Duration>,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Votes {
    pub policy: VotePolicy,
}

impl Default for Votes {
    fn default() -> Self {
        Config::default().votes.expect("Votes configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VotePolicy {
    BestEffort,
    Atomic,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Schedules {
    pub dir: PathBuf,
}

impl Default for Schedules {
    fn default() -> Self {
        Config::default()
            .schedules
            .expect("Schedules configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Chat {
    pub max_sessions: usize,
    #[serde(deserialize_with = "deserialize_duration")]
    pub session_idle_timeout: Duration,
}

impl Default for Chat {
    fn default() -> Self {
        Config::default().chat.expect("Chat configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Assistant {
    pub gateway: Option<AssistantGateway>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssistantGateway {
    Openrouter,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub openrouter: Option<OpenRouter>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenRouter {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub referer: String,
    pub title: String,
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}
