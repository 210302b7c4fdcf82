use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

// NOTE:
// All timestamps are unix timestamps in **milli**seconds.

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Location {
    pub id          : String,
    pub lat         : f64,
    pub lng         : f64,
    pub title       : String,
    pub description : String,
    pub category    : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo       : Option<String>,
    pub votes       : u64,
    pub created_at  : i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewLocation {
    #[serde(default)]
    pub title       : String,
    #[serde(default)]
    pub description : String,
    #[serde(default)]
    pub category    : String,
    pub lat         : f64,
    pub lng         : f64,
    pub photo       : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct VoteResult {
    pub location_id: String,
    pub new_vote_count: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct RankedLocation {
    pub rank: usize,
    /// Compact vote count, e.g. `1.5K`
    pub vote_label: String,
    pub location: Location,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct CategoryFrequency {
    pub category: String,
    pub count: usize,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct TopCategory {
    pub category: String,
    pub count: usize,
    pub photo: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    Schedules,
    PlainText,
    ConfigError,
    RemoteServiceError,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ChatTurn {
    pub outcome: ChatOutcome,
    /// Messages that have been appended to the transcript
    pub messages: Vec<Message>,
    pub schedules: Vec<Schedule>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct ScheduleEvent {
    pub title       : String,
    pub location    : String,
    pub start       : i64,
    pub end         : i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Schedule {
    pub id: String,
    pub title: String,
    pub events: Vec<ScheduleEvent>,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Error {
    /// The HTTP status code of the error.
    pub http_status: u16,
    /// Textual information about the error.
    pub message: String,
}
