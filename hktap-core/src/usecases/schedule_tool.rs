use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::prelude::*;
use std::result::Result;

pub const CREATE_SCHEDULE_TOOL: &str = "create_schedule";

pub fn create_schedule_tool() -> ToolDefinition {
    ToolDefinition {
        name: CREATE_SCHEDULE_TOOL.into(),
        description: "Create a schedule of events at locations in Hong Kong. \
            Use this whenever the user asks to plan a trip, a day or an itinerary."
            .into(),
        parameters: json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the schedule"
                },
                "events": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "location": { "type": "string" },
                            "startTime": {
                                "type": "string",
                                "description": "ISO 8601 date and time, e.g. 2024-01-15T09:00:00"
                            },
                            "endTime": {
                                "type": "string",
                                "description": "ISO 8601 date and time, e.g. 2024-01-15T10:30:00"
                            },
                            "description": { "type": "string" }
                        },
                        "required": ["title", "location", "startTime", "endTime"]
                    }
                }
            },
            "required": ["title", "events"]
        }),
    }
}

/// Reasons why the arguments of a tool call are not a valid schedule.
#[derive(Debug, Error)]
pub enum ScheduleDecodeError {
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),
    #[error("Invalid JSON arguments: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing field '{0}'")]
    MissingField(String),
    #[error("Invalid time in '{field}': {value}")]
    InvalidTime { field: String, value: String },
    #[error("Event {index} does not end after it starts")]
    EndNotAfterStart { index: usize },
}

/// A decoded schedule that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub title: String,
    pub events: Vec<ScheduleEvent>,
}

impl ScheduleDraft {
    pub fn into_schedule(self) -> Schedule {
        let Self { title, events } = self;
        Schedule {
            id: Id::new(),
            title,
            events,
            created_at: Timestamp::now(),
        }
    }
}

// Every field is optional here to report precisely which one is missing.
#[derive(Deserialize)]
struct RawSchedule {
    title: Option<String>,
    events: Option<Vec<RawEvent>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    title: Option<String>,
    location: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    description: Option<String>,
}

fn required<T>(value: Option<T>, field: impl Into<String>) -> Result<T, ScheduleDecodeError> {
    value.ok_or_else(|| ScheduleDecodeError::MissingField(field.into()))
}

fn parse_time(value: String, field: String) -> Result<Timestamp, ScheduleDecodeError> {
    Timestamp::parse_date_time(&value).map_err(|_| ScheduleDecodeError::InvalidTime { field, value })
}

impl RawEvent {
    fn decode(self, index: usize) -> Result<ScheduleEvent, ScheduleDecodeError> {
        let field = |name: &str| format!("events[{index}].{name}");
        let title = required(self.title, field("title"))?;
        let location = required(self.location, field("location"))?;
        let start = parse_time(
            required(self.start_time, field("startTime"))?,
            field("startTime"),
        )?;
        let end = parse_time(required(self.end_time, field("endTime"))?, field("endTime"))?;
        let description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        let event = ScheduleEvent {
            title,
            location,
            start,
            end,
            description,
        };
        if !event.is_valid() {
            return Err(ScheduleDecodeError::EndNotAfterStart { index });
        }
        Ok(event)
    }
}

pub fn decode_schedule_tool_call(call: &ToolCall) -> Result<ScheduleDraft, ScheduleDecodeError> {
    if call.name != CREATE_SCHEDULE_TOOL {
        return Err(ScheduleDecodeError::UnknownTool(call.name.clone()));
    }
    let RawSchedule { title, events } = serde_json::from_str(&call.arguments)?;
    let title = required(title, "title")?;
    let events = required(events, "events")?
        .into_iter()
        .enumerate()
        .map(|(index, event)| event.decode(index))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ScheduleDraft { title, events })
}
