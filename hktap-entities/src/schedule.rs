use crate::{id::*, time::*};

/// A single entry of an itinerary.
///
/// The location is free text and not a reference to a stored
/// [`Location`](crate::location::Location).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub title       : String,
    pub location    : String,
    pub start       : Timestamp,
    pub end         : Timestamp,
    pub description : Option<String>,
}

impl ScheduleEvent {
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

/// An ordered itinerary. Schedules are never modified after creation.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id         : Id,
    pub title      : String,
    pub events     : Vec<ScheduleEvent>,
    pub created_at : Timestamp,
}

impl Schedule {
    /// Stable identifier of the event at `index` that
    /// does not change between repeated exports.
    pub fn event_uid(&self, index: usize) -> String {
        format!("{}-{}", self.id, index)
    }
}
