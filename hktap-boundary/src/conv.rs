use super::*;
use hktap_entities as e;

impl From<e::location::Location> for Location {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            id,
            pos,
            title,
            description,
            category,
            photo,
            votes,
            created_at,
        } = from;
        let (lat, lng) = pos.to_lat_lng_deg();
        Self {
            id: id.into(),
            lat,
            lng,
            title,
            description,
            category,
            photo,
            votes,
            created_at: created_at.as_millis(),
        }
    }
}

impl From<e::category::CategoryFrequency> for CategoryFrequency {
    fn from(from: e::category::CategoryFrequency) -> Self {
        let e::category::CategoryFrequency { category, count } = from;
        Self { category, count }
    }
}

impl From<e::category::TopCategory> for TopCategory {
    fn from(from: e::category::TopCategory) -> Self {
        let e::category::TopCategory {
            category,
            count,
            photo,
        } = from;
        Self {
            category,
            count,
            photo,
        }
    }
}

impl From<e::chat::MessageRole> for MessageRole {
    fn from(from: e::chat::MessageRole) -> Self {
        use e::chat::MessageRole as E;
        match from {
            E::User => Self::User,
            E::Assistant => Self::Assistant,
        }
    }
}

impl From<e::chat::Message> for Message {
    fn from(from: e::chat::Message) -> Self {
        let e::chat::Message {
            id,
            role,
            content,
            created_at,
        } = from;
        Self {
            id: id.into(),
            role: role.into(),
            content,
            created_at: created_at.as_millis(),
        }
    }
}

impl From<e::schedule::ScheduleEvent> for ScheduleEvent {
    fn from(from: e::schedule::ScheduleEvent) -> Self {
        let e::schedule::ScheduleEvent {
            title,
            location,
            start,
            end,
            description,
        } = from;
        Self {
            title,
            location,
            start: start.as_millis(),
            end: end.as_millis(),
            description,
        }
    }
}

impl From<e::schedule::Schedule> for Schedule {
    fn from(from: e::schedule::Schedule) -> Self {
        let e::schedule::Schedule {
            id,
            title,
            events,
            created_at,
        } = from;
        Self {
            id: id.into(),
            title,
            events: events.into_iter().map(Into::into).collect(),
            created_at: created_at.as_millis(),
        }
    }
}
