// Low-level storage access traits.
// Each repository is responsible for a single entity.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    // None: all locations
    pub category: Option<String>,
}

impl LocationFilter {
    /// The pseudo category that selects all locations.
    pub const ALL_CATEGORIES: &'static str = "default";

    pub fn by_category(category: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != Self::ALL_CATEGORIES)
            .map(ToOwned::to_owned);
        Self { category }
    }

    pub fn matches(&self, location: &Location) -> bool {
        self.category
            .as_deref()
            .map(|category| location.category == category)
            .unwrap_or(true)
    }
}

pub trait LocationRepo {
    fn create_location(&self, location: &Location) -> Result<()>;

    fn get_location(&self, id: &str) -> Result<Location>;
    fn all_locations(&self, filter: &LocationFilter) -> Result<Vec<Location>>;
    fn count_locations(&self) -> Result<usize>;

    fn read_votes(&self, id: &str) -> Result<u64>;
    // Overwrites the counter unconditionally and returns the written value.
    fn write_votes(&self, id: &str, votes: u64) -> Result<u64>;
    // Increments the counter in a single step and returns the new value.
    fn increment_votes(&self, id: &str) -> Result<u64>;
}

/// Append-only log of schedules.
///
/// Existing entries are never modified or reordered.
pub trait ScheduleRepo {
    fn append_schedule(&self, schedule: &Schedule) -> Result<()>;

    // In order of insertion
    fn all_schedules(&self) -> Result<Vec<Schedule>>;

    fn get_schedule(&self, id: &str) -> Result<Schedule> {
        self.all_schedules()?
            .into_iter()
            .find(|s| s.id.as_str() == id)
            .ok_or(Error::NotFound)
    }
}
