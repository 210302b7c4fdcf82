use std::{
    io,
    path::{Path, PathBuf},
};

use hktap_core::{
    entities::*,
    repositories::{Error as RepoError, ScheduleRepo},
};
use jfs::Store;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, RepoError>;

const MAX_SCOPE_LEN: usize = 64;

/// Directory with one JSON file of schedules per scope.
#[derive(Debug, Clone)]
pub struct JsonScheduleStores {
    directory: PathBuf,
}

impl JsonScheduleStores {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn path(&self) -> &Path {
        &self.directory
    }

    fn scope_path(&self, scope: &str) -> io::Result<PathBuf> {
        if !is_valid_scope(scope) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid schedule store scope '{scope}'"),
            ));
        }
        Ok(self.directory.join(scope).with_extension("json"))
    }

    /// The store of a single session or device.
    ///
    /// Creates an empty store file if none exists yet.
    pub fn scoped(&self, scope: &str) -> io::Result<JsonScheduleStore> {
        JsonScheduleStore::try_new(self.scope_path(scope)?)
    }

    /// The store of a scope that has been opened before, if any.
    pub fn existing(&self, scope: &str) -> io::Result<Option<JsonScheduleStore>> {
        let path = self.scope_path(scope)?;
        if !path.is_file() {
            return Ok(None);
        }
        JsonScheduleStore::try_new(path).map(Some)
    }
}

pub fn is_valid_scope(scope: &str) -> bool {
    !scope.is_empty()
        && scope.len() <= MAX_SCOPE_LEN
        && scope
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Append-only log of schedules in a single JSON file.
///
/// Entries are keyed by a zero-padded sequence number
/// to keep the order of insertion.
pub struct JsonScheduleStore {
    json_store: Store,
}

impl JsonScheduleStore {
    pub fn try_new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let cfg = jfs::Config {
            single: true,
            pretty: true,
            ..Default::default()
        };
        let json_store = Store::new_with_cfg(path, cfg)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonSchedule {
    id: String,
    title: String,
    created_at: i64,
    events: Vec<JsonEvent>,
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonEvent {
    title: String,
    location: String,
    start: i64,
    end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<&Schedule> for JsonSchedule {
    fn from(from: &Schedule) -> Self {
        Self {
            id: from.id.to_string(),
            title: from.title.clone(),
            created_at: from.created_at.as_millis(),
            events: from
                .events
                .iter()
                .map(|e| JsonEvent {
                    title: e.title.clone(),
                    location: e.location.clone(),
                    start: e.start.as_millis(),
                    end: e.end.as_millis(),
                    description: e.description.clone(),
                })
                .collect(),
        }
    }
}

fn timestamp(millis: i64) -> Result<Timestamp> {
    Timestamp::try_from_millis(millis)
        .ok_or_else(|| anyhow::anyhow!("Invalid timestamp in schedule store: {millis}").into())
}

impl TryFrom<JsonSchedule> for Schedule {
    type Error = RepoError;
    fn try_from(from: JsonSchedule) -> Result<Self> {
        let JsonSchedule {
            id,
            title,
            created_at,
            events,
        } = from;
        let events = events
            .into_iter()
            .map(|e| -> Result<ScheduleEvent> {
                Ok(ScheduleEvent {
                    title: e.title,
                    location: e.location,
                    start: timestamp(e.start)?,
                    end: timestamp(e.end)?,
                    description: e.description,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Schedule {
            id: id.into(),
            title,
            events,
            created_at: timestamp(created_at)?,
        })
    }
}

impl ScheduleRepo for JsonScheduleStore {
    fn append_schedule(&self, schedule: &Schedule) -> Result<()> {
        let seq = self.json_store.all::<serde_json::Value>()?.len();
        let key = format!("{seq:08}-{}", schedule.id);
        self.json_store
            .save_with_id(&JsonSchedule::from(schedule), &key)?;
        log::debug!("Stored schedule {} in {}", schedule.id, self.path().display());
        Ok(())
    }

    fn all_schedules(&self) -> Result<Vec<Schedule>> {
        // Keys are ordered by sequence number
        self.json_store
            .all::<JsonSchedule>()?
            .into_values()
            .map(Schedule::try_from)
            .collect()
    }
}
