use super::prelude::*;

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

type RepoResult<T> = std::result::Result<T, RepoError>;

fn unavailable() -> RepoError {
    RepoError::Other(anyhow::anyhow!("connection refused"))
}

#[derive(Default)]
pub struct MockDb {
    pub locations: RefCell<Vec<Location>>,
    pub unavailable: Cell<bool>,
}

impl MockDb {
    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.get() {
            return Err(unavailable());
        }
        Ok(())
    }

    fn update_votes(&self, id: &str, f: impl FnOnce(u64) -> u64) -> RepoResult<u64> {
        self.check_available()?;
        let mut locations = self.locations.borrow_mut();
        let location = locations
            .iter_mut()
            .find(|l| l.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        location.votes = f(location.votes);
        Ok(location.votes)
    }
}

impl LocationRepo for MockDb {
    fn create_location(&self, location: &Location) -> RepoResult<()> {
        self.check_available()?;
        let mut locations = self.locations.borrow_mut();
        if locations.iter().any(|l| l.id == location.id) {
            return Err(RepoError::AlreadyExists);
        }
        locations.push(location.clone());
        Ok(())
    }

    fn get_location(&self, id: &str) -> RepoResult<Location> {
        self.check_available()?;
        self.locations
            .borrow()
            .iter()
            .find(|l| l.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn all_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>> {
        self.check_available()?;
        Ok(self
            .locations
            .borrow()
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect())
    }

    fn count_locations(&self) -> RepoResult<usize> {
        self.check_available()?;
        Ok(self.locations.borrow().len())
    }

    fn read_votes(&self, id: &str) -> RepoResult<u64> {
        Ok(self.get_location(id)?.votes)
    }

    fn write_votes(&self, id: &str, votes: u64) -> RepoResult<u64> {
        self.update_votes(id, |_| votes)
    }

    fn increment_votes(&self, id: &str) -> RepoResult<u64> {
        self.update_votes(id, |v| v + 1)
    }
}

#[derive(Default)]
pub struct MemoryScheduleStore {
    pub schedules: RefCell<Vec<Schedule>>,
    pub unavailable: Cell<bool>,
}

impl ScheduleRepo for MemoryScheduleStore {
    fn append_schedule(&self, schedule: &Schedule) -> RepoResult<()> {
        if self.unavailable.get() {
            return Err(unavailable());
        }
        self.schedules.borrow_mut().push(schedule.clone());
        Ok(())
    }

    fn all_schedules(&self) -> RepoResult<Vec<Schedule>> {
        Ok(self.schedules.borrow().clone())
    }
}

/// Replays scripted responses and records all requests.
#[derive(Default)]
pub struct FakeGateway {
    pub responses: RefCell<VecDeque<std::result::Result<Completion, TextGenerationError>>>,
    pub requests: RefCell<Vec<CompletionRequest>>,
}

impl FakeGateway {
    pub fn push(&self, response: std::result::Result<Completion, TextGenerationError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(Completion {
            content: Some(text.into()),
            tool_calls: vec![],
        }));
    }
}

impl TextGenerationGateway for FakeGateway {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<Completion, TextGenerationError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Completion::default()))
    }
}
