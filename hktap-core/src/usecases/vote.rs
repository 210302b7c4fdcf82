use super::prelude::*;

/// How a vote is applied to the stored counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VotePolicy {
    /// Read the counter and write back the incremented value in
    /// two separate steps. Concurrent votes on the same location
    /// may overwrite each other.
    #[default]
    BestEffort,
    /// Increment the counter in a single step. No vote is lost.
    Atomic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteResult {
    pub location_id: Id,
    pub new_vote_count: u64,
}

/// A vote whose base value has been read but not written yet.
#[derive(Debug, Clone)]
pub struct PendingVote {
    location_id: Id,
    votes_read: u64,
}

impl PendingVote {
    pub fn location_id(&self) -> &str {
        self.location_id.as_str()
    }
    pub fn votes_read(&self) -> u64 {
        self.votes_read
    }
}

pub fn prepare_vote<R: LocationRepo>(repo: &R, location_id: &str) -> Result<PendingVote> {
    let votes_read = repo.read_votes(location_id)?;
    Ok(PendingVote {
        location_id: location_id.into(),
        votes_read,
    })
}

pub fn store_vote<R: LocationRepo>(repo: &R, pending: PendingVote) -> Result<VoteResult> {
    let PendingVote {
        location_id,
        votes_read,
    } = pending;
    let new_vote_count = repo.write_votes(location_id.as_str(), votes_read.saturating_add(1))?;
    debug_assert_eq!(votes_read + 1, new_vote_count);
    Ok(VoteResult {
        location_id,
        new_vote_count,
    })
}

pub fn vote<R: LocationRepo>(repo: &R, policy: VotePolicy, location_id: &str) -> Result<VoteResult> {
    match policy {
        VotePolicy::BestEffort => {
            let pending = prepare_vote(repo, location_id)?;
            store_vote(repo, pending)
        }
        VotePolicy::Atomic => {
            let new_vote_count = repo.increment_votes(location_id)?;
            Ok(VoteResult {
                location_id: location_id.into(),
                new_vote_count,
            })
        }
    }
}
