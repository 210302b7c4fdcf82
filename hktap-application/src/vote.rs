use super::*;
use usecases::{VotePolicy, VoteResult};

pub fn vote(
    connections: &sqlite::Connections,
    policy: VotePolicy,
    location_id: &str,
) -> Result<VoteResult> {
    let db = connections.exclusive()?;
    let res = match policy {
        // Two separate statements, a concurrent writer may interleave
        VotePolicy::BestEffort => usecases::vote(&db, policy, location_id),
        VotePolicy::Atomic => db.transaction(|conn| usecases::vote(conn, policy, location_id)),
    };
    let res = res.map_err(|err| {
        warn!("Failed to vote for location {location_id}: {err}");
        err
    })?;
    debug!(
        "Location {} has {} vote(s)",
        res.location_id, res.new_vote_count
    );
    Ok(res)
}
