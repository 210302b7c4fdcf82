use super::prelude::*;
use crate::util::{format::format_vote_count, sort::sort_by_votes_desc};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedLocation {
    // 1-based
    pub rank: usize,
    pub vote_label: String,
    pub location: Location,
}

pub fn load_leaderboard<R: LocationRepo>(
    repo: &R,
    filter: &LocationFilter,
    limit: Option<usize>,
) -> Result<Vec<RankedLocation>> {
    if limit == Some(0) {
        return Err(Error::InvalidLimit);
    }
    let mut locations = repo.all_locations(filter)?;
    sort_by_votes_desc(&mut locations);
    Ok(locations
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, location)| RankedLocation {
            rank: i + 1,
            vote_label: format_vote_count(location.votes),
            location,
        })
        .collect())
}
