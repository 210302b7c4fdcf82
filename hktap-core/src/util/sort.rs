use std::cmp::Ordering;

use hktap_entities::location::*;

pub trait MostVoted {
    fn cmp_by_votes_desc(&self, other: &Self) -> Ordering;
}

impl MostVoted for Location {
    // More votes first, newer locations win ties
    fn cmp_by_votes_desc(&self, other: &Self) -> Ordering {
        other
            .votes
            .cmp(&self.votes)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

pub fn sort_by_votes_desc(locations: &mut [Location]) {
    locations.sort_by(MostVoted::cmp_by_votes_desc);
}
