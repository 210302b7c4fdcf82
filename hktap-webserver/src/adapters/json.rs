pub use hktap_boundary::*;

pub mod from_json {
    use super::*;
    use crate::core::usecases;

    pub fn new_location(from: NewLocation) -> usecases::NewLocation {
        let NewLocation {
            title,
            description,
            category,
            lat,
            lng,
            photo,
        } = from;
        usecases::NewLocation {
            title,
            description,
            category,
            lat,
            lng,
            photo,
        }
    }
}

pub mod to_json {
    use super::*;
    use crate::core::usecases;

    pub fn vote_result(from: usecases::VoteResult) -> VoteResult {
        let usecases::VoteResult {
            location_id,
            new_vote_count,
        } = from;
        VoteResult {
            location_id: location_id.into(),
            new_vote_count,
        }
    }

    pub fn ranked_location(from: usecases::RankedLocation) -> RankedLocation {
        let usecases::RankedLocation {
            rank,
            vote_label,
            location,
        } = from;
        RankedLocation {
            rank,
            vote_label,
            location: location.into(),
        }
    }

    pub fn chat_outcome(from: usecases::TurnOutcome) -> ChatOutcome {
        use usecases::{TurnFailure, TurnOutcome};
        match from {
            TurnOutcome::Schedules => ChatOutcome::Schedules,
            TurnOutcome::PlainText => ChatOutcome::PlainText,
            TurnOutcome::Failed(TurnFailure::Config) => ChatOutcome::ConfigError,
            TurnOutcome::Failed(TurnFailure::RemoteService) => ChatOutcome::RemoteServiceError,
        }
    }

    pub fn chat_turn(from: usecases::ChatTurn) -> ChatTurn {
        let usecases::ChatTurn {
            outcome,
            transcript_append,
            schedules_created,
        } = from;
        ChatTurn {
            outcome: chat_outcome(outcome),
            messages: transcript_append.into_iter().map(Into::into).collect(),
            schedules: schedules_created.into_iter().map(Into::into).collect(),
        }
    }
}
