mod categories;
mod chat_session;
mod create_location;
mod error;
mod export_calendar;
mod leaderboard;
mod load_locations;
mod schedule_tool;
mod system_prompt;
mod vote;

#[cfg(test)]
pub mod tests;

pub use self::{
    categories::*, chat_session::*, create_location::*, error::Error, export_calendar::*,
    leaderboard::*, load_locations::*, schedule_tool::*, system_prompt::*, vote::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::text_generation::*,
        repositories::{Error as RepoError, *},
    };
}
