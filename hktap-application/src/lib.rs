#[macro_use]
extern crate log;

mod chat;
mod create_location;
mod export_calendar;
mod vote;

pub mod prelude {
    pub use super::{chat::*, create_location::*, export_calendar::*, vote::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use hktap_core::{entities::*, gateways::text_generation::*, repositories::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use hktap_db_sqlite::Connections;
}
