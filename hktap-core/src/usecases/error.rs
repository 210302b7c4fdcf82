use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid limit")]
    InvalidLimit,
    #[error("Empty message")]
    EmptyMessage,
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The store is unavailable: {0}")]
    StoreUnavailable(#[source] repositories::Error),
}

impl From<repositories::Error> for Error {
    fn from(err: repositories::Error) -> Self {
        match err {
            repositories::Error::NotFound => Self::NotFound,
            err => Self::StoreUnavailable(err),
        }
    }
}
