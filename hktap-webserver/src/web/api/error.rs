use super::json_error_response;
use anyhow::anyhow;
use hktap_application::error::{AppError, BError};
pub use hktap_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

fn app_error_status(err: &AppError) -> Status {
    match err {
        AppError::Business(BError::Parameter(err)) => match err {
            ParameterError::NotFound => Status::NotFound,
            ParameterError::StoreUnavailable(_) => Status::ServiceUnavailable,
            _ => Status::BadRequest,
        },
        AppError::Business(BError::Repo(RepoError::NotFound)) => Status::NotFound,
        AppError::Business(BError::Repo(_)) => Status::ServiceUnavailable,
        AppError::Other(_) | AppError::Io(_) => Status::InternalServerError,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                let status = app_error_status(&err);
                if status.code >= 500 {
                    error!("Error: {err}");
                }
                json_error_response(req, &err, status)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(req, &err, Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
