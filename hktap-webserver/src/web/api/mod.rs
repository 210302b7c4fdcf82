use std::{fmt::Display, result};

use hktap_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, get,
    http::Status,
    post,
    response::{self, Responder},
    routes, Route, State,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{flows, prelude::*, usecases},
    web::{sqlite, Cfg},
};

mod categories;
mod chat;
mod error;
mod leaderboard;
mod locations;
mod util;

pub use self::error::Error as ApiError;

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   locations   --- //
        locations::get_locations,
        locations::get_location,
        locations::post_location,
        locations::post_vote,
        // ---   leaderboard   --- //
        leaderboard::get_leaderboard,
        // ---   categories   --- //
        categories::get_categories,
        categories::get_top_categories,
        categories::get_categories_search,
        // ---   chat   --- //
        chat::get_chat,
        chat::post_chat,
        chat::get_schedules,
        chat::get_schedule_calendar,
        util::get_version,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
