use std::sync::Arc;

use hktap_gateways::schedule_store::{is_valid_scope, JsonScheduleStore, JsonScheduleStores};
use rocket::{
    http::{ContentType, Header},
    tokio::task,
    Responder,
};

use super::*;
use crate::web::chat_sessions::ChatSessions;

fn check_session_id(session: &str) -> result::Result<(), ApiError> {
    if is_valid_scope(session) {
        Ok(())
    } else {
        Err(ApiError::OtherWithStatus(
            anyhow::anyhow!("Invalid session id"),
            Status::BadRequest,
        ))
    }
}

fn schedule_store(
    stores: &JsonScheduleStores,
    session: &str,
) -> result::Result<JsonScheduleStore, ApiError> {
    check_session_id(session)?;
    stores.scoped(session).map_err(|err| RepoError::from(err).into())
}

// Reading never creates a store
fn existing_schedule_store(
    stores: &JsonScheduleStores,
    session: &str,
) -> result::Result<Option<JsonScheduleStore>, ApiError> {
    check_session_id(session)?;
    stores.existing(session).map_err(|err| RepoError::from(err).into())
}

fn too_many_sessions() -> ApiError {
    ApiError::OtherWithStatus(
        anyhow::anyhow!("Too many active chat sessions"),
        Status::ServiceUnavailable,
    )
}

#[get("/chat/<session>")]
pub async fn get_chat(
    sessions: &State<ChatSessions>,
    session: &str,
) -> Result<Vec<json::Message>> {
    check_session_id(session)?;
    let transcript = match sessions.get(session) {
        // Waits for a pending turn of the same session
        Some(chat_session) => {
            task::spawn_blocking(move || chat_session.lock().transcript().to_vec())
                .await
                .map_err(anyhow::Error::from)?
        }
        None => usecases::ChatSession::new().transcript().to_vec(),
    };
    Ok(Json(transcript.into_iter().map(Into::into).collect()))
}

#[post("/chat/<session>", format = "application/json", data = "<body>")]
pub async fn post_chat(
    db: &State<sqlite::Connections>,
    sessions: &State<ChatSessions>,
    stores: &State<JsonScheduleStores>,
    text_generation: &State<TextGeneration>,
    session: &str,
    body: JsonResult<'_, json::ChatRequest>,
) -> Result<json::ChatTurn> {
    let json::ChatRequest { message } = body?.into_inner();
    let store = schedule_store(stores, session)?;
    let chat_session = sessions
        .get_or_create(session)
        .ok_or_else(too_many_sessions)?;
    let gateway = Arc::clone(&text_generation.0);
    let connections = db.inner().clone();
    let turn = task::spawn_blocking(move || {
        let mut chat_session = chat_session.lock();
        flows::send_chat_turn(&connections, &*gateway, &store, &mut chat_session, &message)
    })
    .await
    .map_err(anyhow::Error::from)??;
    Ok(Json(to_json::chat_turn(turn)))
}

#[get("/chat/<session>/schedules")]
pub fn get_schedules(
    stores: &State<JsonScheduleStores>,
    session: &str,
) -> Result<Vec<json::Schedule>> {
    let schedules = match existing_schedule_store(stores, session)? {
        Some(store) => store.all_schedules()?,
        None => vec![],
    };
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

#[derive(Responder)]
pub struct CalendarFile {
    inner: Vec<u8>,
    content_type: ContentType,
    content_disposition: Header<'static>,
}

#[get("/chat/<session>/schedules/<id>/calendar.ics")]
pub fn get_schedule_calendar(
    stores: &State<JsonScheduleStores>,
    session: &str,
    id: &str,
) -> result::Result<CalendarFile, ApiError> {
    let store = existing_schedule_store(stores, session)?.ok_or(RepoError::NotFound)?;
    let (schedule, ics) = flows::export_schedule_calendar(&store, id)?;
    let content_disposition = Header::new(
        "Content-Disposition",
        format!("attachment; filename=\"{}.ics\"", schedule.id),
    );
    Ok(CalendarFile {
        inner: ics,
        content_type: ContentType::Calendar,
        content_disposition,
    })
}
