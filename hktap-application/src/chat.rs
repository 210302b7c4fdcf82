use super::*;
use usecases::{ChatSession, ChatTurn};

/// Sends a message to the assistant with the current location
/// catalog as context.
pub fn send_chat_turn(
    connections: &sqlite::Connections,
    gateway: &dyn TextGenerationGateway,
    store: &dyn ScheduleRepo,
    session: &mut ChatSession,
    user_text: &str,
) -> Result<ChatTurn> {
    let catalog = {
        let db = connections.shared()?;
        usecases::load_locations(&db, &LocationFilter::default())?
    };
    let turn = session.send_chat_turn(gateway, store, &catalog, user_text)?;
    debug!(
        "Chat turn finished with {:?} and {} new schedule(s)",
        turn.outcome,
        turn.schedules_created.len()
    );
    Ok(turn)
}
