use super::*;

pub fn create_location(
    connections: &sqlite::Connections,
    new_location: usecases::NewLocation,
) -> Result<Location> {
    let location = connections.exclusive()?.transaction(|conn| {
        usecases::create_location(conn, new_location).map_err(|err| {
            warn!("Failed to create new location: {err}");
            err
        })
    })?;
    info!("Created location {} ({})", location.id, location.display_title());
    Ok(location)
}
