use super::prelude::*;

pub fn load_locations<R: LocationRepo>(repo: &R, filter: &LocationFilter) -> Result<Vec<Location>> {
    Ok(repo.all_locations(filter)?)
}

pub fn get_location<R: LocationRepo>(repo: &R, id: &str) -> Result<Location> {
    Ok(repo.get_location(id)?)
}
