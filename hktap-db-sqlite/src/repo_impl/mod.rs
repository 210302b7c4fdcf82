use anyhow::anyhow;
use diesel::{
    self,
    prelude::{Connection as DieselConnection, *},
    result::{DatabaseErrorKind, Error as DieselError},
};

use hktap_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod location;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_violation() -> repo::Error {
    repo::Error::Other(anyhow!("Write access through a read-only connection"))
}

fn load_location(l: models::LocationEntity) -> Result<Location> {
    let models::LocationEntity {
        rowid: _,
        id,
        lat,
        lng,
        title,
        description,
        category,
        photo,
        votes,
        created_at,
    } = l;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng)
        .ok_or_else(|| anyhow!("Invalid position of location {id}: {lat},{lng}"))?;
    let votes = u64::try_from(votes).map_err(|_| anyhow!("Negative votes of location {id}"))?;
    let created_at = Timestamp::try_from_millis(created_at)
        .ok_or_else(|| anyhow!("Invalid creation time of location {id}"))?;
    Ok(Location {
        id: id.into(),
        pos,
        title,
        description,
        category,
        photo,
        votes,
        created_at,
    })
}

fn votes_to_db(votes: u64) -> Result<i64> {
    i64::try_from(votes).map_err(|_| anyhow!("Vote count out of range: {votes}").into())
}
