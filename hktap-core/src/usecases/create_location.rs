use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub title       : String,
    pub description : String,
    pub category    : String,
    pub lat         : f64,
    pub lng         : f64,
    pub photo       : Option<String>,
}

pub fn prepare_new_location(l: NewLocation) -> Result<Location> {
    let NewLocation {
        title,
        description,
        category,
        lat,
        lng,
        photo,
    } = l;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition)?;
    let photo = photo
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty());
    Ok(Location {
        id: Id::new(),
        pos,
        title: title.trim().to_owned(),
        description: description.trim().to_owned(),
        category: category.trim().to_owned(),
        photo,
        votes: 0,
        created_at: Timestamp::now(),
    })
}

pub fn create_location<R: LocationRepo>(repo: &R, l: NewLocation) -> Result<Location> {
    let location = prepare_new_location(l)?;
    repo.create_location(&location)?;
    log::debug!("Created location {}", location.id);
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;

    fn new_location() -> NewLocation {
        NewLocation {
            title: " Central Pier ".into(),
            description: "Ferries".into(),
            category: "transport ".into(),
            lat: 22.2871,
            lng: 114.1613,
            photo: Some("  ".into()),
        }
    }

    #[test]
    fn create_valid_location() {
        let db = MockDb::default();
        let l = create_location(&db, new_location()).unwrap();
        assert_eq!("Central Pier", l.title);
        assert_eq!("transport", l.category);
        assert_eq!(0, l.votes);
        assert_eq!(None, l.photo);
        assert_eq!(l, db.get_location(l.id.as_str()).unwrap());
    }

    #[test]
    fn reject_invalid_position() {
        let db = MockDb::default();
        let mut l = new_location();
        l.lat = 91.0;
        assert!(matches!(
            create_location(&db, l),
            Err(Error::InvalidPosition)
        ));
        let mut l = new_location();
        l.lng = f64::NAN;
        assert!(matches!(
            create_location(&db, l),
            Err(Error::InvalidPosition)
        ));
        assert_eq!(0, db.count_locations().unwrap());
    }
}
