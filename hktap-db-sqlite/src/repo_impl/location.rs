use super::*;

impl LocationRepo for DbReadOnly<'_> {
    fn create_location(&self, _location: &Location) -> Result<()> {
        Err(read_only_violation())
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn all_locations(&self, filter: &LocationFilter) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut(), filter)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn read_votes(&self, id: &str) -> Result<u64> {
        read_votes(&mut self.conn.borrow_mut(), id)
    }
    fn write_votes(&self, _id: &str, _votes: u64) -> Result<u64> {
        Err(read_only_violation())
    }
    fn increment_votes(&self, _id: &str) -> Result<u64> {
        Err(read_only_violation())
    }
}

impl LocationRepo for DbReadWrite<'_> {
    fn create_location(&self, location: &Location) -> Result<()> {
        create_location(&mut self.conn.borrow_mut(), location)
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn all_locations(&self, filter: &LocationFilter) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut(), filter)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn read_votes(&self, id: &str) -> Result<u64> {
        read_votes(&mut self.conn.borrow_mut(), id)
    }
    fn write_votes(&self, id: &str, votes: u64) -> Result<u64> {
        write_votes(&mut self.conn.borrow_mut(), id, votes)
    }
    fn increment_votes(&self, id: &str) -> Result<u64> {
        increment_votes(&mut self.conn.borrow_mut(), id)
    }
}

impl LocationRepo for DbConnection<'_> {
    fn create_location(&self, location: &Location) -> Result<()> {
        create_location(&mut self.conn.borrow_mut(), location)
    }
    fn get_location(&self, id: &str) -> Result<Location> {
        get_location(&mut self.conn.borrow_mut(), id)
    }
    fn all_locations(&self, filter: &LocationFilter) -> Result<Vec<Location>> {
        all_locations(&mut self.conn.borrow_mut(), filter)
    }
    fn count_locations(&self) -> Result<usize> {
        count_locations(&mut self.conn.borrow_mut())
    }
    fn read_votes(&self, id: &str) -> Result<u64> {
        read_votes(&mut self.conn.borrow_mut(), id)
    }
    fn write_votes(&self, id: &str, votes: u64) -> Result<u64> {
        write_votes(&mut self.conn.borrow_mut(), id, votes)
    }
    fn increment_votes(&self, id: &str) -> Result<u64> {
        increment_votes(&mut self.conn.borrow_mut(), id)
    }
}

fn create_location(conn: &mut SqliteConnection, l: &Location) -> Result<()> {
    let (lat, lng) = l.pos.to_lat_lng_deg();
    let new_location = models::NewLocation {
        id: l.id.as_str(),
        lat,
        lng,
        title: &l.title,
        description: &l.description,
        category: &l.category,
        photo: l.photo.as_deref(),
        votes: votes_to_db(l.votes)?,
        created_at: l.created_at.as_millis(),
    };
    diesel::insert_into(schema::locations::table)
        .values(&new_location)
        .execute(conn)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                repo::Error::AlreadyExists
            }
            err => from_diesel_err(err),
        })?;
    Ok(())
}

fn get_location(conn: &mut SqliteConnection, id: &str) -> Result<Location> {
    use schema::locations::dsl;
    let entity = dsl::locations
        .filter(dsl::id.eq(id))
        .first::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?;
    load_location(entity)
}

fn all_locations(conn: &mut SqliteConnection, filter: &LocationFilter) -> Result<Vec<Location>> {
    use schema::locations::dsl;
    let mut query = dsl::locations.order_by(dsl::rowid).into_boxed();
    if let Some(category) = &filter.category {
        query = query.filter(dsl::category.eq(category));
    }
    query
        .load::<models::LocationEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_location)
        .collect()
}

fn count_locations(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::locations::dsl;
    Ok(dsl::locations
        .select(diesel::dsl::count(dsl::rowid))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn read_votes(conn: &mut SqliteConnection, id: &str) -> Result<u64> {
    use schema::locations::dsl;
    let votes = dsl::locations
        .select(dsl::votes)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    u64::try_from(votes).map_err(|_| anyhow!("Negative votes of location {id}").into())
}

fn write_votes(conn: &mut SqliteConnection, id: &str, votes: u64) -> Result<u64> {
    use schema::locations::dsl;
    let count = diesel::update(dsl::locations.filter(dsl::id.eq(id)))
        .set(dsl::votes.eq(votes_to_db(votes)?))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(votes)
}

fn increment_votes(conn: &mut SqliteConnection, id: &str) -> Result<u64> {
    use schema::locations::dsl;
    conn.transaction::<_, DieselError, _>(|conn| {
        let count = diesel::update(dsl::locations.filter(dsl::id.eq(id)))
            .set(dsl::votes.eq(dsl::votes + 1))
            .execute(conn)?;
        if count == 0 {
            return Err(DieselError::NotFound);
        }
        dsl::locations
            .select(dsl::votes)
            .filter(dsl::id.eq(id))
            .first::<i64>(conn)
    })
    .map_err(from_diesel_err)
    .and_then(|votes| {
        u64::try_from(votes).map_err(|_| anyhow!("Negative votes of location {id}").into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::in_memory_connections;
    use hktap_entities::builders::*;

    fn central_pier() -> Location {
        Location::build()
            .id("1")
            .title("Central Pier")
            .category("transport")
            .photo(Some("data:image/jpeg;base64,AAAA"))
            .votes(3)
            .finish()
    }

    #[test]
    fn create_and_get_location() {
        let connections = in_memory_connections();
        let l = central_pier();
        connections.exclusive().unwrap().create_location(&l).unwrap();
        let db = connections.shared().unwrap();
        assert_eq!(l, db.get_location("1").unwrap());
        assert_eq!(1, db.count_locations().unwrap());
        assert!(matches!(db.get_location("2"), Err(repo::Error::NotFound)));
    }

    #[test]
    fn reject_duplicate_id() {
        let connections = in_memory_connections();
        let db = connections.exclusive().unwrap();
        db.create_location(&central_pier()).unwrap();
        assert!(matches!(
            db.create_location(&central_pier()),
            Err(repo::Error::AlreadyExists)
        ));
    }

    #[test]
    fn filter_by_category_in_insertion_order() {
        let connections = in_memory_connections();
        let db = connections.exclusive().unwrap();
        for (id, category) in [("a", "food"), ("b", "bar"), ("c", "food")] {
            db.create_location(&Location::build().id(id).category(category).finish())
                .unwrap();
        }
        let ids = |filter: LocationFilter| -> Vec<String> {
            db.all_locations(&filter)
                .unwrap()
                .into_iter()
                .map(|l| l.id.to_string())
                .collect()
        };
        assert_eq!(vec!["a", "c"], ids(LocationFilter::by_category(Some("food"))));
        assert_eq!(vec!["a", "b", "c"], ids(LocationFilter::default()));
    }

    #[test]
    fn read_write_and_increment_votes() {
        let connections = in_memory_connections();
        let db = connections.exclusive().unwrap();
        db.create_location(&central_pier()).unwrap();
        assert_eq!(3, db.read_votes("1").unwrap());
        assert_eq!(10, db.write_votes("1", 10).unwrap());
        assert_eq!(11, db.increment_votes("1").unwrap());
        assert_eq!(11, db.get_location("1").unwrap().votes);
        assert!(matches!(db.read_votes("x"), Err(repo::Error::NotFound)));
        assert!(matches!(db.write_votes("x", 1), Err(repo::Error::NotFound)));
        assert!(matches!(db.increment_votes("x"), Err(repo::Error::NotFound)));
    }

    #[test]
    fn read_only_connection_rejects_writes() {
        let connections = in_memory_connections();
        connections
            .exclusive()
            .unwrap()
            .create_location(&central_pier())
            .unwrap();
        let db = connections.shared().unwrap();
        assert!(db.write_votes("1", 4).is_err());
        assert!(db.increment_votes("1").is_err());
        assert_eq!(3, db.read_votes("1").unwrap());
    }
}
