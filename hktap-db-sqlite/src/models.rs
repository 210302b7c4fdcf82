#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocation<'a> {
    pub id: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub photo: Option<&'a str>,
    pub votes: i64,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct LocationEntity {
    pub rowid: i64,
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub photo: Option<String>,
    pub votes: i64,
    pub created_at: i64,
}
