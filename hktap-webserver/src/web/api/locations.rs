use super::*;

#[get("/locations?<category>")]
pub fn get_locations(
    db: &State<sqlite::Connections>,
    category: Option<String>,
) -> Result<Vec<json::Location>> {
    let filter = LocationFilter::by_category(category.as_deref());
    let locations = usecases::load_locations(&db.shared()?, &filter)?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

#[get("/locations/<id>")]
pub fn get_location(db: &State<sqlite::Connections>, id: &str) -> Result<json::Location> {
    let location = usecases::get_location(&db.shared()?, id)?;
    Ok(Json(location.into()))
}

#[post("/locations", format = "application/json", data = "<body>")]
pub fn post_location(
    db: &State<sqlite::Connections>,
    body: JsonResult<json::NewLocation>,
) -> Result<json::Location> {
    let new_location = from_json::new_location(body?.into_inner());
    let location = flows::create_location(db, new_location)?;
    Ok(Json(location.into()))
}

#[post("/locations/<id>/vote")]
pub fn post_vote(
    db: &State<sqlite::Connections>,
    cfg: &State<Cfg>,
    id: &str,
) -> Result<json::VoteResult> {
    let res = flows::vote(db, cfg.vote_policy, id)?;
    Ok(Json(to_json::vote_result(res)))
}
