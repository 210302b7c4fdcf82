use super::*;

#[get("/leaderboard?<category>&<limit>")]
pub fn get_leaderboard(
    db: &State<sqlite::Connections>,
    category: Option<String>,
    limit: Option<usize>,
) -> Result<Vec<json::RankedLocation>> {
    let filter = LocationFilter::by_category(category.as_deref());
    let ranking = usecases::load_leaderboard(&db.shared()?, &filter, limit)?;
    Ok(Json(
        ranking.into_iter().map(to_json::ranked_location).collect(),
    ))
}
