use super::*;

const DEFAULT_TOP_CATEGORIES_LIMIT: usize = 3;

#[get("/categories")]
pub fn get_categories(db: &State<sqlite::Connections>) -> Result<Vec<json::CategoryFrequency>> {
    let frequencies = usecases::category_frequencies(&db.shared()?)?;
    Ok(Json(frequencies.into_iter().map(Into::into).collect()))
}

#[get("/categories/top?<limit>")]
pub fn get_top_categories(
    db: &State<sqlite::Connections>,
    limit: Option<usize>,
) -> Result<Vec<json::TopCategory>> {
    let limit = limit.unwrap_or(DEFAULT_TOP_CATEGORIES_LIMIT);
    let categories = usecases::top_categories(&db.shared()?, limit)?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[get("/categories/search?<q>")]
pub fn get_categories_search(
    db: &State<sqlite::Connections>,
    q: Option<String>,
) -> Result<Vec<json::CategoryFrequency>> {
    let query = q.unwrap_or_default();
    let categories = usecases::search_categories(&db.shared()?, &query)?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
