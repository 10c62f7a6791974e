use super::errors::Error;
use super::fairings::db::Db;
use crate::db::tag::all_tags;

use leetlist_types::Tag;
use rocket::serde::json::Json;
use rocket_db_pools::Connection;

/// List every tag
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "questions",
    responses(
        (status = 200, description = "All tags ordered by name", body = Vec<Tag>)
    )
)]
#[get("/")]
pub async fn list_tags(mut db: Connection<Db>) -> Result<Json<Vec<Tag>>, Error> {
    let rv = all_tags(&mut db).await?;
    Ok(Json(rv.into_iter().map(Into::into).collect()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list_tags]
}

#[cfg(not(tarpaulin_include))]
pub(crate) mod misc {
    use super::*;

    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(title = "Tags API", description = "Question tags", version = "1.0"),
        paths(list_tags),
        components(schemas(Tag))
    )]
    pub struct ApiDoc;
}
