use super::errors::Error;
use super::fairings::db::Db;
use crate::db::question::search_questions;
use crate::db::Paging;

use leetlist_types::{Page, Question};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;

/// Page through the question catalog
#[utoipa::path(
    get,
    path = "/api/questions",
    tag = "questions",
    params(
        ("page" = inline(Option<i64>), Query, description = "Zero-based page number"),
        ("limit" = inline(Option<i64>), Query, description = "Page size, 20 by default and 100 at most"),
        ("search" = inline(Option<&str>), Query, description = "Keyword in the question title"),
        ("tag" = inline(Option<&str>), Query, description = "Only questions with this tag"),
    ),
    responses(
        (status = 200, description = "Questions with their tags", body = Page<Question>)
    )
)]
#[get("/?<page>&<limit>&<search>&<tag>")]
pub async fn browse_questions(
    mut db: Connection<Db>,
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<&str>,
    tag: Option<&str>,
) -> Result<Json<Page<Question>>, Error> {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());
    let (rv, total) = search_questions(&mut db, search, tag, Paging::new(page, limit)).await?;
    Ok(Json(Page {
        results: rv.into_iter().map(Into::into).collect(),
        total,
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![browse_questions]
}

#[cfg(not(tarpaulin_include))]
pub(crate) mod misc {
    use super::*;

    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(title = "Questions API", description = "Browse the question catalog", version = "1.0"),
        paths(browse_questions),
        components(schemas(Question))
    )]
    pub struct ApiDoc;
}
