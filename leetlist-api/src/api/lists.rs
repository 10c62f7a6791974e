use super::errors::Error;
use super::fairings::db::Db;
use super::guards;
use crate::db::list::{search_lists, ListFilter};
use crate::db::Paging;

use leetlist_types::{ListSort, Page, QuestionList};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;

fn parse_sort(sort: Option<&str>) -> Result<ListSort, Error> {
    Ok(sort
        .map(str::parse::<ListSort>)
        .transpose()
        .map_err(|e| Error::BadRequest(e.to_string()))?
        .unwrap_or_default())
}

async fn browse(
    db: &mut Connection<Db>,
    owner: Option<&str>,
    search: Option<&str>,
    sort: Option<&str>,
    paging: Paging,
) -> Result<Json<Page<QuestionList>>, Error> {
    let filter = ListFilter {
        owner,
        search,
        sort: parse_sort(sort)?,
    };
    let (lists, total) = search_lists(db, &filter, paging).await?;
    Ok(Json(Page {
        results: lists.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Browse public lists of every user
#[utoipa::path(
    get,
    path = "/api/lists",
    tag = "lists",
    params(
        ("page" = inline(Option<i64>), Query, description = "Zero-based page number"),
        ("limit" = inline(Option<i64>), Query, description = "Page size, 20 by default and 100 at most"),
        ("search" = inline(Option<&str>), Query, description = "Keyword in the list name"),
        ("sort" = inline(Option<ListSort>), Query, description = "new or old"),
    ),
    responses(
        (status = 200, description = "Public lists", body = Page<QuestionList>),
        (status = 400, description = "Unknown sort order")
    )
)]
#[get("/lists?<page>&<limit>&<search>&<sort>")]
pub async fn browse_lists(
    mut db: Connection<Db>,
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<&str>,
    sort: Option<&str>,
) -> Result<Json<Page<QuestionList>>, Error> {
    browse(&mut db, None, search, sort, Paging::new(page, limit)).await
}

/// Browse every list of the requester, private ones included
#[utoipa::path(
    get,
    path = "/api/my-lists",
    tag = "lists",
    params(
        ("page" = inline(Option<i64>), Query, description = "Zero-based page number"),
        ("limit" = inline(Option<i64>), Query, description = "Page size, 20 by default and 100 at most"),
        ("search" = inline(Option<&str>), Query, description = "Keyword in the list name"),
        ("sort" = inline(Option<ListSort>), Query, description = "new or old"),
    ),
    responses(
        (status = 200, description = "Lists of the requester", body = Page<QuestionList>),
        (status = 400, description = "Unknown sort order"),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer" = [])
    )
)]
#[get("/my-lists?<page>&<limit>&<search>&<sort>")]
pub async fn browse_my_lists(
    mut db: Connection<Db>,
    user: guards::Authenticated,
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<&str>,
    sort: Option<&str>,
) -> Result<Json<Page<QuestionList>>, Error> {
    browse(&mut db, Some(user.0.as_str()), search, sort, Paging::new(page, limit)).await
}

pub fn routes() -> Vec<rocket::Route> {
    routes![browse_lists, browse_my_lists]
}

#[cfg(not(tarpaulin_include))]
pub(crate) mod misc {
    use super::*;
    use crate::misc::BearerAuth;

    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(title = "Browse API", description = "Page through lists", version = "1.0"),
        paths(browse_lists, browse_my_lists),
        components(schemas(QuestionList, ListSort)),
        modifiers(&BearerAuth)
    )]
    pub struct ApiDoc;
}
