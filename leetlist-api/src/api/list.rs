use super::errors::Error;
use super::fairings::db::Db;
use super::guards;
use crate::db::list::{self as db_list, NewQuestionList};
use crate::service::{access, mutation, unknown_questions, validate_contents};

use leetlist_types::{CreateList, ListDetail, ModifyList, QuestionList, SaveList};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;
use tracing::info;

/// Create a new list owned by the requester
#[utoipa::path(
    post,
    path = "/api/list",
    tag = "lists",
    request_body = CreateList,
    responses(
        (status = 200, description = "List created success", body = QuestionList),
        (status = 400, description = "Invalid name or unknown question"),
        (status = 401, description = "Login required")
    ),
    security(
        ("bearer" = [])
    )
)]
#[post("/", format = "application/json", data = "<payload>")]
pub async fn create_list(
    mut db: Connection<Db>,
    user: guards::Authenticated,
    payload: Json<CreateList>,
) -> Result<Json<QuestionList>, Error> {
    let payload = payload.into_inner();
    validate_contents(&payload.name, &payload.questions)?;

    let list = db_list::create_list(
        &mut db,
        NewQuestionList {
            name: payload.name.trim(),
            username: &user.0,
            private: payload.private,
        },
        &payload.questions,
    )
    .await
    .map_err(unknown_questions)?;
    info!(id = list.id, owner = %list.username, "list created");

    Ok(Json(list.into()))
}

/// Get a list with its questions
#[utoipa::path(
    get,
    path = "/api/list/{id}",
    tag = "lists",
    params(
        ("id" = inline(i32), Path, description = "The list id")
    ),
    responses(
        (status = 200, description = "List found", body = ListDetail),
        (status = 403, description = "Private list of another user"),
        (status = 404, description = "List not found")
    ),
    security(
        (),
        ("bearer" = [])
    )
)]
#[get("/<id>")]
pub async fn get_list(
    mut db: Connection<Db>,
    requester: guards::Requester,
    id: i32,
) -> Result<Json<ListDetail>, Error> {
    Ok(Json(
        access::get_list(&mut **db, id, requester.username()).await?,
    ))
}

/// Change the visibility of a list
#[utoipa::path(
    put,
    path = "/api/list/{id}",
    tag = "lists",
    params(
        ("id" = inline(i32), Path, description = "The list id")
    ),
    request_body = ModifyList,
    responses(
        (status = 200, description = "List updated success", body = QuestionList),
        (status = 400, description = "No changes"),
        (status = 403, description = "Not the list owner"),
        (status = 404, description = "List not found")
    ),
    security(
        ("bearer" = [])
    )
)]
#[put("/<id>", format = "application/json", data = "<payload>")]
pub async fn update_list(
    mut db: Connection<Db>,
    requester: guards::Requester,
    id: i32,
    payload: Json<ModifyList>,
) -> Result<Json<QuestionList>, Error> {
    Ok(Json(
        mutation::update_list(&mut **db, id, requester.username(), &payload).await?,
    ))
}

/// Rename a list and replace its questions
#[utoipa::path(
    put,
    path = "/api/list/{id}/questions",
    tag = "lists",
    params(
        ("id" = inline(i32), Path, description = "The list id")
    ),
    request_body = SaveList,
    responses(
        (status = 200, description = "List saved success", body = QuestionList),
        (status = 400, description = "Invalid name or unknown question"),
        (status = 403, description = "Not the list owner"),
        (status = 404, description = "List not found")
    ),
    security(
        ("bearer" = [])
    )
)]
#[put("/<id>/questions", format = "application/json", data = "<payload>")]
pub async fn save_list(
    mut db: Connection<Db>,
    requester: guards::Requester,
    id: i32,
    payload: Json<SaveList>,
) -> Result<Json<QuestionList>, Error> {
    Ok(Json(
        mutation::save_list(&mut **db, id, requester.username(), &payload).await?,
    ))
}

/// Delete a list
#[utoipa::path(
    delete,
    path = "/api/list/{id}",
    tag = "lists",
    params(
        ("id" = inline(i32), Path, description = "The list id")
    ),
    responses(
        (status = 200, description = "List deleted success"),
        (status = 403, description = "Not the list owner"),
        (status = 404, description = "List not found")
    ),
    security(
        ("bearer" = [])
    )
)]
#[delete("/<id>")]
pub async fn delete_list(
    mut db: Connection<Db>,
    requester: guards::Requester,
    id: i32,
) -> Result<&'static str, Error> {
    mutation::delete_list(&mut **db, id, requester.username()).await?;
    Ok("Deleted")
}

pub fn routes() -> Vec<rocket::Route> {
    routes![create_list, get_list, update_list, save_list, delete_list]
}

#[cfg(not(tarpaulin_include))]
pub(crate) mod misc {
    use super::*;
    use crate::misc::BearerAuth;

    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(
        info(title = "Lists API", description = "Create, read, share and delete lists", version = "1.0"),
        paths(create_list, get_list, update_list, save_list, delete_list),
        components(schemas(CreateList, ModifyList, SaveList, QuestionList, ListDetail)),
        modifiers(&BearerAuth)
    )]
    pub struct ApiDoc;
}
