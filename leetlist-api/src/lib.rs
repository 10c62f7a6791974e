#[macro_use]
extern crate rocket;

pub mod api;
pub mod db;
pub mod import;
pub mod service;
pub mod utils;

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
#[ctor::ctor]
fn init() {
    crate::utils::logging::setup_console_log();
}

pub(crate) mod misc {
    use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
    use utoipa::{Modify, OpenApi};
    use utoipa_swagger_ui::SwaggerUi;
    use utoipa_swagger_ui::Url;

    /// Registers the `bearer` scheme that authenticated routes refer to.
    pub struct BearerAuth;

    impl Modify for BearerAuth {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            let components = openapi.components.get_or_insert_with(Default::default);
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }

    #[derive(OpenApi)]
    #[openapi(info(
        title = "LeetList API",
        description = r"## Main API documentation

- [Lists API](/swagger-ui/?urls.primaryName=lists)
- [Browse API](/swagger-ui/?urls.primaryName=browse)
- [Questions API](/swagger-ui/?urls.primaryName=questions)
- [Tags API](/swagger-ui/?urls.primaryName=tags)
    ",
        version = "1.0"
    ))]
    pub struct ApiDoc;

    pub fn docs() -> Vec<rocket::Route> {
        use crate::api::{list, lists, question, tag};
        SwaggerUi::new("/swagger-ui/<_..>")
            .urls(vec![
                (
                    Url::with_primary("main", "/api-docs/openapi.json", true),
                    ApiDoc::openapi(),
                ),
                (
                    Url::new("lists", "/api-docs/openapi-lists.json"),
                    list::misc::ApiDoc::openapi(),
                ),
                (
                    Url::new("browse", "/api-docs/openapi-browse.json"),
                    lists::misc::ApiDoc::openapi(),
                ),
                (
                    Url::new("questions", "/api-docs/openapi-questions.json"),
                    question::misc::ApiDoc::openapi(),
                ),
                (
                    Url::new("tags", "/api-docs/openapi-tags.json"),
                    tag::misc::ApiDoc::openapi(),
                ),
            ])
            .into()
    }

}

#[cfg(not(tarpaulin_include))]
pub async fn rocket() -> anyhow::Result<rocket::Rocket<rocket::Build>> {
    use rocket::fairing::AdHoc;
    use rocket::fs::FileServer;
    use rocket_db_pools::Database;

    use crate::api::configs::{self, Config};
    use crate::api::fairings::db::Db;
    use crate::api::{list, lists, question, tag};
    use crate::misc;

    crate::utils::logging::setup_console_log();
    crate::db::connection::run_migrations().await?;

    let cfg_provider = configs::config_provider();
    let ui_path = cfg_provider.extract_inner::<Option<String>>("ui_path")?;
    if cfg_provider
        .extract_inner::<Option<String>>("jwt_secret")?
        .is_none()
    {
        tracing::warn!("jwt_secret is not set, only anonymous requests are served");
    }

    let mut builder = rocket::custom(cfg_provider);
    if let Some(ui_path) = ui_path {
        // Serve the UI files if the path is provided
        builder = builder.mount("/", FileServer::from(ui_path));
    }
    Ok(builder
        .attach(Db::init())
        .mount("/api/list", list::routes())
        .mount("/api", lists::routes())
        .mount("/api/questions", question::routes())
        .mount("/api/tags", tag::routes())
        .mount("/", misc::docs())
        .attach(AdHoc::config::<Config>()))
}
