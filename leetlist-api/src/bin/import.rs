use anyhow::Context;

#[rocket::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    leetlist_api::utils::logging::setup_console_log();

    let path = std::env::args()
        .nth(1)
        .context("usage: leetlist-import <questions.json>")?;

    leetlist_api::db::connection::run_migrations().await?;
    let mut conn = leetlist_api::db::connection::establish().await?;
    let imported = leetlist_api::import::import_questions(&mut conn, &path).await?;
    tracing::info!(imported, path = %path, "import finished");

    Ok(())
}
