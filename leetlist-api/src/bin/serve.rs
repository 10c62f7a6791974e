#[rocket::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    leetlist_api::rocket().await?.launch().await?;
    Ok(())
}
