use rocket::{
    figment::Figment,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Config {
    /// Directory of the built frontend, served from `/` when set.
    pub ui_path: Option<String>,
    /// HS256 key that bearer tokens are signed with. Without it only
    /// anonymous requests are served.
    pub jwt_secret: Option<String>,
}

pub fn config_provider() -> Figment {
    use rocket::figment::providers::{Env, Serialized};

    rocket::figment::Figment::from(rocket::Config::default())
        .merge(Serialized::defaults(Config::default()))
        .merge(("databases.main", rocket_db_pools::Config::default()))
        .merge(Env::prefixed("LL_").global())
}

pub fn get_database_url() -> Result<String, rocket::figment::Error> {
    config_provider().extract_inner("databases.main.url")
}
