use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::configs::Config;
use crate::api::errors::Error;

/// Bearer token claims. `sub` is the username.
#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
}

fn verify(token: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims.sub)
}

/// The identity behind a request. Requests without an `Authorization`
/// header are anonymous; a header that does not verify is rejected.
#[derive(Debug)]
pub struct Requester(Option<String>);

impl Requester {
    pub fn username(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Requester {
    type Error = Error;

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(config) = request.rocket().state::<Config>() else {
            return Outcome::Error((
                Status::InternalServerError,
                Error::InternalServer("Missing Config".to_string()),
            ));
        };
        let Some(header) = request.headers().get_one("Authorization") else {
            return Outcome::Success(Requester(None));
        };
        let Some(token) = header.strip_prefix("Bearer ") else {
            return Outcome::Error((
                Status::Unauthorized,
                Error::Unauthorized("Malformed Authorization header".to_string()),
            ));
        };
        let Some(secret) = config.jwt_secret.as_deref() else {
            return Outcome::Error((
                Status::Unauthorized,
                Error::Unauthorized("Authentication is not configured".to_string()),
            ));
        };

        match verify(token.trim(), secret) {
            Ok(username) => Outcome::Success(Requester(Some(username))),
            Err(e) => {
                warn!(error = %e, "rejected bearer token");
                Outcome::Error((
                    Status::Unauthorized,
                    Error::Unauthorized("Invalid token".to_string()),
                ))
            }
        }
    }
}

/// A requester that must be logged in.
#[derive(Debug)]
pub struct Authenticated(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = Error;

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let requester = try_outcome!(request.guard::<Requester>().await);
        match requester.0 {
            Some(username) => Outcome::Success(Authenticated(username)),
            None => Outcome::Error((
                Status::Unauthorized,
                Error::Unauthorized("Login required".to_string()),
            )),
        }
    }
}
