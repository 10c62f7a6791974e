use crate::utils::{DatabaseError, ListError};

#[derive(Responder, Debug)]
pub enum Error {
    #[response(status = 400)]
    BadRequest(String),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403)]
    Forbidden(String),
    #[response(status = 404)]
    NotFound(String),
    #[response(status = 500)]
    InternalServer(String),
}

impl From<DatabaseError> for Error {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::DuplicationError { .. } | DatabaseError::ViolationError() => {
                Error::BadRequest(e.to_string())
            }
            DatabaseError::Unexpected(e) => {
                tracing::error!(error = ?e, "storage failure");
                Error::InternalServer("Internal server error".to_string())
            }
        }
    }
}

impl From<ListError> for Error {
    fn from(e: ListError) -> Self {
        match e {
            ListError::NotFound => Error::NotFound("List not found".to_string()),
            ListError::Forbidden => {
                Error::Forbidden("You do not have access to this list".to_string())
            }
            ListError::ValidationError(msg) => Error::BadRequest(msg),
            ListError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn list_errors_keep_their_kind() {
        assert!(matches!(Error::from(ListError::NotFound), Error::NotFound(_)));
        assert!(matches!(Error::from(ListError::Forbidden), Error::Forbidden(_)));
        assert!(matches!(
            Error::from(ListError::ValidationError("No changes".to_string())),
            Error::BadRequest(msg) if msg == "No changes"
        ));
    }

    #[test]
    fn storage_failures_hide_details() {
        let e = ListError::Storage(DatabaseError::Unexpected(
            diesel::result::Error::BrokenTransactionManager,
        ));
        match Error::from(e) {
            Error::InternalServer(msg) => assert_eq!(msg, "Internal server error"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
