use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("duplicate key value violates unique constraint of {table:?}")]
    DuplicationError { table: String },
    #[error("foreign key constraint violation")]
    ViolationError(),
    #[error(transparent)]
    Unexpected(#[from] diesel::result::Error),
}

impl DatabaseError {
    /// Sorts constraint violations out of a raw diesel error.
    pub fn classify(e: diesel::result::Error, table: &str) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DatabaseError::DuplicationError {
                    table: table.to_string(),
                }
            }
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                DatabaseError::ViolationError()
            }
            e => DatabaseError::Unexpected(e),
        }
    }
}

#[derive(Error, Debug)]
pub enum ListError {
    #[error("list not found")]
    NotFound,
    #[error("no access to this list")]
    Forbidden,
    #[error("invalid list: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}
