//! Stock store errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors raised by the stock store.
#[derive(Debug, Error)]
pub enum StockError {
    /// No item with the given id.
    #[error("stock item not found")]
    NotFound,

    /// The change would break a table constraint, such as taking stock below zero.
    #[error("stock change violates a constraint")]
    ConstraintViolation,

    /// An item with the same id or name already exists.
    #[error("stock item already exists")]
    AlreadyExists,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StockError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::ConstraintViolation
            }
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            StockError::from(Error::RowNotFound),
            StockError::NotFound
        ));
    }

    #[test]
    fn other_errors_are_wrapped() {
        assert!(matches!(
            StockError::from(Error::PoolTimedOut),
            StockError::Sql(Error::PoolTimedOut)
        ));
    }
}
