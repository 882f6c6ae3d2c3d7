//! Repository error type
//!
//! Constraint violations are classified right after the failing statement,
//! while the database error code is still at hand.

/// Name PostgreSQL gives the inline `UNIQUE` on `investors.email`.
pub const INVESTOR_EMAIL_CONSTRAINT: &str = "investors_email_key";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("an investor with email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("referenced investor or fund does not exist")]
    MissingReference,
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Classify a failed investor insert/update.
    pub(crate) fn on_investor_write(err: sqlx::Error, email: &str) -> Self {
        let duplicate = err.as_database_error().is_some_and(|db_err| {
            db_err.is_unique_violation()
                && db_err
                    .constraint()
                    .map_or(true, |name| name == INVESTOR_EMAIL_CONSTRAINT)
        });

        if duplicate {
            Self::DuplicateEmail {
                email: email.to_owned(),
            }
        } else {
            Self::Sqlx(err)
        }
    }

    /// Classify a failed investment insert.
    pub(crate) fn on_investment_write(err: sqlx::Error) -> Self {
        let dangling = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());

        if dangling {
            Self::MissingReference
        } else {
            Self::Sqlx(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_internal() {
        let err = DbError::on_investment_write(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Sqlx(_)));

        let err = DbError::on_investor_write(sqlx::Error::RowNotFound, "a@x.com");
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("fund", "abc");
        assert_eq!(err.to_string(), "not found: fund 'abc'");
    }
}
