//! Repository implementations for database operations

pub mod event;
pub mod registration;

pub use event::EventRepository;
pub use registration::RegistrationRepository;

/// Check whether a database error is a unique constraint violation on the
/// named constraint. Used as the race fallback behind the pre-insert
/// existence checks.
pub(crate) fn is_unique_violation(error: &sqlx::Error, constraint: &str) -> bool {
    match error {
        sqlx::Error::Database(db_error) => {
            db_error.code().as_deref() == Some("23505")
                && db_error.constraint() == Some(constraint)
        }
        _ => false,
    }
}
