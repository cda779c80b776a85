//! Classification helpers for PostgreSQL errors surfaced through `sqlx`.

/// Returns true when `e` is a unique violation on the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Returns true when `e` is a foreign key violation (referenced row missing).
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        let err = sqlx::Error::RowNotFound;

        assert!(!is_unique_violation_on(&err, "registrations_email_meetup_key"));
        assert!(!is_foreign_key_violation(&err));
    }
}
