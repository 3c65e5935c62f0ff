//! Shared helpers for the PostgreSQL repositories

use std::collections::HashMap;
use std::hash::Hash;

use super::RepositoryError;

// ============================================================================
// SQL Column Constants
//
// SELECT column lists per table, shared by the repositories and their
// RETURNING clauses.
// ============================================================================

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, name, balance";

/// SQL columns for user queries joined against subscribers_on_authors as `u`
pub const USER_COLUMNS_PREFIXED: &str = "u.id, u.name, u.balance";

/// SQL columns for profile queries
pub const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

/// SQL columns for post queries
pub const POST_COLUMNS: &str = "id, title, content, author_id";

/// SQL columns for member type queries
pub const MEMBER_TYPE_COLUMNS: &str = "id, discount, posts_limit_per_month";

/// Map a failed write into a typed repository error
///
/// Unique and foreign-key violations become [`RepositoryError::Conflict`]
/// and [`RepositoryError::ForeignKey`]; everything else stays a database
/// error.
pub fn map_write_error(entity: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("constraint").to_string();
        if db_err.is_unique_violation() {
            return RepositoryError::conflict(entity, constraint);
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::foreign_key(entity, constraint);
        }
    }
    RepositoryError::Database(err)
}

/// Group rows by a key, making sure every requested key has an entry
pub fn group_by_key<K, V, F>(keys: &[K], rows: Vec<V>, key_of: F) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash + Clone,
    F: Fn(&V) -> K,
{
    let mut grouped: HashMap<K, Vec<V>> = HashMap::with_capacity(keys.len());
    for row in rows {
        grouped.entry(key_of(&row)).or_default().push(row);
    }
    for key in keys {
        grouped.entry(key.clone()).or_default();
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_key_fills_missing_keys() {
        let rows = vec![(1, "a"), (1, "b"), (2, "c")];
        let grouped = group_by_key(&[1, 2, 3], rows, |row| row.0);

        assert_eq!(grouped[&1], vec![(1, "a"), (1, "b")]);
        assert_eq!(grouped[&2], vec![(2, "c")]);
        assert!(grouped[&3].is_empty());
    }

    #[test]
    fn test_group_by_key_keeps_row_order() {
        let rows = vec![(7, 3), (7, 1), (7, 2)];
        let grouped = group_by_key(&[7], rows, |row| row.0);
        let values: Vec<_> = grouped[&7].iter().map(|row| row.1).collect();
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_map_write_error_passes_through_other_errors() {
        let err = map_write_error("user", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
