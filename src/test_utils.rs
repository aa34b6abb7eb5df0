/// # Test Utilities Module
///
/// In-memory database fixtures shared by the unit tests.

use crate::core::db::{DatabaseManager, IN_MEMORY};

/// Connected in-memory database with the schema but no rows
pub fn empty_database() -> DatabaseManager {
    let db = DatabaseManager::open(IN_MEMORY).expect("Failed to open in-memory database");
    db.setup_schema().expect("Failed to create schema");
    db
}

/// Connected in-memory database holding the sample fixture
pub fn seeded_database() -> DatabaseManager {
    let db = empty_database();
    assert!(db.seed().expect("Failed to seed database"), "fresh database should seed");
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures() {
        assert!(!empty_database().is_populated().unwrap());
        assert!(seeded_database().is_populated().unwrap());
    }
}
