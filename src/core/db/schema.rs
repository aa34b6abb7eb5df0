/// Schema Module
///
/// Table definitions for students, courses and enrollments, the idempotent
/// initialization entry point, and PRAGMA-based introspection used to check
/// what actually exists in a database file.

use crate::core::db::connection::DatabaseManager;
use crate::core::Result;
use rusqlite::Row;
use std::collections::HashMap;
use tracing::info;

pub const STUDENTS_TABLE: &str = "Students";
pub const COURSES_TABLE: &str = "Courses";
pub const ENROLLMENTS_TABLE: &str = "Student_courses";

/// Every table the application owns, in creation order
pub const TABLES: [&str; 3] = [STUDENTS_TABLE, COURSES_TABLE, ENROLLMENTS_TABLE];

const STUDENTS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    surname TEXT NOT NULL,
    age INTEGER NOT NULL,
    city TEXT NOT NULL
)"#;

const COURSES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time_start TEXT NOT NULL,
    time_end TEXT NOT NULL
)"#;

// No uniqueness on (student_id, course_id): duplicate enrollments are allowed.
const ENROLLMENTS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Student_courses (
    student_id INTEGER NOT NULL,
    course_id INTEGER NOT NULL,
    FOREIGN KEY (student_id) REFERENCES Students (id),
    FOREIGN KEY (course_id) REFERENCES Courses (id)
)"#;

/// What `ensure_initialized` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Tables were empty and the fixture rows were inserted
    Seeded,
    /// Every table already held rows; nothing was inserted
    AlreadyPopulated,
}

impl DatabaseManager {
    /// Creates the three tables if they do not exist yet
    pub fn setup_schema(&self) -> Result<()> {
        for ddl in [STUDENTS_TABLE_SQL, COURSES_TABLE_SQL, ENROLLMENTS_TABLE_SQL] {
            self.execute(ddl, [])?;
        }
        Ok(())
    }

    /// True only when every table holds at least one row
    pub fn is_populated(&self) -> Result<bool> {
        for table in TABLES {
            let rows = self.execute(&format!("SELECT 1 FROM {} LIMIT 1", table), [])?;
            if rows.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Creates the schema and seeds it unless it is already populated.
    ///
    /// Safe to call on every start, against a new or an existing file.
    pub fn ensure_initialized(&self) -> Result<InitOutcome> {
        self.setup_schema()?;
        let outcome = if self.seed()? {
            InitOutcome::Seeded
        } else {
            InitOutcome::AlreadyPopulated
        };
        info!(?outcome, path = ?self.path(), "Database initialized");
        Ok(outcome)
    }

    /// Introspects every user table in the database
    pub fn schema(&self) -> Result<Schema> {
        Schema::from_manager(self)
    }
}

/// Represents a foreign key relationship
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    /// The table this foreign key references
    pub referenced_table: String,
    /// The column in this table that is the foreign key
    pub from_column: String,
    /// The referenced column in the foreign table
    pub to_column: String,
}

/// Represents a database column with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Declared type (e.g., "INTEGER", "TEXT")
    pub type_name: String,
    pub notnull: bool,
    /// Whether this column is part of the primary key
    pub pk: bool,
}

impl Column {
    /// Creates a Column from a PRAGMA table_info result row
    fn from_pragma_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Column {
            name: row.get(1)?,
            type_name: row.get(2)?,
            notnull: row.get(3)?,
            pk: row.get::<_, i64>(5)? > 0,
        })
    }
}

/// Represents a database table with its structure
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    fn from_manager(db: &DatabaseManager, table_name: &str) -> Result<Self> {
        let columns = db.query_rows(
            &format!("PRAGMA table_info('{}')", table_name),
            [],
            Column::from_pragma_row,
        )?;
        let foreign_keys = db.query_rows(
            &format!("PRAGMA foreign_key_list('{}')", table_name),
            [],
            |row| {
                Ok(ForeignKey {
                    referenced_table: row.get(2)?,
                    from_column: row.get(3)?,
                    to_column: row.get(4)?,
                })
            },
        )?;

        Ok(Table {
            name: table_name.to_string(),
            columns,
            foreign_keys,
        })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Schema information for a database
#[derive(Debug, Clone)]
pub struct Schema {
    /// Map of table name to table information
    pub tables: HashMap<String, Table>,
}

impl Schema {
    /// Creates a new Schema by introspecting all user tables in the database
    pub fn from_manager(db: &DatabaseManager) -> Result<Self> {
        let names = db.query_rows(
            "SELECT name FROM sqlite_master
             WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |row| row.get::<_, String>(0),
        )?;

        let mut tables = HashMap::new();
        for name in names {
            let table = Table::from_manager(db, &name)?;
            tables.insert(name, table);
        }
        Ok(Schema { tables })
    }

    /// Whether all application tables are present
    pub fn has_all_tables(&self) -> bool {
        TABLES.iter().all(|t| self.tables.contains_key(*t))
    }
}
