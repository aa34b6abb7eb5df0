//! Typed rows for the three application tables.
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub city: String,
}

impl Student {
    /// Reads `id, name, surname, age, city` in column order
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            surname: row.get(2)?,
            age: row.get(3)?,
            city: row.get(4)?,
        })
    }
}

/// A course; start and end are stored as free-form date-like text
/// (e.g. "21.07.21").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub time_start: String,
    pub time_end: String,
}

impl Course {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Course {
            id: row.get(0)?,
            name: row.get(1)?,
            time_start: row.get(2)?,
            time_end: row.get(3)?,
        })
    }
}

/// A row of `Student_courses`. Neither id is checked against its table on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id: i64,
}

impl Enrollment {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Enrollment {
            student_id: row.get(0)?,
            course_id: row.get(1)?,
        })
    }
}
