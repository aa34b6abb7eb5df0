//! Fixed sample rows and the inserts that load them.
use crate::core::db::DatabaseManager;
use crate::core::Result;
use crate::models::{Course, Enrollment, Student};
use rusqlite::params;
use tracing::{debug, info};

/// `(id, name, surname, age, city)`
pub const STUDENTS: [(i64, &str, &str, i64, &str); 4] = [
    (1, "Max", "Brooks", 24, "Spb"),
    (2, "John", "Stones", 15, "Spb"),
    (3, "Andy", "Wings", 45, "Manhester"),
    (4, "Kate", "Brooks", 34, "Spb"),
];

/// `(id, name, time_start, time_end)`
pub const COURSES: [(i64, &str, &str, &str); 2] = [
    (1, "python", "21.07.21", "21.08.21"),
    (2, "java", "13.07.21", "16.08.21"),
];

/// `(student_id, course_id)`
pub const ENROLLMENTS: [(i64, i64); 4] = [(1, 1), (2, 1), (3, 1), (4, 2)];

pub fn fixture_students() -> Vec<Student> {
    STUDENTS
        .iter()
        .map(|&(id, name, surname, age, city)| Student {
            id,
            name: name.to_string(),
            surname: surname.to_string(),
            age,
            city: city.to_string(),
        })
        .collect()
}

pub fn fixture_courses() -> Vec<Course> {
    COURSES
        .iter()
        .map(|&(id, name, time_start, time_end)| Course {
            id,
            name: name.to_string(),
            time_start: time_start.to_string(),
            time_end: time_end.to_string(),
        })
        .collect()
}

pub fn fixture_enrollments() -> Vec<Enrollment> {
    ENROLLMENTS
        .iter()
        .map(|&(student_id, course_id)| Enrollment {
            student_id,
            course_id,
        })
        .collect()
}

impl DatabaseManager {
    /// Inserts the fixture rows unless every table already has data.
    ///
    /// All rows go in one transaction. Returns `true` if anything was inserted.
    /// A partially filled database is not repaired: the fixture ids collide
    /// with the rows already there and the constraint error is returned.
    pub fn seed(&self) -> Result<bool> {
        if self.is_populated()? {
            debug!("Tables already populated, skipping seed");
            return Ok(false);
        }

        self.transaction(|db| {
            for student in fixture_students() {
                db.insert_student(&student)?;
            }
            for course in fixture_courses() {
                db.insert_course(&course)?;
            }
            for enrollment in fixture_enrollments() {
                db.enroll(enrollment)?;
            }
            Ok(())
        })?;

        info!(
            students = STUDENTS.len(),
            courses = COURSES.len(),
            enrollments = ENROLLMENTS.len(),
            "Seeded sample data"
        );
        Ok(true)
    }

    /// Inserts a student with an explicit id
    pub fn insert_student(&self, student: &Student) -> Result<()> {
        self.execute(
            "INSERT INTO Students (id, name, surname, age, city) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![student.id, student.name, student.surname, student.age, student.city],
        )?;
        Ok(())
    }

    /// Inserts a student and lets SQLite assign the id, which is returned
    pub fn add_student(&self, name: &str, surname: &str, age: i64, city: &str) -> Result<i64> {
        self.execute(
            "INSERT INTO Students (name, surname, age, city) VALUES (?1, ?2, ?3, ?4)",
            params![name, surname, age, city],
        )?;
        self.last_insert_rowid()
    }

    /// Inserts a course with an explicit id
    pub fn insert_course(&self, course: &Course) -> Result<()> {
        self.execute(
            "INSERT INTO Courses (id, name, time_start, time_end) VALUES (?1, ?2, ?3, ?4)",
            params![course.id, course.name, course.time_start, course.time_end],
        )?;
        Ok(())
    }

    /// Records that a student takes a course. Duplicates are accepted.
    pub fn enroll(&self, enrollment: Enrollment) -> Result<()> {
        self.execute(
            "INSERT INTO Student_courses (student_id, course_id) VALUES (?1, ?2)",
            params![enrollment.student_id, enrollment.course_id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::schema::TABLES;
    use crate::core::StudentDbError;
    use crate::test_utils::{empty_database, seeded_database};

    #[test]
    fn test_seed_fills_every_table() {
        let db = seeded_database();
        assert_eq!(db.count_rows(TABLES[0]).unwrap(), 4);
        assert_eq!(db.count_rows(TABLES[1]).unwrap(), 2);
        assert_eq!(db.count_rows(TABLES[2]).unwrap(), 4);
        assert_eq!(db.students().unwrap(), fixture_students());
        assert_eq!(db.courses().unwrap(), fixture_courses());
        assert_eq!(db.enrollments().unwrap(), fixture_enrollments());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let db = seeded_database();
        assert!(!db.seed().unwrap());
        assert_eq!(db.count_rows("Students").unwrap(), 4);
        assert_eq!(db.count_rows("Student_courses").unwrap(), 4);
    }

    #[test]
    fn test_seed_on_partial_data_fails_and_rolls_back() {
        let db = empty_database();
        db.insert_student(&fixture_students()[0]).unwrap();

        match db.seed() {
            Err(StudentDbError::Query(msg)) => assert!(msg.contains("UNIQUE")),
            other => panic!("Expected constraint failure, got {:?}", other),
        }
        assert_eq!(db.count_rows("Students").unwrap(), 1);
        assert_eq!(db.count_rows("Courses").unwrap(), 0);
    }

    #[test]
    fn test_add_student_assigns_id() {
        let db = seeded_database();
        let id = db.add_student("Olga", "Petrova", 29, "Moscow").unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn test_duplicate_enrollment_is_accepted() {
        let db = seeded_database();
        db.enroll(Enrollment { student_id: 1, course_id: 1 }).unwrap();
        assert_eq!(db.count_rows("Student_courses").unwrap(), 5);
    }
}
