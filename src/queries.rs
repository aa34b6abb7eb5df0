//! Canned read queries over the students/courses schema.
//!
//! Every query binds its inputs as parameters and orders students by id so
//! repeated runs print identical output.
use crate::core::db::schema::TABLES;
use crate::core::db::DatabaseManager;
use crate::core::{Result, StudentDbError};
use crate::models::{Course, Enrollment, Student};
use rusqlite::params;

const STUDENT_COLUMNS: &str = "Students.id, Students.name, Students.surname, Students.age, Students.city";

impl DatabaseManager {
    /// Students strictly older than `age`
    pub fn students_older_than(&self, age: i64) -> Result<Vec<Student>> {
        self.query_rows(
            &format!(
                "SELECT {} FROM Students WHERE Students.age > ?1 ORDER BY Students.id",
                STUDENT_COLUMNS
            ),
            params![age],
            Student::from_row,
        )
    }

    /// Students enrolled in the course named `course_name` (exact match).
    ///
    /// A student enrolled twice in the same course appears twice.
    pub fn students_in_course(&self, course_name: &str) -> Result<Vec<Student>> {
        self.query_rows(
            &format!(
                "SELECT {}
                 FROM Students
                 JOIN Student_courses ON Students.id = Student_courses.student_id
                 JOIN Courses ON Courses.id = Student_courses.course_id
                 WHERE Courses.name = ?1
                 ORDER BY Students.id",
                STUDENT_COLUMNS
            ),
            params![course_name],
            Student::from_row,
        )
    }

    /// Students enrolled in `course_name` who live in `city`
    pub fn students_in_course_and_city(&self, course_name: &str, city: &str) -> Result<Vec<Student>> {
        self.query_rows(
            &format!(
                "SELECT {}
                 FROM Students
                 JOIN Student_courses ON Students.id = Student_courses.student_id
                 JOIN Courses ON Courses.id = Student_courses.course_id
                 WHERE Courses.name = ?1 AND Students.city = ?2
                 ORDER BY Students.id",
                STUDENT_COLUMNS
            ),
            params![course_name, city],
            Student::from_row,
        )
    }

    pub fn students(&self) -> Result<Vec<Student>> {
        self.query_rows(
            &format!("SELECT {} FROM Students ORDER BY Students.id", STUDENT_COLUMNS),
            [],
            Student::from_row,
        )
    }

    pub fn courses(&self) -> Result<Vec<Course>> {
        self.query_rows(
            "SELECT id, name, time_start, time_end FROM Courses ORDER BY id",
            [],
            Course::from_row,
        )
    }

    /// Enrollments in insertion order
    pub fn enrollments(&self) -> Result<Vec<Enrollment>> {
        self.query_rows(
            "SELECT student_id, course_id FROM Student_courses ORDER BY rowid",
            [],
            Enrollment::from_row,
        )
    }

    /// Number of rows in one of the application tables
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        if !TABLES.contains(&table) {
            return Err(StudentDbError::Query(format!("Unknown table: {}", table)));
        }
        let counts = self.query_rows(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(counts.first().copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{empty_database, seeded_database};

    fn ids(students: &[Student]) -> Vec<i64> {
        students.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_students_older_than_30() {
        let db = seeded_database();
        let students = db.students_older_than(30).unwrap();
        assert_eq!(ids(&students), vec![3, 4]);
        assert_eq!(students[0].name, "Andy");
        assert_eq!(students[0].age, 45);
    }

    #[test]
    fn test_older_than_is_strict() {
        let db = seeded_database();
        assert_eq!(ids(&db.students_older_than(34).unwrap()), vec![3]);
        assert!(db.students_older_than(45).unwrap().is_empty());
    }

    #[test]
    fn test_students_in_python_course() {
        let db = seeded_database();
        assert_eq!(ids(&db.students_in_course("python").unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&db.students_in_course("java").unwrap()), vec![4]);
    }

    #[test]
    fn test_course_name_is_case_sensitive() {
        let db = seeded_database();
        assert!(db.students_in_course("Python").unwrap().is_empty());
    }

    #[test]
    fn test_students_in_python_course_from_spb() {
        let db = seeded_database();
        let students = db.students_in_course_and_city("python", "Spb").unwrap();
        assert_eq!(ids(&students), vec![1, 2]);
        assert!(students.iter().all(|s| s.city == "Spb"));
    }

    #[test]
    fn test_duplicate_enrollment_repeats_student() {
        let db = seeded_database();
        db.enroll(Enrollment { student_id: 2, course_id: 1 }).unwrap();
        assert_eq!(ids(&db.students_in_course("python").unwrap()), vec![1, 2, 2, 3]);
    }

    #[test]
    fn test_queries_on_empty_tables() {
        let db = empty_database();
        assert!(db.students_older_than(0).unwrap().is_empty());
        assert!(db.students_in_course("python").unwrap().is_empty());
        assert_eq!(db.count_rows("Courses").unwrap(), 0);
    }

    #[test]
    fn test_count_rows_rejects_unknown_table() {
        let db = seeded_database();
        match db.count_rows("Students; DROP TABLE Students") {
            Err(StudentDbError::Query(msg)) => assert!(msg.contains("Unknown table")),
            other => panic!("Expected Query error, got {:?}", other),
        }
    }

    #[test]
    fn test_injection_text_is_bound_not_executed() {
        let db = seeded_database();
        let students = db.students_in_course("python' OR '1'='1").unwrap();
        assert!(students.is_empty());
        assert_eq!(db.count_rows("Students").unwrap(), 4);
    }
}
