//! Property-based tests for parameter binding
//!
//! Values written through bound parameters must read back unchanged, whatever
//! quoting or SQL fragments they contain.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rusqlite::params;
    use studentdb::core::db::{DatabaseManager, IN_MEMORY};
    use studentdb::models::Student;

    fn fresh_db() -> DatabaseManager {
        let db = DatabaseManager::open(IN_MEMORY).unwrap();
        db.setup_schema().unwrap();
        db
    }

    fn arb_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\PC{0,24}",
            Just("'; DROP TABLE Students; --".to_string()),
            Just("O'Brien".to_string()),
            Just(String::new()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_student_insert_round_trips(
            name in arb_text(),
            surname in arb_text(),
            age in any::<i64>(),
            city in arb_text(),
        ) {
            let db = fresh_db();
            let id = db.add_student(&name, &surname, age, &city).unwrap();

            let students = db.students().unwrap();
            prop_assert_eq!(students.len(), 1);
            prop_assert_eq!(
                &students[0],
                &Student { id, name: name.clone(), surname: surname.clone(), age, city: city.clone() }
            );
        }

        #[test]
        fn prop_execute_round_trips_raw_values(
            name in arb_text(),
            age in any::<i64>(),
        ) {
            let db = fresh_db();
            db.execute(
                "INSERT INTO Students (name, surname, age, city) VALUES (?1, ?2, ?3, ?4)",
                params![name, "x", age, "y"],
            ).unwrap();

            let result = db.execute(
                "SELECT name, age FROM Students WHERE name = ?1 AND age = ?2",
                params![name, age],
            ).unwrap();
            prop_assert_eq!(result.row_count, 1);
            prop_assert_eq!(&result.rows[0][0], &rusqlite::types::Value::Text(name.clone()));
            prop_assert_eq!(&result.rows[0][1], &rusqlite::types::Value::Integer(age));
        }

        #[test]
        fn prop_older_than_matches_filter(threshold in -10i64..60) {
            let db = fresh_db();
            db.seed().unwrap();

            let expected: Vec<i64> = studentdb::seed::STUDENTS
                .iter()
                .filter(|s| s.3 > threshold)
                .map(|s| s.0)
                .collect();
            let actual: Vec<i64> = db.students_older_than(threshold).unwrap().iter().map(|s| s.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
