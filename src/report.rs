//! Console report for the canned queries.
//!
//! The report is always the same three sections in the same order; only the
//! rendering of each student list changes with `OutputFormat`.
use crate::core::db::{DatabaseManager, InitOutcome};
use crate::core::Result;
use crate::models::Student;
use serde::Deserialize;

pub const OLDER_THAN_AGE: i64 = 30;
pub const COURSE_NAME: &str = "python";
pub const CITY: &str = "Spb";

pub const CREATED_HEADER: &str = "Creating new database...";
pub const EXISTING_HEADER: &str = "Database already exists. Skipping creation and seeding.";

/// How student lists are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One bracketed list of `(id, 'name', 'surname', age, 'city')` tuples
    #[default]
    Tuples,
    /// Aligned columns with a header row
    Table,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub label: String,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: InitOutcome,
    pub sections: Vec<Section>,
}

impl Report {
    /// Runs the three canned queries in their fixed order
    pub fn collect(db: &DatabaseManager, outcome: InitOutcome) -> Result<Self> {
        let sections = vec![
            Section {
                label: format!("Students older than {}:", OLDER_THAN_AGE),
                students: db.students_older_than(OLDER_THAN_AGE)?,
            },
            Section {
                label: format!("Students in the {} course:", COURSE_NAME),
                students: db.students_in_course(COURSE_NAME)?,
            },
            Section {
                label: format!("Students in the {} course from {}:", COURSE_NAME, CITY),
                students: db.students_in_course_and_city(COURSE_NAME, CITY)?,
            },
        ];
        Ok(Report { outcome, sections })
    }

    /// Renders the whole report; lines are joined with `\n`, no trailing newline
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let header = match self.outcome {
            InitOutcome::Seeded => CREATED_HEADER,
            InitOutcome::AlreadyPopulated => EXISTING_HEADER,
        };

        let mut lines = vec![header.to_string()];
        for section in &self.sections {
            lines.push(section.label.clone());
            lines.push(render_students(&section.students, format)?);
        }
        Ok(lines.join("\n"))
    }
}

pub fn render_students(students: &[Student], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tuples => Ok(render_tuples(students)),
        OutputFormat::Table => Ok(render_table(students)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(students)?),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn render_tuples(students: &[Student]) -> String {
    let tuples: Vec<String> = students
        .iter()
        .map(|s| {
            format!(
                "({}, {}, {}, {}, {})",
                s.id,
                quote(&s.name),
                quote(&s.surname),
                s.age,
                quote(&s.city)
            )
        })
        .collect();
    format!("[{}]", tuples.join(", "))
}

fn render_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "(no rows)".to_string();
    }

    let header = ["id", "name", "surname", "age", "city"].map(String::from);
    let rows: Vec<[String; 5]> = students
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.name.clone(),
                s.surname.clone(),
                s.age.to_string(),
                s.city.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&header)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    out.extend(rows.iter().map(line));
    out.join("\n")
}
