use crate::timetable::{Course, EnrolmentSnapshot, Section, Term, Year};

const CATALOG_HEADER: [&str; 8] = [
    "year",
    "term",
    "dept",
    "course",
    "section",
    "instructor",
    "credits",
    "activity",
];

const ENROLMENT_HEADER: [&str; 12] = [
    "year",
    "term",
    "dept",
    "course",
    "section",
    "instructor",
    "credits",
    "activity",
    "totalSeatsRemaining",
    "currentlyRegistered",
    "generalSeatsRemaining",
    "restrictedSeatsRemaining",
];

/// The two row shapes a run can produce. One run never mixes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Sections only; the term column carries the teaching-unit suffix.
    Catalog,
    /// Sections plus the four seat counts.
    Enrolment,
}

impl Schema {
    pub fn for_run(enrolments: bool) -> Self {
        if enrolments {
            Schema::Enrolment
        } else {
            Schema::Catalog
        }
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Schema::Catalog => &CATALOG_HEADER,
            Schema::Enrolment => &ENROLMENT_HEADER,
        }
    }

    pub fn width(self) -> usize {
        self.header().len()
    }
}

pub type OutputRow = Vec<String>;

pub fn project(
    year: Year,
    term: Term,
    dept: &str,
    course: &Course,
    section: &Section,
    enrolment: Option<&EnrolmentSnapshot>,
) -> OutputRow {
    let term_column = match enrolment {
        Some(_) => term.to_string(),
        None => format!("{term}{}", section.term_suffix),
    };
    let mut row = vec![
        year.to_string(),
        term_column,
        dept.to_string(),
        course.code.clone(),
        section.code.clone(),
        section.instructor.clone(),
        section.credits.clone(),
        section.activity.clone(),
    ];
    if let Some(snapshot) = enrolment {
        row.extend([
            snapshot.total_seats_remaining.clone(),
            snapshot.currently_registered.clone(),
            snapshot.general_seats_remaining.clone(),
            snapshot.restricted_seats_remaining.clone(),
        ]);
    }
    row
}
