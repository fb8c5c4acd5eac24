use std::fmt;

use url::form_urlencoded;

use crate::timetable::{Term, Year};

pub const DEFAULT_SCHEDULE_URL: &str =
    "https://courses.students.ubc.ca/cs/servlets/SRVCourseSchedule";
pub const DEFAULT_ENROLMENT_URL: &str = "https://courses.students.ubc.ca/cs/courseschedule";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    CourseListing,
    SectionListing,
    EnrolmentPage,
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EndpointKind::CourseListing => "course listing",
            EndpointKind::SectionListing => "section listing",
            EndpointKind::EnrolmentPage => "enrolment page",
        })
    }
}

/// Identifies one node of the department → course → section tree.
#[derive(Debug, Clone, Copy)]
pub struct EndpointKeys<'a> {
    pub year: Year,
    pub term: Term,
    pub dept: &'a str,
    pub course: Option<&'a str>,
    pub section: Option<&'a str>,
}

impl<'a> EndpointKeys<'a> {
    pub fn department(year: Year, term: Term, dept: &'a str) -> Self {
        Self {
            year,
            term,
            dept,
            course: None,
            section: None,
        }
    }

    pub fn course(self, course: &'a str) -> Self {
        Self {
            course: Some(course),
            ..self
        }
    }

    pub fn section(self, section: &'a str) -> Self {
        Self {
            section: Some(section),
            ..self
        }
    }
}

impl fmt::Display for EndpointKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dept={}", self.dept)?;
        if let Some(course) = self.course {
            write!(f, ", course={course}")?;
        }
        if let Some(section) = self.section {
            write!(f, ", section={section}")?;
        }
        write!(f, ", year={}, term={}", self.year, self.term)
    }
}

/// Builds request URLs for the timetable service. Never fails: odd inputs
/// give odd but deterministic URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    schedule_url: String,
    enrolment_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULE_URL, DEFAULT_ENROLMENT_URL)
    }
}

impl Endpoints {
    pub fn new(schedule_url: impl Into<String>, enrolment_url: impl Into<String>) -> Self {
        Self {
            schedule_url: schedule_url.into(),
            enrolment_url: enrolment_url.into(),
        }
    }

    pub fn course_listing(&self, year: Year, term: Term, dept: &str) -> String {
        self.url_for(
            EndpointKind::CourseListing,
            &EndpointKeys::department(year, term, dept),
        )
    }

    pub fn section_listing(&self, year: Year, term: Term, dept: &str, course: &str) -> String {
        self.url_for(
            EndpointKind::SectionListing,
            &EndpointKeys::department(year, term, dept).course(course),
        )
    }

    pub fn enrolment_page(
        &self,
        year: Year,
        term: Term,
        dept: &str,
        course: &str,
        section: &str,
    ) -> String {
        self.url_for(
            EndpointKind::EnrolmentPage,
            &EndpointKeys::department(year, term, dept)
                .course(course)
                .section(section),
        )
    }

    pub fn url_for(&self, kind: EndpointKind, keys: &EndpointKeys<'_>) -> String {
        let year = keys.year.to_string();
        let course = keys.course.unwrap_or_default();
        let section = keys.section.unwrap_or_default();

        let mut query = form_urlencoded::Serializer::new(String::new());
        let base = match kind {
            EndpointKind::CourseListing => {
                query
                    .append_pair("sessyr", &year)
                    .append_pair("sesscd", keys.term.code())
                    .append_pair("req", "2")
                    .append_pair("dept", keys.dept)
                    .append_pair("output", "3");
                &self.schedule_url
            }
            EndpointKind::SectionListing => {
                query
                    .append_pair("sessyr", &year)
                    .append_pair("sesscd", keys.term.code())
                    .append_pair("req", "4")
                    .append_pair("dept", keys.dept)
                    .append_pair("course", course)
                    .append_pair("output", "3");
                &self.schedule_url
            }
            EndpointKind::EnrolmentPage => {
                query
                    .append_pair("pname", "subjarea")
                    .append_pair("tname", "subj-section")
                    .append_pair("sessyr", &year)
                    .append_pair("sesscd", keys.term.code())
                    .append_pair("dept", keys.dept)
                    .append_pair("course", course)
                    .append_pair("section", section);
                &self.enrolment_url
            }
        };

        join_query(base, &query.finish())
    }
}

fn join_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
