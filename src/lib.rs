mod config;
mod course_listing;
mod csv_sink;
mod departments;
mod endpoints;
mod enrolment_scraper;
mod error;
mod one_or_many;
mod requests;
mod rows;
mod scraping_context;
mod section_listing;
mod text_manipulators;
mod timetable;
mod timetable_scraper;

pub use config::{LoadFromEnv, ScrapingConfig, ScrapingEnv};
pub use course_listing::parse_courses;
pub use csv_sink::{CsvSink, escape_field};
pub use departments::{ALL_DEPARTMENTS, KNOWN_DEPARTMENTS, expand_departments};
pub use endpoints::{EndpointKeys, EndpointKind, Endpoints};
pub use enrolment_scraper::parse_enrolment;
pub use error::{Result, ScrapeError, SinkError};
pub use one_or_many::OneOrMany;
pub use requests::{Fetch, RequestClient, RequestOptions};
pub use rows::{OutputRow, Schema, project};
pub use scraping_context::ScrapingContext;
pub use section_listing::{filter_sections, parse_sections};
pub use timetable::{Course, DepartmentCode, EnrolmentSnapshot, Section, Term, Year};
pub use timetable_scraper::{FanOutLimits, ScrapeOptions, ScrapeSummary, TimetableScraper};
