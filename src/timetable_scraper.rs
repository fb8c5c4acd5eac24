//! Walks department → course → section for one session and streams a row per
//! surviving section into a [`CsvSink`].
//!
//! A failed listing or enrolment page only costs its own branch: it is
//! logged, counted and treated as having no children. Only a sink failure
//! stops the run.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, TryStreamExt};
use log::{debug, error, info, warn};
use tokio::io::AsyncWrite;

use crate::course_listing::parse_courses;
use crate::csv_sink::CsvSink;
use crate::departments::{KNOWN_DEPARTMENTS, expand_departments};
use crate::endpoints::{EndpointKeys, Endpoints};
use crate::enrolment_scraper::parse_enrolment;
use crate::error::Result;
use crate::requests::Fetch;
use crate::rows::{Schema, project};
use crate::section_listing::{filter_sections, parse_sections};
use crate::timetable::{Course, DepartmentCode, EnrolmentSnapshot, Section, Term, Year};

/// How many siblings may be in flight at each level. `None` means no cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutLimits {
    pub departments: Option<usize>,
    pub courses: Option<usize>,
    pub sections: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub depts: Vec<DepartmentCode>,
    pub year: Year,
    pub term: Term,
    pub enrolments: bool,
    /// Activities to leave out of the output, e.g. "Waiting List".
    pub filter_setting: Vec<String>,
    pub limits: FanOutLimits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub departments: usize,
    pub departments_failed: usize,
    pub courses: usize,
    pub courses_failed: usize,
    pub sections: usize,
    pub sections_filtered: usize,
    pub enrolments_failed: usize,
    pub rows_written: usize,
}

#[derive(Default)]
struct Counters {
    departments_failed: AtomicUsize,
    courses: AtomicUsize,
    courses_failed: AtomicUsize,
    sections: AtomicUsize,
    sections_filtered: AtomicUsize,
    enrolments_failed: AtomicUsize,
    rows_written: AtomicUsize,
}

impl Counters {
    fn add(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    fn summary(&self, departments: usize) -> ScrapeSummary {
        ScrapeSummary {
            departments,
            departments_failed: self.departments_failed.load(Ordering::Relaxed),
            courses: self.courses.load(Ordering::Relaxed),
            courses_failed: self.courses_failed.load(Ordering::Relaxed),
            sections: self.sections.load(Ordering::Relaxed),
            sections_filtered: self.sections_filtered.load(Ordering::Relaxed),
            enrolments_failed: self.enrolments_failed.load(Ordering::Relaxed),
            rows_written: self.rows_written.load(Ordering::Relaxed),
        }
    }
}

pub struct TimetableScraper<F> {
    options: ScrapeOptions,
    endpoints: Endpoints,
    fetcher: F,
}

impl<F: Fetch> TimetableScraper<F> {
    /// `options.depts` may hold the `all` sentinel; it is expanded here.
    pub fn new(mut options: ScrapeOptions, endpoints: Endpoints, fetcher: F) -> Self {
        options.depts = expand_departments(&options.depts, KNOWN_DEPARTMENTS);
        Self {
            options,
            endpoints,
            fetcher,
        }
    }

    pub fn departments(&self) -> &[DepartmentCode] {
        &self.options.depts
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn schema(&self) -> Schema {
        Schema::for_run(self.options.enrolments)
    }

    /// Runs the whole scrape: header, every branch, then `finish`.
    ///
    /// On error the sink may hold a partial output and is left unfinished.
    pub async fn run<W>(&self, sink: &CsvSink<W>) -> Result<ScrapeSummary>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let options = &self.options;
        info!(
            "Scraping {} department(s) for {}{} (enrolments: {})",
            options.depts.len(),
            options.year,
            options.term,
            options.enrolments
        );

        let counters = Counters::default();
        let outcome = self.traverse(sink, &counters).await;
        if let Err(e) = &outcome {
            error!(
                "Failed for the depts={:?}, year={}, term={}: {e}",
                options.depts, options.year, options.term
            );
        }
        outcome.map(|()| counters.summary(options.depts.len()))
    }

    async fn traverse<W>(&self, sink: &CsvSink<W>, counters: &Counters) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        sink.write_header(self.schema().header()).await?;
        stream::iter(self.options.depts.iter().map(Ok))
            .try_for_each_concurrent(self.options.limits.departments, |dept| {
                self.scrape_department(dept, sink, counters)
            })
            .await?;
        sink.finish().await?;
        Ok(())
    }

    async fn scrape_department<W>(
        &self,
        dept: &str,
        sink: &CsvSink<W>,
        counters: &Counters,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let keys = EndpointKeys::department(self.options.year, self.options.term, dept);
        let courses = match self.fetch_courses(&keys).await {
            Ok(courses) => courses,
            Err(e) if e.is_branch_local() => {
                warn!("Failed to get courses for {keys}: {e}");
                Counters::add(&counters.departments_failed, 1);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!("{} course(s) listed for {keys}", courses.len());
        Counters::add(&counters.courses, courses.len());

        stream::iter(courses.iter().map(Ok))
            .try_for_each_concurrent(self.options.limits.courses, |course| {
                self.scrape_course(keys, course, sink, counters)
            })
            .await
    }

    async fn scrape_course<W>(
        &self,
        dept_keys: EndpointKeys<'_>,
        course: &Course,
        sink: &CsvSink<W>,
        counters: &Counters,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let keys = dept_keys.course(&course.code);
        let listed = match self.fetch_sections(&keys).await {
            Ok(sections) => sections,
            Err(e) if e.is_branch_local() => {
                warn!("Failed to get sections for {keys}: {e}");
                Counters::add(&counters.courses_failed, 1);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let listed_count = listed.len();
        let sections = filter_sections(listed, &self.options.filter_setting);
        debug!(
            "{} section(s) listed for {keys}, {} kept",
            listed_count,
            sections.len()
        );
        Counters::add(&counters.sections, listed_count);
        Counters::add(&counters.sections_filtered, listed_count - sections.len());

        stream::iter(sections.iter().map(Ok))
            .try_for_each_concurrent(self.options.limits.sections, |section| {
                self.scrape_section(keys, course, section, sink, counters)
            })
            .await
    }

    async fn scrape_section<W>(
        &self,
        course_keys: EndpointKeys<'_>,
        course: &Course,
        section: &Section,
        sink: &CsvSink<W>,
        counters: &Counters,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let keys = course_keys.section(&section.code);
        let enrolment = if self.options.enrolments {
            match self.fetch_enrolment(&keys).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) if e.is_branch_local() => {
                    warn!("Failed to scrape enrolment for {keys}: {e}");
                    Counters::add(&counters.enrolments_failed, 1);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let row = project(
            keys.year,
            keys.term,
            keys.dept,
            course,
            section,
            enrolment.as_ref(),
        );
        sink.write_row(&row).await?;
        Counters::add(&counters.rows_written, 1);
        Ok(())
    }

    async fn fetch_courses(&self, keys: &EndpointKeys<'_>) -> Result<Vec<Course>> {
        let url = self
            .endpoints
            .course_listing(keys.year, keys.term, keys.dept);
        let body = self.fetcher.fetch_text(&url).await?;
        parse_courses(&body, keys)
    }

    async fn fetch_sections(&self, keys: &EndpointKeys<'_>) -> Result<Vec<Section>> {
        let url = self.endpoints.section_listing(
            keys.year,
            keys.term,
            keys.dept,
            keys.course.unwrap_or_default(),
        );
        let body = self.fetcher.fetch_text(&url).await?;
        parse_sections(&body, keys)
    }

    async fn fetch_enrolment(
        &self,
        keys: &EndpointKeys<'_>,
    ) -> Result<EnrolmentSnapshot> {
        let url = self.endpoints.enrolment_page(
            keys.year,
            keys.term,
            keys.dept,
            keys.course.unwrap_or_default(),
            keys.section.unwrap_or_default(),
        );
        let body = self.fetcher.fetch_text(&url).await?;
        parse_enrolment(&body, keys)
    }
}
