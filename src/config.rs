use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};

use crate::departments::{KNOWN_DEPARTMENTS, expand_departments};
use crate::endpoints::{DEFAULT_ENROLMENT_URL, DEFAULT_SCHEDULE_URL, Endpoints};
use crate::requests::RequestOptions;
use crate::timetable::{DepartmentCode, Term, Year};
use crate::timetable_scraper::{FanOutLimits, ScrapeOptions};

/// The env vars describing one run. Lists are comma-separated.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_depts")]
    pub depts: Vec<String>,
    pub year: Option<Year>,
    #[serde(default = "default_term")]
    pub term: Term,
    #[serde(default)]
    pub enrolments: bool,
    #[serde(default = "default_filter_setting")]
    pub filter_setting: Vec<String>,
    pub output_path: Option<PathBuf>,
    pub schedule_url: Option<String>,
    pub enrolment_url: Option<String>,
    pub dept_concurrency: Option<usize>,
    pub course_concurrency: Option<usize>,
    pub section_concurrency: Option<usize>,
    pub max_in_flight: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

fn default_depts() -> Vec<String> {
    vec![crate::departments::ALL_DEPARTMENTS.to_string()]
}

fn default_term() -> Term {
    Term::Winter
}

fn default_filter_setting() -> Vec<String> {
    vec!["Waiting List".to_string()]
}

pub struct ScrapingConfig {
    pub options: ScrapeOptions,
    pub endpoints: Endpoints,
    pub request_options: RequestOptions,
    pub output_path: PathBuf,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_env(scraping_env, current_year()?)
    }

    pub fn from_env(env: ScrapingEnv, current_year: Year) -> anyhow::Result<Self> {
        let year = env.year.unwrap_or(current_year);
        let depts = expand_departments(&env.depts, KNOWN_DEPARTMENTS);
        DepartmentCodeValidator::new()?.validate_all(&depts)?;
        if depts.is_empty() {
            anyhow::bail!("no departments to scrape");
        }

        let output_path = env
            .output_path
            .unwrap_or_else(|| PathBuf::from(format!("output/{year}{}.csv", env.term)));
        let filter_setting = env
            .filter_setting
            .into_iter()
            .map(|activity| activity.trim().to_string())
            .filter(|activity| !activity.is_empty())
            .collect();

        Ok(Self {
            options: ScrapeOptions {
                depts,
                year,
                term: env.term,
                enrolments: env.enrolments,
                filter_setting,
                limits: FanOutLimits {
                    departments: env.dept_concurrency,
                    courses: env.course_concurrency,
                    sections: env.section_concurrency,
                },
            },
            endpoints: Endpoints::new(
                env.schedule_url
                    .unwrap_or_else(|| DEFAULT_SCHEDULE_URL.to_string()),
                env.enrolment_url
                    .unwrap_or_else(|| DEFAULT_ENROLMENT_URL.to_string()),
            ),
            request_options: RequestOptions {
                user_agent: env.user_agent,
                timeout: env.request_timeout_secs.map(Duration::from_secs),
                max_in_flight: env.max_in_flight,
            },
            output_path,
        })
    }
}

pub fn current_year() -> anyhow::Result<Year> {
    let year = Utc::now().year();
    Year::try_from(year).with_context(|| format!("current year {year} out of range"))
}

pub struct DepartmentCodeValidator {
    // Subject codes are short runs of capitals and digits ("CPSC", "FNH", "BA").
    code_regex: Regex,
}

impl DepartmentCodeValidator {
    pub fn new() -> anyhow::Result<Self> {
        let code_regex = Regex::new(r"^[A-Z0-9_]{2,5}$")?;
        Ok(Self { code_regex })
    }

    pub fn validate_all(&self, depts: &[DepartmentCode]) -> anyhow::Result<()> {
        let invalid: Vec<_> = depts
            .iter()
            .filter(|code| !self.code_regex.is_match(code))
            .collect();
        if !invalid.is_empty() {
            return Err(anyhow::anyhow!("invalid department code(s): {:?}", invalid));
        }
        Ok(())
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
