use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub type Year = u16;
pub type DepartmentCode = String;

/// Session code used by the timetable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Term {
    Summer,
    Winter,
}

impl Term {
    pub fn code(self) -> &'static str {
        match self {
            Term::Summer => "S",
            Term::Winter => "W",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Term::Summer),
            "W" => Ok(Term::Winter),
            other => Err(format!("unknown term '{other}', expected S or W")),
        }
    }
}

impl TryFrom<String> for Term {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub code: String,
    pub activity: String,
    /// Raw credit value; the service sends integers, decimals and ranges alike.
    pub credits: String,
    pub instructor: String,
    /// Teaching-unit term code ("1", "2", "1-2"), appended to the session letter.
    pub term_suffix: String,
}

/// Seat counts scraped from a section's status page, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrolmentSnapshot {
    pub total_seats_remaining: String,
    pub currently_registered: String,
    pub general_seats_remaining: String,
    pub restricted_seats_remaining: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_parses_case_insensitively() {
        assert_eq!("w".parse::<Term>().unwrap(), Term::Winter);
        assert_eq!(" S ".parse::<Term>().unwrap(), Term::Summer);
        assert!("F".parse::<Term>().is_err());
        assert_eq!(Term::Winter.to_string(), "W");
    }
}
