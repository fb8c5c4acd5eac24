use scraper::{ElementRef, Html, Selector};

use crate::endpoints::{EndpointKeys, EndpointKind};
use crate::error::{Result, ScrapeError};
use crate::text_manipulators::extract_trimmed_text;
use crate::timetable::EnrolmentSnapshot;

pub const TOTAL_SEATS_REMAINING: &str = "Total Seats Remaining:";
pub const CURRENTLY_REGISTERED: &str = "Currently Registered:";
pub const GENERAL_SEATS_REMAINING: &str = "General Seats Remaining:";
pub const RESTRICTED_SEATS_REMAINING: &str = "Restricted Seats Remaining*:";

/// Scrapes the seat summary table of a section page.
///
/// Labels are matched on the exact trimmed cell text; a label that is not on
/// the page leaves its field empty.
pub fn parse_enrolment(html: &str, keys: &EndpointKeys<'_>) -> Result<EnrolmentSnapshot> {
    let kind = EndpointKind::EnrolmentPage;
    let cell_selector =
        Selector::parse("td").map_err(|e| ScrapeError::parse(kind, keys.to_string(), e))?;
    let document = Html::parse_document(html);
    let cells: Vec<ElementRef> = document.select(&cell_selector).collect();
    if cells.is_empty() {
        return Err(ScrapeError::parse(
            kind,
            keys.to_string(),
            "page has no table cells",
        ));
    }

    let value_for = |label: &str| -> String {
        cells
            .iter()
            .find(|cell| extract_trimmed_text(**cell) == label)
            .and_then(|cell| cell.next_siblings().find_map(ElementRef::wrap))
            .map(extract_trimmed_text)
            .unwrap_or_default()
    };

    Ok(EnrolmentSnapshot {
        total_seats_remaining: value_for(TOTAL_SEATS_REMAINING),
        currently_registered: value_for(CURRENTLY_REGISTERED),
        general_seats_remaining: value_for(GENERAL_SEATS_REMAINING),
        restricted_seats_remaining: value_for(RESTRICTED_SEATS_REMAINING),
    })
}
