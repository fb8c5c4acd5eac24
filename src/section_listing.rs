use roxmltree::{Document, Node};

use crate::endpoints::{EndpointKeys, EndpointKind};
use crate::error::{Result, ScrapeError};
use crate::one_or_many::{child_named, children_named};
use crate::text_manipulators::attr_or_empty;
use crate::timetable::Section;

const INSTRUCTOR_SEPARATOR: &str = "; ";

/// Parses a course's `<sections>` listing. Nothing is filtered here.
pub fn parse_sections(xml: &str, keys: &EndpointKeys<'_>) -> Result<Vec<Section>> {
    let kind = EndpointKind::SectionListing;
    let document =
        Document::parse(xml).map_err(|e| ScrapeError::parse(kind, keys.to_string(), e))?;
    let root = document.root_element();
    if !root.has_tag_name("sections") {
        return Err(ScrapeError::parse(
            kind,
            keys.to_string(),
            format!("expected <sections>, found <{}>", root.tag_name().name()),
        ));
    }

    Ok(children_named(root, "section")
        .into_vec()
        .into_iter()
        .map(section_from_node)
        .collect())
}

fn section_from_node(node: Node) -> Section {
    Section {
        code: attr_or_empty(node, "key"),
        activity: attr_or_empty(node, "activity"),
        credits: attr_or_empty(node, "credits"),
        instructor: instructor_names(node),
        term_suffix: teaching_unit_term(node),
    }
}

fn instructor_names(section: Node) -> String {
    let Some(instructors) = child_named(section, "instructors") else {
        return String::new();
    };
    children_named(instructors, "instructor")
        .into_vec()
        .into_iter()
        .filter_map(|node| node.attribute("name"))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(INSTRUCTOR_SEPARATOR)
}

fn teaching_unit_term(section: Node) -> String {
    child_named(section, "teachingunits")
        .and_then(|units| child_named(units, "teachingunit"))
        .map(|unit| attr_or_empty(unit, "termcd"))
        .unwrap_or_default()
}

/// Drops every section whose activity is in `excluded`.
pub fn filter_sections(sections: Vec<Section>, excluded: &[String]) -> Vec<Section> {
    sections
        .into_iter()
        .filter(|section| !excluded.iter().any(|a| *a == section.activity))
        .collect()
}
