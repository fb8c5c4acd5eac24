use roxmltree::Document;

use crate::endpoints::{EndpointKeys, EndpointKind};
use crate::error::{Result, ScrapeError};
use crate::one_or_many::children_named;
use crate::text_manipulators::attr_or_empty;
use crate::timetable::Course;

/// Parses a department's `<courses>` listing into courses, in document order.
pub fn parse_courses(xml: &str, keys: &EndpointKeys<'_>) -> Result<Vec<Course>> {
    let kind = EndpointKind::CourseListing;
    let document =
        Document::parse(xml).map_err(|e| ScrapeError::parse(kind, keys.to_string(), e))?;
    let root = document.root_element();
    if !root.has_tag_name("courses") {
        return Err(ScrapeError::parse(
            kind,
            keys.to_string(),
            format!("expected <courses>, found <{}>", root.tag_name().name()),
        ));
    }

    let courses = children_named(root, "course")
        .into_vec()
        .into_iter()
        .map(|node| Course {
            code: attr_or_empty(node, "key"),
            description: attr_or_empty(node, "title"),
        })
        .collect();
    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::Term;

    fn keys() -> EndpointKeys<'static> {
        EndpointKeys::department(2024, Term::Winter, "CPSC")
    }

    #[test]
    fn keeps_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <courses>
                <course key="101" title="Intro"/>
                <course key="102" title="Advanced"/>
            </courses>"#;
        let courses = parse_courses(xml, &keys()).unwrap();
        assert_eq!(
            courses,
            vec![
                Course {
                    code: "101".into(),
                    description: "Intro".into()
                },
                Course {
                    code: "102".into(),
                    description: "Advanced".into()
                },
            ]
        );
    }

    #[test]
    fn single_course_is_still_a_sequence() {
        let one = parse_courses(r#"<courses><course key="101" title="Intro"/></courses>"#, &keys())
            .unwrap();
        let many = parse_courses(
            r#"<courses><course key="101" title="Intro"/><course key="101" title="Intro"/></courses>"#,
            &keys(),
        )
        .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0], many[0]);
        assert_eq!(many[0], many[1]);
    }

    #[test]
    fn empty_listing_is_not_an_error() {
        assert!(parse_courses("<courses/>", &keys()).unwrap().is_empty());
    }

    #[test]
    fn missing_container_is_a_parse_error() {
        let err = parse_courses("<error>no such dept</error>", &keys()).unwrap_err();
        match err {
            ScrapeError::Parse { kind, keys, .. } => {
                assert_eq!(kind, EndpointKind::CourseListing);
                assert!(keys.contains("dept=CPSC"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_courses("<html><body>down", &keys()).is_err());
    }
}
