use roxmltree::Node;
use scraper::ElementRef;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// `trim` also strips the `&nbsp;` padding the timetable puts in its cells.
pub fn extract_trimmed_text(node: ElementRef) -> String {
    extract_text(node).trim().to_string()
}

pub fn attr_or_empty(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
