//! The catalog XML is loosely shaped: a repeating element may appear zero
//! times, once, or many times, and downstream code should never care which.

use roxmltree::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.first(),
        }
    }
}

impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<T> = iter.into_iter().collect();
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return OneOrMany::One(item);
            }
        }
        OneOrMany::Many(items)
    }
}

/// Child elements of `parent` named `tag`, in document order.
pub fn children_named<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: &str,
) -> OneOrMany<Node<'a, 'input>> {
    parent
        .children()
        .filter(|child| child.is_element() && child.has_tag_name(tag))
        .collect()
}

/// First child element of `parent` named `tag`.
pub fn child_named<'a, 'input>(parent: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    children_named(parent, tag).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_and_many_flatten_to_vectors() {
        let one: OneOrMany<u8> = [7].into_iter().collect();
        let many: OneOrMany<u8> = [7, 8].into_iter().collect();
        let none: OneOrMany<u8> = std::iter::empty().collect();

        assert_eq!(one, OneOrMany::One(7));
        assert_eq!(one.into_vec(), vec![7]);
        assert_eq!(many.into_vec(), vec![7, 8]);
        assert!(none.first().is_none());
        assert!(none.into_vec().is_empty());
    }

    #[test]
    fn picks_only_matching_elements() {
        let doc = roxmltree::Document::parse("<a><b n='1'/>text<c/><b n='2'/></a>").unwrap();
        let names: Vec<_> = children_named(doc.root_element(), "b")
            .into_vec()
            .iter()
            .filter_map(|node| node.attribute("n"))
            .collect();
        assert_eq!(names, vec!["1", "2"]);
        assert!(child_named(doc.root_element(), "d").is_none());
    }
}
