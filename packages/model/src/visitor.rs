use crate::element::Element;
use std::collections::HashSet;
use std::sync::Arc;

/// Visitor pattern for traversing the element tree immutably
///
/// The default implementation walks the entire tree depth-first, in child
/// order. Override `visit_element` to act on nodes and call [`walk_element`]
/// to keep descending.
pub trait Visitor: Sized {
    fn visit_element(&mut self, element: &Arc<Element>, depth: usize) {
        walk_element(self, element, depth);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Arc<Element>, depth: usize) {
    if let Some(children) = element.children() {
        for child in children {
            visitor.visit_element(child, depth + 1);
        }
    }
}

/// Collects every id in the tree and remembers the first repeated one
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: HashSet<String>,
    pub duplicate: Option<String>,
}

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Arc<Element>, depth: usize) {
        if !self.ids.insert(element.id.clone()) && self.duplicate.is_none() {
            self.duplicate = Some(element.id.clone());
        }
        walk_element(self, element, depth);
    }
}

/// Collect all ids under `root` (inclusive)
pub fn collect_ids(root: &Arc<Element>) -> IdCollector {
    let mut collector = IdCollector::default();
    collector.visit_element(root, 0);
    collector
}

/// Number of elements under `root` (inclusive)
pub fn count_elements(root: &Arc<Element>) -> usize {
    struct Counter(usize);

    impl Visitor for Counter {
        fn visit_element(&mut self, element: &Arc<Element>, depth: usize) {
            self.0 += 1;
            walk_element(self, element, depth);
        }
    }

    let mut counter = Counter(0);
    counter.visit_element(root, 0);
    counter.0
}

/// Indented one-line-per-element listing, as shown in a layers panel
pub fn outline(root: &Arc<Element>) -> String {
    struct Outline(String);

    impl Visitor for Outline {
        fn visit_element(&mut self, element: &Arc<Element>, depth: usize) {
            let indent = "  ".repeat(depth);
            self.0
                .push_str(&format!("{}{} [{}] #{}\n", indent, element.name, element.kind, element.id));
            walk_element(self, element, depth);
        }
    }

    let mut outline = Outline(String::new());
    outline.visit_element(root, 0);
    outline.0
}
