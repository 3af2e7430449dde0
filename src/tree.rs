//! Inheritance tree over one or more corpora.

use crate::model::{ClassRecord, InheritanceTree};
use std::collections::HashSet;

/// Attach every class under its parent, or list it as a root when the parent
/// is absent or not part of `classes`.
///
/// Each record lands in exactly one place, so a name shows up once overall
/// unless the input itself repeats it.
pub fn build(classes: &[ClassRecord]) -> InheritanceTree {
    let known: HashSet<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    let mut tree = InheritanceTree::default();

    for class in classes {
        match class.extends.as_deref() {
            Some(parent) if known.contains(parent) => tree
                .children
                .entry(parent.to_string())
                .or_default()
                .push(class.name.clone()),
            _ => tree.roots.push(class.name.clone()),
        }
    }
    tree
}
