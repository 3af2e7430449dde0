//! Closing report printed after all output files are written.

use crate::model::{InheritanceTree, Summary};

pub fn report(summary: &Summary, tree: &InheritanceTree) -> String {
    let mut out = String::from("\n=== Summary ===\n");
    out.push_str(&format!("Total classes parsed: {}\n", summary.total_classes));
    out.push_str(&format!("Modules found: {}\n", summary.modules.len()));
    out.push_str(&format!("Root classes (no parent): {}\n", tree.roots.len()));
    out
}
