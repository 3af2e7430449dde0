//! Summary counts over one or more corpora.

use crate::model::{ClassRecord, Summary, UNKNOWN_MODULE};

pub fn build(classes: &[ClassRecord]) -> Summary {
    let mut summary = Summary {
        total_classes: classes.len(),
        ..Default::default()
    };

    for class in classes {
        let module = if class.module.is_empty() {
            UNKNOWN_MODULE
        } else {
            class.module.as_str()
        };
        *summary.modules.entry(module.to_string()).or_default() += 1;
        summary
            .method_counts
            .insert(class.name.clone(), class.methods.len());
        summary.class_names.push(class.name.clone());
    }

    summary.class_names.sort();
    summary
}
