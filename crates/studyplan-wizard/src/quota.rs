use std::collections::BTreeMap;

use studyplan_core::{ContentItem, RequiredSubject};

/// A required subject whose selected content count is below its minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaShortfall {
    /// `category` or `category:subject`.
    pub label: String,
    pub selected: u32,
    pub required: u32,
}

/// Compare selected contents against required subject quotas.
///
/// Contents are counted under `category` or, when a specific subject is set,
/// `category:subject`. A requirement naming a subject counts only that exact
/// key; a category-only requirement counts every key of the category.
pub fn required_subject_shortfalls<'a>(
    contents: impl IntoIterator<Item = &'a ContentItem>,
    required: &[RequiredSubject],
) -> Vec<QuotaShortfall> {
    let counts = content_counts(contents);

    required
        .iter()
        .filter_map(|requirement| {
            let category = requirement.subject_category.trim();
            let subject = requirement
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty());

            let (label, selected) = match subject {
                Some(subject) => {
                    let key = format!("{category}:{subject}");
                    let selected = counts.get(&key).copied().unwrap_or(0);
                    (key, selected)
                }
                None => {
                    let prefix = format!("{category}:");
                    let selected = counts
                        .iter()
                        .filter(|(key, _)| key.as_str() == category || key.starts_with(&prefix))
                        .map(|(_, count)| *count)
                        .sum::<u32>();
                    (category.to_string(), selected)
                }
            };

            (selected < requirement.min_count).then(|| QuotaShortfall {
                label,
                selected,
                required: requirement.min_count,
            })
        })
        .collect()
}

fn content_counts<'a>(contents: impl IntoIterator<Item = &'a ContentItem>) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for content in contents {
        let Some(category) = content.category() else {
            continue;
        };
        let key = match content.specific_subject() {
            Some(subject) => format!("{category}:{subject}"),
            None => category.to_string(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
