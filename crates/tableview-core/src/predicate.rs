//! Per-kind match tests.
//!
//! Each predicate answers whether a record is admitted by one filter. An
//! empty selection does not evaluate to "admitted": it yields
//! [`Admission::Skipped`], meaning the filter takes no part in the
//! conjunction at all. The evaluator relies on that distinction to drop
//! inactive filters before scanning records.

use std::collections::BTreeSet;

use tableview_model::{
    FieldValue, FilterInput, FilterRule, MaterializedFilter, Record, Selection, YearMonth,
};

use crate::error::FilterWarning;

/// Outcome of testing one record against one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The filter places no constraint (empty selection or unusable config).
    Skipped,
    Admitted,
    Rejected,
}

impl Admission {
    fn from_bool(admitted: bool) -> Self {
        if admitted {
            Self::Admitted
        } else {
            Self::Rejected
        }
    }

    /// True unless the record was rejected.
    pub fn passes(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Whether the filter constrains records in its current state.
pub fn is_active(filter: &MaterializedFilter) -> bool {
    !filter.selection.is_empty() && config_warning(filter).is_none()
}

/// Configuration problem that keeps an otherwise active filter from applying.
pub fn config_warning(filter: &MaterializedFilter) -> Option<FilterWarning> {
    match (&filter.definition.input, &filter.selection) {
        (
            FilterInput::Slider {
                filter_rule: None, ..
            },
            Selection::Slider(Some(_)),
        ) => Some(FilterWarning::MissingSliderRule {
            label: filter.definition.label.clone(),
        }),
        _ => None,
    }
}

/// Test a record against a filter.
pub fn admits(filter: &MaterializedFilter, record: &Record) -> Admission {
    if filter.selection.is_empty() {
        return Admission::Skipped;
    }
    let value = filter.definition.field.resolve(record);
    match (&filter.definition.input, &filter.selection) {
        (FilterInput::FreeText, Selection::FreeText(Some(needle))) => {
            Admission::from_bool(contains_ignore_case(&value, needle))
        }
        (
            FilterInput::Multiselect { separator, .. },
            Selection::Multiselect(selected),
        ) => Admission::from_bool(intersects(&value, separator.as_deref(), selected)),
        (FilterInput::Dropdown { .. }, Selection::Dropdown(Some(selected)))
        | (FilterInput::DeviceType { .. }, Selection::DeviceType(Some(selected))) => {
            Admission::from_bool(!value.is_missing() && value.as_text() == *selected)
        }
        (
            FilterInput::Slider {
                filter_rule: Some(rule),
                ..
            },
            Selection::Slider(Some(selected)),
        ) => Admission::from_bool(
            value
                .as_number()
                .is_some_and(|n| rule.compare(&n, selected)),
        ),
        (FilterInput::Slider { .. }, _) => Admission::Skipped,
        (FilterInput::YearMonth { filter_rule }, Selection::YearMonth(Some(selected))) => {
            let rule = filter_rule.unwrap_or(FilterRule::Equal);
            Admission::from_bool(
                YearMonth::from_field(&value).is_some_and(|ym| rule.compare(&ym, selected)),
            )
        }
        _ => Admission::Skipped,
    }
}

fn contains_ignore_case(value: &FieldValue, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    value.as_text().to_lowercase().contains(&needle)
}

fn intersects(value: &FieldValue, separator: Option<&str>, selected: &[String]) -> bool {
    if value.is_missing() {
        return false;
    }
    let text = value.as_text();
    let tokens: BTreeSet<&str> = match separator {
        Some(sep) if !sep.is_empty() => text
            .split(sep)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect(),
        _ => BTreeSet::from([text.trim()]),
    };
    selected.iter().any(|s| tokens.contains(s.as_str()))
}
