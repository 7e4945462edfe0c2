#![deny(unsafe_code)]

use std::fmt;

use crate::definition::{FilterDefinition, FilterInput, FilterKind};
use crate::year_month::YearMonth;

/// The live value of a filter, typed by input kind.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Selection {
    DeviceType(Option<String>),
    FreeText(Option<String>),
    Multiselect(Vec<String>),
    Dropdown(Option<String>),
    Slider(Option<f64>),
    YearMonth(Option<YearMonth>),
}

impl Selection {
    /// Initial selection for a freshly materialized filter.
    ///
    /// Multiselect filters start from their default options; everything
    /// else starts unset.
    pub fn seed(input: &FilterInput) -> Self {
        match input {
            FilterInput::Multiselect {
                default_options, ..
            } => Self::Multiselect(default_options.clone()),
            other => Self::empty(other.kind()),
        }
    }

    /// The unset selection for a kind.
    pub fn empty(kind: FilterKind) -> Self {
        match kind {
            FilterKind::DeviceType => Self::DeviceType(None),
            FilterKind::FreeText => Self::FreeText(None),
            FilterKind::Multiselect => Self::Multiselect(Vec::new()),
            FilterKind::Dropdown => Self::Dropdown(None),
            FilterKind::Slider => Self::Slider(None),
            FilterKind::YearMonth => Self::YearMonth(None),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::DeviceType(_) => FilterKind::DeviceType,
            Self::FreeText(_) => FilterKind::FreeText,
            Self::Multiselect(_) => FilterKind::Multiselect,
            Self::Dropdown(_) => FilterKind::Dropdown,
            Self::Slider(_) => FilterKind::Slider,
            Self::YearMonth(_) => FilterKind::YearMonth,
        }
    }

    /// True when the selection places no constraint on records.
    ///
    /// Blank text counts as empty, so clearing a search box restores the
    /// full collection.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::DeviceType(v) | Self::FreeText(v) | Self::Dropdown(v) => {
                v.as_deref().is_none_or(|s| s.trim().is_empty())
            }
            Self::Multiselect(values) => values.is_empty(),
            Self::Slider(v) => v.is_none(),
            Self::YearMonth(v) => v.is_none(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceType(Some(v)) | Self::FreeText(Some(v)) | Self::Dropdown(Some(v)) => {
                f.write_str(v)
            }
            Self::Multiselect(values) if !values.is_empty() => f.write_str(&values.join(", ")),
            Self::Slider(Some(v)) => write!(f, "{v}"),
            Self::YearMonth(Some(v)) => write!(f, "{v}"),
            _ => f.write_str("-"),
        }
    }
}

/// Identity of a materialized filter.
///
/// Every re-seed uses a new generation, so an id handed out before a
/// reconciliation never matches a filter materialized after it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FilterId {
    pub generation: u64,
    pub position: usize,
}

impl FilterId {
    pub fn new(generation: u64, position: usize) -> Self {
        Self {
            generation,
            position,
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.generation, self.position)
    }
}

/// A definition plus its live selection.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MaterializedFilter {
    pub id: FilterId,
    pub definition: FilterDefinition,
    pub selection: Selection,
}

impl MaterializedFilter {
    /// Materialize a definition with its seed selection.
    pub fn seeded(id: FilterId, definition: FilterDefinition) -> Self {
        let selection = Selection::seed(&definition.input);
        Self {
            id,
            definition,
            selection,
        }
    }

    /// The definition this filter was built from, without the selection.
    pub fn definition(&self) -> &FilterDefinition {
        &self.definition
    }

    pub fn label(&self) -> &str {
        &self.definition.label
    }

    pub fn is_search(&self) -> bool {
        self.definition.search
    }

    pub fn kind(&self) -> FilterKind {
        self.definition.kind()
    }

    /// Copy of this filter with a different selection. The receiver is untouched.
    #[must_use]
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            id: self.id,
            definition: self.definition.clone(),
            selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{FieldAccessor, FilterOption};

    #[test]
    fn multiselect_seeds_default_options() {
        let input = FilterInput::Multiselect {
            available_options: vec![FilterOption::new("A", "A"), FilterOption::new("B", "B")],
            default_options: vec!["A".to_string(), "B".to_string()],
            separator: None,
        };
        assert_eq!(
            Selection::seed(&input),
            Selection::Multiselect(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn other_kinds_seed_unset() {
        let slider = FilterInput::Slider {
            min: 0.0,
            max: 10.0,
            filter_rule: None,
        };
        assert_eq!(Selection::seed(&slider), Selection::Slider(None));
        assert_eq!(
            Selection::seed(&FilterInput::FreeText),
            Selection::FreeText(None)
        );
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(Selection::FreeText(Some("   ".to_string())).is_empty());
        assert!(!Selection::FreeText(Some("Bio".to_string())).is_empty());
        assert!(Selection::Multiselect(vec![]).is_empty());
        assert!(!Selection::Slider(Some(0.0)).is_empty());
    }

    #[test]
    fn with_selection_keeps_identity() {
        let def = FilterDefinition::search(FieldAccessor::field("name"), "Search");
        let filter = MaterializedFilter::seeded(FilterId::new(1, 0), def);
        let updated = filter.with_selection(Selection::FreeText(Some("x".to_string())));
        assert_eq!(updated.id, filter.id);
        assert_eq!(filter.selection, Selection::FreeText(None));
    }
}
