//! Turning command-line filter values into typed selections.

use anyhow::{Context, Result, anyhow};
use tableview_model::{FilterKind, MaterializedFilter, Selection, YearMonth};

/// One `--set LABEL=VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterAssignment {
    pub label: String,
    pub value: String,
}

impl FilterAssignment {
    /// Split at the first `=`. Labels are trimmed; values are kept as given.
    pub fn parse(arg: &str) -> Result<Self> {
        let (label, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected LABEL=VALUE, got '{arg}'"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(anyhow!("missing filter label in '{arg}'"));
        }
        Ok(Self {
            label: label.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse raw text into a selection for `filter`.
///
/// Blank text yields the unset selection for the filter's kind.
pub fn parse_selection(filter: &MaterializedFilter, raw: &str) -> Result<Selection> {
    let kind = filter.kind();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Selection::empty(kind));
    }
    let selection = match kind {
        FilterKind::FreeText => Selection::FreeText(Some(raw.to_string())),
        FilterKind::Dropdown => Selection::Dropdown(Some(option_value(filter, trimmed))),
        FilterKind::DeviceType => Selection::DeviceType(Some(option_value(filter, trimmed))),
        FilterKind::Multiselect => Selection::Multiselect(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| option_value(filter, part))
                .collect(),
        ),
        FilterKind::Slider => {
            let value: f64 = trimmed
                .parse()
                .with_context(|| format!("filter '{}' expects a number", filter.label()))?;
            Selection::Slider(Some(value))
        }
        FilterKind::YearMonth => {
            let value: YearMonth = trimmed
                .parse()
                .with_context(|| format!("filter '{}' expects YYYY-MM", filter.label()))?;
            Selection::YearMonth(Some(value))
        }
    };
    Ok(selection)
}

/// Accept either an option's value or its display label.
fn option_value(filter: &MaterializedFilter, text: &str) -> String {
    filter
        .definition()
        .input
        .available_options()
        .iter()
        .find(|option| option.value == text || option.label.eq_ignore_ascii_case(text))
        .map_or_else(|| text.to_string(), |option| option.value.clone())
}

#[cfg(test)]
mod tests {
    use tableview_model::{
        FieldAccessor, FilterDefinition, FilterId, FilterInput, FilterOption, FilterRule,
    };

    use super::*;

    fn filter(input: FilterInput) -> MaterializedFilter {
        MaterializedFilter::seeded(
            FilterId::new(1, 0),
            FilterDefinition::new(FieldAccessor::field("x"), "X", input),
        )
    }

    #[test]
    fn assignment_splits_at_first_equals() {
        let parsed = FilterAssignment::parse(" Search =a=b").unwrap();
        assert_eq!(parsed.label, "Search");
        assert_eq!(parsed.value, "a=b");
        assert!(FilterAssignment::parse("no equals").is_err());
        assert!(FilterAssignment::parse("=value").is_err());
    }

    #[test]
    fn multiselect_maps_labels_to_values() {
        let f = filter(FilterInput::Multiselect {
            available_options: vec![FilterOption::new("Solar power", "solar")],
            default_options: vec![],
            separator: None,
        });
        assert_eq!(
            parse_selection(&f, "solar power, Wind,").unwrap(),
            Selection::Multiselect(vec!["solar".into(), "Wind".into()])
        );
    }

    #[test]
    fn numeric_and_date_filters_validate_input() {
        let slider = filter(FilterInput::Slider {
            min: 0.0,
            max: 10.0,
            filter_rule: Some(FilterRule::To),
        });
        assert_eq!(
            parse_selection(&slider, "2.5").unwrap(),
            Selection::Slider(Some(2.5))
        );
        assert!(parse_selection(&slider, "lots").is_err());

        let month = filter(FilterInput::YearMonth { filter_rule: None });
        assert_eq!(
            parse_selection(&month, "2021-06").unwrap(),
            Selection::YearMonth(Some(YearMonth::new(2021, 6).unwrap()))
        );
        assert!(parse_selection(&month, "June").is_err());
    }

    #[test]
    fn blank_value_clears() {
        let f = filter(FilterInput::FreeText);
        assert_eq!(parse_selection(&f, "  ").unwrap(), Selection::FreeText(None));
    }
}
