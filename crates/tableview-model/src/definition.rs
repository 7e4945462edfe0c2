//! Caller-supplied filter definitions.
//!
//! A definition describes one filterable (or searchable) column: how to read
//! the value out of a record, what kind of input edits it, and whether it is
//! the table's search box. Definitions carry no live selection and compare
//! structurally, which is what lets the reconciler tell a fresh-but-identical
//! definition list apart from a real change.

use std::fmt;

use crate::error::ModelError;
use crate::record::{FieldValue, Record};

/// How a filter reads its value out of a record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldAccessor {
    /// The value of a single field.
    Field { name: String },
    /// Text of several fields joined by `separator`; missing fields are skipped.
    Concat {
        fields: Vec<String>,
        #[serde(default = "default_concat_separator")]
        separator: String,
    },
}

fn default_concat_separator() -> String {
    " ".to_string()
}

impl FieldAccessor {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field { name: name.into() }
    }

    pub fn concat<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Concat {
            fields: fields.into_iter().map(Into::into).collect(),
            separator: default_concat_separator(),
        }
    }

    pub fn resolve(&self, record: &Record) -> FieldValue {
        match self {
            Self::Field { name } => record.get(name).clone(),
            Self::Concat { fields, separator } => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|name| record.get(name))
                    .filter(|value| !value.is_missing())
                    .map(FieldValue::as_text)
                    .collect();
                if parts.is_empty() {
                    FieldValue::Missing
                } else {
                    FieldValue::Text(parts.join(separator))
                }
            }
        }
    }

    /// Names of the fields this accessor reads.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            Self::Field { name } => vec![name.as_str()],
            Self::Concat { fields, .. } => fields.iter().map(String::as_str).collect(),
        }
    }
}

/// Comparison applied by slider and year-month filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRule {
    /// Field equals the selection.
    Equal,
    /// Field is at or above the selection.
    From,
    /// Field is at or below the selection.
    To,
}

impl FilterRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::From => "from",
            Self::To => "to",
        }
    }

    pub fn compare<T: PartialOrd>(self, field: &T, selected: &T) -> bool {
        match self {
            Self::Equal => field == selected,
            Self::From => field >= selected,
            Self::To => field <= selected,
        }
    }
}

/// A choice offered by multiselect, dropdown and device-type inputs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Input kind plus its kind-specific parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FilterInput {
    DeviceType {
        #[serde(default)]
        available_options: Vec<FilterOption>,
    },
    FreeText,
    Multiselect {
        #[serde(default)]
        available_options: Vec<FilterOption>,
        #[serde(default)]
        default_options: Vec<String>,
        /// Splits a record value into tokens, e.g. `;` for `Gaseous;Agricultural gas`.
        #[serde(default)]
        separator: Option<String>,
    },
    Dropdown {
        #[serde(default)]
        available_options: Vec<FilterOption>,
    },
    Slider {
        min: f64,
        max: f64,
        #[serde(default)]
        filter_rule: Option<FilterRule>,
    },
    YearMonth {
        #[serde(default)]
        filter_rule: Option<FilterRule>,
    },
}

/// Structural equality. Slider bounds compare by total order so that a
/// definition always equals itself, NaN bounds included.
impl PartialEq for FilterInput {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::DeviceType {
                    available_options: a,
                },
                Self::DeviceType {
                    available_options: b,
                },
            )
            | (
                Self::Dropdown {
                    available_options: a,
                },
                Self::Dropdown {
                    available_options: b,
                },
            ) => a == b,
            (Self::FreeText, Self::FreeText) => true,
            (
                Self::Multiselect {
                    available_options: a_options,
                    default_options: a_defaults,
                    separator: a_separator,
                },
                Self::Multiselect {
                    available_options: b_options,
                    default_options: b_defaults,
                    separator: b_separator,
                },
            ) => a_options == b_options && a_defaults == b_defaults && a_separator == b_separator,
            (
                Self::Slider {
                    min: a_min,
                    max: a_max,
                    filter_rule: a_rule,
                },
                Self::Slider {
                    min: b_min,
                    max: b_max,
                    filter_rule: b_rule,
                },
            ) => {
                a_min.total_cmp(b_min).is_eq()
                    && a_max.total_cmp(b_max).is_eq()
                    && a_rule == b_rule
            }
            (Self::YearMonth { filter_rule: a }, Self::YearMonth { filter_rule: b }) => a == b,
            _ => false,
        }
    }
}

impl FilterInput {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::DeviceType { .. } => FilterKind::DeviceType,
            Self::FreeText => FilterKind::FreeText,
            Self::Multiselect { .. } => FilterKind::Multiselect,
            Self::Dropdown { .. } => FilterKind::Dropdown,
            Self::Slider { .. } => FilterKind::Slider,
            Self::YearMonth { .. } => FilterKind::YearMonth,
        }
    }

    pub fn available_options(&self) -> &[FilterOption] {
        match self {
            Self::DeviceType { available_options }
            | Self::Multiselect {
                available_options, ..
            }
            | Self::Dropdown { available_options } => available_options,
            _ => &[],
        }
    }
}

/// Fieldless discriminant of [`FilterInput`] and [`crate::Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    DeviceType,
    FreeText,
    Multiselect,
    Dropdown,
    Slider,
    YearMonth,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeviceType => "device_type",
            Self::FreeText => "free_text",
            Self::Multiselect => "multiselect",
            Self::Dropdown => "dropdown",
            Self::Slider => "slider",
            Self::YearMonth => "year_month",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filterable column as declared by the caller.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterDefinition {
    pub field: FieldAccessor,
    pub label: String,
    pub input: FilterInput,
    #[serde(default)]
    pub search: bool,
}

impl FilterDefinition {
    pub fn new(field: FieldAccessor, label: impl Into<String>, input: FilterInput) -> Self {
        Self {
            field,
            label: label.into(),
            input,
            search: false,
        }
    }

    /// A free-text definition flagged as the table's search box.
    pub fn search(field: FieldAccessor, label: impl Into<String>) -> Self {
        Self {
            field,
            label: label.into(),
            input: FilterInput::FreeText,
            search: true,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.input.kind()
    }

    /// Check the definition for configuration mistakes.
    ///
    /// A slider without a rule passes; it places no constraint and is
    /// reported as a warning at evaluation time.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.label.trim().is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        if let FieldAccessor::Concat { fields, .. } = &self.field
            && fields.is_empty()
        {
            return Err(ModelError::EmptyAccessor {
                label: self.label.clone(),
            });
        }
        match &self.input {
            FilterInput::Multiselect {
                available_options,
                default_options,
                ..
            } if !available_options.is_empty() => {
                if let Some(option) = default_options
                    .iter()
                    .find(|d| !available_options.iter().any(|o| &o.value == *d))
                {
                    return Err(ModelError::UnknownDefaultOption {
                        label: self.label.clone(),
                        option: option.clone(),
                    });
                }
            }
            FilterInput::Slider { min, max, .. } if !min.is_finite() || !max.is_finite() => {
                return Err(ModelError::NonFiniteSliderBound {
                    label: self.label.clone(),
                    min: *min,
                    max: *max,
                });
            }
            FilterInput::Slider { min, max, .. } if min > max => {
                return Err(ModelError::InvalidSliderBounds {
                    label: self.label.clone(),
                    min: *min,
                    max: *max,
                });
            }
            _ => {}
        }
        Ok(())
    }
}
