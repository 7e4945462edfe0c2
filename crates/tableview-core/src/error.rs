//! Errors and non-fatal warnings raised by the view engine.

use std::fmt;

use tableview_model::{FilterId, FilterKind};

/// Errors surfaced to the caller of a filter operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The filter is not part of the current materialized set, usually
    /// because the definitions were re-seeded after the id was handed out.
    #[error("filter {0} is not part of the current filter set")]
    IdentityNotFound(FilterId),
    #[error("filter '{label}' expects a {expected} selection, got {actual}")]
    SelectionKindMismatch {
        label: String,
        expected: FilterKind,
        actual: FilterKind,
    },
}

/// Configuration problems that are resolved deterministically and reported,
/// never raised.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FilterWarning {
    /// More than one definition claims to be the search box. The first one
    /// is kept; the rest are treated as standard filters.
    MultipleSearchFilters { kept: String, demoted: Vec<String> },
    /// A slider has a selection but no comparison rule; it places no
    /// constraint on records.
    MissingSliderRule { label: String },
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleSearchFilters { kept, demoted } => write!(
                f,
                "multiple search filters defined; using '{kept}', demoting {}",
                demoted.join(", ")
            ),
            Self::MissingSliderRule { label } => {
                write!(f, "slider '{label}' has no comparison rule and is ignored")
            }
        }
    }
}
