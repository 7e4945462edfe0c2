//! Owned snapshot of a rendered view, shared by the table and JSON outputs.

use serde::Serialize;
use tableview_core::predicate::is_active;
use tableview_core::{FilterWarning, TableView};
use tableview_model::{FilterKind, MaterializedFilter, Page, Record, Selection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSummary {
    pub label: String,
    pub kind: FilterKind,
    pub search: bool,
    pub active: bool,
    pub selection: Selection,
}

impl From<&MaterializedFilter> for FilterSummary {
    fn from(filter: &MaterializedFilter) -> Self {
        Self {
            label: filter.label().to_string(),
            kind: filter.kind(),
            search: filter.is_search(),
            active: is_active(filter),
            selection: filter.selection.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    /// Displayed field names: the configured columns, or every field on
    /// the page in first-seen order.
    pub columns: Vec<String>,
    pub page: Page<Record>,
    pub filters: Vec<FilterSummary>,
    pub warnings: Vec<FilterWarning>,
}

impl ViewReport {
    pub fn from_view(view: &TableView<'_>, configured: &[String]) -> Self {
        let page = view.page.clone().map(Record::clone);
        let columns = if configured.is_empty() {
            page_columns(&page.items)
        } else {
            configured.to_vec()
        };
        Self {
            columns,
            page,
            filters: view.filters.iter().map(FilterSummary::from).collect(),
            warnings: view.warnings.clone(),
        }
    }
}

fn page_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.fields.keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}
