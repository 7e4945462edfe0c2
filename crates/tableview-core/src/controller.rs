//! Orchestration of reconciliation, evaluation and pagination.
//!
//! [`TableViewController`] is the single owner of a table's filter state and
//! backing records. Every entry point takes `&mut self` and runs to
//! completion before returning, so a selection change and the page it
//! produces are observed together or not at all.

use std::num::NonZeroUsize;

use tableview_model::{FilterDefinition, FilterId, MaterializedFilter, Page, Record, Selection};
use tracing::{debug, warn};

use crate::error::{FilterError, FilterWarning};
use crate::evaluate::evaluate_indices;
use crate::paginate::{clamp_page, paginate};
use crate::predicate::config_warning;
use crate::reconcile::reconcile;
use crate::store::{FilterStateStore, partition};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(25).unwrap();

/// Presentation settings for a table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: NonZeroUsize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// No filter definitions materialized yet; the view is empty.
    Uninitialized,
    Ready,
}

/// What an event did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// Nothing observable changed.
    Unchanged,
    /// Filters were re-seeded from new definitions.
    Reseeded,
    /// The filtered set was recomputed.
    Refiltered,
    /// Only the visible page moved.
    Repaged,
}

/// Summary emitted by every event entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ViewUpdate {
    pub kind: UpdateKind,
    pub page_index: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableView<'a> {
    pub state: ControllerState,
    pub page: Page<&'a Record>,
    pub filters: &'a [MaterializedFilter],
    pub search: Option<&'a MaterializedFilter>,
    pub standard: Vec<&'a MaterializedFilter>,
    pub warnings: Vec<FilterWarning>,
}

/// Owns the filter state and records of one table.
#[derive(Debug, Clone)]
pub struct TableViewController {
    config: ViewConfig,
    state: ControllerState,
    store: FilterStateStore,
    records: Vec<Record>,
    /// Positions into `records` that pass the current filters.
    filtered: Vec<usize>,
    /// Requested 1-based page, clamped on every write.
    page: usize,
}

impl Default for TableViewController {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl TableViewController {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            state: ControllerState::Uninitialized,
            store: FilterStateStore::new(),
            records: Vec::new(),
            filtered: Vec::new(),
            page: 1,
        }
    }

    pub fn config(&self) -> ViewConfig {
        self.config
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn filters(&self) -> &[MaterializedFilter] {
        self.store.filters()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Look up a current filter by label, e.g. to resolve user input.
    pub fn filter_by_label(&self, label: &str) -> Option<&MaterializedFilter> {
        self.store.find_by_label(label)
    }

    /// Caller supplied a (possibly identical) definition list.
    ///
    /// Structurally identical definitions leave selections and the page
    /// untouched; anything else re-seeds every filter and returns to page 1.
    pub fn on_definitions_changed(&mut self, definitions: &[FilterDefinition]) -> ViewUpdate {
        let generation = self.store.next_generation();
        let reconciliation = reconcile(definitions, self.store.filters(), generation);
        if !self.store.apply(reconciliation) {
            debug!("filter definitions unchanged");
            return self.update(UpdateKind::Unchanged);
        }
        if self.state == ControllerState::Uninitialized && !self.store.is_empty() {
            self.state = ControllerState::Ready;
        }
        self.recompute();
        self.page = 1;
        self.update(UpdateKind::Reseeded)
    }

    /// User edited one filter. Returns to page 1.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::IdentityNotFound`] when `filter` is not in
    /// the current set and [`FilterError::SelectionKindMismatch`] when the
    /// selection does not fit the filter; the state is unchanged either way.
    pub fn on_filter_value_changed(
        &mut self,
        filter: FilterId,
        selection: Selection,
    ) -> Result<ViewUpdate, FilterError> {
        self.store.set_value(filter, selection)?;
        self.recompute();
        self.page = 1;
        Ok(self.update(UpdateKind::Refiltered))
    }

    /// A new backing record set arrived.
    ///
    /// Selections are kept. The page resets to 1 only when the number of
    /// filtered records changed.
    pub fn on_records_changed(&mut self, records: Vec<Record>) -> ViewUpdate {
        let previous = self.filtered.len();
        self.records = records;
        self.recompute();
        if self.filtered.len() != previous {
            self.page = 1;
        }
        self.update(UpdateKind::Refiltered)
    }

    /// Move to another page. No filtering is redone.
    pub fn on_page_requested(&mut self, page: usize) -> ViewUpdate {
        let clamped = clamp_page(page, self.filtered.len(), self.config.page_size);
        if clamped == self.page {
            return self.update(UpdateKind::Unchanged);
        }
        self.page = clamped;
        self.update(UpdateKind::Repaged)
    }

    /// Put every filter back to its seed selection and return to page 1.
    pub fn reset_filters(&mut self) -> ViewUpdate {
        self.store.clear_all();
        self.recompute();
        self.page = 1;
        self.update(UpdateKind::Refiltered)
    }

    /// Current page, filters and diagnostics.
    pub fn view(&self) -> TableView<'_> {
        let parts = partition(self.store.filters());
        let mut warnings = parts.warnings;
        warnings.extend(self.store.filters().iter().filter_map(config_warning));

        let page = match self.state {
            ControllerState::Uninitialized => Page::empty(self.config.page_size.get()),
            ControllerState::Ready => paginate(&self.filtered, self.config.page_size, self.page)
                .map(|&i| &self.records[i]),
        };

        TableView {
            state: self.state,
            page,
            filters: self.store.filters(),
            search: parts.search,
            standard: parts.standard,
            warnings,
        }
    }

    fn recompute(&mut self) {
        if self.state == ControllerState::Uninitialized {
            self.filtered.clear();
            return;
        }
        let parts = partition(self.store.filters());
        for warning in &parts.warnings {
            warn!(%warning, "ambiguous search filter");
        }
        for warning in self.store.filters().iter().filter_map(config_warning) {
            warn!(%warning, "filter ignored");
        }
        self.filtered = evaluate_indices(&self.records, parts.search, &parts.standard);
    }

    fn update(&self, kind: UpdateKind) -> ViewUpdate {
        let total_items = self.filtered.len();
        ViewUpdate {
            kind,
            page_index: self.page,
            total_items,
            total_pages: crate::paginate::total_pages(total_items, self.config.page_size),
        }
    }
}
