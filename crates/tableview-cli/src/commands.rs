use anyhow::{Context, Result, anyhow};
use tracing::{Level, debug, enabled, info, info_span, trace};

use tableview_cli::config::{ViewDocument, load_records, load_view_document};
use tableview_cli::input::{FilterAssignment, parse_selection};
use tableview_cli::logging::redact_value;
use tableview_cli::report::ViewReport;
use tableview_core::{TableViewController, ViewConfig};
use tableview_model::Selection;

use crate::cli::{FiltersArgs, ShowArgs};

pub fn run_filters(args: &FiltersArgs) -> Result<ViewDocument> {
    load_view_document(&args.filters)
}

pub fn run_show(args: &ShowArgs) -> Result<ViewReport> {
    let span = info_span!("show", filters = %args.filters.display());
    let _guard = span.enter();

    let document = load_view_document(&args.filters)?;
    let records = load_records(&args.records)?;
    let config = ViewConfig {
        page_size: args.page_size.unwrap_or(document.view.page_size),
    };

    let mut controller = TableViewController::new(config);
    let update = controller.on_definitions_changed(&document.filters);
    debug!(kind = ?update.kind, filters = controller.filters().len(), "definitions applied");
    let update = controller.on_records_changed(records);
    debug!(total = update.total_items, "records applied");

    if let Some(text) = &args.search {
        let id = controller
            .view()
            .search
            .map(|f| f.id)
            .ok_or_else(|| anyhow!("--search given but no search filter is defined"))?;
        trace!(search = redact_value(text), "applying search");
        let update =
            controller.on_filter_value_changed(id, Selection::FreeText(Some(text.clone())))?;
        debug!(total = update.total_items, "search applied");
    }

    for raw in &args.set {
        let assignment = FilterAssignment::parse(raw)?;
        let (id, selection) = {
            let filter = controller
                .filter_by_label(&assignment.label)
                .ok_or_else(|| anyhow!("unknown filter '{}'", assignment.label))?;
            let selection = parse_selection(filter, &assignment.value)
                .with_context(|| format!("set filter '{}'", assignment.label))?;
            (filter.id, selection)
        };
        trace!(
            filter = %assignment.label,
            value = redact_value(&assignment.value),
            "applying filter value"
        );
        let update = controller.on_filter_value_changed(id, selection)?;
        debug!(total = update.total_items, "filter applied");
    }

    let update = controller.on_page_requested(args.page);
    info!(
        page = update.page_index,
        pages = update.total_pages,
        matched = update.total_items,
        "view ready"
    );
    let report = ViewReport::from_view(&controller.view(), &document.columns);
    if enabled!(Level::TRACE) {
        for record in &report.page.items {
            let row = serde_json::to_string(record).context("serialize page row")?;
            trace!(row = redact_value(&row), "page row");
        }
    }
    Ok(report)
}
