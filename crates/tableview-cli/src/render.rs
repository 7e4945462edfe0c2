use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tableview_model::{
    FieldValue, FilterDefinition, FilterInput, FilterRule, Page, Record, Selection,
};

use crate::report::{FilterSummary, ViewReport};

pub fn print_view(report: &ViewReport) {
    let active: Vec<&FilterSummary> = report.filters.iter().filter(|f| f.active).collect();
    if !active.is_empty() {
        println!("{}", active_filter_table(&active));
    }
    println!("{}", page_table(report));
    println!("{}", page_footer(&report.page));
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_filters(definitions: &[FilterDefinition]) {
    println!("{}", definition_table(definitions));
}

/// Records of the current page, one row per record.
pub fn page_table(report: &ViewReport) -> Table {
    let mut table = Table::new();
    table.set_header(report.columns.iter().map(|c| header_cell(c)));
    apply_page_table_style(&mut table);
    for (index, column) in report.columns.iter().enumerate() {
        if is_numeric_column(&report.page.items, column) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for record in &report.page.items {
        table.add_row(
            report
                .columns
                .iter()
                .map(|column| value_cell(record.get(column))),
        );
    }
    table
}

/// True when at least one value is present and every present value reads as
/// a number, including numeric text from CSV.
fn is_numeric_column(records: &[Record], column: &str) -> bool {
    let mut present = records
        .iter()
        .map(|r| r.get(column))
        .filter(|v| !v.is_missing())
        .peekable();
    present.peek().is_some() && present.all(|v| v.as_number().is_some())
}

/// `Page 2 of 5 (26-50 of 112)`, or `Page 1 of 1 (no records)`.
pub fn page_footer<T>(page: &Page<T>) -> String {
    if page.is_empty() {
        return format!(
            "Page {} of {} (no records)",
            page.page_index, page.total_pages
        );
    }
    format!(
        "Page {} of {} ({}-{} of {})",
        page.page_index,
        page.total_pages,
        page.first_item(),
        page.last_item(),
        page.total_items
    )
}

fn active_filter_table(filters: &[&FilterSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Value")]);
    apply_table_style(&mut table);
    for filter in filters {
        table.add_row(vec![
            Cell::new(&filter.label).add_attribute(Attribute::Bold),
            Cell::new(filter.selection.to_string()),
        ]);
    }
    table
}

fn definition_table(definitions: &[FilterDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Fields"),
        header_cell("Options"),
        header_cell("Initial"),
    ]);
    apply_table_style(&mut table);
    for definition in definitions {
        let kind = if definition.search {
            Cell::new(format!("{} (search)", definition.kind()))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(definition.kind())
        };
        table.add_row(vec![
            Cell::new(&definition.label),
            kind,
            Cell::new(definition.field.field_names().join(" + ")),
            options_cell(&definition.input),
            Cell::new(Selection::seed(&definition.input)),
        ]);
    }
    table
}

fn options_cell(input: &FilterInput) -> Cell {
    match input {
        FilterInput::Slider {
            min,
            max,
            filter_rule,
        } => {
            let rule = filter_rule.map_or("no rule", FilterRule::as_str);
            Cell::new(format!("{min} to {max}, {rule}"))
        }
        FilterInput::YearMonth { filter_rule } => {
            Cell::new(filter_rule.map_or("equal", FilterRule::as_str))
        }
        other if other.available_options().is_empty() => dim_cell("-"),
        other => Cell::new(
            other
                .available_options()
                .iter()
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_page_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Missing => dim_cell("-"),
        other => Cell::new(other.as_text()),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(items: Vec<Record>, page_index: usize, total_items: usize) -> ViewReport {
        ViewReport {
            columns: vec!["name".into(), "size".into()],
            page: Page {
                items,
                page_index,
                page_size: 2,
                total_items,
                total_pages: total_items.div_ceil(2).max(1),
            },
            filters: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn footer_reports_item_range() {
        let items = vec![Record::new().with("name", "c")];
        assert_eq!(page_footer(&report(items, 2, 3).page), "Page 2 of 2 (3-3 of 3)");
        assert_eq!(
            page_footer(&report(Vec::new(), 1, 0).page),
            "Page 1 of 1 (no records)"
        );
    }

    #[test]
    fn csv_text_numbers_count_as_numeric() {
        let records = vec![
            Record::new().with("name", "a").with("size", "736123"),
            Record::new().with("name", "b"),
            Record::new().with("name", "c").with("size", " 12.5 "),
        ];
        assert!(is_numeric_column(&records, "size"));
        assert!(!is_numeric_column(&records, "name"));
        assert!(!is_numeric_column(&records, "absent"));
    }

    #[test]
    fn page_table_renders_missing_as_dash() {
        let items = vec![
            Record::new().with("name", "a").with("size", 1.0),
            Record::new().with("name", "b"),
        ];
        let rendered = page_table(&report(items, 1, 2)).to_string();
        assert!(rendered.contains('a'));
        assert!(rendered.contains('-'));
        assert!(rendered.contains("size"));
    }
}
