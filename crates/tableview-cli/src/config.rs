//! Loading view documents and record files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tableview_core::ViewConfig;
use tableview_model::{FieldValue, FilterDefinition, Record};
use tracing::info;

/// A table's presentation settings and filter definitions.
///
/// ```toml
/// columns = ["facilityName", "organization", "capacityInW"]
///
/// [view]
/// page_size = 10
///
/// [[filters]]
/// label = "Search"
/// search = true
/// field = { kind = "concat", fields = ["facilityName", "organization"] }
/// input = { type = "free_text" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ViewDocument {
    /// Columns to display, in order. Empty shows every field.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
}

impl ViewDocument {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let doc: Self = toml::from_str(text).context("parse TOML view document")?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(text).context("parse JSON view document")?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        for def in &self.filters {
            def.validate()?;
        }
        Ok(())
    }
}

/// Load a view document; `.json` files are JSON, anything else TOML.
pub fn load_view_document(path: &Path) -> Result<ViewDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read view document {}", path.display()))?;
    let doc = if has_extension(path, "json") {
        ViewDocument::from_json_str(&text)
    } else {
        ViewDocument::from_toml_str(&text)
    }
    .with_context(|| format!("load view document {}", path.display()))?;
    info!(
        path = %path.display(),
        filters = doc.filters.len(),
        page_size = doc.view.page_size.get(),
        "view document loaded"
    );
    Ok(doc)
}

/// Load records from a JSON array of objects or a CSV file with headers.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let records = if has_extension(path, "csv") {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open record file {}", path.display()))?;
        records_from_csv(file).with_context(|| format!("read CSV {}", path.display()))?
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read record file {}", path.display()))?;
        records_from_json(&text).with_context(|| format!("read JSON {}", path.display()))?
    };
    info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

pub fn records_from_json(text: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse JSON")?;
    if !value.is_array() {
        bail!("expected a JSON array of record objects");
    }
    serde_json::from_value(value).context("decode records")
}

/// Read CSV rows as records. Empty cells are missing; numeric cells stay
/// text and are parsed on demand by numeric filters.
pub fn records_from_csv<R: std::io::Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers().context("read CSV header")?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("read CSV row")?;
        let record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| {
                let value = if cell.is_empty() {
                    FieldValue::Missing
                } else {
                    FieldValue::text(cell)
                };
                (name.to_string(), value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
