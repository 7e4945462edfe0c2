//! Data model for the filtered table view engine.

pub mod definition;
pub mod error;
pub mod page;
pub mod record;
pub mod selection;
pub mod year_month;

pub use definition::{
    FieldAccessor, FilterDefinition, FilterInput, FilterKind, FilterOption, FilterRule,
};
pub use error::{ModelError, Result};
pub use page::Page;
pub use record::{FieldValue, Record};
pub use selection::{FilterId, MaterializedFilter, Selection};
pub use year_month::YearMonth;
