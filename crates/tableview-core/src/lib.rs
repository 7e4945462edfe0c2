//! Filter reconciliation and paginated view engine.
//!
//! The pipeline runs leaf to root:
//!
//! - [`reconcile`] aligns caller-supplied definitions with materialized filters;
//! - [`store`] holds selections and edits them by immutable replacement;
//! - [`predicate`] implements each filter kind's match test;
//! - [`evaluate`] applies the active filters to the backing records;
//! - [`paginate`] slices the result into pages;
//! - [`controller`] ties the stages together behind event entry points.

#![deny(unsafe_code)]

pub mod controller;
pub mod error;
pub mod evaluate;
pub mod paginate;
pub mod predicate;
pub mod reconcile;
pub mod store;

pub use controller::{
    ControllerState, DEFAULT_PAGE_SIZE, TableView, TableViewController, UpdateKind, ViewConfig,
    ViewUpdate,
};
pub use error::{FilterError, FilterWarning};
pub use evaluate::{evaluate, evaluate_indices};
pub use paginate::paginate;
pub use predicate::{Admission, admits};
pub use reconcile::{Reconciliation, reconcile};
pub use store::{FilterStateStore, Partition, partition, set_value};
