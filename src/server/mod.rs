//! Records backend: a REST API over a row store.

pub mod routes;
pub mod sheet;

pub use routes::{router, AppState};
pub use sheet::{SheetError, SheetStore};
