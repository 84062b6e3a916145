//! `shopledger-reporting` — tabular exports over committed orders.
//!
//! Reports are CSV byte streams suitable for spreadsheet consumption,
//! produced on demand from the ledger, catalog and party stores.

pub mod dashboard;
pub mod export;

pub use dashboard::{Dashboard, DashboardStats};
pub use export::{export_filename, ExportError, ReportExporter, ReportType};
