//! Canonical record shapes for the sales and comodato feeds

mod data;
pub mod loader;

pub use data::{months_elapsed, SalesRecord, ComodatoContract, ProposedEquipmentLine};
pub use loader::{FeedError, load_sales_records, load_contracts};
