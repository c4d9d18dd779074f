//! Data module - simulation output loading

mod loader;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use table::{TableError, TimeSeriesTable};
