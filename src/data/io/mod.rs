//! Dataset file I/O.
//!
//! CSV files are read and written through the Arrow CSV reader/writer. Every
//! column is read as UTF-8 text; category codes are assigned later by the
//! encoder.

mod delimited;
mod error;

pub use delimited::{load_table, write_table};
pub use error::DatasetLoadError;
