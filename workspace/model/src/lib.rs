pub mod error;
pub mod loader;
pub mod record;
pub mod record_set;

pub use error::{ModelError, Result};
pub use loader::{REQUIRED_COLUMNS, load_csv, load_reader};
pub use record::SaleRecord;
pub use record_set::RecordSet;

// Re-export tracing for use in this crate
pub use tracing;
