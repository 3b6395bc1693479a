// ==========================================
// Flight Roster - Import layer
// ==========================================
// CSV crew / passenger pools -> domain candidates
// ==========================================

pub mod csv_pool_reader;
pub mod error;

pub use csv_pool_reader::CsvPoolReader;
pub use error::{ImportError, ImportResult};
