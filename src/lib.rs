pub mod combine;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod sink;

pub use combine::{combine_files, combine_to_file, discover_daily_files, CombineSummary};
pub use config::{CombineConfig, ConvertConfig};
pub use convert::{convert, convert_file, escape_literal, ConvertSummary};
pub use error::CsvSqlError;
