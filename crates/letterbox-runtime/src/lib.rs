//! Everything the letterbox TUI does outside the terminal: locating and
//! running scraper executables, writing CSV exports, reading configuration.

pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod quotes;
pub mod request;

pub use config::{Config, PaginationConfig, resolve_data_dir};
pub use error::{Error, Result};
pub use export::{CsvRecord, ExportReport, ExportRows, export, path_safe};
pub use gateway::{Backend, ExecutableLocator, Gateway};
pub use quotes::{Quote, load_random_quote};
pub use request::{Payload, Request};
