//! Testing infrastructure for letterbox integration tests.
//!
//! - `FakeBin`: a temp directory of stand-in scraper executables
//! - `fixtures`: canned JSON payloads shaped like real scraper output

pub mod fake_bin;
pub mod fixtures;

pub use fake_bin::FakeBin;
