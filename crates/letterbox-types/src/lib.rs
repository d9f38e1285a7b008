//! Payload types produced by the external scraper executables.
//!
//! Every type here mirrors one JSON shape printed on stdout by a scraper.
//! The scrapers are loose about missing values (`null` where a number is
//! expected, absent keys on older pages), so decoding is lenient: absent or
//! null fields fall back to their defaults instead of failing the payload.

pub mod diary;
pub mod lenient;
pub mod list;
pub mod movie;
pub mod user;

pub use diary::DiaryEntry;
pub use list::ListSearchResult;
pub use movie::{Movie, MovieDetails, Provider, Review, SimilarMovie};
pub use user::{UserDetails, UserReview};
