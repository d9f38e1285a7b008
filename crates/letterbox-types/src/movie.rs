use serde::{Deserialize, Serialize};

use crate::lenient::null_as_default;

/// A film as it appears in search results, watchlists and lists.
///
/// `slug` identifies the film on the site and is the argument passed to
/// `get_movie_details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub director: String,
}

/// A popular review shown on a film page. `rating` is on a 0-5 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
}

/// A streaming, rental or purchase option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// `stream`, `rent`, `buy` or `unknown`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarMovie {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
}

/// Full film page, fetched lazily for one selected [`Movie`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub director: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    /// Average rating on a 0-5 scale
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Preformatted, e.g. `1h 57min`
    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub providers: Vec<Provider>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similar: Vec<SimilarMovie>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fans: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: u64,
}
