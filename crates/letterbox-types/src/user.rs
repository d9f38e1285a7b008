use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lenient::null_as_default;

const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

/// A review written by the profiled user. `rating` is on the site's 0-10 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserReview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub movie_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movie_year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_date: String,
}

impl UserReview {
    /// Parsed `review_date`, `None` when the scraper produced something unusable.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.review_date, REVIEW_DATE_FORMAT).ok()
    }

    /// Rating on the 0-5 scale used everywhere else in the UI.
    pub fn rating_out_of_five(&self) -> f64 {
        self.rating / 2.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub films_watched: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub following: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorites: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_watched: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub this_year: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<UserReview>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

impl UserDetails {
    /// Order reviews newest first. Reviews with an unparseable date count as
    /// the oldest possible date; ties keep their scraped order.
    pub fn sort_reviews_newest_first(&mut self) {
        self.reviews
            .sort_by_key(|review| std::cmp::Reverse(review.date().unwrap_or(NaiveDate::MIN)));
    }

    /// Length of the longer of the two social lists; the social tab pages by it.
    pub fn social_len(&self) -> usize {
        self.following.len().max(self.followers.len())
    }
}
