use serde::{Deserialize, Serialize};

use crate::lenient::null_as_default;

/// One logged viewing. The scraper already sorts entries newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    /// 0-5 in half steps; 0 means unrated
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    /// `YYYY-MM-DD` or `Unknown Date`
    #[serde(default, deserialize_with = "null_as_default")]
    pub watch_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rewatch: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diary_entry_decoding() {
        let json = r#"{
            "title": "Heat",
            "year": 1995,
            "rating": 4.5,
            "watch_date": "2024-05-01",
            "rewatch": true,
            "slug": "heat-1995"
        }"#;
        let entry: DiaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.rating, 4.5);
        assert!(entry.rewatch);
        assert_eq!(entry.watch_date, "2024-05-01");
    }

    #[test]
    fn test_empty_diary() {
        let entries: Vec<DiaryEntry> = serde_json::from_str("[]").unwrap();
        assert!(entries.is_empty());
    }
}
