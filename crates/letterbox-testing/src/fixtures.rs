//! Canned scraper payloads.

use serde_json::{Value, json};

pub fn movies() -> Value {
    json!([
        {"title": "Alien", "year": 1979, "slug": "alien", "director": "Ridley Scott"},
        {"title": "Aliens", "year": 1986, "slug": "aliens", "director": "James Cameron"},
        {"title": "Alien³", "year": 1992, "slug": "alien-3", "director": null}
    ])
}

pub fn movie_details() -> Value {
    json!({
        "title": "Alien",
        "year": 1979,
        "director": "Ridley Scott",
        "genres": ["Horror", "Science Fiction"],
        "rating": 4.2,
        "description": "In space, no one can hear you scream.",
        "url": "https://letterboxd.com/film/alien/",
        "runtime": "117 mins",
        "tagline": "In space no one can hear you scream.",
        "reviews": [
            {"author": "ripley", "text": "Perfect.", "rating": 5.0}
        ],
        "providers": [
            {"name": "Netflix", "type": "stream", "link": "https://netflix.com/alien"}
        ],
        "cast": ["Sigourney Weaver", "Tom Skerritt"],
        "similar": [
            {"name": "Aliens", "rating": 4.1},
            {"name": "The Thing", "rating": 4.3}
        ],
        "members": 1523400,
        "fans": 48200,
        "likes": 612000,
        "review_count": 90500,
        "lists": 230100
    })
}

pub fn diary() -> Value {
    json!([
        {"title": "Heat", "year": 1995, "rating": 4.5, "watch_date": "2024-03-02", "rewatch": true, "slug": "heat"},
        {"title": "Thief", "year": 1981, "rating": 3.0, "watch_date": "2024-02-14", "rewatch": false, "slug": "thief"}
    ])
}

pub fn lists() -> Value {
    json!([
        {"name": "Best of 1979", "owner": "dave", "slug": "best-of-1979"},
        {"name": "Space horror", "owner": "a/b c", "slug": "space-horror"}
    ])
}

pub fn user_details() -> Value {
    json!({
        "username": "dave",
        "films_watched": 812,
        "bio": "Mostly horror.",
        "following": ["ripley", "ash"],
        "followers": ["parker"],
        "favorites": ["Alien", "Heat"],
        "last_watched": "Thief",
        "this_year": 41,
        "recent": ["Thief", "Heat"],
        "reviews": [
            {"movie_name": "Heat", "movie_year": 1995, "rating": 9.0, "review_text": "Great.", "review_date": "2024-01-05"},
            {"movie_name": "Thief", "movie_year": 1981, "rating": 7.0, "review_text": "Moody.", "review_date": "2024-03-10"}
        ],
        "website": "",
        "location": "Nostromo"
    })
}

pub fn error_envelope(message: &str) -> Value {
    json!({ "error": message })
}
