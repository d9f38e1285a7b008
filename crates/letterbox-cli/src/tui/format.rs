//! Text formatting shared by the views.

use letterbox_runtime::path_safe;

const STAR_COUNT: usize = 5;
const FULL_STAR: char = '★';
const HALF_STAR: char = '½';
const EMPTY_STAR: char = '☆';

/// Five glyphs: `floor(r)` full stars, a half star when the fraction is at
/// least .5, empty stars for the rest. Non-positive ratings are all empty.
pub fn stars(rating: f64) -> String {
    if rating.is_nan() || rating <= 0.0 {
        return EMPTY_STAR.to_string().repeat(STAR_COUNT);
    }

    let rating = rating.min(STAR_COUNT as f64);
    let full = rating.floor() as usize;
    let half = full < STAR_COUNT && rating - rating.floor() >= 0.5;

    let mut out = String::new();
    for i in 0..STAR_COUNT {
        if i < full {
            out.push(FULL_STAR);
        } else if i == full && half {
            out.push(HALF_STAR);
        } else {
            out.push(EMPTY_STAR);
        }
    }
    out
}

/// `★ 4.2/5`
pub fn rating_label(rating: f64) -> String {
    format!("{} {:.1}/5", FULL_STAR, rating)
}

/// `1.2K` above a thousand, `3.4M` above a million.
pub fn compact_count(n: u64) -> String {
    if n > 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n > 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn diary_export_path(username: &str) -> String {
    format!("exports/diary_{}.csv", path_safe(username))
}

pub fn watchlist_export_path(username: &str) -> String {
    format!("exports/watchlist_{}.csv", path_safe(username))
}

pub fn list_export_path(owner: &str, name: &str) -> String {
    format!("exports/list_{}_{}.csv", path_safe(owner), path_safe(name))
}

/// Year cell: blank when the scraper had none.
pub fn year(year: i32) -> String {
    if year > 0 {
        year.to_string()
    } else {
        String::new()
    }
}
