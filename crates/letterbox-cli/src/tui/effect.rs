//! What a screen asks of the outside world after handling an input.

use std::fmt;

use letterbox_runtime::{ExportRows, Request};

/// Tag carried by every background job and its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic tag source owned by the navigator, so a freshly built screen
/// can never mistake an old job's completion for its own.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    SearchMovie,
    UserProfile,
    Diary,
    Watchlist,
    Lists,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::SearchMovie,
        Feature::UserProfile,
        Feature::Diary,
        Feature::Watchlist,
        Feature::Lists,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::SearchMovie => "search movie",
            Feature::UserProfile => "user profile",
            Feature::Diary => "diary",
            Feature::Watchlist => "watchlist",
            Feature::Lists => "view lists",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Replace the current screen with a fresh one for this feature
    Open(Feature),
    /// Replace the current screen with a fresh menu
    Menu,
    Fetch {
        id: RequestId,
        request: Request,
    },
    Export {
        id: RequestId,
        rows: ExportRows,
        destination: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut ids = RequestIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "#2");
    }

    #[test]
    fn test_feature_order_matches_menu() {
        let labels: Vec<&str> = Feature::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(
            labels,
            vec!["search movie", "user profile", "diary", "watchlist", "view lists"]
        );
    }
}
