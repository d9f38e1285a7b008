//! Vocabulary shared by the gateway and its callers: which executable a
//! fetch runs, which positional arguments it passes, and which payload shape
//! comes back.

use letterbox_types::{DiaryEntry, ListSearchResult, Movie, MovieDetails, UserDetails};

/// One scraper invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SearchMovies { query: String },
    MovieDetails { slug: String },
    Diary { username: String },
    Watchlist { username: String },
    SearchLists { query: String },
    ListDetails { owner: String, slug: String },
    UserDetails { username: String },
}

impl Request {
    /// Executable base name, without platform suffix.
    pub fn executable(&self) -> &'static str {
        match self {
            Request::SearchMovies { .. } => "search_movie",
            Request::MovieDetails { .. } => "get_movie_details",
            Request::Diary { .. } => "get_diary",
            Request::Watchlist { .. } => "get_watchlist",
            Request::SearchLists { .. } => "search_lists",
            Request::ListDetails { .. } => "get_list_details",
            Request::UserDetails { .. } => "user_details",
        }
    }

    pub fn args(&self) -> Vec<&str> {
        match self {
            Request::SearchMovies { query } | Request::SearchLists { query } => vec![query.as_str()],
            Request::MovieDetails { slug } => vec![slug.as_str()],
            Request::Diary { username }
            | Request::Watchlist { username }
            | Request::UserDetails { username } => vec![username.as_str()],
            Request::ListDetails { owner, slug } => vec![owner.as_str(), slug.as_str()],
        }
    }
}

/// Decoded success output of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Movies(Vec<Movie>),
    MovieDetails(Box<MovieDetails>),
    Diary(Vec<DiaryEntry>),
    Lists(Vec<ListSearchResult>),
    User(Box<UserDetails>),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Movies(_) => "movies",
            Payload::MovieDetails(_) => "movie_details",
            Payload::Diary(_) => "diary",
            Payload::Lists(_) => "lists",
            Payload::User(_) => "user",
        }
    }

    /// Row count for arrays, 1 for objects; used in logs.
    pub fn len(&self) -> usize {
        match self {
            Payload::Movies(m) => m.len(),
            Payload::Diary(d) => d.len(),
            Payload::Lists(l) => l.len(),
            Payload::MovieDetails(_) | Payload::User(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
