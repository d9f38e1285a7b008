//! Subprocess gateway: runs one scraper to completion and classifies what it printed.
//!
//! There is no retry, timeout or streaming here. Callers run [`Backend::fetch`]
//! off the UI thread and wait for the single result.

mod classify;
mod locate;

pub use classify::{RawOutput, classify, decode, error_envelope};
pub use locate::{BUNDLED_SUBDIR, ExecutableLocator, executable_file_name, platform_dir};

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use letterbox_types::{DiaryEntry, ListSearchResult, Movie, MovieDetails, UserDetails};

use crate::request::{Payload, Request};
use crate::{Error, Result};

/// Anything that can answer a [`Request`]. The TUI worker only sees this trait.
pub trait Backend: Send + Sync {
    fn fetch(&self, request: &Request) -> Result<Payload>;
}

/// Runs the real scraper executables.
#[derive(Debug, Clone)]
pub struct Gateway {
    locator: ExecutableLocator,
}

impl Gateway {
    pub fn new(locator: ExecutableLocator) -> Self {
        Self { locator }
    }

    /// Locate and run `name` with positional `args`, returning stdout once
    /// it is known not to be an error.
    pub fn invoke(&self, name: &str, args: &[&str]) -> Result<Vec<u8>> {
        let executable = self.locator.locate(name)?;
        let output = run(&executable, args)?;
        classify(&executable, &output).map(<[u8]>::to_vec)
    }

    fn invoke_json<T: serde::de::DeserializeOwned>(&self, name: &str, args: &[&str]) -> Result<T> {
        let stdout = self.invoke(name, args)?;
        decode(name, &stdout)
    }

    pub fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        self.invoke_json("search_movie", &[query])
    }

    pub fn movie_details(&self, slug: &str) -> Result<MovieDetails> {
        self.invoke_json("get_movie_details", &[slug])
    }

    pub fn diary(&self, username: &str) -> Result<Vec<DiaryEntry>> {
        self.invoke_json("get_diary", &[username])
    }

    pub fn watchlist(&self, username: &str) -> Result<Vec<Movie>> {
        self.invoke_json("get_watchlist", &[username])
    }

    pub fn search_lists(&self, query: &str) -> Result<Vec<ListSearchResult>> {
        self.invoke_json("search_lists", &[query])
    }

    pub fn list_details(&self, owner: &str, slug: &str) -> Result<Vec<Movie>> {
        self.invoke_json("get_list_details", &[owner, slug])
    }

    pub fn user_details(&self, username: &str) -> Result<UserDetails> {
        self.invoke_json("user_details", &[username])
    }
}

impl Backend for Gateway {
    fn fetch(&self, request: &Request) -> Result<Payload> {
        let started = Instant::now();
        let result = match request {
            Request::SearchMovies { query } => self.search_movies(query).map(Payload::Movies),
            Request::MovieDetails { slug } => self
                .movie_details(slug)
                .map(|d| Payload::MovieDetails(Box::new(d))),
            Request::Diary { username } => self.diary(username).map(Payload::Diary),
            Request::Watchlist { username } => self.watchlist(username).map(Payload::Movies),
            Request::SearchLists { query } => self.search_lists(query).map(Payload::Lists),
            Request::ListDetails { owner, slug } => {
                self.list_details(owner, slug).map(Payload::Movies)
            }
            Request::UserDetails { username } => {
                self.user_details(username).map(|u| Payload::User(Box::new(u)))
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(payload) => tracing::info!(
                executable = request.executable(),
                payload = payload.kind(),
                rows = payload.len(),
                elapsed_ms,
                "fetch completed"
            ),
            Err(err) => tracing::warn!(
                executable = request.executable(),
                kind = err.kind(),
                elapsed_ms,
                error = %err,
                "fetch failed"
            ),
        }
        result
    }
}

fn run(executable: &Path, args: &[&str]) -> Result<RawOutput> {
    tracing::debug!(executable = %executable.display(), ?args, "spawning scraper");

    let output = Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| Error::ProcessFailure {
            executable: executable.to_path_buf(),
            status: format!("failed to start: {}", err),
            output: String::new(),
        })?;

    if !output.stderr.is_empty() {
        tracing::debug!(
            executable = %executable.display(),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "scraper stderr"
        );
    }

    Ok(RawOutput {
        success: output.status.success(),
        status: output.status.to_string(),
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
