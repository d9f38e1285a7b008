//! Movie quote shown on the menu screen, read from `assets/movie_quotes.csv`.
//!
//! The file has a header row and then `quote,movie,type,year` records.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

pub const QUOTES_FILE: &str = "movie_quotes.csv";
const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub movie: String,
    pub year: String,
}

impl Quote {
    /// `Movie (Year)`
    pub fn source(&self) -> String {
        format!("{} ({})", self.movie, self.year)
    }
}

/// Candidate quote files in search order:
/// `$SNAP/assets`, `<binary dir>/assets`, `<cwd>/assets`, `<cwd>/../../assets`.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(snap) = std::env::var_os("SNAP").filter(|s| !s.is_empty()) {
        paths.push(PathBuf::from(snap).join(ASSETS_DIR).join(QUOTES_FILE));
    }
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        paths.push(dir.join(ASSETS_DIR).join(QUOTES_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(ASSETS_DIR).join(QUOTES_FILE));
        paths.push(cwd.join("..").join("..").join(ASSETS_DIR).join(QUOTES_FILE));
    }

    paths
}

/// Pick a quote from the first quote file that exists.
pub fn load_random_quote() -> Result<Quote> {
    let candidates = candidate_paths();
    let path = candidates.iter().find(|p| p.is_file()).ok_or_else(|| {
        let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Error::Quotes(format!("{} not found at {}", QUOTES_FILE, tried.join(" or ")))
    })?;
    let quotes = read_quotes(path)?;
    pick(&quotes, seed()).cloned().ok_or_else(|| {
        Error::Quotes(format!("{} is empty or has no header", path.display()))
    })
}

pub fn read_quotes(path: &Path) -> Result<Vec<Quote>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Quotes(format!("could not open {}: {}", path.display(), e)))?;

    let mut quotes = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| Error::Quotes(format!("failed to parse {}: {}", path.display(), e)))?;
        if record.len() < 4 {
            return Err(Error::Quotes(format!(
                "invalid record {} in {}: expected 4 columns, got {}",
                line + 2,
                path.display(),
                record.len()
            )));
        }
        quotes.push(Quote {
            text: record[0].to_string(),
            movie: record[1].to_string(),
            year: record[3].to_string(),
        });
    }
    Ok(quotes)
}

fn pick(quotes: &[Quote], seed: u64) -> Option<&Quote> {
    if quotes.is_empty() {
        return None;
    }
    quotes.get((seed % quotes.len() as u64) as usize)
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "quote,movie,type,year\n\
        \"Here's looking at you, kid.\",Casablanca,movie,1942\n\
        \"I'll be back.\",The Terminator,movie,1984\n";

    #[test]
    fn test_read_quotes_skips_header() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(QUOTES_FILE);
        std::fs::write(&path, SAMPLE)?;

        let quotes = read_quotes(&path)?;
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "Here's looking at you, kid.");
        assert_eq!(quotes[1].source(), "The Terminator (1984)");
        Ok(())
    }

    #[test]
    fn test_short_record_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join(QUOTES_FILE);
        std::fs::write(&path, "quote,movie,type,year\nonly,two\n")?;

        assert!(matches!(read_quotes(&path), Err(Error::Quotes(_))));
        Ok(())
    }

    #[test]
    fn test_pick_wraps_seed() {
        let quotes = vec![
            Quote {
                text: "a".into(),
                movie: "A".into(),
                year: "1".into(),
            },
            Quote {
                text: "b".into(),
                movie: "B".into(),
                year: "2".into(),
            },
        ];
        assert_eq!(pick(&quotes, 3).unwrap().text, "b");
        assert_eq!(pick(&quotes, 4).unwrap().text, "a");
        assert!(pick(&[], 7).is_none());
    }
}
