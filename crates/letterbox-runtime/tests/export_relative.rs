//! Relative export paths resolve against the working directory. Kept in its
//! own test binary because it changes the process cwd.

use anyhow::Result;
use letterbox_runtime::ExportRows;
use letterbox_types::Movie;
use tempfile::TempDir;

#[test]
fn relative_path_creates_directory_and_reports_absolute_path() -> Result<()> {
    let dir = TempDir::new()?;
    std::env::set_current_dir(dir.path())?;

    let rows = ExportRows::Watchlist(vec![Movie {
        title: "Alien".to_string(),
        year: 1979,
        slug: "alien".to_string(),
        director: "Ridley Scott".to_string(),
    }]);
    let report = rows.write_to("exports/out.csv")?;

    assert!(report.path.is_absolute());
    assert!(report.path.ends_with("exports/out.csv"));
    assert!(dir.path().join("exports").is_dir());
    assert_eq!(std::fs::read_to_string(&report.path)?.lines().count(), 2);
    Ok(())
}
