//! Stand-in executables for gateway tests.
//!
//! Each script prints a fixed stdout, records its arguments one per line in
//! `<name>.args`, and exits with the given code. Unix only.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct FakeBin {
    dir: TempDir,
}

impl FakeBin {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create fake bin dir")?;
        Ok(Self { dir })
    }

    /// Directory holding the scripts; pass it to the executable locator.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable `name` that prints `stdout` and exits with `exit_code`.
    pub fn script(&self, name: &str, stdout: &str, exit_code: i32) -> Result<PathBuf> {
        self.write_script(name, stdout, "", exit_code)
    }

    /// Like `script`, also writing `stderr` to the error stream.
    pub fn script_with_stderr(
        &self,
        name: &str,
        stdout: &str,
        stderr: &str,
        exit_code: i32,
    ) -> Result<PathBuf> {
        self.write_script(name, stdout, stderr, exit_code)
    }

    /// Arguments the script `name` received on its last run.
    pub fn recorded_args(&self, name: &str) -> Result<Vec<String>> {
        let path = self.args_path(name);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("{} was never invoked", name))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn args_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{}.args", name))
    }

    fn write_script(
        &self,
        name: &str,
        stdout: &str,
        stderr: &str,
        exit_code: i32,
    ) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        let args_path = self.args_path(name);

        let mut body = String::from("#!/bin/sh\n");
        body.push_str(&format!(
            "for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > '{}'\n",
            args_path.display()
        ));
        if !stdout.is_empty() {
            body.push_str("cat <<'LETTERBOX_STDOUT'\n");
            body.push_str(stdout);
            body.push_str("\nLETTERBOX_STDOUT\n");
        }
        if !stderr.is_empty() {
            body.push_str("cat >&2 <<'LETTERBOX_STDERR'\n");
            body.push_str(stderr);
            body.push_str("\nLETTERBOX_STDERR\n");
        }
        body.push_str(&format!("exit {}\n", exit_code));

        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        make_executable(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_script_prints_stdout_and_records_args() -> Result<()> {
        let bin = FakeBin::new()?;
        let path = bin.script("search_movie", "[]", 0)?;

        let output = Command::new(&path).arg("the thing").output()?;
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
        assert_eq!(bin.recorded_args("search_movie")?, vec!["the thing"]);
        Ok(())
    }

    #[test]
    fn test_script_exit_code() -> Result<()> {
        let bin = FakeBin::new()?;
        let path = bin.script("get_diary", "", 3)?;

        let output = Command::new(&path).output()?;
        assert_eq!(output.status.code(), Some(3));
        Ok(())
    }
}
