use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Subdirectory holding bundled scrapers, next to the binary or in a package root
pub const BUNDLED_SUBDIR: &str = "py_execs";

/// Development build output: `<cwd>/../../dist_py/<os>_<arch>/`
const DEV_DIST_DIR: &str = "dist_py";

/// Finds scraper executables across an ordered list of candidate directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableLocator {
    dirs: Vec<PathBuf>,
}

impl ExecutableLocator {
    /// Search order:
    /// 1. Configured `executables_dir` (if any)
    /// 2. `$SNAP/py_execs` for packaged installs
    /// 3. `<directory of the running binary>/py_execs`
    /// 4. `<cwd>/../../dist_py/<os>_<arch>` for development trees
    pub fn from_environment(configured: Option<&Path>) -> Self {
        let mut dirs = Vec::new();

        if let Some(dir) = configured {
            dirs.push(dir.to_path_buf());
        }

        if let Some(snap) = std::env::var_os("SNAP").filter(|s| !s.is_empty()) {
            dirs.push(PathBuf::from(snap).join(BUNDLED_SUBDIR));
        }

        if let Ok(exe) = std::env::current_exe()
            && let Some(exe_dir) = exe.parent()
        {
            dirs.push(exe_dir.join(BUNDLED_SUBDIR));
        }

        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd.join("..").join("..").join(DEV_DIST_DIR).join(platform_dir()));
        }

        Self { dirs }
    }

    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Every path that would be tried for `name`, in order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let file_name = executable_file_name(name);
        self.dirs.iter().map(|dir| dir.join(&file_name)).collect()
    }

    pub fn locate(&self, name: &str) -> Result<PathBuf> {
        let candidates = self.candidates(name);
        match candidates.iter().find(|path| path.is_file()) {
            Some(found) => Ok(found.clone()),
            None => Err(Error::ExecutableNotFound {
                name: name.to_string(),
                searched: candidates,
            }),
        }
    }
}

/// `<os>_<arch>` in the naming used by the scraper build (`linux_amd64`, `darwin_arm64`, ...).
pub fn platform_dir() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    };
    format!("{}_{}", os, arch)
}

pub fn executable_file_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}
