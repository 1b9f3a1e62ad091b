//! Immutable environment overlay threaded into child processes.
//!
//! The shell scripts this tool replaces exported `PATH` and `GOPATH`
//! process-wide so freshly installed toolchains became reachable. The overlay
//! keeps that reachability but is applied per invocation; nothing here
//! mutates the process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use duct::Expression;

use crate::pkg::Platform;

#[derive(Debug, Clone)]
pub struct EnvOverlay {
    /// Directories prepended to PATH for child processes.
    path_entries: Vec<PathBuf>,
    /// Go workspace root, exported as GOPATH.
    gopath: Option<PathBuf>,
}

impl EnvOverlay {
    /// Overlay for a user's home: the directories the toolchain installers
    /// put binaries into, plus the Homebrew prefixes on macOS.
    pub fn for_home(home: &Path, platform: Platform) -> Self {
        let mut path_entries = vec![
            home.join(".cargo/bin"),
            home.join("go/bin"),
            home.join(".bun/bin"),
            home.join(".local/bin"),
        ];
        if platform == Platform::MacOs {
            path_entries.push(PathBuf::from("/opt/homebrew/bin"));
            path_entries.push(PathBuf::from("/usr/local/bin"));
        }
        Self {
            path_entries,
            gopath: Some(home.join("go")),
        }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            path_entries: Vec::new(),
            gopath: None,
        }
    }

    pub fn gopath(&self) -> Option<&Path> {
        self.gopath.as_deref()
    }

    /// PATH value for child processes: overlay entries ahead of the current
    /// process PATH.
    pub fn path_value(&self) -> OsString {
        let current = std::env::var_os("PATH").unwrap_or_default();
        let mut entries = self.path_entries.clone();
        entries.extend(std::env::split_paths(&current));
        std::env::join_paths(entries).unwrap_or(current)
    }

    /// Apply the overlay to a duct expression.
    pub fn apply(&self, expr: Expression) -> Expression {
        let expr = expr.env("PATH", self.path_value());
        match &self.gopath {
            Some(gopath) => expr.env("GOPATH", gopath),
            None => expr,
        }
    }

    /// Probe for a binary with the overlay PATH, so tools installed into
    /// overlay directories earlier in the same run are visible.
    pub fn has_tool(&self, name: &str) -> bool {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(name, Some(self.path_value()), cwd).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn overlay_entries_come_first() {
        let home = Path::new("/home/dev");
        let overlay = EnvOverlay::for_home(home, Platform::Linux);
        let joined = overlay.path_value();
        let first = std::env::split_paths(&joined).next().unwrap();
        assert_eq!(first, home.join(".cargo/bin"));
    }

    #[test]
    #[serial]
    fn current_path_is_preserved() {
        let overlay = EnvOverlay::for_home(Path::new("/home/dev"), Platform::Linux);
        let joined = overlay.path_value();
        let current: Vec<_> =
            std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()).collect();
        let merged: Vec<_> = std::env::split_paths(&joined).collect();
        for dir in &current {
            assert!(merged.contains(dir), "lost PATH entry {}", dir.display());
        }
    }

    #[test]
    fn macos_overlay_includes_brew_prefixes() {
        let overlay = EnvOverlay::for_home(Path::new("/Users/dev"), Platform::MacOs);
        let joined = overlay.path_value();
        let merged: Vec<_> = std::env::split_paths(&joined).collect();
        assert!(merged.contains(&PathBuf::from("/opt/homebrew/bin")));
    }

    #[test]
    fn gopath_points_into_home() {
        let overlay = EnvOverlay::for_home(Path::new("/home/dev"), Platform::Linux);
        assert_eq!(overlay.gopath(), Some(Path::new("/home/dev/go")));
    }
}
