//! Generic-to-concrete package name resolution.
//!
//! Pure and total: any name without an override resolves to itself. Config
//! file overrides take precedence over the builtin cases.

use std::collections::HashMap;

use super::ManagerKind;

/// Map a generic package name to the manager-specific one. No I/O.
///
/// The builtin cases cover the handful of packages whose names genuinely
/// differ between managers; everything else passes through unchanged.
pub fn resolve<'a>(manager: ManagerKind, generic: &'a str) -> &'a str {
    match (manager, generic) {
        // Homebrew's python formula ships pip, there is no separate package.
        (ManagerKind::Brew, "python3-pip") => "python3",

        // Compiler toolchain meta packages.
        (ManagerKind::Apt, "gcc") => "build-essential",
        (ManagerKind::Pacman, "gcc") => "base-devel",

        // Go toolchain.
        (ManagerKind::Pacman | ManagerKind::Zypper | ManagerKind::Brew, "golang") => "go",

        // Node.js runtime.
        (ManagerKind::Brew, "nodejs") => "node",

        _ => generic,
    }
}

/// A package to install: a generic name plus optional per-manager overrides
/// from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub overrides: HashMap<ManagerKind, String>,
}

impl PackageRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_override(mut self, manager: ManagerKind, concrete: impl Into<String>) -> Self {
        self.overrides.insert(manager, concrete.into());
        self
    }

    /// Concrete package name for `manager`: explicit override first, then the
    /// builtin resolver.
    pub fn resolved(&self, manager: ManagerKind) -> String {
        match self.overrides.get(&manager) {
            Some(concrete) => concrete.clone(),
            None => resolve(manager, &self.name).to_string(),
        }
    }
}
