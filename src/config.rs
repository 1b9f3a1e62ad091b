//! The `devup` config file.
//!
//! TOML under the user config directory. Every field has a default, so a
//! missing file and an empty file both mean "provision everything".

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pkg::{ManagerKind, PackageRequest};

/// Default config path: `<config dir>/devup/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("devup");
    Ok(config_dir.join("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Base packages installed before any other step.
    pub packages: Vec<PackageEntry>,
    pub editor: EditorConfig,
    pub shell: ShellConfig,
    pub toolchains: ToolchainConfig,
    /// Tools that must be on PATH after a successful run, in addition to the
    /// ones implied by the enabled steps.
    pub expected_tools: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            packages: ["git", "curl", "unzip", "gcc", "python3-pip"]
                .into_iter()
                .map(PackageEntry::plain)
                .collect(),
            editor: EditorConfig::default(),
            shell: ShellConfig::default(),
            toolchains: ToolchainConfig::default(),
            expected_tools: vec!["git".to_string(), "curl".to_string()],
        }
    }
}

impl SetupConfig {
    /// Load from `path`, or from the default location; absent file means
    /// defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(shellexpand::tilde(p).into_owned()),
            None => default_config_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config at {}", path.display()))
    }

    /// The base package list as resolver requests. Fails on an override table
    /// keyed by an unsupported manager name.
    pub fn package_requests(&self) -> Result<Vec<PackageRequest>> {
        self.packages.iter().map(PackageEntry::to_request).collect()
    }
}

/// One base package: a generic name plus optional per-manager name overrides,
/// e.g. `{ name = "python3-pip", overrides = { brew = "python3" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

impl PackageEntry {
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            overrides: HashMap::new(),
        }
    }

    fn to_request(&self) -> Result<PackageRequest> {
        let mut request = PackageRequest::new(&self.name);
        for (key, concrete) in &self.overrides {
            let manager = ManagerKind::from_key(key).with_context(|| {
                format!("unknown package manager '{key}' in override for '{}'", self.name)
            })?;
            request.overrides.insert(manager, concrete.clone());
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub enabled: bool,
    /// Neovim configuration repository cloned into `~/.config/nvim`.
    pub config_repo: String,
    pub branch: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            config_repo: "https://github.com/nvim-lua/kickstart.nvim".to_string(),
            branch: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub enabled: bool,
    pub oh_my_zsh: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            oh_my_zsh: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    pub rust: bool,
    pub go: bool,
    pub node: bool,
    pub bun: bool,
    /// Packages installed globally through npm once Node.js is present.
    pub npm_globals: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            rust: true,
            go: true,
            node: true,
            bun: true,
            npm_globals: vec![
                "typescript-language-server".to_string(),
                "prettier".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config: SetupConfig = toml::from_str("").unwrap();
        assert!(config.editor.enabled);
        assert!(config.toolchains.rust);
        assert!(config.packages.iter().any(|p| p.name == "git"));
    }

    #[test]
    fn overrides_parse_into_requests() {
        let raw = r#"
            [[packages]]
            name = "python3-pip"
            [packages.overrides]
            brew = "python3"

            [toolchains]
            bun = false
        "#;
        let config: SetupConfig = toml::from_str(raw).unwrap();
        assert!(!config.toolchains.bun);

        let requests = config.package_requests().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].resolved(ManagerKind::Brew), "python3");
        assert_eq!(requests[0].resolved(ManagerKind::Apt), "python3-pip");
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let raw = r#"
            [[packages]]
            name = "git"
            [packages.overrides]
            choco = "git"
        "#;
        let config: SetupConfig = toml::from_str(raw).unwrap();
        assert!(config.package_requests().is_err());
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        assert!(toml::from_str::<SetupConfig>("stepz = []").is_err());
    }
}
