//! One-time Homebrew bootstrap for macOS hosts that lack it.

use anyhow::{Result, bail};

use super::ManagerKind;
use crate::envcfg::EnvOverlay;
use crate::remote;

const BREW_INSTALLER: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Install Homebrew via its official installer and confirm the binary is
/// reachable afterwards. Called at most once per run, before the pipeline
/// starts; the rest of the run then uses `ManagerKind::Brew` without ever
/// re-probing.
pub fn bootstrap_brew(env: &EnvOverlay) -> Result<ManagerKind> {
    remote::fetch_and_run(
        BREW_INSTALLER,
        "bash",
        &[],
        &[("NONINTERACTIVE", "1")],
        env,
    )?;

    if !env.has_tool("brew") {
        bail!("homebrew installer finished but 'brew' is still not reachable");
    }
    Ok(ManagerKind::Brew)
}
