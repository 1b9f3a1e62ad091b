//! Remote installer scripts: fetch over HTTPS, pipe into an interpreter.
//!
//! No retry and no integrity verification beyond TLS - the upstream
//! installers perform their own checks where they care to.

use anyhow::{Context, Result, bail};
use duct::cmd;

use crate::envcfg::EnvOverlay;

/// Fetch the script at `url` and run it as `<interpreter> -s -- <args>` with
/// the script on stdin. `vars` are extra environment variables some
/// installers require (e.g. `NONINTERACTIVE=1`).
pub fn fetch_and_run(
    url: &str,
    interpreter: &str,
    args: &[&str],
    vars: &[(&str, &str)],
    env: &EnvOverlay,
) -> Result<()> {
    let script = fetch_script(url)?;
    run_script(&script, interpreter, args, vars, env)
        .with_context(|| format!("running installer from {url}"))
}

fn fetch_script(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url).with_context(|| format!("fetching {url}"))?;
    if !response.status().is_success() {
        bail!("fetching {url} returned HTTP {}", response.status());
    }
    response.text().context("reading installer script body")
}

fn run_script(
    script: &str,
    interpreter: &str,
    args: &[&str],
    vars: &[(&str, &str)],
    env: &EnvOverlay,
) -> Result<()> {
    let mut argv = vec!["-s", "--"];
    argv.extend_from_slice(args);

    let mut expr = env.apply(cmd(interpreter, argv).stdin_bytes(script.as_bytes().to_vec()));
    for (key, value) in vars {
        expr = expr.env(key, value);
    }
    expr.run()?;
    Ok(())
}
