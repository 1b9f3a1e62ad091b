//! Language toolchains: Rust, Go, Node.js, Bun.
//!
//! Each sub-install is skipped when the tool is already reachable; there is
//! no version management here, only presence.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use duct::cmd;

use super::{Step, StepContext};
use crate::config::SetupConfig;
use crate::pkg;
use crate::remote;

const RUSTUP_INSTALLER: &str = "https://sh.rustup.rs";
const BUN_INSTALLER: &str = "https://bun.sh/install";

pub struct Toolchains;

impl Step for Toolchains {
    fn name(&self) -> &'static str {
        "toolchains"
    }

    fn preconditions(&self) -> &'static [&'static str] {
        &["sh"]
    }

    fn enabled(&self, config: &SetupConfig) -> bool {
        let t = &config.toolchains;
        t.rust || t.go || t.node || t.bun
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        let t = &ctx.config.toolchains;

        if t.rust && !ctx.env.has_tool("cargo") {
            println!("    installing Rust via rustup");
            // PATH handling stays with the overlay, not the installer.
            remote::fetch_and_run(
                RUSTUP_INSTALLER,
                "sh",
                &["-y", "--no-modify-path"],
                &[],
                ctx.env,
            )?;
        }

        if t.go && !ctx.env.has_tool("go") {
            let name = pkg::resolve(ctx.manager, "golang");
            println!("    installing {}", name.bold());
            pkg::install(ctx.manager, name, ctx.env)?;
        }

        if t.node {
            if !ctx.env.has_tool("node") {
                let name = pkg::resolve(ctx.manager, "nodejs");
                println!("    installing {}", name.bold());
                pkg::install(ctx.manager, name, ctx.env)?;
            }
            // npm is a separate package on some distros.
            if !ctx.env.has_tool("npm") {
                println!("    installing {}", "npm".bold());
                pkg::install(ctx.manager, pkg::resolve(ctx.manager, "npm"), ctx.env)?;
            }
            install_npm_globals(ctx, &t.npm_globals)?;
        }

        if t.bun && !ctx.env.has_tool("bun") {
            println!("    installing Bun");
            remote::fetch_and_run(BUN_INSTALLER, "bash", &[], &[], ctx.env)?;
        }

        Ok(())
    }
}

fn install_npm_globals(ctx: &StepContext, globals: &[String]) -> Result<()> {
    if globals.is_empty() {
        return Ok(());
    }
    // Node must be in place before npm can install anything on top of it.
    if !ctx.env.has_tool("npm") {
        bail!("npm is required for global packages but is still not reachable");
    }

    let mut args = vec!["install", "-g"];
    args.extend(globals.iter().map(String::as_str));
    println!("    npm install -g {}", globals.join(" "));
    ctx.env
        .apply(cmd("npm", args))
        .run()
        .context("installing global npm packages")?;
    Ok(())
}
