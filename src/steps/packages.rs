//! Base package installation through the detected manager.

use anyhow::Result;
use colored::Colorize;

use super::{Step, StepContext};
use crate::pkg;

pub struct BasePackages;

impl Step for BasePackages {
    fn name(&self) -> &'static str {
        "base-packages"
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        // A stale mirror must not abort provisioning.
        if let Err(e) = pkg::refresh_index(ctx.manager, ctx.env) {
            eprintln!("{} package index refresh failed: {e}", "warning:".yellow().bold());
        }

        for request in ctx.config.package_requests()? {
            let name = request.resolved(ctx.manager);
            if ctx.debug && name != request.name {
                eprintln!("resolved '{}' to '{}' for {}", request.name, name, ctx.manager);
            }
            println!("    installing {}", name.bold());
            pkg::install(ctx.manager, &name, ctx.env)?;
        }
        Ok(())
    }
}
