//! Neovim plus its configuration repository.

use anyhow::Result;
use colored::Colorize;

use super::{Step, StepContext};
use crate::backup::backup_existing;
use crate::config::SetupConfig;
use crate::gitops::clone_config_repo;
use crate::pkg;

pub struct Editor;

impl Step for Editor {
    fn name(&self) -> &'static str {
        "editor"
    }

    fn enabled(&self, config: &SetupConfig) -> bool {
        config.editor.enabled
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        if !ctx.env.has_tool("nvim") {
            let name = pkg::resolve(ctx.manager, "neovim");
            println!("    installing {}", name.bold());
            pkg::install(ctx.manager, name, ctx.env)?;
        }

        let target = ctx.home.join(".config/nvim");
        if target.join(".git").exists() {
            // An earlier run already cloned here; leave it alone rather than
            // stacking clones inside it.
            println!("    {} already present, leaving in place", target.display());
            return Ok(());
        }

        if let Some(backup) = backup_existing(&target)? {
            println!("    backed up existing config to {}", backup.display());
        }

        let editor = &ctx.config.editor;
        println!("    cloning {}", editor.config_repo);
        clone_config_repo(&editor.config_repo, &target, editor.branch.as_deref())?;
        Ok(())
    }
}
