//! The provisioning pipeline: a fixed, named sequence of steps.
//!
//! Order is load-bearing (toolchains assume the base packages exist) and the
//! package managers hold system-wide locks, so steps run strictly
//! sequentially. Each step declares the binaries it needs as preconditions,
//! checked right before it runs.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::config::SetupConfig;
use crate::envcfg::EnvOverlay;
use crate::pkg::ManagerKind;

pub mod editor;
pub mod packages;
pub mod shell;
pub mod toolchain;

/// Everything a step may consult. The manager is detected once before the
/// pipeline starts and never re-probed.
pub struct StepContext<'a> {
    pub manager: ManagerKind,
    pub env: &'a EnvOverlay,
    pub config: &'a SetupConfig,
    pub home: PathBuf,
    pub debug: bool,
}

pub trait Step {
    fn name(&self) -> &'static str;

    /// Binaries that must be reachable before this step may run.
    fn preconditions(&self) -> &'static [&'static str] {
        &[]
    }

    fn enabled(&self, _config: &SetupConfig) -> bool {
        true
    }

    fn run(&self, ctx: &StepContext) -> Result<()>;
}

/// The pipeline in execution order.
pub fn pipeline() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(packages::BasePackages),
        Box::new(editor::Editor),
        Box::new(shell::Shell),
        Box::new(toolchain::Toolchains),
    ]
}

/// Run every enabled step in order. The first failure halts the whole run.
pub fn run_pipeline(ctx: &StepContext) -> Result<()> {
    for step in pipeline() {
        if !step.enabled(ctx.config) {
            println!("{} {} (disabled in config)", "skip".yellow().bold(), step.name());
            continue;
        }
        for tool in step.preconditions() {
            if !ctx.env.has_tool(tool) {
                bail!(
                    "step '{}' requires '{}', which is not available",
                    step.name(),
                    tool
                );
            }
        }
        println!("{} {}", "==>".blue().bold(), step.name().bold());
        step.run(ctx)
            .with_context(|| format!("step '{}' failed", step.name()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_fixed() {
        let names: Vec<&str> = pipeline().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["base-packages", "editor", "shell", "toolchains"]);
    }

    #[test]
    fn remote_installer_steps_declare_sh() {
        for step in pipeline() {
            if matches!(step.name(), "shell" | "toolchains") {
                assert!(step.preconditions().contains(&"sh"), "{}", step.name());
            }
        }
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let mut config = SetupConfig::default();
        config.editor.enabled = false;
        let editor = editor::Editor;
        assert!(!editor.enabled(&config));
    }
}
