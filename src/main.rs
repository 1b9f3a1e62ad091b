mod backup;
mod config;
mod envcfg;
mod gitops;
mod pkg;
mod remote;
mod steps;
mod verify;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::SetupConfig;
use crate::envcfg::EnvOverlay;
use crate::pkg::{Detection, ManagerKind, Platform};
use crate::steps::StepContext;

/// devup main parser
#[derive(Parser, Debug)]
#[command(name = "devup", author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full provisioning pipeline
    Run {
        /// Path to an alternate config file
        #[arg(long)]
        config: Option<String>,
        /// Skip the post-run verification pass
        #[arg(long)]
        no_verify: bool,
    },
    /// Detect the host package manager and print it
    Detect,
    /// Resolve and install packages ad hoc
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// List the pipeline steps and their preconditions
    Steps,
    /// Probe for the expected tools and report
    Verify {
        /// Path to an alternate config file
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("Debug mode is on");
    }

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run { config, no_verify } => cmd_run(config.as_deref(), *no_verify, cli.debug),
        Commands::Detect => cmd_detect(),
        Commands::Install { packages } => cmd_install(packages),
        Commands::Steps => cmd_steps(),
        Commands::Verify { config } => {
            let config = SetupConfig::load(config.as_deref())?;
            let env = overlay()?;
            verify::run(&config, &env)
        }
    }
}

fn overlay() -> Result<EnvOverlay> {
    let home = dirs::home_dir().context("Unable to determine home directory")?;
    Ok(EnvOverlay::for_home(&home, Platform::current()))
}

/// Detect once, bootstrapping Homebrew when the platform expects it. The
/// returned kind is threaded through the rest of the run without re-probing.
fn detect_or_bootstrap(env: &EnvOverlay) -> Result<ManagerKind> {
    manager_for(pkg::detect(), |kind| {
        println!("{} bootstrapping {}", "==>".blue().bold(), kind);
        pkg::bootstrap_brew(env)
    })
}

/// Map a detection outcome to the manager the run will use. The bootstrap
/// closure runs at most once; its result is final, there is no second probe.
fn manager_for(
    detection: Detection,
    bootstrap: impl FnOnce(ManagerKind) -> Result<ManagerKind>,
) -> Result<ManagerKind> {
    match detection {
        Detection::Ready(kind) => Ok(kind),
        Detection::NeedsBootstrap(kind) => bootstrap(kind),
        Detection::Unknown => bail!(
            "no supported package manager found (looked for apt, dnf, yum, pacman, zypper, brew)"
        ),
    }
}

fn cmd_run(config_path: Option<&str>, no_verify: bool, debug: bool) -> Result<()> {
    let config = SetupConfig::load(config_path)?;
    let home = dirs::home_dir().context("Unable to determine home directory")?;
    let env = EnvOverlay::for_home(&home, Platform::current());

    let manager = detect_or_bootstrap(&env)?;
    println!("{} using {}", "==>".blue().bold(), manager.to_string().bold());

    let ctx = StepContext {
        manager,
        env: &env,
        config: &config,
        home,
        debug,
    };
    steps::run_pipeline(&ctx)?;

    if !no_verify {
        verify::run(&config, &env)?;
    }
    println!("{}", "Development environment ready.".green().bold());
    Ok(())
}

fn cmd_detect() -> Result<()> {
    match pkg::detect() {
        Detection::Ready(kind) => println!("{kind}"),
        Detection::NeedsBootstrap(kind) => println!("{kind} (not installed, bootstrap available)"),
        Detection::Unknown => bail!("no supported package manager found"),
    }
    Ok(())
}

fn cmd_install(packages: &[String]) -> Result<()> {
    let env = overlay()?;
    let manager = detect_or_bootstrap(&env)?;
    for generic in packages {
        let name = pkg::resolve(manager, generic);
        println!("{} installing {} via {}", "==>".blue().bold(), name.bold(), manager);
        pkg::install(manager, name, &env)?;
    }
    Ok(())
}

fn cmd_steps() -> Result<()> {
    for step in steps::pipeline() {
        let preconditions = step.preconditions();
        if preconditions.is_empty() {
            println!("{}", step.name());
        } else {
            println!("{} (requires: {})", step.name(), preconditions.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn ready_manager_skips_bootstrap() {
        let called = Cell::new(false);
        let manager = manager_for(Detection::Ready(ManagerKind::Pacman), |kind| {
            called.set(true);
            Ok(kind)
        })
        .unwrap();
        assert_eq!(manager, ManagerKind::Pacman);
        assert!(!called.get());
    }

    #[test]
    fn macos_bootstrap_runs_once_then_proceeds_with_brew() {
        let calls = Cell::new(0);
        let manager = manager_for(Detection::NeedsBootstrap(ManagerKind::Brew), |kind| {
            calls.set(calls.get() + 1);
            Ok(kind)
        })
        .unwrap();
        // The bootstrapped manager is the one the whole run uses; there is
        // no path back into detection from here.
        assert_eq!(manager, ManagerKind::Brew);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unknown_detection_is_fatal() {
        let result = manager_for(Detection::Unknown, Ok);
        assert!(result.is_err());
    }
}
