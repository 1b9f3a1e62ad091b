//! zsh, Oh My Zsh, and the managed `.zshrc`.

use anyhow::{Context, Result};
use colored::Colorize;

use super::{Step, StepContext};
use crate::backup::backup_existing;
use crate::config::SetupConfig;
use crate::pkg;
use crate::remote;

const OH_MY_ZSH_INSTALLER: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// The one static configuration file this tool writes. PATH entries mirror
/// the runtime overlay so interactive shells see the same toolchains.
const ZSHRC: &str = "\
# Managed by devup
export ZSH=\"$HOME/.oh-my-zsh\"
ZSH_THEME=\"robbyrussell\"
plugins=(git rust golang)
[ -f \"$ZSH/oh-my-zsh.sh\" ] && source \"$ZSH/oh-my-zsh.sh\"

export GOPATH=\"$HOME/go\"
export PATH=\"$HOME/.cargo/bin:$GOPATH/bin:$HOME/.bun/bin:$HOME/.local/bin:$PATH\"
";

pub struct Shell;

impl Step for Shell {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn preconditions(&self) -> &'static [&'static str] {
        &["sh"]
    }

    fn enabled(&self, config: &SetupConfig) -> bool {
        config.shell.enabled
    }

    fn run(&self, ctx: &StepContext) -> Result<()> {
        if !ctx.env.has_tool("zsh") {
            println!("    installing {}", "zsh".bold());
            pkg::install(ctx.manager, pkg::resolve(ctx.manager, "zsh"), ctx.env)?;
        }

        if ctx.config.shell.oh_my_zsh && !ctx.home.join(".oh-my-zsh").exists() {
            println!("    bootstrapping Oh My Zsh");
            // --unattended: no shell switch, no zsh exec at the end.
            remote::fetch_and_run(OH_MY_ZSH_INSTALLER, "sh", &["--unattended"], &[], ctx.env)?;
        }

        let zshrc = ctx.home.join(".zshrc");
        if let Some(backup) = backup_existing(&zshrc)? {
            println!("    backed up existing .zshrc to {}", backup.display());
        }
        std::fs::write(&zshrc, ZSHRC)
            .with_context(|| format!("writing {}", zshrc.display()))?;
        println!("    wrote {}", zshrc.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zshrc_wires_up_the_overlay_directories() {
        for dir in [".cargo/bin", "$GOPATH/bin", ".bun/bin", ".local/bin"] {
            assert!(ZSHRC.contains(dir), "missing {dir}");
        }
        assert!(ZSHRC.contains("GOPATH"));
    }
}
