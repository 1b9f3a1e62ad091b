//! Install dispatch: exhaustive match from manager to its non-interactive
//! install invocation.

use duct::cmd;
use thiserror::Error;

use super::ManagerKind;
use crate::envcfg::EnvOverlay;

/// Typed failure for a single install operation. Any failure is fatal to the
/// whole run; callers propagate immediately, there are no retries.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("no supported package manager available to install '{package}'")]
    UnsupportedManager { package: String },
    #[error("{manager} exited with status {status} while installing '{package}'")]
    CommandFailed {
        manager: ManagerKind,
        package: String,
        status: i32,
    },
    #[error("permission denied running {program}")]
    PermissionDenied { program: &'static str },
    #[error("failed to spawn {program}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type InstallOutcome = Result<(), InstallError>;

/// The non-interactive install invocation for a manager, with the package
/// name appended. `None` for the unknown sentinel.
pub fn install_invocation(
    manager: ManagerKind,
    package: &str,
) -> Option<(&'static str, Vec<String>)> {
    let base: &'static [&'static str] = match manager {
        ManagerKind::Apt => &["apt-get", "install", "-y"],
        ManagerKind::Dnf => &["dnf", "install", "-y"],
        ManagerKind::Yum => &["yum", "install", "-y"],
        ManagerKind::Pacman => &["pacman", "-S", "--noconfirm"],
        ManagerKind::Zypper => &["zypper", "--non-interactive", "install"],
        ManagerKind::Brew => &["brew", "install"],
        ManagerKind::Unknown => return None,
    };
    Some(assemble(manager, base, Some(package)))
}

/// Index refresh invocation. `None` for the unknown sentinel.
fn refresh_invocation(manager: ManagerKind) -> Option<(&'static str, Vec<String>)> {
    let base: &'static [&'static str] = match manager {
        ManagerKind::Apt => &["apt-get", "update"],
        ManagerKind::Dnf => &["dnf", "makecache"],
        ManagerKind::Yum => &["yum", "makecache"],
        ManagerKind::Pacman => &["pacman", "-Sy", "--noconfirm"],
        ManagerKind::Zypper => &["zypper", "--non-interactive", "refresh"],
        ManagerKind::Brew => &["brew", "update"],
        ManagerKind::Unknown => return None,
    };
    Some(assemble(manager, base, None))
}

/// Prefix sudo where the manager needs system-wide write access; Homebrew
/// refuses to run as root and gets its own binary as the program.
fn assemble(
    manager: ManagerKind,
    base: &'static [&'static str],
    package: Option<&str>,
) -> (&'static str, Vec<String>) {
    let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
    if let Some(package) = package {
        args.push(package.to_string());
    }
    if manager.needs_sudo() {
        ("sudo", args)
    } else {
        args.remove(0);
        (base[0], args)
    }
}

/// Install a single resolved package. Blocking; the package manager holds its
/// own system-wide lock, so calls are never parallelized.
pub fn install(manager: ManagerKind, package: &str, env: &EnvOverlay) -> InstallOutcome {
    let Some((program, args)) = install_invocation(manager, package) else {
        return Err(InstallError::UnsupportedManager {
            package: package.to_string(),
        });
    };
    run_checked(manager, program, &args, package, env)
}

/// Refresh the manager's package index. Callers treat a failure here as a
/// warning, not a fatal error: a stale mirror should not abort provisioning.
pub fn refresh_index(manager: ManagerKind, env: &EnvOverlay) -> InstallOutcome {
    let Some((program, args)) = refresh_invocation(manager) else {
        return Err(InstallError::UnsupportedManager {
            package: "(index refresh)".to_string(),
        });
    };
    run_checked(manager, program, &args, "(index refresh)", env)
}

fn run_checked(
    manager: ManagerKind,
    program: &'static str,
    args: &[String],
    package: &str,
    env: &EnvOverlay,
) -> InstallOutcome {
    let expr = env.apply(cmd(program, args)).unchecked();
    match expr.run() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(InstallError::CommandFailed {
            manager,
            package: package.to_string(),
            status: output.status.code().unwrap_or(-1),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(InstallError::PermissionDenied { program })
        }
        Err(e) => Err(InstallError::Spawn { program, source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_manager_fails_without_spawning() {
        // No invocation exists for the sentinel, so install() returns before
        // any process could be spawned.
        assert!(install_invocation(ManagerKind::Unknown, "git").is_none());

        let outcome = install(ManagerKind::Unknown, "git", &EnvOverlay::empty());
        assert!(matches!(
            outcome,
            Err(InstallError::UnsupportedManager { package }) if package == "git"
        ));
    }

    #[test]
    fn pacman_uses_noconfirm_under_sudo() {
        let (program, args) = install_invocation(ManagerKind::Pacman, "git").unwrap();
        assert_eq!(program, "sudo");
        assert_eq!(args, ["pacman", "-S", "--noconfirm", "git"]);
    }

    #[test]
    fn apt_uses_assume_yes() {
        let (program, args) = install_invocation(ManagerKind::Apt, "zsh").unwrap();
        assert_eq!(program, "sudo");
        assert_eq!(args, ["apt-get", "install", "-y", "zsh"]);
    }

    #[test]
    fn brew_runs_without_sudo() {
        let (program, args) = install_invocation(ManagerKind::Brew, "neovim").unwrap();
        assert_eq!(program, "brew");
        assert_eq!(args, ["install", "neovim"]);
    }

    #[test]
    fn zypper_is_non_interactive() {
        let (_, args) = install_invocation(ManagerKind::Zypper, "git").unwrap();
        assert!(args.contains(&"--non-interactive".to_string()));
    }

    #[test]
    fn refresh_on_unknown_is_unsupported() {
        let outcome = refresh_index(ManagerKind::Unknown, &EnvOverlay::empty());
        assert!(matches!(
            outcome,
            Err(InstallError::UnsupportedManager { .. })
        ));
    }

    #[test]
    fn refresh_uses_the_update_form() {
        let (program, args) = refresh_invocation(ManagerKind::Apt).unwrap();
        assert_eq!(program, "sudo");
        assert_eq!(args, ["apt-get", "update"]);

        let (program, args) = refresh_invocation(ManagerKind::Brew).unwrap();
        assert_eq!(program, "brew");
        assert_eq!(args, ["update"]);
    }
}
