//! Package manager kinds and host detection.

/// The package managers this tool knows how to drive - single source of truth
/// for the resolver and the install dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerKind {
    /// APT - Debian/Ubuntu family
    Apt,
    /// DNF - Fedora/RHEL family
    Dnf,
    /// Yum - older RHEL/CentOS
    Yum,
    /// Pacman - Arch family
    Pacman,
    /// Zypper - openSUSE
    Zypper,
    /// Homebrew - macOS
    Brew,
    /// Sentinel: no supported package manager on this host.
    Unknown,
}

/// Linux managers in probe order. First hit wins; a host with several
/// managers installed always detects the same one.
const LINUX_PROBE_ORDER: &[ManagerKind] = &[
    ManagerKind::Apt,
    ManagerKind::Dnf,
    ManagerKind::Yum,
    ManagerKind::Pacman,
    ManagerKind::Zypper,
];

impl ManagerKind {
    /// Binary name probed for during detection. `None` for the sentinel.
    pub fn binary(&self) -> Option<&'static str> {
        match self {
            Self::Apt => Some("apt-get"),
            Self::Dnf => Some("dnf"),
            Self::Yum => Some("yum"),
            Self::Pacman => Some("pacman"),
            Self::Zypper => Some("zypper"),
            Self::Brew => Some("brew"),
            Self::Unknown => None,
        }
    }

    /// Whether install invocations need a sudo prefix. Homebrew refuses to
    /// run as root, so only the Linux system managers escalate.
    pub fn needs_sudo(&self) -> bool {
        matches!(
            self,
            Self::Apt | Self::Dnf | Self::Yum | Self::Pacman | Self::Zypper
        )
    }

    /// Parse a config-file key (`apt`, `brew`, ...). The sentinel is not a
    /// valid key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "apt" => Some(Self::Apt),
            "dnf" => Some(Self::Dnf),
            "yum" => Some(Self::Yum),
            "pacman" => Some(Self::Pacman),
            "zypper" => Some(Self::Zypper),
            "brew" => Some(Self::Brew),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Brew => "homebrew",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unix platform family, as the scripts' `OSTYPE` check distinguished it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// Outcome of probing the host for a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Manager binary is on PATH and usable.
    Ready(ManagerKind),
    /// The platform's expected manager is absent but installable
    /// (Homebrew on macOS).
    NeedsBootstrap(ManagerKind),
    /// No supported package manager found.
    Unknown,
}

/// Probe the host for its package manager: platform check first, then the
/// ordered list of manager binaries. No side effects.
pub fn detect() -> Detection {
    detect_with(Platform::current(), |bin| which::which(bin).is_ok())
}

/// Detection core with an injectable binary probe, so tests can decide which
/// binaries "exist" without touching the host.
pub fn detect_with(platform: Platform, probe: impl Fn(&str) -> bool) -> Detection {
    match platform {
        Platform::MacOs => {
            if probe("brew") {
                Detection::Ready(ManagerKind::Brew)
            } else {
                Detection::NeedsBootstrap(ManagerKind::Brew)
            }
        }
        Platform::Linux => LINUX_PROBE_ORDER
            .iter()
            .copied()
            .find(|kind| kind.binary().is_some_and(|bin| probe(bin)))
            .map(Detection::Ready)
            .unwrap_or(Detection::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacman_only_host_detects_pacman() {
        let detection = detect_with(Platform::Linux, |bin| bin == "pacman");
        assert_eq!(detection, Detection::Ready(ManagerKind::Pacman));
    }

    #[test]
    fn no_manager_detects_unknown() {
        let detection = detect_with(Platform::Linux, |_| false);
        assert_eq!(detection, Detection::Unknown);
    }

    #[test]
    fn probe_order_prefers_apt_over_later_managers() {
        let detection = detect_with(Platform::Linux, |bin| {
            matches!(bin, "apt-get" | "pacman" | "zypper")
        });
        assert_eq!(detection, Detection::Ready(ManagerKind::Apt));
    }

    #[test]
    fn macos_with_brew_is_ready() {
        let detection = detect_with(Platform::MacOs, |bin| bin == "brew");
        assert_eq!(detection, Detection::Ready(ManagerKind::Brew));
    }

    #[test]
    fn macos_without_brew_needs_bootstrap() {
        // Even with a Linux manager binary lying around, macOS hosts never
        // detect anything but Homebrew.
        let detection = detect_with(Platform::MacOs, |bin| bin == "pacman");
        assert_eq!(detection, Detection::NeedsBootstrap(ManagerKind::Brew));
    }

    #[test]
    fn detection_is_deterministic() {
        let probe = |bin: &str| matches!(bin, "dnf" | "zypper");
        assert_eq!(
            detect_with(Platform::Linux, probe),
            detect_with(Platform::Linux, probe)
        );
    }

    #[test]
    fn sudo_policy() {
        assert!(ManagerKind::Apt.needs_sudo());
        assert!(ManagerKind::Pacman.needs_sudo());
        assert!(!ManagerKind::Brew.needs_sudo());
        assert!(!ManagerKind::Unknown.needs_sudo());
    }
}
