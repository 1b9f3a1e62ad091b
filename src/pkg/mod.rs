//! Package manager abstraction: detection, name resolution, install dispatch.
//!
//! The manager is detected exactly once per run and threaded through every
//! subsequent call as a plain value - nothing in this module re-probes the
//! host mid-run.

pub mod bootstrap;
pub mod install;
pub mod manager;
pub mod resolve;

pub use bootstrap::bootstrap_brew;
pub use install::{InstallError, InstallOutcome, install, refresh_index};
pub use manager::{Detection, ManagerKind, Platform, detect, detect_with};
pub use resolve::{PackageRequest, resolve};
