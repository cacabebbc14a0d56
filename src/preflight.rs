//! Environment checks run before any command is registered.

use crate::error::{Error, Result};
use directories::BaseDirs;

/// Runs all preflight checks.
pub fn run_checks() -> Result<()> {
    check_user_home()?;
    Ok(())
}

/// The user's home directory must be resolvable; package managers and plugins rely on it.
pub fn check_user_home() -> Result<()> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        Error::PreflightError("unable to determine the current user's home directory".into())
    })?;

    let home = dirs.home_dir();
    if !home.is_dir() {
        return Err(Error::PreflightError(format!(
            "home directory '{}' does not exist",
            home.display()
        )));
    }
    log::debug!("Home directory: {}", home.display());
    Ok(())
}
