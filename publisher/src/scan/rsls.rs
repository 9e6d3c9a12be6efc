//! Runtime shared libraries.

use super::RunContext;
use crate::error::Result;
use log::warn;

/// RSL publishing is not supported; the phase only reports that.
///
/// # Errors
///
/// Never fails.
pub fn scan_rsls(ctx: &mut RunContext<'_>) -> Result<()> {
    warn!(
        "RSL publishing is not supported; nothing published from {}",
        ctx.layout().frameworks().join("rsls")
    );
    Ok(())
}
