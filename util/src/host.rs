//! Host environment utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the root of the software checkout.
pub const SW_ROOT_ENV_VAR: &str = "TRACK_SIM_SW_ROOT";

/// Get the software root directory from the environment.
///
/// Parameter files and session directories are resolved relative to this
/// path.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
