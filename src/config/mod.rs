//! Layered configuration.
//!
//! Tiers, lowest to highest priority, merged field by field:
//! 1. **Defaults** - built into the binary
//! 2. **Project** - `$CWD/tasky/config.yaml`
//! 3. **User** - `~/.tasky/config.yaml`
//! 4. **Environment** - see below
//!
//! CLI flags are applied last by the caller.
//!
//! ## Environment Variables
//! - `TASKY_CONFIG_PATH` - Explicit config file (skips the file tiers)
//! - `TASKY_HOST` - Server bind host
//! - `TASKY_PORT` - Server bind port
//! - `TASKY_API_URL` - Base URL used by client commands
//! - `TASKY_USER_DIR` - User config dir (default: `~/.tasky`)
//! - `TASKY_PROJECT_DIR` - Project config dir (default: `./tasky`)

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier, merge_values};
pub use types::*;
