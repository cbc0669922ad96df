//! Layered configuration for the console writer.
//!
//! Sources, later wins:
//! - built-in defaults (`INFO`, CI detection from the `CI` environment
//!   variable, color when stdout is a terminal)
//! - `consio.toml` in the working directory
//! - environment variables prefixed `CONSIO_`
//!
//! ```bash
//! CONSIO_WRITE_LEVEL=DEBUG CONSIO_CI=true mytool build
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::level::WriteLevel;

pub const CONFIG_FILE: &str = "consio.toml";
pub const ENV_PREFIX: &str = "CONSIO_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Minimum write level emitted to the normal sink.
    #[serde(default)]
    pub write_level: WriteLevel,

    /// Unattended execution: no spinner animation, error reports stream
    /// inline instead of being persisted to a dump file.
    #[serde(default = "detect_ci")]
    pub ci: bool,

    /// Enable ANSI color in styled output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            write_level: WriteLevel::default(),
            ci: detect_ci(),
            color: default_color(),
        }
    }
}

fn detect_ci() -> bool {
    std::env::var_os("CI").is_some_and(|v| !v.is_empty())
}

fn default_color() -> bool {
    is_terminal::is_terminal(std::io::stdout())
}

impl UiConfig {
    /// Load configuration from all layers.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(UiConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }
}
