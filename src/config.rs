//! Runtime configuration: verbosity, color and the manifest location.
//!
//! Values come from the environment first; the command line overrides them
//! the same way `--verbose` overrides `TAGTERM_VERBOSE`.

use std::env;
use std::path::PathBuf;

use crate::color::{colors_enabled, numeric_value};

pub const VERBOSE_ENV: &str = "TAGTERM_VERBOSE";
pub const MANIFEST_ENV: &str = "TAGTERM_MANIFEST";

/// How much output the terminal produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Nothing is logged.
    Silent = 0,
    /// A single line that each message overwrites (interactive terminals only).
    Ephemeral = 1,
    /// Every message on its own line.
    #[default]
    Full = 2,
}

impl Verbosity {
    /// Clamp any number into a level. Only an exact `0` is silent and only
    /// an exact `1` is ephemeral; fractions such as `0.5` log in full. `NaN`
    /// has no level.
    pub fn from_level(level: f64) -> Option<Self> {
        if level.is_nan() {
            return None;
        }
        let level = level.clamp(0.0, 2.0);
        Some(if level == 0.0 {
            Self::Silent
        } else if level == 1.0 {
            Self::Ephemeral
        } else {
            Self::Full
        })
    }

    /// Parse with loose numeric coercion; non-numeric text has no level.
    pub fn parse(level: &str) -> Option<Self> {
        numeric_value(level).and_then(Self::from_level)
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbosity: Verbosity,
    pub color: bool,
    /// Manifest to read project metadata from; `None` searches the working
    /// directory.
    pub manifest: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: true,
            manifest: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let verbosity = env::var(VERBOSE_ENV)
            .ok()
            .and_then(|v| Verbosity::parse(&v))
            .unwrap_or_default();

        Self {
            verbosity,
            color: colors_enabled(),
            manifest: env::var_os(MANIFEST_ENV).map(PathBuf::from),
        }
    }
}
