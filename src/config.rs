use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{self, ShellKind};
use crate::report::DEFAULT_TOP;

pub const CONFIG_FILE: &str = ".cli-wrappedrc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrappedConfig {
    pub shell: Option<ShellKind>,
    pub top: usize,
    pub plain: bool,
    pub fallback: bool,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        WrappedConfig {
            shell: None,
            top: DEFAULT_TOP,
            plain: false,
            fallback: true,
        }
    }
}

impl WrappedConfig {
    pub fn path() -> PathBuf {
        history::home_dir().join(CONFIG_FILE)
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::path())
    }

    /// `None` when the file is missing or does not parse.
    pub fn load_from(path: &Path) -> Option<Self> {
        let config_str = fs::read_to_string(path).ok()?;
        match toml::from_str::<WrappedConfig>(&config_str) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config.sanitized())
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    pub fn save(&self) -> io::Result<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let config_str = toml::to_string(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, config_str)
    }

    fn sanitized(mut self) -> Self {
        if self.top == 0 {
            self.top = DEFAULT_TOP;
        }
        self
    }
}
