//! Locating reference data for a candidate file
//!
//! Reference files live under `<expected root>/<flavor>/<file name>`, where the
//! flavor names the platform the reference was produced on.

use crate::error::{CompareError, Result};
use anyhow::Context;
use std::fmt;
use std::path::{Path, PathBuf};

/// Platform family used to pick a reference directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Linux,
    Linux64,
    Darwin,
    DarwinX86,
}

impl Flavor {
    /// Classify an operating system and machine name pair
    pub fn from_platform(os: &str, machine: &str) -> Result<Self> {
        match os {
            "linux" | "Linux" if machine.ends_with("64") => Ok(Self::Linux64),
            "linux" | "Linux" => Ok(Self::Linux),
            "macos" | "Darwin" if matches!(machine, "x86_64" | "i686" | "x86") => Ok(Self::DarwinX86),
            "macos" | "Darwin" => Ok(Self::Darwin),
            _ => Err(CompareError::UnknownFlavor {
                os: os.to_string(),
                machine: machine.to_string(),
            }),
        }
    }

    /// Flavor of the running system
    pub fn detect() -> Result<Self> {
        Self::from_platform(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Linux => "Linux",
            Flavor::Linux64 => "Linux64",
            Flavor::Darwin => "Darwin",
            Flavor::DarwinX86 => "DarwinX86",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `expected` directory next to the directory holding the executable
pub fn default_expected_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot locate the running executable")?;
    let root = exe
        .parent()
        .and_then(Path::parent)
        .with_context(|| format!("Cannot locate install root of {}", exe.display()))?;
    Ok(root.join("expected"))
}

/// Reference path for `input`, which must exist
pub fn reference_path(expected_root: &Path, flavor: Flavor, input: &Path) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| CompareError::invalid_input(format!("{} has no file name", input.display())))?;

    let guess = expected_root.join(flavor.as_str()).join(file_name);
    if guess.is_file() {
        log::debug!("Using reference data {}", guess.display());
        Ok(guess)
    } else {
        Err(CompareError::ReferenceNotFound { path: guess })
    }
}
