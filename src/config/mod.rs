use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Configuration for a minimization run.
///
/// Loaded from a TOML file when one is given or found next to the sources;
/// CLI flags override individual fields afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory of the Java sources.
    pub sources: PathBuf,

    /// Directory holding the library jars.
    pub libs: PathBuf,

    /// Path of the minimized output jar.
    pub output: PathBuf,

    /// Minimization strategy: "indexed" or "linear".
    pub strategy: String,

    /// Qualified names that must be kept even when unreferenced.
    pub force_include: Vec<String>,

    /// Jars whose classes are kept wholesale.
    pub force_include_jars: Vec<PathBuf>,

    /// Seconds to wait for the source resolution batch.
    pub resolve_timeout_secs: u64,

    /// Worker threads for source resolution, 0 means one per core.
    pub threads: usize,

    /// Working directory for extracted jars. Defaults to a directory under
    /// the system temp location.
    pub work_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("src"),
            libs: PathBuf::from("lib"),
            output: PathBuf::from("minimized.jar"),
            strategy: "indexed".to_string(),
            force_include: Vec::new(),
            force_include_jars: Vec::new(),
            resolve_timeout_secs: 60,
            threads: 0,
            work_dir: None,
        }
    }
}

const CONFIG_FILE_NAME: &str = "jardiet.toml";

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("could not read config file {}", path.display()))?;
        toml::from_str(&contents)
            .into_diagnostic()
            .wrap_err_with(|| format!("could not parse config file {}", path.display()))
    }

    /// Load `jardiet.toml` from the given directory if present, otherwise
    /// fall back to defaults.
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
