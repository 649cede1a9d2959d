//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, else `config.toml` in the platform config directory)
//! 3. Environment variables prefixed with `JARCLASH_` (e.g. `JARCLASH_DETAILS=true`)
//! 4. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```toml
//! details = true
//! archive_extension = "jar"
//! required_packaging = "war"
//! lib_subdir = "WEB-INF/lib"
//! excluded_scopes = ["test", "provided"]
//! maven_executable = "./mvnw"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "JARCLASH_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// List every conflicting class, not only the jars involved.
    pub details: bool,
    /// Skip the check entirely.
    pub skip: bool,
    /// Extension of the archives to scan.
    pub archive_extension: String,
    /// Packaging kind a project must have to be checked.
    pub required_packaging: String,
    /// Location of the packaged jars inside the exploded artifact.
    pub lib_subdir: String,
    /// Dependency scopes left out of the dependency copy step.
    pub excluded_scopes: Vec<String>,
    /// Build tool used by the dependency copy step.
    pub maven_executable: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            details: false,
            skip: false,
            archive_extension: "jar".to_string(),
            required_packaging: "war".to_string(),
            lib_subdir: "WEB-INF/lib".to_string(),
            excluded_scopes: vec!["test".to_string()],
            maven_executable: crate::materialize::DEFAULT_EXECUTABLE.to_string(),
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// `path` selects the TOML file; without it the platform default is used
    /// when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment variable holds a value
    /// of the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);
        Self::figment(file.as_deref()).extract().map_err(Box::new)
    }

    /// The figment behind [`Config::load`].
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "jarclash", "jarclash")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
