//! Dependency copy step.
//!
//! Populates a directory with the project's dependency archives by running
//! `mvn clean dependency:copy-dependencies`. Test-scoped artifacts (or any
//! other excluded ids) are passed through `-DexcludeArtifactIds` so they never
//! reach the scan.
//!
//! The child process inherits stdout and stderr.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Default build tool executable.
pub const DEFAULT_EXECUTABLE: &str = "mvn";

/// Errors that can occur while copying dependencies.
#[derive(thiserror::Error, Debug)]
pub enum MaterializeError {
    /// The build tool could not be started.
    #[error("Failed to execute command: {program}: {source}")]
    Spawn {
        /// Executable that failed to start
        program: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited unsuccessfully.
    #[error("failed to copy dependencies ({status})")]
    Failed {
        /// Exit status of the build tool
        status: ExitStatus,
    },
}

/// Builder and runner for the dependency copy command.
#[derive(Debug, Clone)]
pub struct DependencyMaterializer {
    executable: String,
    output_dir: PathBuf,
    excluded_artifact_ids: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl DependencyMaterializer {
    /// Copy dependencies into `output_dir`.
    ///
    /// A relative `output_dir` is resolved against the current directory now,
    /// since the build tool runs from the working directory.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            output_dir: std::path::absolute(&output_dir).unwrap_or(output_dir),
            excluded_artifact_ids: Vec::new(),
            working_dir: None,
        }
    }

    /// Use a different build tool executable.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Skip these artifact ids when copying.
    #[must_use]
    pub fn with_excluded_artifact_ids(mut self, ids: Vec<String>) -> Self {
        self.excluded_artifact_ids = ids;
        self
    }

    /// Run the build tool from `dir` (the project directory).
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Directory the archives are copied into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Arguments passed to the build tool.
    ///
    /// ```
    /// use jarclash::materialize::DependencyMaterializer;
    ///
    /// let args = DependencyMaterializer::new("/tmp/deps")
    ///     .with_excluded_artifact_ids(vec!["junit".into(), "mockito-core".into()])
    ///     .args();
    /// assert_eq!(args.last().unwrap(), "-DexcludeArtifactIds=junit,mockito-core");
    /// ```
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "clean".to_string(),
            "dependency:copy-dependencies".to_string(),
            format!("-DoutputDirectory={}", self.output_dir.display()),
            "-Dsilent=true".to_string(),
        ];
        if !self.excluded_artifact_ids.is_empty() {
            args.push(format!(
                "-DexcludeArtifactIds={}",
                self.excluded_artifact_ids.join(",")
            ));
        }
        args
    }

    /// The command that [`run`](Self::run) executes.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Run the copy and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the build tool cannot be started or exits with a
    /// non-zero status.
    pub fn run(&self) -> Result<(), MaterializeError> {
        log::info!("start to copy dependencies");
        if self.excluded_artifact_ids.is_empty() {
            log::debug!("No excluded artifact ids");
        } else {
            log::debug!(
                "Excluded artifact ids: {}",
                self.excluded_artifact_ids.join(",")
            );
        }

        let status = self
            .command()
            .status()
            .map_err(|source| MaterializeError::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        if !status.success() {
            log::error!("failed to copy dependencies");
            return Err(MaterializeError::Failed { status });
        }

        log::debug!("Dependencies copied to {}", self.output_dir.display());
        Ok(())
    }
}
