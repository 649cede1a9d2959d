//! jarclash - Duplicate Class Detector
//!
//! Scans the jars packaged into a deployable artifact and reports every class
//! file that is present in more than one of them, before the classpath
//! conflict shows up at runtime.
//!
//! The detection core lives in [`scanner`], [`duplicates`] and [`output`]; it
//! takes an ordered archive list and returns a report bound to a
//! [`Verdict`](output::Verdict). [`run_app`] wraps it with the project
//! descriptor, the optional dependency copy step, configuration and logging.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod output;
pub mod progress;
pub mod project;
pub mod scanner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{CheckArgs, Cli, Commands, OutputFormat, ScanArgs};
use crate::config::Config;
use crate::duplicates::{CheckerConfig, ConflictChecker};
use crate::error::{CheckError, ExitCode};
use crate::materialize::DependencyMaterializer;
use crate::output::{DetailLevel, JsonOutput, Report};
use crate::progress::Progress;
use crate::project::ProjectDescriptor;
use crate::scanner::list_archives;

/// Run the application for parsed command-line arguments.
///
/// Returns the exit code the process should end with. Conflicts are not an
/// error: they yield [`ExitCode::ConflictsFound`].
///
/// # Errors
///
/// Returns a [`CheckError`] (wrapped in `anyhow`) when the check cannot run
/// or an archive cannot be read.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;
    log::debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Check(args) => run_check(args, &config, cli.quiet),
        Commands::Scan(args) => run_scan(args, &config, cli.quiet),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(CheckError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            ))
            .into());
        }
    }

    Config::load(path)
        .map_err(|e| CheckError::Configuration(format!("Invalid configuration: {e}")).into())
}

fn run_check(args: CheckArgs, config: &Config, quiet: bool) -> Result<ExitCode> {
    if args.skip || config.skip {
        log::info!(
            "{} jar conflict check skipped",
            args.project_dir.display()
        );
        return Ok(ExitCode::Success);
    }

    let project = ProjectDescriptor::load(&args.project_dir).map_err(CheckError::from)?;

    if !args.allow_any_packaging && !project.is_packaging(&config.required_packaging) {
        return Err(CheckError::Configuration(format!(
            "only {} projects can be checked, {} is packaged as {}",
            config.required_packaging, project.artifact_id, project.packaging
        ))
        .into());
    }

    let build_dir = project.build_directory(&args.project_dir);
    let lib_dir = match (args.lib_dir, args.materialize) {
        (Some(dir), _) => dir,
        (None, true) => {
            let materializer = DependencyMaterializer::new(build_dir.join("dependency"))
                .with_executable(config.maven_executable.as_str())
                .with_excluded_artifact_ids(project.excluded_artifact_ids(&config.excluded_scopes))
                .with_working_dir(&args.project_dir);
            materializer.run().map_err(CheckError::from)?;
            materializer.output_dir().to_path_buf()
        }
        (None, false) => {
            let final_name = args.final_name.unwrap_or_else(|| project.final_name());
            build_dir.join(final_name).join(&config.lib_subdir)
        }
    };

    if !lib_dir.is_dir() {
        return Err(CheckError::Configuration(format!(
            "{} does not exist, package the project first",
            lib_dir.display()
        ))
        .into());
    }

    let request = DirectoryCheck {
        dir: lib_dir,
        extension: config.archive_extension.clone(),
        subject: project.artifact_id,
        detail: DetailLevel::from_details(args.details || config.details),
        output: args.output,
        quiet,
    };
    request.run()
}

fn run_scan(args: ScanArgs, config: &Config, quiet: bool) -> Result<ExitCode> {
    let subject = args
        .dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.dir.display().to_string());

    let request = DirectoryCheck {
        extension: args
            .extension
            .unwrap_or_else(|| config.archive_extension.clone()),
        dir: args.dir,
        subject,
        detail: DetailLevel::from_details(args.details || config.details),
        output: args.output,
        quiet,
    };
    request.run()
}

/// A conflict check over every archive of one directory.
struct DirectoryCheck {
    dir: PathBuf,
    extension: String,
    subject: String,
    detail: DetailLevel,
    output: OutputFormat,
    quiet: bool,
}

impl DirectoryCheck {
    fn run(self) -> Result<ExitCode> {
        let archives = list_archives(&self.dir, &self.extension)
            .map_err(|e| CheckError::Configuration(e.to_string()))?;

        let mut checker_config = CheckerConfig::default()
            .with_detail(self.detail)
            .with_subject(self.subject.as_str());
        if !self.quiet && self.output == OutputFormat::Text {
            checker_config = checker_config.with_progress_callback(Arc::new(Progress::new()));
        }

        let result = ConflictChecker::new(checker_config)
            .check(&archives)
            .map_err(|source| CheckError::ArchiveRead {
                subject: self.subject.clone(),
                source,
            })?;

        let exit_code = ExitCode::from_verdict(&result.report.verdict);
        match self.output {
            OutputFormat::Text => result.report.log_at(report_level(&result.report, self.quiet)),
            OutputFormat::Json => {
                let stdout = std::io::stdout();
                JsonOutput::new(&result, exit_code).write_to(&mut stdout.lock(), true)?;
            }
        }

        Ok(exit_code)
    }
}

/// Level the text report is logged at. Under `--quiet` only errors are shown,
/// so a failing report is raised to error level.
fn report_level(report: &Report, quiet: bool) -> log::Level {
    if quiet && report.verdict.is_failure() {
        log::Level::Error
    } else {
        report.level()
    }
}
