use crate::common::{args, write_jar};
use clap::Parser;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use jarclash::cli::Cli;
use jarclash::config::{Config, ENV_PREFIX};
use jarclash::error::ExitCode;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Figment without Env so variables set by other tests do not leak in
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
details = true
archive_extension = "zip"
lib_subdir = "lib"
excluded_scopes = ["test", "provided"]
maven_executable = "./mvnw"
"#,
    )
    .unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert!(config.details);
    assert!(!config.skip);
    assert_eq!(config.archive_extension, "zip");
    assert_eq!(config.required_packaging, "war");
    assert_eq!(config.lib_subdir, "lib");
    assert_eq!(config.excluded_scopes, vec!["test", "provided"]);
    assert_eq!(config.maven_executable, "./mvnw");
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("JARCLASH_EXCLUDED_SCOPES", r#"["test", "system"]"#);

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .unwrap();

    assert_eq!(config.excluded_scopes, vec!["test", "system"]);

    std::env::remove_var("JARCLASH_EXCLUDED_SCOPES");
}

#[test]
fn test_env_overrides_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "details = false\narchive_extension = \"ear\"\n").unwrap();

    std::env::set_var("JARCLASH_DETAILS", "true");
    let config: Config = Config::figment(Some(&config_path)).extract().unwrap();
    std::env::remove_var("JARCLASH_DETAILS");

    assert!(config.details);
    assert_eq!(config.archive_extension, "ear");
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "details = \"sometimes\"\n").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.jar", &["P.class"]);
    let missing = dir.path().join("missing.toml");

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        missing.to_str().unwrap(),
        "scan",
        dir.path().to_str().unwrap(),
    ]))
    .unwrap();
    let err = jarclash::run_app(cli).unwrap_err();
    assert_eq!(ExitCode::from_error(&err), ExitCode::ConfigurationError);
}

#[test]
fn test_config_file_sets_scan_extension() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.war", &["P.class"]);
    write_jar(dir.path(), "b.war", &["P.class"]);

    let config_path = dir.path().join("jarclash.toml");
    fs::write(&config_path, "archive_extension = \"war\"\n").unwrap();

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config_path.to_str().unwrap(),
        "scan",
        dir.path().to_str().unwrap(),
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);
}

#[test]
fn test_config_file_skip() {
    let project = tempdir().unwrap();
    let config_path = project.path().join("jarclash.toml");
    fs::write(&config_path, "skip = true\n").unwrap();

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config_path.to_str().unwrap(),
        "check",
        project.path().to_str().unwrap(),
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::Success);
}
