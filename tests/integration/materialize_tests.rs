#![cfg(unix)]

use crate::common::{args, write_jar, write_pom};
use clap::Parser;
use jarclash::cli::Cli;
use jarclash::error::{CheckError, ExitCode};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Stand-in for `mvn` that copies the jars of `repo` into `-DoutputDirectory`
/// and records the excluded artifact ids next to itself.
fn fake_maven(dir: &Path, repo: &Path) -> PathBuf {
    let script = dir.join("fake-mvn");
    let record = dir.join("excluded.txt");
    let body = format!(
        r#"#!/bin/sh
out=""
for arg in "$@"; do
  case "$arg" in
    -DoutputDirectory=*) out="${{arg#-DoutputDirectory=}}" ;;
    -DexcludeArtifactIds=*) echo "${{arg#-DexcludeArtifactIds=}}" > "{record}" ;;
  esac
done
[ -n "$out" ] || exit 3
mkdir -p "$out"
cp "{repo}"/*.jar "$out"/
"#,
        record = record.display(),
        repo = repo.display(),
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn write_config(dir: &Path, executable: &Path) -> PathBuf {
    let path = dir.join("jarclash.toml");
    fs::write(
        &path,
        format!("maven_executable = \"{}\"\n", executable.display()),
    )
    .unwrap();
    path
}

#[test]
fn test_materialize_then_check() {
    let project = tempdir().unwrap();
    write_pom(project.path(), "shop-web", "war");

    let tools = tempdir().unwrap();
    let repo = tools.path().join("repo");
    fs::create_dir_all(&repo).unwrap();
    write_jar(&repo, "a.jar", &["com/x/Foo.class"]);
    write_jar(&repo, "b.jar", &["com/x/Foo.class"]);
    let config = write_config(tools.path(), &fake_maven(tools.path(), &repo));

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config.to_str().unwrap(),
        "check",
        project.path().to_str().unwrap(),
        "--materialize",
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);

    let copied = project.path().join("target").join("dependency");
    assert!(copied.join("a.jar").is_file());
    assert!(copied.join("b.jar").is_file());

    let excluded = fs::read_to_string(tools.path().join("excluded.txt")).unwrap();
    assert_eq!(excluded.trim(), "junit");
}

#[test]
fn test_materialize_failure() {
    let project = tempdir().unwrap();
    write_pom(project.path(), "shop-web", "war");

    let tools = tempdir().unwrap();
    let script = tools.path().join("broken-mvn");
    fs::write(&script, "#!/bin/sh\nexit 1\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    let config = write_config(tools.path(), &script);

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config.to_str().unwrap(),
        "check",
        project.path().to_str().unwrap(),
        "--materialize",
    ]))
    .unwrap();
    let err = jarclash::run_app(cli).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::Materialize(_))
    ));
    assert_eq!(ExitCode::from_error(&err), ExitCode::ConfigurationError);
}

#[test]
fn test_materialize_missing_executable() {
    let project = tempdir().unwrap();
    write_pom(project.path(), "shop-web", "war");

    let tools = tempdir().unwrap();
    let config = write_config(tools.path(), &tools.path().join("no-such-mvn"));

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config.to_str().unwrap(),
        "check",
        project.path().to_str().unwrap(),
        "--materialize",
    ]))
    .unwrap();
    let err = jarclash::run_app(cli).unwrap_err();
    assert!(format!("{err:#}").contains("no-such-mvn"));
}

#[test]
fn test_materialize_relative_project_dir() {
    let project = tempfile::Builder::new()
        .prefix("jarclash-rel-")
        .tempdir_in(std::env::current_dir().unwrap())
        .unwrap();
    write_pom(project.path(), "shop-web", "war");
    let relative = PathBuf::from(project.path().file_name().unwrap());

    let tools = tempdir().unwrap();
    let repo = tools.path().join("repo");
    fs::create_dir_all(&repo).unwrap();
    write_jar(&repo, "a.jar", &["com/x/Foo.class"]);
    write_jar(&repo, "b.jar", &["com/x/Foo.class"]);
    let config = write_config(tools.path(), &fake_maven(tools.path(), &repo));

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "--config",
        config.to_str().unwrap(),
        "check",
        relative.to_str().unwrap(),
        "--materialize",
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);

    assert!(project.path().join("target/dependency/a.jar").is_file());
    assert!(!project.path().join(&relative).exists());
}
