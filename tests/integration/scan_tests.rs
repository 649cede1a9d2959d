use crate::common::{args, write_jar};
use clap::Parser;
use jarclash::cli::Cli;
use jarclash::duplicates::{CheckerConfig, ConflictChecker};
use jarclash::error::ExitCode;
use jarclash::output::{DetailLevel, Verdict};
use jarclash::scanner::list_archives;
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_shared_class_between_two_jars() {
    let dir = tempdir().unwrap();
    write_jar(
        dir.path(),
        "lib-a.jar",
        &["com/x/Foo.class", "com/x/Bar.class"],
    );
    write_jar(
        dir.path(),
        "lib-b.jar",
        &["com/x/Foo.class", "com/x/Baz.class"],
    );

    let archives = list_archives(dir.path(), "jar").unwrap();
    let checker = ConflictChecker::new(
        CheckerConfig::default()
            .with_detail(DetailLevel::Detailed)
            .with_subject("webapp"),
    );
    let result = checker.check(&archives).unwrap();

    let groups = match &result.report.verdict {
        Verdict::ConflictsFound(groups) => groups,
        other => panic!("Expected ConflictsFound, got {:?}", other),
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups.archives("com/x/Foo.class"),
        Some(&set(&["lib-a.jar", "lib-b.jar"]))
    );

    assert!(result.report.text.contains("com.x.Foo\n"));
    assert!(result.report.text.contains("\tlib-a.jar"));
    assert!(result.report.text.contains("\tlib-b.jar"));
    assert!(!result.report.text.contains("com.x.Bar"));
    assert!(!result.report.text.contains("com.x.Baz"));
}

#[test]
fn test_disjoint_jars_are_clean() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.jar", &["com/a/One.class", "com/a/Two.class"]);
    write_jar(dir.path(), "b.jar", &["com/b/One.class"]);

    let archives = list_archives(dir.path(), "jar").unwrap();
    let checker = ConflictChecker::new(CheckerConfig::default().with_subject("webapp"));
    let result = checker.check(&archives).unwrap();

    assert_eq!(result.report.verdict, Verdict::Clean);
    assert!(result.report.text.contains("webapp has no class conflicts"));
    assert_eq!(result.summary.archives_scanned, 2);
    assert_eq!(result.summary.class_entries, 3);
}

#[test]
fn test_directory_without_jars_is_no_archives() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.txt"), b"nothing here").unwrap();
    fs::write(dir.path().join("classes.zip"), b"not scanned").unwrap();

    let archives = list_archives(dir.path(), "jar").unwrap();
    assert!(archives.is_empty());

    let result = ConflictChecker::with_defaults().check(&archives).unwrap();
    assert_eq!(result.report.verdict, Verdict::NoArchives);
    assert_ne!(result.report.verdict, Verdict::Clean);
    assert_eq!(result.summary.archives_scanned, 0);
}

#[test]
fn test_groups_do_not_depend_on_scan_order() {
    let dir = tempdir().unwrap();
    let a = write_jar(dir.path(), "a.jar", &["P.class", "Q.class", "R.class"]);
    let b = write_jar(dir.path(), "b.jar", &["Q.class", "S.class"]);
    let c = write_jar(dir.path(), "c.jar", &["R.class", "Q.class"]);

    let checker = ConflictChecker::with_defaults();
    let forward = checker
        .check(&[a.clone(), b.clone(), c.clone()])
        .unwrap();
    let backward = checker.check(&[c, b, a]).unwrap();

    assert_eq!(forward.report.verdict, backward.report.verdict);
    let groups = forward.report.verdict.groups().unwrap();
    assert_eq!(groups.archives("Q.class"), Some(&set(&["a.jar", "b.jar", "c.jar"])));
    assert_eq!(groups.archives("R.class"), Some(&set(&["a.jar", "c.jar"])));
    assert!(!groups.contains("P.class"));
    assert!(!groups.contains("S.class"));
}

#[test]
fn test_resources_and_directories_are_ignored() {
    let dir = tempdir().unwrap();
    let common = [
        "META-INF/",
        "META-INF/MANIFEST.MF",
        "META-INF/LICENSE",
        "com/",
        "com/shared/",
        "log4j.properties",
    ];
    let mut a_entries = common.to_vec();
    a_entries.push("com/shared/A.class");
    let mut b_entries = common.to_vec();
    b_entries.push("com/shared/B.class");

    write_jar(dir.path(), "a.jar", &a_entries);
    write_jar(dir.path(), "b.jar", &b_entries);

    let archives = list_archives(dir.path(), "jar").unwrap();
    let result = ConflictChecker::with_defaults().check(&archives).unwrap();

    assert_eq!(result.report.verdict, Verdict::Clean);
    assert_eq!(result.summary.class_entries, 2);
}

#[test]
fn test_summary_report_lists_jars_only() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.jar", &["P.class", "Q.class"]);
    write_jar(dir.path(), "b.jar", &["P.class", "Q.class"]);
    write_jar(dir.path(), "c.jar", &["Z.class"]);

    let archives = list_archives(dir.path(), "jar").unwrap();
    let result = ConflictChecker::with_defaults().check(&archives).unwrap();

    let text = &result.report.text;
    assert!(text.contains("Jar files related:"));
    assert_eq!(text.matches("\ta.jar").count(), 1);
    assert_eq!(text.matches("\tb.jar").count(), 1);
    assert!(!text.contains("c.jar"));
    assert!(!text.contains("duplicate class file list"));
    assert_eq!(result.summary.implicated_archives, 2);
}

#[test]
fn test_run_app_scan_exit_codes() {
    let conflicts = tempdir().unwrap();
    write_jar(conflicts.path(), "a.jar", &["P.class"]);
    write_jar(conflicts.path(), "b.jar", &["P.class"]);

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "scan",
        conflicts.path().to_str().unwrap(),
        "--details",
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);

    let clean = tempdir().unwrap();
    write_jar(clean.path(), "a.jar", &["P.class"]);
    let cli = Cli::try_parse_from(args(&["-q", "scan", clean.path().to_str().unwrap()])).unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::Success);

    let empty = tempdir().unwrap();
    let cli = Cli::try_parse_from(args(&["-q", "scan", empty.path().to_str().unwrap()])).unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_scan_custom_extension() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.zip", &["P.class"]);
    write_jar(dir.path(), "b.zip", &["P.class"]);
    write_jar(dir.path(), "c.jar", &["Q.class"]);

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "scan",
        dir.path().to_str().unwrap(),
        "--extension",
        "zip",
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);
}

#[test]
fn test_run_app_scan_json_output() {
    let dir = tempdir().unwrap();
    write_jar(dir.path(), "a.jar", &["P.class"]);
    write_jar(dir.path(), "b.jar", &["P.class"]);

    let cli = Cli::try_parse_from(args(&[
        "-q",
        "scan",
        dir.path().to_str().unwrap(),
        "--output",
        "json",
    ]))
    .unwrap();
    assert_eq!(jarclash::run_app(cli).unwrap(), ExitCode::ConflictsFound);
}
