#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a jar at `dir/name` holding `entries`. Names ending in `/` become directories.
pub fn write_jar(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        if entry.ends_with('/') {
            zip.add_directory(*entry, options).unwrap();
        } else {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(b"\xCA\xFE\xBA\xBE\x00\x00\x00\x34").unwrap();
        }
    }
    zip.finish().unwrap();
    path
}

/// Write a `pom.xml` for `artifact_id` with the given packaging.
pub fn write_pom(project_dir: &Path, artifact_id: &str, packaging: &str) {
    let pom = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>{artifact_id}</artifactId>
  <version>1.0.0</version>
  <packaging>{packaging}</packaging>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>
"#
    );
    fs::write(project_dir.join("pom.xml"), pom).unwrap();
}

/// Create the exploded war library directory of a project written by [`write_pom`].
pub fn web_inf_lib(project_dir: &Path, artifact_id: &str) -> PathBuf {
    let lib = project_dir
        .join("target")
        .join(format!("{artifact_id}-1.0.0"))
        .join("WEB-INF")
        .join("lib");
    fs::create_dir_all(&lib).unwrap();
    lib
}

/// Build CLI arguments from string slices.
pub fn args<'a>(parts: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["jarclash"];
    args.extend_from_slice(parts);
    args
}
