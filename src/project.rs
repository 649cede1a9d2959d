//! Project descriptor (`pom.xml`) reading.
//!
//! The descriptor decides whether a conflict check applies at all (the
//! packaging kind), where the packaged archives live (build directory and
//! final name) and which dependency artifacts are excluded from the copy step
//! (dependencies in excluded scopes, `test` by default).
//!
//! Only the handful of elements the check needs are read. Property
//! interpolation is limited to the project coordinates and base directory.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

/// File name of the project descriptor inside a project directory.
pub const POM_FILE: &str = "pom.xml";

/// Packaging kind Maven assumes when `<packaging>` is absent.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Errors that can occur while reading a project descriptor.
#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    /// The descriptor file does not exist.
    #[error("Project descriptor not found: {0}")]
    NotFound(PathBuf),

    /// The descriptor could not be read.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path of the descriptor
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The descriptor is not a well-formed project document.
    #[error("Error to read pom {path}: {message}")]
    Parse {
        /// Path of the descriptor
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A required element is missing.
    #[error("Project descriptor {path} has no <{element}> element")]
    MissingElement {
        /// Path of the descriptor
        path: PathBuf,
        /// Name of the missing element
        element: &'static str,
    },
}

/// A declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Dependency group id, if declared
    pub group_id: Option<String>,
    /// Dependency artifact id
    pub artifact_id: String,
    /// Dependency scope, if declared (Maven defaults to `compile`)
    pub scope: Option<String>,
}

/// The parts of a project descriptor used by the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Group id (inherited from `<parent>` when absent)
    pub group_id: Option<String>,
    /// Artifact id
    pub artifact_id: String,
    /// Version (inherited from `<parent>` when absent)
    pub version: Option<String>,
    /// Packaging kind
    pub packaging: String,
    /// Raw `<build><finalName>`
    pub final_name: Option<String>,
    /// Raw `<build><directory>`
    pub build_directory: Option<String>,
    /// Declared dependencies, in document order
    pub dependencies: Vec<Dependency>,
}

impl ProjectDescriptor {
    /// Read `pom.xml` from `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn load(project_dir: &Path) -> Result<Self, ProjectError> {
        let path = project_dir.join(POM_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProjectError::NotFound(path.clone())
            } else {
                ProjectError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let descriptor = Self::parse_at(&content, &path)?;
        log::debug!(
            "Read {}: {} ({} packaging, {} dependencies)",
            path.display(),
            descriptor.artifact_id,
            descriptor.packaging,
            descriptor.dependencies.len()
        );
        Ok(descriptor)
    }

    /// Parse descriptor content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed or has no artifact id.
    ///
    /// # Example
    ///
    /// ```
    /// use jarclash::project::ProjectDescriptor;
    ///
    /// let pom = r#"<project>
    ///   <artifactId>shop</artifactId>
    ///   <version>1.0</version>
    ///   <packaging>war</packaging>
    /// </project>"#;
    ///
    /// let project = ProjectDescriptor::parse(pom).unwrap();
    /// assert!(project.is_packaging("WAR"));
    /// assert_eq!(project.final_name(), "shop-1.0");
    /// ```
    pub fn parse(content: &str) -> Result<Self, ProjectError> {
        Self::parse_at(content, Path::new(POM_FILE))
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self, ProjectError> {
        let doc = Document::parse(content).map_err(|e| ProjectError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let root = doc.root_element();
        if root.tag_name().name() != "project" {
            return Err(ProjectError::Parse {
                path: path.to_path_buf(),
                message: format!("unexpected root element <{}>", root.tag_name().name()),
            });
        }

        let parent = child(root, "parent");
        let artifact_id =
            child_text(root, "artifactId").ok_or_else(|| ProjectError::MissingElement {
                path: path.to_path_buf(),
                element: "artifactId",
            })?;
        let group_id =
            child_text(root, "groupId").or_else(|| parent.and_then(|p| child_text(p, "groupId")));
        let version =
            child_text(root, "version").or_else(|| parent.and_then(|p| child_text(p, "version")));
        let packaging =
            child_text(root, "packaging").unwrap_or_else(|| DEFAULT_PACKAGING.to_string());

        let build = child(root, "build");
        let final_name = build.and_then(|b| child_text(b, "finalName"));
        let build_directory = build.and_then(|b| child_text(b, "directory"));

        let dependencies = child(root, "dependencies")
            .map(|deps| {
                deps.children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "dependency")
                    .filter_map(|dep| {
                        Some(Dependency {
                            artifact_id: child_text(dep, "artifactId")?,
                            group_id: child_text(dep, "groupId"),
                            scope: child_text(dep, "scope"),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            group_id,
            artifact_id,
            version,
            packaging,
            final_name,
            build_directory,
            dependencies,
        })
    }

    /// Whether the packaging kind equals `kind`, ignoring case.
    #[must_use]
    pub fn is_packaging(&self, kind: &str) -> bool {
        self.packaging.eq_ignore_ascii_case(kind.trim())
    }

    /// Artifact ids of the dependencies declared in one of `scopes`.
    ///
    /// Scope comparison ignores case; the ids keep declaration order.
    #[must_use]
    pub fn excluded_artifact_ids<S: AsRef<str>>(&self, scopes: &[S]) -> Vec<String> {
        self.dependencies
            .iter()
            .filter(|dep| {
                dep.scope.as_deref().is_some_and(|scope| {
                    scopes
                        .iter()
                        .any(|s| s.as_ref().eq_ignore_ascii_case(scope.trim()))
                })
            })
            .map(|dep| dep.artifact_id.clone())
            .collect()
    }

    /// Name of the packaged artifact, without extension.
    ///
    /// Uses `<build><finalName>` when declared, else `<artifactId>-<version>`.
    #[must_use]
    pub fn final_name(&self) -> String {
        match &self.final_name {
            Some(raw) => self.interpolate(raw, None),
            None => match &self.version {
                Some(version) => format!("{}-{}", self.artifact_id, version),
                None => self.artifact_id.clone(),
            },
        }
    }

    /// Build output directory, `target` under the project by default.
    #[must_use]
    pub fn build_directory(&self, project_dir: &Path) -> PathBuf {
        match &self.build_directory {
            Some(raw) => {
                let resolved = PathBuf::from(self.interpolate(raw, Some(project_dir)));
                if resolved.is_absolute() {
                    resolved
                } else {
                    project_dir.join(resolved)
                }
            }
            None => project_dir.join("target"),
        }
    }

    fn interpolate(&self, raw: &str, basedir: Option<&Path>) -> String {
        let version = self.version.as_deref().unwrap_or_default();
        let group_id = self.group_id.as_deref().unwrap_or_default();
        let mut value = raw
            .replace("${project.artifactId}", &self.artifact_id)
            .replace("${artifactId}", &self.artifact_id)
            .replace("${project.version}", version)
            .replace("${version}", version)
            .replace("${project.groupId}", group_id)
            .replace("${groupId}", group_id);

        if let Some(dir) = basedir {
            let dir = dir.to_string_lossy();
            value = value
                .replace("${project.basedir}", &dir)
                .replace("${basedir}", &dir);
        }
        value
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
