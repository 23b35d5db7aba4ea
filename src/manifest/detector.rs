//! Manifest corpus detection
//!
//! Features:
//! - Walks one or more source trees for build-tool files
//! - Keeps every `.xml`, `.gradle`, `.settings` and `.properties` file, since any of
//!   them may define a version variable
//! - Classifies `pom.xml` as Maven and `*.gradle` as Gradle

use crate::error::ManifestError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions collected into the corpus
pub const CORPUS_EXTENSIONS: [&str; 4] = ["xml", "gradle", "settings", "properties"];

/// Kind of a build-tool file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// Maven POM (`pom.xml`)
    Maven,
    /// Gradle build script (`*.gradle`)
    Gradle,
    /// Any other corpus file, only used for variable lookup
    Other,
}

impl ManifestKind {
    /// Classify a path
    pub fn from_path(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str());
        let extension = path.extension().and_then(|e| e.to_str());

        if file_name == Some("pom.xml") {
            ManifestKind::Maven
        } else if extension == Some("gradle") {
            ManifestKind::Gradle
        } else {
            ManifestKind::Other
        }
    }
}

/// A build-tool file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Path to the file (or a virtual path for downloaded content)
    pub path: PathBuf,
    /// File content split into lines
    pub lines: Vec<String>,
    /// Kind of the file
    pub kind: ManifestKind,
}

impl ManifestFile {
    /// Build a manifest file from in-memory content
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        let kind = ManifestKind::from_path(&path);
        Self {
            path,
            lines: content.lines().map(str::to_string).collect(),
            kind,
        }
    }

    /// Read a manifest file from disk
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 `.properties` files) are replaced
    /// rather than failing the whole file.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let bytes = std::fs::read(path).map_err(|e| ManifestError::read_error(path, e))?;
        Ok(Self::from_content(path, &String::from_utf8_lossy(&bytes)))
    }

    /// Returns the file content joined back together
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if the file is XML
    pub fn is_xml(&self) -> bool {
        self.path.extension().and_then(|e| e.to_str()) == Some("xml")
    }
}

/// Every build-tool file of a harvest run, ordered by path
#[derive(Debug, Clone, Default)]
pub struct ManifestCorpus {
    files: Vec<ManifestFile>,
}

impl ManifestCorpus {
    /// Build a corpus, ordering files by path
    pub fn new(mut files: Vec<ManifestFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    /// Returns all files
    pub fn files(&self) -> &[ManifestFile] {
        &self.files
    }

    /// Returns the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the corpus holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Returns true if the path belongs in the corpus
pub fn is_corpus_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| CORPUS_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Detect all corpus files below `dir`
///
/// Hidden files are included and ignore files are not honoured; harvested
/// checkouts often vendor build files in ignored directories.
pub fn detect_manifests(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(dir)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) && is_corpus_file(path) {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    debug!(root = %dir.display(), files = paths.len(), "detected corpus files");
    Ok(paths)
}

/// Detect and read all corpus files below the given roots
///
/// Unreadable files are skipped and returned as errors next to the corpus.
pub fn load_corpus(roots: &[PathBuf]) -> Result<(ManifestCorpus, Vec<ManifestError>), ManifestError> {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for root in roots {
        for path in detect_manifests(root)? {
            match ManifestFile::read(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(error = %e, "skipping corpus file");
                    errors.push(e);
                }
            }
        }
    }

    Ok((ManifestCorpus::new(files), errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(ManifestKind::from_path(Path::new("a/pom.xml")), ManifestKind::Maven);
        assert_eq!(
            ManifestKind::from_path(Path::new("a/build.gradle")),
            ManifestKind::Gradle
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("a/settings.xml")),
            ManifestKind::Other
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("gradle.properties")),
            ManifestKind::Other
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("build.gradle.kts")),
            ManifestKind::Other
        );
    }

    #[test]
    fn test_is_corpus_file() {
        assert!(is_corpus_file(Path::new("pom.xml")));
        assert!(is_corpus_file(Path::new("build.gradle")));
        assert!(is_corpus_file(Path::new("gradle.properties")));
        assert!(is_corpus_file(Path::new("ide.settings")));
        assert!(!is_corpus_file(Path::new("Main.java")));
        assert!(!is_corpus_file(Path::new("README")));
    }

    #[test]
    fn test_from_content_splits_lines() {
        let file = ManifestFile::from_content("build.gradle", "a\nb\n");
        assert_eq!(file.lines, vec!["a", "b"]);
        assert_eq!(file.kind, ManifestKind::Gradle);
        assert!(!file.is_xml());
    }

    #[test]
    fn test_corpus_orders_by_path() {
        let corpus = ManifestCorpus::new(vec![
            ManifestFile::from_content("b/pom.xml", ""),
            ManifestFile::from_content("a/build.gradle", ""),
        ]);
        assert_eq!(corpus.files()[0].path, PathBuf::from("a/build.gradle"));
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_detect_manifests_walks_tree() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("module").join(".hidden");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("pom.xml"), "<project/>").unwrap();
        fs::write(temp.path().join("module").join("build.gradle"), "").unwrap();
        fs::write(nested.join("gradle.properties"), "a=1").unwrap();
        fs::write(temp.path().join("Main.java"), "class Main {}").unwrap();

        let paths = detect_manifests(temp.path()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| is_corpus_file(p)));
    }

    #[test]
    fn test_detect_manifests_missing_dir() {
        let err = detect_manifests(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ManifestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_load_corpus() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("build.gradle"), "implementation 'a:b:1'\n").unwrap();
        let (corpus, errors) = load_corpus(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(errors.is_empty());
        assert_eq!(corpus.files()[0].lines, vec!["implementation 'a:b:1'"]);
    }

    #[test]
    fn test_read_latin1_properties() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gradle.properties");
        fs::write(&path, b"# caf\xE9\njunitVersion=4.13.2\n").unwrap();

        let file = ManifestFile::read(&path).unwrap();
        assert_eq!(file.lines.len(), 2);
        assert!(file.lines[0].starts_with("# caf"));
        assert_eq!(file.lines[1], "junitVersion=4.13.2");
    }
}
