//! Source document repository contracts and filesystem implementation.
//!
//! # Responsibility
//! - Read summary documents from a `<root>/<slug>/summary.md` layout.
//! - Isolate directory walking and IO failures from the engine.
//!
//! # Invariants
//! - A missing root directory is an empty corpus, not an error.
//! - One unreadable document never aborts the batch; it is skipped and logged.
//! - Documents are returned in ascending slug order.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// File name holding one source's summary inside its slug directory.
pub const SUMMARY_FILE_NAME: &str = "summary.md";
const IGNORED_ENTRY: &str = "README.md";

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository-level error.
#[derive(Debug)]
pub enum RepoError {
    /// The corpus root exists but cannot be listed.
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read sources at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Raw summary document as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Directory name; becomes the record slug.
    pub slug: String,
    /// Full markdown text.
    pub content: String,
    /// On-disk size in bytes.
    pub size_bytes: u64,
}

/// Repository interface for source documents.
pub trait SourceRepository {
    /// Loads every readable source document.
    fn load_documents(&self) -> RepoResult<Vec<SourceDocument>>;
}

/// Filesystem-backed source repository.
#[derive(Debug, Clone)]
pub struct FsSourceRepository {
    root: PathBuf,
}

impl FsSourceRepository {
    /// Creates a repository over `root`; the directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceRepository for FsSourceRepository {
    fn load_documents(&self) -> RepoResult<Vec<SourceDocument>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|err| RepoError::Io {
            path: self.root.clone(),
            source: err,
        })?;

        let mut slugs = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name != IGNORED_ENTRY)
            .collect::<Vec<_>>();
        slugs.sort();

        let mut documents = Vec::with_capacity(slugs.len());
        for slug in slugs {
            let path = self.root.join(&slug).join(SUMMARY_FILE_NAME);
            if !path.is_file() {
                continue;
            }
            match read_document(&path, &slug) {
                Ok(document) => documents.push(document),
                Err(err) => warn!(
                    "event=source_read module=repo status=skipped slug={} error={}",
                    slug, err
                ),
            }
        }
        Ok(documents)
    }
}

fn read_document(path: &Path, slug: &str) -> std::io::Result<SourceDocument> {
    let content = fs::read_to_string(path)?;
    let size_bytes = fs::metadata(path)?.len();
    Ok(SourceDocument {
        slug: slug.to_string(),
        content,
        size_bytes,
    })
}
