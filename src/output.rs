use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const FILE_PREFIX: &str = "labels_";
const FALLBACK_STEM: &str = "labels";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Keeps alphanumerics, `-` and `_` from the article number; everything
/// else is dropped. An empty survivor set falls back to a fixed stem.
pub fn sanitized_stem(article_no: &str) -> String {
    let kept: String = article_no
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '-' || *ch == '_')
        .collect();
    if kept.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        kept
    }
}

/// Deterministic output name for one article number.
pub fn pdf_file_name(article_no: &str) -> String {
    format!("{FILE_PREFIX}{}.pdf", sanitized_stem(article_no))
}

/// Owns the directory generated documents land in.
#[derive(Debug, Clone)]
pub struct OutputService {
    output_dir: PathBuf,
}

impl OutputService {
    pub const fn with_dir(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn with_current_dir() -> OutputResult<Self> {
        Ok(Self::with_dir(std::env::current_dir()?))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for one article number, creating the directory on
    /// first use.
    pub fn allocate_pdf_path(&self, article_no: &str) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(pdf_file_name(article_no)))
    }
}

/// Hands the saved document to the system viewer. Best-effort; a missing
/// viewer never fails the generation that produced the file.
pub fn open_in_viewer(path: &Path) {
    if let Err(err) = opener::open(path) {
        tracing::warn!(?err, path = %path.display(), "failed to open pdf in system viewer");
    }
}
