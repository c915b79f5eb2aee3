use thiserror::Error;

use crate::output::OutputError;
use crate::render::pdf::RenderError;

pub type GenerateResult<T> = std::result::Result<T, GenerateError>;

/// Failures that halt a whole Generate. Per-label problems (unreadable
/// image, unencodable barcode) never surface here; they degrade the one
/// label and the run continues.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("article number is required")]
    MissingArticleNo,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
