//! Executes the preview and generate actions behind the form buttons.

use std::path::PathBuf;

use crate::error::{GenerateError, GenerateResult};
use crate::geometry::{CellMetrics, SheetLayout};
use crate::notification;
use crate::output::{self, OutputService};
use crate::pagination;
use crate::render::pdf;
use crate::render::plan;
use crate::render::preview::{self, Preview, PreviewSpec};
use crate::request::LabelRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Open the saved document in the system viewer.
    pub open_viewer: bool,
    /// Raise a desktop notification naming the saved file.
    pub notify: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            open_viewer: true,
            notify: true,
        }
    }
}

impl GenerateOptions {
    /// No desktop side effects; for headless callers and tests.
    pub const fn silent() -> Self {
        Self {
            open_viewer: false,
            notify: false,
        }
    }
}

/// What a successful generation produced; the shell's confirmation
/// dialog reads from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub path: PathBuf,
    pub labels: usize,
    pub pages: usize,
}

/// Validates, composes, renders, and saves one label document, then
/// fires the configured side effects. Aborts before any I/O when the
/// article number is blank.
pub fn generate_labels(
    request: &LabelRequest,
    output: &OutputService,
    options: GenerateOptions,
) -> GenerateResult<GenerateOutcome> {
    if !request.has_article_no() {
        return Err(GenerateError::MissingArticleNo);
    }

    let sheet = SheetLayout::default();
    let metrics = CellMetrics::default();
    let composed = plan::compose_document(request, &sheet, &metrics);
    let labels = pagination::instance_count(&request.size_quantities);

    let file_name = output::pdf_file_name(&request.article_no);
    let path = output.allocate_pdf_path(&request.article_no)?;
    let doc = pdf::render_document(&file_name, &composed, &sheet)?;
    pdf::save_document(doc, &path)?;

    // The writer always emits a first page, so an empty plan still saves
    // one blank sheet.
    let pages = composed.len().max(1);
    tracing::info!(path = %path.display(), labels, pages, "label document generated");

    if options.notify {
        notification::saved_document(&path);
    }
    if options.open_viewer {
        output::open_in_viewer(&path);
    }

    Ok(GenerateOutcome {
        path,
        labels,
        pages,
    })
}

/// Builds the on-screen preview model with the stock card layout. No
/// validation; an incomplete form previews whatever it holds.
pub fn preview_labels(request: &LabelRequest) -> Preview {
    preview::build_preview(request, PreviewSpec::default())
}
