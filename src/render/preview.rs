//! On-screen preview model: label cards in wrapped rows. Informal pixel
//! scale, not print-accurate; no barcode.

use std::path::Path;

use image::RgbaImage;

use crate::pagination::{self, pages_needed};
use crate::request::LabelRequest;

/// Compile-time card layout tokens, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSpec {
    /// Cards per wrapped row; independent of the printed sheet's columns.
    pub per_row: usize,
    pub card_width: u32,
    pub card_height: u32,
    pub thumb_box: u32,
    pub gutter: u32,
}

pub const PREVIEW_SPEC: PreviewSpec = PreviewSpec {
    per_row: 3,
    card_width: 260,
    card_height: 150,
    thumb_box: 80,
    gutter: 8,
};

impl Default for PreviewSpec {
    fn default() -> Self {
        PREVIEW_SPEC
    }
}

/// Card position in screen coordinates, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One label's card: thumbnail on the left, text lines on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCard {
    pub bounds: CardBounds,
    pub size: String,
    pub thumbnail: Option<RgbaImage>,
    pub lines: Vec<String>,
}

/// The scrollable canvas content for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub spec: PreviewSpec,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cards: Vec<PreviewCard>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Builds cards for every label instance. The one request image is
/// thumbnailed once and shared across cards; an unloadable image leaves
/// every card without one.
pub fn build_preview(request: &LabelRequest, spec: PreviewSpec) -> Preview {
    let thumbnail = request
        .image_path
        .as_deref()
        .and_then(|path| load_thumbnail(path, spec.thumb_box));

    let cards: Vec<PreviewCard> = pagination::expand(&request.size_quantities)
        .map(|instance| {
            let row = (instance.sequence_index / spec.per_row) as u32;
            let column = (instance.sequence_index % spec.per_row) as u32;
            PreviewCard {
                bounds: CardBounds {
                    x: spec.gutter + column * (spec.card_width + spec.gutter),
                    y: spec.gutter + row * (spec.card_height + spec.gutter),
                    width: spec.card_width,
                    height: spec.card_height,
                },
                lines: request.preview_lines(&instance.size),
                thumbnail: thumbnail.clone(),
                size: instance.size,
            }
        })
        .collect();

    let rows = pages_needed(cards.len(), spec.per_row) as u32;
    Preview {
        spec,
        canvas_width: spec.gutter + spec.per_row as u32 * (spec.card_width + spec.gutter),
        canvas_height: spec.gutter + rows * (spec.card_height + spec.gutter),
        cards,
    }
}

fn load_thumbnail(path: &Path, box_px: u32) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(raster) => Some(raster.thumbnail(box_px, box_px).to_rgba8()),
        Err(err) => {
            tracing::debug!(?err, path = %path.display(), "preview thumbnail unavailable");
            None
        }
    }
}
