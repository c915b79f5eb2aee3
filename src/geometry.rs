//! Sheet and cell geometry: grid coordinates to printable rectangles.

use crate::pagination::GridPosition;

/// One typographic point in millimetres.
const PT: f32 = 25.4 / 72.0;

/// A label cell rectangle in millimetres. `y` is the bottom edge in the
/// bottom-up page coordinate system used by the PDF backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LabelRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Page size, margins, gaps, and grid dimensions for one sheet format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub rows: usize,
    pub cols: usize,
}

/// A4 portrait, 3 columns by 4 rows, the stock shoe-label sheet.
pub const A4_SHEET: SheetLayout = SheetLayout {
    page_width: 210.0,
    page_height: 297.0,
    margin_x: 10.0,
    margin_y: 12.0,
    gap_x: 5.0,
    gap_y: 6.0,
    rows: 4,
    cols: 3,
};

impl Default for SheetLayout {
    fn default() -> Self {
        A4_SHEET
    }
}

impl SheetLayout {
    pub fn per_page(&self) -> usize {
        self.rows * self.cols
    }

    pub fn label_width(&self) -> f32 {
        let cols = self.cols as f32;
        (self.page_width - 2.0 * self.margin_x - (cols - 1.0) * self.gap_x) / cols
    }

    pub fn label_height(&self) -> f32 {
        let rows = self.rows as f32;
        (self.page_height - 2.0 * self.margin_y - (rows - 1.0) * self.gap_y) / rows
    }

    /// Absolute cell rectangle for a grid coordinate. The page index plays
    /// no part here; every page tiles identically.
    pub fn rect(&self, position: GridPosition) -> LabelRect {
        let width = self.label_width();
        let height = self.label_height();
        let x = self.margin_x + position.column as f32 * (width + self.gap_x);
        let y_top = self.page_height - (self.margin_y + position.row as f32 * (height + self.gap_y));
        LabelRect::new(x, y_top - height, width, height)
    }
}

/// Fixed offsets inside one cell, in millimetres. These are absolute, not
/// proportional: a cell smaller than image box plus padding overflows
/// rather than re-scaling its contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub pad: f32,
    pub image_box: f32,
    pub text_gap: f32,
    pub first_baseline_drop: f32,
    pub line_pitch: f32,
    pub firm_rise: f32,
    pub barcode_rise: f32,
    pub bar_height: f32,
    pub module_width: f32,
}

pub const CELL_METRICS: CellMetrics = CellMetrics {
    pad: 4.0,
    image_box: 18.0,
    text_gap: 4.0,
    first_baseline_drop: 2.0 * PT,
    line_pitch: 10.0 * PT,
    firm_rise: 4.0 * PT,
    barcode_rise: 8.0 * PT,
    bar_height: 9.0,
    module_width: 0.19,
};

impl Default for CellMetrics {
    fn default() -> Self {
        CELL_METRICS
    }
}

/// Resolved sub-positions for one cell: where the image, each text
/// baseline, the firm line, and the barcode go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    rect: LabelRect,
    metrics: CellMetrics,
}

impl CellLayout {
    pub const fn new(rect: LabelRect, metrics: CellMetrics) -> Self {
        Self { rect, metrics }
    }

    pub fn rect(&self) -> LabelRect {
        self.rect
    }

    /// Image box anchored at the padded top-left corner.
    pub fn image_box(&self) -> LabelRect {
        let side = self.metrics.image_box;
        LabelRect::new(
            self.rect.x + self.metrics.pad,
            self.rect.top() - self.metrics.pad - side,
            side,
            side,
        )
    }

    /// Left edge of the text block, right of the image column.
    pub fn text_x(&self) -> f32 {
        self.rect.x + self.metrics.pad + self.metrics.image_box + self.metrics.text_gap
    }

    /// Baseline of text line `index`, counted from the top of the block.
    pub fn text_baseline(&self, index: usize) -> f32 {
        self.rect.top()
            - self.metrics.pad
            - self.metrics.first_baseline_drop
            - index as f32 * self.metrics.line_pitch
    }

    /// Baseline of the firm/address line near the cell bottom.
    pub fn firm_baseline(&self) -> f32 {
        self.rect.y + self.metrics.pad + self.metrics.firm_rise
    }

    /// Bottom edge of the barcode bars.
    pub fn barcode_y(&self) -> f32 {
        self.firm_baseline() + self.metrics.barcode_rise
    }

    /// Left edge of a barcode of the given width: centered in the cell but
    /// never left of the padded image column.
    pub fn barcode_x(&self, barcode_width: f32) -> f32 {
        let centered = self.rect.x + (self.rect.width - barcode_width) / 2.0;
        centered.max(self.rect.x + self.metrics.pad)
    }
}
