//! Rendering: label cells composed into a display list of draw
//! primitives, materialized to PDF or presented as preview cards.

pub mod pdf;
pub mod plan;
pub mod preview;

use std::path::PathBuf;

use crate::barcode::BarcodePattern;
use crate::geometry::LabelRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

/// One draw primitive. Coordinates are millimetres in the bottom-up page
/// system; text `y` is the baseline, barcode `y` the bottom of the bars.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: LabelRect,
    },
    Image {
        path: PathBuf,
        bounds: LabelRect,
    },
    Text {
        content: String,
        style: FontStyle,
        size: f32,
        x: f32,
        y: f32,
    },
    Barcode {
        pattern: BarcodePattern,
        x: f32,
        y: f32,
        module_width: f32,
        height: f32,
    },
}

/// Ops for one output page, in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}
