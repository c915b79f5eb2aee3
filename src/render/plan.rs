//! Pure document composition: label instances to per-page draw ops.

use super::{DrawOp, FontStyle, Page};
use crate::barcode;
use crate::geometry::{CellLayout, CellMetrics, SheetLayout};
use crate::pagination::{self, LabelInstance};
use crate::request::LabelRequest;

const TEXT_SIZE: f32 = 8.0;
const FIRM_SIZE: f32 = 7.0;

/// Walks the expanded instances in sequence order and fills pages on the
/// sheet grid. Touches no disk and no PDF state, so composing the same
/// request twice yields identical pages.
pub fn compose_document(
    request: &LabelRequest,
    sheet: &SheetLayout,
    metrics: &CellMetrics,
) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    for instance in pagination::expand(&request.size_quantities) {
        let position = pagination::grid_position(instance.sequence_index, sheet.rows, sheet.cols);
        while pages.len() <= position.page {
            pages.push(Page::default());
        }
        let layout = CellLayout::new(sheet.rect(position), *metrics);
        compose_cell(&mut pages[position.page].ops, request, &instance, layout, metrics);
    }
    pages
}

/// Draw order within a cell: border, image, text lines, firm line,
/// barcode. An unencodable barcode drops only the barcode.
fn compose_cell(
    ops: &mut Vec<DrawOp>,
    request: &LabelRequest,
    instance: &LabelInstance,
    layout: CellLayout,
    metrics: &CellMetrics,
) {
    ops.push(DrawOp::Rect {
        rect: layout.rect(),
    });

    if let Some(path) = &request.image_path {
        ops.push(DrawOp::Image {
            path: path.clone(),
            bounds: layout.image_box(),
        });
    }

    for (index, content) in request.printed_lines(&instance.size).into_iter().enumerate() {
        let style = if index == 0 {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        };
        ops.push(DrawOp::Text {
            content,
            style,
            size: TEXT_SIZE,
            x: layout.text_x(),
            y: layout.text_baseline(index),
        });
    }

    ops.push(DrawOp::Text {
        content: request.firm_line(),
        style: FontStyle::Oblique,
        size: FIRM_SIZE,
        x: layout.text_x(),
        y: layout.firm_baseline(),
    });

    match barcode::encode(&request.barcode_payload(&instance.size)) {
        Ok(pattern) => {
            let width = pattern.width(metrics.module_width);
            ops.push(DrawOp::Barcode {
                x: layout.barcode_x(width),
                y: layout.barcode_y(),
                pattern,
                module_width: metrics.module_width,
                height: metrics.bar_height,
            });
        }
        Err(err) => {
            tracing::warn!(?err, size = %instance.size, "skipping unencodable barcode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::geometry::{A4_SHEET, CELL_METRICS};
    use crate::request::SizeQuantity;

    fn request_with(pairs: &[(&str, u32)]) -> LabelRequest {
        LabelRequest {
            article_no: "AX-204".to_string(),
            color: "Tan".to_string(),
            mrp: "1499".to_string(),
            firm_name: "Stride Footwear".to_string(),
            address: "14 Market Rd, Agra".to_string(),
            marketed_by: "Stride Retail Pvt Ltd".to_string(),
            contact: "9876543210".to_string(),
            website: "stride.example".to_string(),
            image_path: None,
            size_quantities: pairs
                .iter()
                .map(|(size, quantity)| SizeQuantity::new(*size, *quantity))
                .collect(),
        }
    }

    fn op_kinds(ops: &[DrawOp]) -> Vec<&'static str> {
        ops.iter()
            .map(|op| match op {
                DrawOp::Rect { .. } => "rect",
                DrawOp::Image { .. } => "image",
                DrawOp::Text { .. } => "text",
                DrawOp::Barcode { .. } => "barcode",
            })
            .collect()
    }

    #[test]
    fn fifteen_labels_fill_two_pages_twelve_then_three() {
        let request = request_with(&[("6uk", 2), ("7uk", 0), ("8uk", 13)]);
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);

        assert_eq!(pages.len(), 2);
        let borders = |page: &Page| op_kinds(&page.ops).iter().filter(|k| **k == "rect").count();
        assert_eq!(borders(&pages[0]), 12);
        assert_eq!(borders(&pages[1]), 3);
    }

    #[test]
    fn cell_ops_run_border_image_text_firm_barcode() {
        let mut request = request_with(&[("6uk", 1)]);
        request.image_path = Some(PathBuf::from("/tmp/shoe.png"));
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);

        assert_eq!(pages.len(), 1);
        assert_eq!(
            op_kinds(&pages[0].ops),
            vec![
                "rect", "image", "text", "text", "text", "text", "text", "text", "text", "barcode",
            ]
        );
    }

    #[test]
    fn missing_image_path_composes_no_image_op() {
        let request = request_with(&[("6uk", 1)]);
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        assert!(!op_kinds(&pages[0].ops).contains(&"image"));
    }

    #[test]
    fn article_line_is_bold_firm_line_is_oblique() {
        let request = request_with(&[("9uk", 1)]);
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        let texts: Vec<(&str, FontStyle)> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, style, .. } => Some((content.as_str(), *style)),
                _ => None,
            })
            .collect();

        assert_eq!(texts[0], ("Article No: AX-204", FontStyle::Bold));
        assert_eq!(texts[1].1, FontStyle::Regular);
        assert_eq!(
            *texts.last().unwrap(),
            ("Stride Footwear | 14 Market Rd, Agra", FontStyle::Oblique)
        );
    }

    #[test]
    fn firm_line_is_drawn_at_the_text_column() {
        let request = request_with(&[("6uk", 1)]);
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        let layout = CellLayout::new(
            A4_SHEET.rect(crate::pagination::grid_position(0, 4, 3)),
            CELL_METRICS,
        );

        let firm_x = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text {
                    style: FontStyle::Oblique,
                    x,
                    ..
                } => Some(*x),
                _ => None,
            })
            .expect("firm line op present");

        assert_eq!(firm_x, layout.text_x());
        assert!(firm_x > layout.rect().x + CELL_METRICS.pad);
    }

    #[test]
    fn unencodable_barcode_drops_only_the_barcode_op() {
        let mut request = request_with(&[("6uk", 1)]);
        request.article_no = "\u{20B9}42".to_string();
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);

        let kinds = op_kinds(&pages[0].ops);
        assert!(!kinds.contains(&"barcode"));
        assert_eq!(kinds.iter().filter(|k| **k == "text").count(), 7);
        assert!(kinds.contains(&"rect"));
    }

    #[test]
    fn all_zero_quantities_compose_zero_pages() {
        let request = request_with(&[("6uk", 0), ("11uk", 0)]);
        assert!(compose_document(&request, &A4_SHEET, &CELL_METRICS).is_empty());
    }

    #[test]
    fn composition_is_deterministic_for_identical_requests() {
        let request = request_with(&[("7uk", 5), ("10uk", 9)]);
        let first = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        let second = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        assert_eq!(first, second);
    }

    #[test]
    fn barcode_sits_above_the_firm_baseline_inside_the_cell() {
        let request = request_with(&[("8uk", 1)]);
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        let (barcode_x, barcode_y) = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Barcode { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .expect("barcode op present");

        let rect = A4_SHEET.rect(crate::pagination::grid_position(0, 4, 3));
        assert!(barcode_x >= rect.x + CELL_METRICS.pad);
        assert!(barcode_y > rect.y && barcode_y < rect.top());
    }
}
