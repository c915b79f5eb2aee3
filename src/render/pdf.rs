//! Materializes composed pages into a PDF document via `printpdf`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use image::{RgbImage, Rgba};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, ImageTransform, ImageXObject, IndirectFontRef,
    Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use thiserror::Error;

use super::{DrawOp, FontStyle, Page};
use crate::barcode::BarcodePattern;
use crate::geometry::{LabelRect, SheetLayout};

/// Longest edge images are downscaled to before embedding; ample for the
/// small image box at print resolution.
const MAX_IMAGE_EDGE: u32 = 512;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf backend error: {0}")]
    Pdf(String),
    #[error("failed to write pdf to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> RenderResult<Self> {
        let builtin = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|err| RenderError::Pdf(err.to_string()))
        };
        Ok(Self {
            regular: builtin(BuiltinFont::Helvetica)?,
            bold: builtin(BuiltinFont::HelveticaBold)?,
            oblique: builtin(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Oblique => &self.oblique,
        }
    }
}

/// Draws every composed page onto a fresh document. A document always has
/// a first page, so an empty plan materializes as one blank sheet.
pub fn render_document(
    title: &str,
    pages: &[Page],
    sheet: &SheetLayout,
) -> RenderResult<PdfDocumentReference> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(sheet.page_width),
        Mm(sheet.page_height),
        "labels",
    );
    let fonts = Fonts::load(&doc)?;
    let mut images: ImageCache = HashMap::new();

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(sheet.page_width), Mm(sheet.page_height), "labels");
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &fonts, &mut images);
    }

    Ok(doc)
}

/// Writes the finished document to disk.
pub fn save_document(doc: PdfDocumentReference, path: &Path) -> RenderResult<()> {
    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|err| RenderError::Pdf(err.to_string()))?;
    Ok(())
}

type ImageCache = HashMap<PathBuf, Option<RgbImage>>;

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts, images: &mut ImageCache) {
    for op in &page.ops {
        match op {
            DrawOp::Rect { rect } => stroke_rect(layer, *rect),
            DrawOp::Image { path, bounds } => draw_image(layer, path, *bounds, images),
            DrawOp::Text {
                content,
                style,
                size,
                x,
                y,
            } => {
                layer.use_text(content, *size, Mm(*x), Mm(*y), fonts.get(*style));
            }
            DrawOp::Barcode {
                pattern,
                x,
                y,
                module_width,
                height,
            } => draw_barcode(layer, pattern, *x, *y, *module_width, *height),
        }
    }
}

fn corner_points(rect: LabelRect) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(rect.x), Mm(rect.y)), false),
        (Point::new(Mm(rect.right()), Mm(rect.y)), false),
        (Point::new(Mm(rect.right()), Mm(rect.top())), false),
        (Point::new(Mm(rect.x), Mm(rect.top())), false),
    ]
}

fn stroke_rect(layer: &PdfLayerReference, rect: LabelRect) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points: corner_points(rect),
        is_closed: true,
    });
}

fn fill_rect(layer: &PdfLayerReference, rect: LabelRect) {
    layer.add_polygon(Polygon {
        rings: vec![corner_points(rect)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

/// One filled rectangle per run of set modules.
fn draw_barcode(
    layer: &PdfLayerReference,
    pattern: &BarcodePattern,
    x: f32,
    y: f32,
    module_width: f32,
    height: f32,
) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for (start, length) in pattern.bar_runs() {
        let bar = LabelRect::new(
            x + start as f32 * module_width,
            y,
            length as f32 * module_width,
            height,
        );
        fill_rect(layer, bar);
    }
}

/// Embeds the label image aspect-fit into its box, anchored at the box
/// top-left. Unreadable files are logged once and skipped; the label is
/// complete without them.
fn draw_image(layer: &PdfLayerReference, path: &Path, bounds: LabelRect, images: &mut ImageCache) {
    let decoded = images
        .entry(path.to_path_buf())
        .or_insert_with(|| match image::open(path) {
            Ok(raster) => Some(flatten_onto_white(
                &raster.thumbnail(MAX_IMAGE_EDGE, MAX_IMAGE_EDGE),
            )),
            Err(err) => {
                tracing::warn!(?err, path = %path.display(), "skipping unreadable label image");
                None
            }
        });
    let Some(rgb) = decoded else { return };

    let (width_px, height_px) = rgb.dimensions();
    let aspect = width_px as f32 / height_px as f32;
    let (final_width, final_height) = if bounds.width / bounds.height > aspect {
        (bounds.height * aspect, bounds.height)
    } else {
        (bounds.width, bounds.width / aspect)
    };

    let pdf_image = printpdf::Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.clone().into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    let dpi = width_px as f32 / (final_width / 25.4);
    pdf_image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(bounds.x)),
            translate_y: Some(Mm(bounds.top() - final_height)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

/// Composites any alpha channel against white so the embedded data is
/// plain RGB.
fn flatten_onto_white(raster: &image::DynamicImage) -> RgbImage {
    let rgba = raster.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |channel: u8| (channel as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::geometry::{A4_SHEET, CELL_METRICS};
    use crate::render::plan::compose_document;
    use crate::request::{LabelRequest, SizeQuantity};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tagsheet-pdf-{name}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn sample_request(quantity: u32) -> LabelRequest {
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
            size_quantities: vec![SizeQuantity::new("8uk", quantity)],
        }
    }

    fn assert_saves_as_pdf(request: &LabelRequest, dir_name: &str) -> u64 {
        let pages = compose_document(request, &A4_SHEET, &CELL_METRICS);
        let doc = render_document("labels", &pages, &A4_SHEET).expect("render");
        let dir = temp_dir(dir_name);
        let path = dir.join("out.pdf");
        save_document(doc, &path).expect("save");

        let bytes = fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"%PDF"), "missing pdf magic");
        let size = bytes.len() as u64;
        fs::remove_dir_all(&dir).ok();
        size
    }

    #[test]
    fn rendered_document_saves_as_a_parseable_pdf() {
        let size = assert_saves_as_pdf(&sample_request(3), "basic");
        assert!(size > 500);
    }

    #[test]
    fn unreadable_image_path_still_yields_a_complete_document() {
        let mut request = sample_request(2);
        request.image_path = Some(PathBuf::from("/nonexistent/shoe.png"));
        assert_saves_as_pdf(&request, "bad-image");
    }

    #[test]
    fn readable_image_is_embedded_and_grows_the_document() {
        let dir = temp_dir("good-image");
        let image_path = dir.join("shoe.png");
        let pixels = RgbImage::from_fn(64, 48, |x, _| image::Rgb([(x * 4) as u8, 80, 120]));
        pixels.save(&image_path).expect("write test image");

        let without = assert_saves_as_pdf(&sample_request(1), "good-image-before");

        let mut request = sample_request(1);
        request.image_path = Some(image_path.clone());
        let pages = compose_document(&request, &A4_SHEET, &CELL_METRICS);
        let doc = render_document("labels", &pages, &A4_SHEET).expect("render");
        let path = dir.join("out.pdf");
        save_document(doc, &path).expect("save");
        let with = fs::metadata(&path).expect("stat").len();

        assert!(with > without);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_plan_saves_a_single_blank_sheet() {
        let request = sample_request(0);
        assert_saves_as_pdf(&request, "empty");
    }

    #[test]
    fn save_into_a_missing_directory_reports_the_path() {
        let pages = compose_document(&sample_request(1), &A4_SHEET, &CELL_METRICS);
        let doc = render_document("labels", &pages, &A4_SHEET).expect("render");
        let path = PathBuf::from("/nonexistent-tagsheet-dir/out.pdf");
        let error = save_document(doc, &path).expect_err("create should fail");
        match error {
            RenderError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
