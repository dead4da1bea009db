use ab_glyph::FontArc;
use image::{GenericImage, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_text_mut, Blend,
};
use imageproc::rect::Rect;
use rand::Rng;
use tracing::debug;

use crate::consts::{LABEL_FONT_PX, LABEL_OFFSET_X, LABEL_OFFSET_Y, MAX_CANVAS_DIMENSION};
use crate::error::{MedvisError, Result};
use crate::io::image_io::decode_rgba;
use crate::upload::UploadedImage;

use super::config::OverlayStyle;
use super::types::DerivedImage;

/// Approximate advance of one label glyph at [`LABEL_FONT_PX`].
const LABEL_GLYPH_WIDTH: u32 = 7;

/// A highlighted region stamped on a derived image.
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub label: String,
    /// Centre in image pixel coordinates.
    pub center: (f32, f32),
    pub radius: f32,
}

/// Pick a random number of findings with centres inside the central
/// `1 - 2 * margin` of each axis.
pub fn place_findings<R: Rng>(
    rng: &mut R,
    width: u32,
    height: u32,
    style: &OverlayStyle,
) -> Vec<Finding> {
    let count = rng.gen_range(style.min_findings..=style.max_findings);
    let (w, h) = (width as f32, height as f32);
    let span = 1.0 - 2.0 * style.margin;

    (0..count)
        .map(|_| {
            let x = rng.gen::<f32>() * w * span + w * style.margin;
            let y = rng.gen::<f32>() * h * span + h * style.margin;
            let radius =
                style.min_radius + rng.gen::<f32>() * (style.max_radius - style.min_radius);
            Finding {
                label: style.label.clone(),
                center: (x, y),
                radius,
            }
        })
        .collect()
}

/// Stamp `findings` onto `canvas`: translucent fill, outline, then label.
pub fn render_findings(
    canvas: RgbaImage,
    findings: &[Finding],
    style: &OverlayStyle,
    font: Option<&FontArc>,
) -> Result<RgbaImage> {
    check_surface(canvas.width(), canvas.height())?;

    let fill = Rgba(style.fill);
    let outline = Rgba(style.outline);
    let mut blend = Blend(canvas);

    for finding in findings {
        let center = (finding.center.0.round() as i32, finding.center.1.round() as i32);
        let radius = finding.radius.round() as i32;

        draw_filled_circle_mut(&mut blend, center, radius, fill);
        for offset in 0..style.outline_width as i32 {
            draw_hollow_circle_mut(&mut blend, center, radius + offset, outline);
        }
        draw_label(&mut blend, finding, outline, font);
    }

    Ok(blend.0)
}

fn draw_label(
    canvas: &mut Blend<RgbaImage>,
    finding: &Finding,
    color: Rgba<u8>,
    font: Option<&FontArc>,
) {
    // Anchor is the text baseline; imageproc positions by the top edge.
    let x = (finding.center.0 - LABEL_OFFSET_X).round() as i32;
    let top = (finding.center.1 - finding.radius - LABEL_OFFSET_Y - LABEL_FONT_PX).round() as i32;
    let text_color = Rgba([255, 255, 255, 255]);

    match font {
        Some(font) => draw_text_mut(canvas, text_color, x, top, LABEL_FONT_PX, font, &finding.label),
        None => {
            let chars = finding.label.chars().count().max(1) as u32;
            let tab = Rect::at(x, top).of_size(chars * LABEL_GLYPH_WIDTH, LABEL_FONT_PX as u32);
            draw_filled_rect_mut(canvas, tab, color);
        }
    }
}

fn check_surface(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MedvisError::RenderFailure(format!(
            "empty canvas ({width}x{height})"
        )));
    }
    if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
        return Err(MedvisError::RenderFailure(format!(
            "canvas {width}x{height} exceeds {MAX_CANVAS_DIMENSION} px per side"
        )));
    }
    Ok(())
}

/// Decode the upload, copy it onto a fresh canvas of the same size and stamp
/// random findings on it.
pub fn derive_image<R: Rng>(
    image: &UploadedImage,
    style: &OverlayStyle,
    font: Option<&FontArc>,
    rng: &mut R,
) -> Result<DerivedImage> {
    let source = decode_rgba(image.bytes())?;
    let (width, height) = source.dimensions();
    check_surface(width, height)?;

    let mut canvas = RgbaImage::new(width, height);
    canvas
        .copy_from(&source, 0, 0)
        .map_err(|e| MedvisError::RenderFailure(e.to_string()))?;

    let findings = place_findings(rng, width, height, style);
    let canvas = render_findings(canvas, &findings, style, font)?;
    debug!(
        image = %image.id(),
        width,
        height,
        findings = findings.len(),
        "derived image rendered"
    );

    Ok(DerivedImage::new(canvas, findings))
}
