use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use medvis_core::viewport::{ContainerRect, Point, PointerButton};

/// Convert an RGBA8 raster to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Shrink `image` so neither side exceeds `max_side`, keeping the aspect
/// ratio. Images already within bounds are borrowed unchanged.
pub fn fit_texture_side(image: &RgbaImage, max_side: usize) -> Cow<'_, RgbaImage> {
    let (w, h) = image.dimensions();
    let longest = w.max(h) as usize;
    if longest <= max_side || max_side == 0 {
        return Cow::Borrowed(image);
    }
    let scale = max_side as f64 / longest as f64;
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_side as u32);
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_side as u32);
    Cow::Owned(imageops::resize(image, nw, nh, FilterType::Triangle))
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

pub fn to_pos(p: Point) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

pub fn to_container(rect: egui::Rect) -> ContainerRect {
    ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn to_rect(r: ContainerRect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.left, r.top), egui::vec2(r.width, r.height))
}

pub fn to_pointer_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}
