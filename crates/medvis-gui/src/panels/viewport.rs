use medvis_core::viewport::{ContainerRect, Point, Transform};

use crate::app::MedvisApp;
use crate::convert::{to_container, to_point, to_pointer_button, to_pos, to_rect};

const SLIDER_HANDLE_WIDTH: f32 = 16.0;
const SLIDER_KNOB_RADIUS: f32 = 10.0;
const SCROLL_ZOOM_RATE: f32 = 0.005;
const TAG_MARGIN: f32 = 8.0;

pub fn show(ctx: &egui::Context, app: &mut MedvisApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let original = app
            .textures
            .original
            .as_ref()
            .map(|t| (t.texture.id(), t.size_vec()));
        let derived = app.textures.derived.as_ref().map(|t| t.texture.id());

        let Some((original_id, image_size)) = original else {
            show_placeholder(ui, app);
            return;
        };

        let container = to_container(rect);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let handle = app.viewport.show_slider().then(|| {
            let x = app.viewport.slider_x(container);
            let handle_rect = egui::Rect::from_x_y_ranges(
                (x - SLIDER_HANDLE_WIDTH / 2.0)..=(x + SLIDER_HANDLE_WIDTH / 2.0),
                rect.y_range(),
            );
            ui.interact(handle_rect, response.id.with("slider"), egui::Sense::drag())
        });

        handle_pointer(ui, &response, handle.as_ref(), app, container);
        handle_zoom(ui, &response, app);
        update_cursor(ui, &response, handle.as_ref(), app);

        let transform = animated_transform(ctx, response.id, app);
        let base_size = fit_size(image_size, rect.size());
        let painter = ui.painter_at(rect);

        painter.add(textured_quad(original_id, rect.center(), base_size, &transform));
        if let (Some(derived_id), Some(clip)) = (derived, app.viewport.reveal_clip(container)) {
            painter
                .with_clip_rect(to_rect(clip).intersect(rect))
                .add(textured_quad(derived_id, rect.center(), base_size, &transform));
        }

        if app.viewport.show_slider() {
            draw_slider(&painter, rect, app.viewport.slider_x(container));
        }
        draw_tags(&painter, rect, app.viewport.show_slider());
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Forward egui pointer input to the viewport's drag session.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    handle: Option<&egui::Response>,
    app: &mut MedvisApp,
    container: ContainerRect,
) {
    let viewport = &mut app.viewport;

    if handle.is_some_and(|h| h.drag_started()) {
        viewport.slider_pointer_down();
    }
    for button in [
        egui::PointerButton::Primary,
        egui::PointerButton::Secondary,
        egui::PointerButton::Middle,
    ] {
        if !response.drag_started_by(button) {
            continue;
        }
        let origin = ui.input(|i| i.pointer.press_origin());
        if let (Some(pos), Some(button)) = (origin, to_pointer_button(button)) {
            viewport.pointer_down(to_point(pos), button);
        }
    }

    if viewport.drag_session().is_none() {
        return;
    }
    if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
        viewport.pointer_moved(to_point(pos), container);
    }
    if ui.input(|i| i.pointer.any_released()) {
        viewport.pointer_up();
    }
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut MedvisApp) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    let zoom = app.viewport.state().zoom * (scroll_delta * SCROLL_ZOOM_RATE).exp();
    app.viewport.set_zoom(zoom);
}

fn update_cursor(
    ui: &egui::Ui,
    response: &egui::Response,
    handle: Option<&egui::Response>,
    app: &MedvisApp,
) {
    let icon = if app.viewport.is_dragging_slider() || handle.is_some_and(|h| h.hovered()) {
        egui::CursorIcon::ResizeHorizontal
    } else if app.viewport.is_panning() {
        egui::CursorIcon::Grabbing
    } else if response.hovered() {
        egui::CursorIcon::Grab
    } else {
        return;
    };
    ui.ctx().set_cursor_icon(icon);
}

/// Ease zoom and pan toward the viewport's target; rotation snaps.
fn animated_transform(ctx: &egui::Context, id: egui::Id, app: &MedvisApp) -> Transform {
    let target = app.viewport.transform();
    let secs = app.viewport.transition().duration().as_secs_f32();

    let scale = ctx.animate_value_with_time(id.with("scale"), target.scale, secs);
    let x = ctx.animate_value_with_time(id.with("pan_x"), target.translate.x, secs);
    let y = ctx.animate_value_with_time(id.with("pan_y"), target.translate.y, secs);

    Transform {
        translate: Point::new(x, y),
        scale,
        rotation_deg: target.rotation_deg,
    }
}

/// Largest size that fits `available` without upscaling.
fn fit_size(image: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).min(1.0);
    image * scale
}

fn textured_quad(
    texture: egui::TextureId,
    center: egui::Pos2,
    size: egui::Vec2,
    transform: &Transform,
) -> egui::Shape {
    let (hw, hh) = (size.x / 2.0, size.y / 2.0);
    let corners = [
        (Point::new(-hw, -hh), egui::pos2(0.0, 0.0)),
        (Point::new(hw, -hh), egui::pos2(1.0, 0.0)),
        (Point::new(hw, hh), egui::pos2(1.0, 1.0)),
        (Point::new(-hw, hh), egui::pos2(0.0, 1.0)),
    ];

    let mut mesh = egui::Mesh::with_texture(texture);
    for (corner, uv) in corners {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: to_pos(transform.apply(corner)) + center.to_vec2(),
            uv,
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    egui::Shape::mesh(mesh)
}

fn draw_slider(painter: &egui::Painter, rect: egui::Rect, x: f32) {
    let stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
    painter.vline(x, rect.y_range(), stroke);
    let knob = egui::pos2(x, rect.center().y);
    painter.circle(
        knob,
        SLIDER_KNOB_RADIUS,
        egui::Color32::from_black_alpha(160),
        stroke,
    );
}

fn draw_tags(painter: &egui::Painter, rect: egui::Rect, has_derived: bool) {
    draw_tag(
        painter,
        rect.left_top() + egui::vec2(TAG_MARGIN, TAG_MARGIN),
        egui::Align2::LEFT_TOP,
        "Original",
        egui::Color32::from_black_alpha(128),
    );
    if has_derived {
        draw_tag(
            painter,
            rect.right_top() + egui::vec2(-TAG_MARGIN, TAG_MARGIN),
            egui::Align2::RIGHT_TOP,
            "Processed",
            egui::Color32::from_rgba_unmultiplied(30, 110, 220, 204),
        );
    }
}

fn draw_tag(
    painter: &egui::Painter,
    pos: egui::Pos2,
    anchor: egui::Align2,
    text: &str,
    fill: egui::Color32,
) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
    let text_rect = anchor.anchor_size(pos, galley.size());
    painter.rect_filled(text_rect.expand2(egui::vec2(6.0, 3.0)), 3.0, fill);
    painter.galley(text_rect.min, galley, egui::Color32::WHITE);
}

fn show_placeholder(ui: &mut egui::Ui, app: &MedvisApp) {
    let text = if app.ui_state.picker_open {
        "Choose an image..."
    } else {
        "Open an image to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
