use anyhow::Context;
use medvis_core::consts::{MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT};
use medvis_core::upload::SelectedFile;

use crate::app::MedvisApp;
use crate::messages::PickerResult;

const ZOOM_SLIDER_STEP: f64 = 10.0;

pub fn show(ctx: &egui::Context, app: &mut MedvisApp) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            file_section(ui, app);
            ui.separator();
            zoom_section(ui, app);
            ui.separator();
            rotate_section(ui, app);
            ui.separator();
            layer_section(ui, app);
        });
        ui.add_space(2.0);
    });
}

fn file_section(ui: &mut egui::Ui, app: &mut MedvisApp) {
    if ui
        .add_enabled(!app.ui_state.picker_open, egui::Button::new("Open..."))
        .clicked()
    {
        app.ui_state.picker_open = true;
        let tx = app.picker_tx.clone();
        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("Image files", &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "webp"])
                .add_filter("All files", &["*"])
                .pick_file()
            else {
                let _ = tx.send(PickerResult::Cancelled);
                return;
            };
            let result = SelectedFile::from_path(&path)
                .with_context(|| format!("Failed to read {}", path.display()));
            let msg = match result {
                Ok(file) => PickerResult::Selected(file),
                Err(e) => PickerResult::ReadFailed {
                    path,
                    message: format!("{e:#}"),
                },
            };
            let _ = tx.send(msg);
        });
    }

    let has_image = app.sequencer.original().is_some();
    if ui
        .add_enabled(has_image, egui::Button::new("Reset"))
        .on_hover_text("Cancel the run and clear both images")
        .clicked()
    {
        app.reset_run();
    }
}

fn zoom_section(ui: &mut egui::Ui, app: &mut MedvisApp) {
    if ui.button("-").on_hover_text("Zoom out").clicked() {
        app.viewport.zoom_out();
    }

    let mut zoom = app.viewport.state().zoom;
    let response = ui.add(
        egui::Slider::new(&mut zoom, MIN_ZOOM_PERCENT..=MAX_ZOOM_PERCENT)
            .step_by(ZOOM_SLIDER_STEP)
            .show_value(false),
    );
    if response.changed() {
        app.viewport.set_zoom(zoom);
    }

    if ui.button("+").on_hover_text("Zoom in").clicked() {
        app.viewport.zoom_in();
    }
    ui.label(format!("{:.0}%", app.viewport.state().zoom));
}

fn rotate_section(ui: &mut egui::Ui, app: &mut MedvisApp) {
    if ui.button("Rotate left").clicked() {
        app.viewport.rotate_left();
    }
    if ui.button("Rotate right").clicked() {
        app.viewport.rotate_right();
    }
    if ui.button("Reset view").clicked() {
        app.viewport.reset_view();
    }
}

fn layer_section(ui: &mut egui::Ui, app: &mut MedvisApp) {
    // Only offered once a processed image exists.
    if !app.viewport.show_slider() {
        return;
    }
    let label = if app.viewport.show_derived_layer() {
        "Hide processed"
    } else {
        "Show processed"
    };
    if ui.button(label).clicked() {
        app.viewport.toggle_derived_layer();
    }
}
