use medvis_core::run::ProcessingStatus;

use crate::app::MedvisApp;

pub fn show(ctx: &egui::Context, app: &mut MedvisApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        let run = app.sequencer.run();
        ui.horizontal(|ui| {
            let color = match run.status {
                ProcessingStatus::Success => egui::Color32::from_rgb(80, 180, 100),
                ProcessingStatus::Error => egui::Color32::from_rgb(220, 80, 80),
                _ => ui.visuals().text_color(),
            };
            ui.colored_label(color, run.status.to_string());
            if let Some(ref name) = app.ui_state.file_name {
                ui.separator();
                ui.label(name);
            }
        });

        if run.status == ProcessingStatus::Idle {
            // Invisible placeholder, same height.
            ui.add(egui::ProgressBar::new(0.0).text(""));
        } else {
            ui.add(
                egui::ProgressBar::new(run.progress as f32 / 100.0)
                    .text(format!("{} ({}%)", run.message, run.progress))
                    .animate(run.status.is_active()),
            );
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(ref original) = app.textures.original {
                ui.label(format!("{}x{}", original.size[0], original.size[1]));
                ui.separator();
            }
            let state = app.viewport.state();
            ui.label(format!("Zoom: {:.0}%", state.zoom));
            ui.separator();
            ui.label(format!("Rotation: {}\u{b0}", state.rotation));
            if let Some(derived) = app.sequencer.derived() {
                ui.separator();
                ui.label(format!("Findings: {}", derived.findings().len()));
            }
        });

        ui.add_space(2.0);
    });
}
