use std::sync::mpsc;
use std::time::Duration;

use image::RgbaImage;
use medvis_core::io::image_io::decode_rgba;
use medvis_core::run::ProcessingStatus;
use medvis_core::sequencer::Sequencer;
use medvis_core::viewport::Viewport;

use crate::convert::{fit_texture_side, rgba_to_color_image};
use crate::messages::PickerResult;
use crate::panels;
use crate::state::{LayerTexture, TextureSource, TextureState, UIState};

/// Repaint cadence while a run or file dialog is pending.
const ACTIVE_REPAINT: Duration = Duration::from_millis(50);

pub struct MedvisApp {
    pub sequencer: Sequencer,
    pub viewport: Viewport,
    pub picker_tx: mpsc::Sender<PickerResult>,
    pub picker_rx: mpsc::Receiver<PickerResult>,
    pub ui_state: UIState,
    pub textures: TextureState,
}

impl MedvisApp {
    pub fn new(sequencer: Sequencer) -> Self {
        let (picker_tx, picker_rx) = mpsc::channel();
        Self {
            sequencer,
            viewport: Viewport::new(),
            picker_tx,
            picker_rx,
            ui_state: UIState::default(),
            textures: TextureState::default(),
        }
    }

    /// Submit whatever the file dialog produced.
    fn poll_picker(&mut self) {
        while let Ok(result) = self.picker_rx.try_recv() {
            self.ui_state.picker_open = false;
            match result {
                PickerResult::Selected(file) => {
                    let name = file.name.clone();
                    match self.sequencer.submit(file) {
                        Ok(run_id) => {
                            self.ui_state.add_log(format!("Opened: {name} ({run_id})"));
                            self.ui_state.file_name = Some(name);
                        }
                        Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
                    }
                }
                PickerResult::ReadFailed { path, message } => {
                    self.ui_state
                        .add_log(format!("ERROR: {}: {message}", path.display()));
                }
                PickerResult::Cancelled => {}
            }
        }
    }

    fn poll_sequencer(&mut self) {
        for update in self.sequencer.poll() {
            if update.status != self.ui_state.last_status {
                match update.status {
                    ProcessingStatus::Error => self.ui_state.add_log(format!(
                        "{}: {}",
                        update.message,
                        update.failure.as_deref().unwrap_or("unknown error")
                    )),
                    status => self.ui_state.add_log(status.to_string()),
                }
                self.ui_state.last_status = update.status;
            }
        }
        if self.sequencer.status() == ProcessingStatus::Idle {
            self.ui_state.last_status = ProcessingStatus::Idle;
        }
    }

    /// Keep both layer textures in step with the sequencer's artifacts.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let wanted = self.sequencer.original().map(|o| o.id());
        if self.textures.original_stale(wanted) {
            self.textures.original = None;
            self.textures.failed_original = None;
            if let Some(upload) = self.sequencer.original() {
                match decode_rgba(upload.bytes()) {
                    Ok(image) => {
                        self.textures.original = Some(load_layer(
                            ctx,
                            "original",
                            &image,
                            TextureSource::Upload(upload.id()),
                        ));
                    }
                    // The run reports the decode failure itself.
                    Err(_) => self.textures.failed_original = Some(upload.id()),
                }
            }
        }

        let run_id = self.sequencer.run().run_id;
        let current = self.textures.derived.as_ref().map(|t| t.source);
        match self.sequencer.derived() {
            Some(derived) if current != Some(TextureSource::Run(run_id)) => {
                self.textures.derived = Some(load_layer(
                    ctx,
                    "derived",
                    derived.image(),
                    TextureSource::Run(run_id),
                ));
            }
            Some(_) => {}
            None => self.textures.derived = None,
        }

        self.viewport
            .set_has_derived(self.textures.derived.is_some());
    }

    /// Clear the run and both layers.
    pub fn reset_run(&mut self) {
        self.sequencer.reset();
        self.textures = TextureState::default();
        self.viewport.set_has_derived(false);
        self.ui_state.file_name = None;
        self.ui_state.add_log("Reset");
    }
}

fn load_layer(
    ctx: &egui::Context,
    name: &str,
    image: &RgbaImage,
    source: TextureSource,
) -> LayerTexture {
    let size = [image.width() as usize, image.height() as usize];
    let max_side = ctx.input(|i| i.max_texture_side);
    let color = rgba_to_color_image(&fit_texture_side(image, max_side));
    let texture = ctx.load_texture(name, color, egui::TextureOptions::LINEAR);
    LayerTexture {
        texture,
        size,
        source,
    }
}

impl eframe::App for MedvisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_picker();
        self.poll_sequencer();
        self.sync_textures(ctx);

        panels::controls::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.sequencer.is_running() || self.ui_state.picker_open {
            ctx.request_repaint_after(ACTIVE_REPAINT);
        }
    }
}
