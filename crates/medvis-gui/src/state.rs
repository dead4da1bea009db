use medvis_core::run::{ProcessingStatus, RunId};
use medvis_core::upload::ImageId;

const MAX_LOG_LINES: usize = 200;

/// Everything the panels show that is not owned by the sequencer or viewport.
#[derive(Default)]
pub struct UIState {
    pub log_messages: Vec<String>,
    pub file_name: Option<String>,
    /// Status seen on the previous frame, for logging transitions.
    pub last_status: ProcessingStatus,
    /// A file dialog is open on its own thread.
    pub picker_open: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: impl Into<String>) {
        self.log_messages.push(msg.into());
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}

/// Which sequencer artifact a texture was uploaded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSource {
    Upload(ImageId),
    Run(RunId),
}

pub struct LayerTexture {
    pub texture: egui::TextureHandle,
    /// Source pixel size; the texture itself may be downscaled.
    pub size: [usize; 2],
    pub source: TextureSource,
}

impl LayerTexture {
    pub fn size_vec(&self) -> egui::Vec2 {
        egui::vec2(self.size[0] as f32, self.size[1] as f32)
    }
}

#[derive(Default)]
pub struct TextureState {
    pub original: Option<LayerTexture>,
    pub derived: Option<LayerTexture>,
    /// Upload whose bytes did not decode; not retried every frame.
    pub failed_original: Option<ImageId>,
}

impl TextureState {
    /// Whether the original layer must be rebuilt to show `wanted`.
    pub fn original_stale(&self, wanted: Option<ImageId>) -> bool {
        match wanted {
            None => self.original.is_some(),
            Some(id) => {
                let current = self.original.as_ref().map(|t| t.source);
                current != Some(TextureSource::Upload(id)) && self.failed_original != Some(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use medvis_core::upload::{SelectedFile, UploadPolicy, UploadedImage};

    use super::*;

    fn image_id() -> ImageId {
        let file = SelectedFile::new("a.png", "image/png", vec![0]);
        UploadedImage::accept(file, &UploadPolicy::default())
            .unwrap()
            .id()
    }

    #[test]
    fn failed_upload_is_not_decoded_again() {
        let id = image_id();
        let mut textures = TextureState::default();
        assert!(textures.original_stale(Some(id)));

        textures.failed_original = Some(id);
        assert!(!textures.original_stale(Some(id)));
        assert!(textures.original_stale(Some(image_id())));
    }

    #[test]
    fn nothing_to_do_without_upload() {
        assert!(!TextureState::default().original_stale(None));
    }
}
