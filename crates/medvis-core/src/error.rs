use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedvisError {
    #[error("Invalid file type '{mime}'. Please upload an image file.")]
    InvalidType { mime: String },

    #[error("File size ({size} bytes) exceeds the {limit_mb}MB limit.")]
    TooLarge { size: u64, limit_mb: u32 },

    #[error("Failed to load image: {0}")]
    DecodeFailure(#[source] image::ImageError),

    #[error("Could not create render surface: {0}")]
    RenderFailure(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Image encode error: {0}")]
    Encode(#[source] image::ImageError),
}

impl MedvisError {
    /// True for the two kinds detected at submission time, before any run starts.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidType { .. } | Self::TooLarge { .. })
    }
}

pub type Result<T> = std::result::Result<T, MedvisError>;
