use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{MedvisError, Result};

/// Decode encoded image bytes into an RGBA8 raster. The format is sniffed
/// from the content, not from the declared MIME type.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(MedvisError::Io)?;
    let img = reader.decode().map_err(MedvisError::DecodeFailure)?;
    Ok(img.to_rgba8())
}

/// Decode only the header to learn the pixel dimensions.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(MedvisError::Io)?;
    reader.into_dimensions().map_err(MedvisError::DecodeFailure)
}

/// Encode an RGBA8 raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(MedvisError::Encode)?;
    Ok(buf.into_inner())
}

/// Save an RGBA8 raster as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(MedvisError::Encode)?;
    Ok(())
}
