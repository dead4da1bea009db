use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::consts::{ACCEPTED_TYPE_PREFIX, BYTES_PER_MB, DEFAULT_MAX_UPLOAD_MB};
use crate::error::{MedvisError, Result};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A file handed over by the picker, before validation.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk. The MIME type is inferred from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: mime_from_path(path).to_string(),
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// MIME type for a path, from the image format table. Unknown extensions map
/// to `application/octet-stream`.
pub fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Type and size rules applied to every selected file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub accepted_type_prefix: String,
    pub max_size_mb: u32,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_type_prefix: ACCEPTED_TYPE_PREFIX.to_string(),
            max_size_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl UploadPolicy {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb as u64 * BYTES_PER_MB
    }

    /// Type is checked before size.
    pub fn validate(&self, file: &SelectedFile) -> Result<()> {
        if !file.mime.starts_with(&self.accepted_type_prefix) {
            return Err(MedvisError::InvalidType {
                mime: file.mime.clone(),
            });
        }
        if file.size() > self.max_size_bytes() {
            return Err(MedvisError::TooLarge {
                size: file.size(),
                limit_mb: self.max_size_mb,
            });
        }
        Ok(())
    }
}

/// Process-unique identifier of an accepted upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

impl ImageId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

struct UploadInner {
    id: ImageId,
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

/// Shared handle to a validated upload.
///
/// Cloning is cheap. The bytes live until the last clone is dropped, so a
/// holder never sees a released image.
#[derive(Clone)]
pub struct UploadedImage {
    inner: Arc<UploadInner>,
}

impl UploadedImage {
    /// Validate `file` against `policy` and take ownership of its bytes.
    pub fn accept(file: SelectedFile, policy: &UploadPolicy) -> Result<Self> {
        policy.validate(&file)?;
        Ok(Self {
            inner: Arc::new(UploadInner {
                id: ImageId::next(),
                name: file.name,
                mime: file.mime,
                bytes: file.bytes,
            }),
        })
    }

    pub fn id(&self) -> ImageId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn mime(&self) -> &str {
        &self.inner.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.inner.bytes
    }

    pub fn size(&self) -> u64 {
        self.inner.bytes.len() as u64
    }

    pub fn downgrade(&self) -> WeakUpload {
        WeakUpload {
            id: self.inner.id,
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("mime", &self.inner.mime)
            .field("size", &self.inner.bytes.len())
            .finish()
    }
}

/// Non-owning observer of an upload.
#[derive(Clone)]
pub struct WeakUpload {
    id: ImageId,
    inner: Weak<UploadInner>,
}

impl WeakUpload {
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// True while at least one `UploadedImage` clone is alive.
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn upgrade(&self) -> Option<UploadedImage> {
        self.inner.upgrade().map(|inner| UploadedImage { inner })
    }
}
