use std::path::PathBuf;

use medvis_core::upload::SelectedFile;

/// Sent from the file-dialog thread back to the UI thread.
pub enum PickerResult {
    Selected(SelectedFile),
    ReadFailed { path: PathBuf, message: String },
    /// Dialog closed without a selection.
    Cancelled,
}
