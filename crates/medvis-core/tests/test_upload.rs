mod common;

use std::io::Write;
use std::path::Path;

use common::png_bytes;
use medvis_core::error::MedvisError;
use medvis_core::upload::{mime_from_path, SelectedFile, UploadPolicy, UploadedImage};

#[test]
fn test_default_policy() {
    let policy = UploadPolicy::default();
    assert_eq!(policy.accepted_type_prefix, "image/");
    assert_eq!(policy.max_size_mb, 10);
    assert_eq!(policy.max_size_bytes(), 10 * 1024 * 1024);
}

#[test]
fn test_file_at_limit_is_accepted() {
    let policy = UploadPolicy::default();
    let file = SelectedFile::new("edge.png", "image/png", vec![0u8; 10 * 1024 * 1024]);
    assert!(policy.validate(&file).is_ok());
}

#[test]
fn test_one_byte_over_limit_is_rejected() {
    let policy = UploadPolicy {
        max_size_mb: 1,
        ..UploadPolicy::default()
    };
    let file = SelectedFile::new("over.png", "image/png", vec![0u8; 1024 * 1024 + 1]);
    let err = policy.validate(&file).unwrap_err();
    assert!(matches!(err, MedvisError::TooLarge { size, limit_mb: 1 } if size == 1024 * 1024 + 1));
}

#[test]
fn test_type_is_checked_before_size() {
    let policy = UploadPolicy {
        max_size_mb: 0,
        ..UploadPolicy::default()
    };
    let file = SelectedFile::new("doc.pdf", "application/pdf", vec![0u8; 10]);
    assert!(matches!(
        policy.validate(&file),
        Err(MedvisError::InvalidType { .. })
    ));
}

#[test]
fn test_rejection_messages_are_user_facing() {
    let policy = UploadPolicy::default();
    let err = policy
        .validate(&SelectedFile::new("a.txt", "text/plain", Vec::new()))
        .unwrap_err();
    assert!(err.to_string().contains("Please upload an image file"));

    let err = policy
        .validate(&SelectedFile::new("a.png", "image/png", vec![0; 11 * 1024 * 1024]))
        .unwrap_err();
    assert!(err.to_string().contains("10MB"), "got: {err}");
}

#[test]
fn test_mime_from_extension() {
    assert_eq!(mime_from_path(Path::new("scan.png")), "image/png");
    assert_eq!(mime_from_path(Path::new("scan.JPG")), "image/jpeg");
    assert_eq!(mime_from_path(Path::new("scan.tiff")), "image/tiff");
    assert_eq!(
        mime_from_path(Path::new("notes.txt")),
        "application/octet-stream"
    );
    assert_eq!(mime_from_path(Path::new("noext")), "application/octet-stream");
}

#[test]
fn test_selected_file_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chest.png");
    let bytes = png_bytes(3, 3);
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&bytes)
        .unwrap();

    let file = SelectedFile::from_path(&path).unwrap();
    assert_eq!(file.name, "chest.png");
    assert_eq!(file.mime, "image/png");
    assert_eq!(file.size(), bytes.len() as u64);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SelectedFile::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
    assert!(matches!(err, MedvisError::Io(_)));
}

#[test]
fn test_uploaded_image_release_tracking() {
    let file = SelectedFile::new("x.png", "image/png", png_bytes(2, 2));
    let upload = UploadedImage::accept(file, &UploadPolicy::default()).unwrap();
    let weak = upload.downgrade();
    assert_eq!(weak.id(), upload.id());
    assert!(weak.is_live());

    let viewer = weak.upgrade().unwrap();
    drop(upload);
    assert!(weak.is_live());
    assert_eq!(viewer.name(), "x.png");
    drop(viewer);
    assert!(!weak.is_live());
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_upload_ids_are_unique() {
    let policy = UploadPolicy::default();
    let a = UploadedImage::accept(SelectedFile::new("a", "image/png", vec![1]), &policy).unwrap();
    let b = UploadedImage::accept(SelectedFile::new("b", "image/png", vec![1]), &policy).unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.mime(), "image/png");
    assert_eq!(a.size(), 1);
}
