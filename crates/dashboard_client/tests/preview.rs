use std::io::Write;

use dashboard_client::{decode_preview, PreviewError, DEFAULT_MAX_PREVIEW_BYTES};
use dashboard_core::LocalFile;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn decodes_file_into_data_url() {
    let mut tmp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    tmp.write_all(b"hello").unwrap();
    let file = LocalFile::from_path(tmp.path());

    let data_url = decode_preview(&file, DEFAULT_MAX_PREVIEW_BYTES).await.unwrap();
    assert_eq!(data_url, "data:image/jpeg;base64,aGVsbG8=");
}

#[tokio::test]
async fn missing_file_fails_to_decode() {
    let file = LocalFile::from_path("/definitely/not/here/cat.png");
    let err = decode_preview(&file, DEFAULT_MAX_PREVIEW_BYTES).await.unwrap_err();
    assert!(matches!(err, PreviewError::Read { .. }));
}

#[tokio::test]
async fn empty_file_fails_to_decode() {
    let tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    let file = LocalFile::from_path(tmp.path());

    let err = decode_preview(&file, DEFAULT_MAX_PREVIEW_BYTES).await.unwrap_err();
    assert!(matches!(err, PreviewError::Empty { .. }));
}

#[tokio::test]
async fn oversized_file_is_not_previewed() {
    let mut tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    tmp.write_all(&[0u8; 32]).unwrap();
    let file = LocalFile::from_path(tmp.path());

    let err = decode_preview(&file, 16).await.unwrap_err();
    assert!(matches!(
        err,
        PreviewError::TooLarge {
            max_bytes: 16,
            actual: 32,
            ..
        }
    ));
}
