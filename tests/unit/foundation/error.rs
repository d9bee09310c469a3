use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RasterError::corrupt("x")
            .to_string()
            .contains("invalid or corrupted image file:")
    );
    assert!(
        RasterError::unsupported("x")
            .to_string()
            .contains("image format is not supported:")
    );
    assert!(
        RasterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RasterError::invalid_region("x")
            .to_string()
            .contains("invalid region:")
    );
}

#[test]
fn io_variants_mention_path() {
    let err = RasterError::Open {
        path: PathBuf::from("/nope/icon.xpm"),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(err.to_string().contains("/nope/icon.xpm"));
    assert_eq!(err.code(), ErrorCode::Open);
}

#[test]
fn codes_map_to_table() {
    assert_eq!(RasterError::corrupt("x").code(), ErrorCode::BadImageFile);
    assert_eq!(RasterError::unsupported("x").code(), ErrorCode::BadFormat);
    assert_eq!(
        RasterError::BadFrameIndex { index: 3 }.code(),
        ErrorCode::BadIndex
    );
    assert_eq!(RasterError::out_of_memory("x").code(), ErrorCode::NoMemory);
    assert_eq!(ErrorCode::BadFormat.as_u8(), 7);
    assert_eq!(ErrorCode::Internal.as_u8(), 128);
}

#[test]
fn message_lookup_is_stateless() {
    assert_eq!(message_for_error(ErrorCode::None), "no error");
    assert_eq!(ErrorCode::Open.message(), "could not open file");
    assert_eq!(
        message_for_error(ErrorCode::BadIndex),
        "file does not contain requested image index"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RasterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.code(), ErrorCode::Internal);
}
