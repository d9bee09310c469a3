use std::path::PathBuf;

/// Convenience result type used across wraster.
pub type RasterResult<T> = Result<T, RasterError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// The file could not be opened.
    #[error("could not open file '{}': {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but reading it failed.
    #[error("error reading from file '{}': {source}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing an encoded image failed.
    #[error("error writing to file '{}': {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A pixel buffer could not be allocated (or its size overflows).
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// The container was recognized but its content is invalid.
    #[error("invalid or corrupted image file: {0}")]
    CorruptImage(String),

    /// No decoder/encoder handles the requested format or feature.
    #[error("image format is not supported: {0}")]
    UnsupportedFormat(String),

    /// A multi-frame container does not have the requested frame.
    #[error("file does not contain requested image index {index}")]
    BadFrameIndex {
        /// Requested frame index.
        index: usize,
    },

    /// A rectangle does not fit the image it refers to.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// A pixel read outside the image.
    #[error("pixel ({x}, {y}) is outside the image")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },

    /// Invalid caller-provided argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterError {
    /// Build a [`RasterError::OutOfMemory`] value.
    pub fn out_of_memory(msg: impl Into<String>) -> Self {
        Self::OutOfMemory(msg.into())
    }

    /// Build a [`RasterError::CorruptImage`] value.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptImage(msg.into())
    }

    /// Build a [`RasterError::UnsupportedFormat`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`RasterError::InvalidRegion`] value.
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    /// Build a [`RasterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Numeric code of this error in the [`ErrorCode`] table.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Open { .. } => ErrorCode::Open,
            Self::Read { .. } => ErrorCode::Read,
            Self::Write { .. } => ErrorCode::Write,
            Self::OutOfMemory(_) => ErrorCode::NoMemory,
            Self::CorruptImage(_) => ErrorCode::BadImageFile,
            Self::UnsupportedFormat(_) => ErrorCode::BadFormat,
            Self::BadFrameIndex { .. } => ErrorCode::BadIndex,
            Self::InvalidRegion(_) | Self::OutOfBounds { .. } | Self::Validation(_) => {
                ErrorCode::BadArgument
            }
            Self::Other(_) => ErrorCode::Internal,
        }
    }

    pub(crate) fn from_image(err: image::ImageError) -> Self {
        use image::ImageError as E;
        match err {
            E::Decoding(e) => Self::corrupt(e.to_string()),
            E::Parameter(e) => Self::corrupt(e.to_string()),
            E::Unsupported(e) => Self::unsupported(e.to_string()),
            E::Limits(e) => Self::out_of_memory(e.to_string()),
            E::Encoding(e) => Self::Other(anyhow::anyhow!("encode image: {e}")),
            E::IoError(e) => Self::Read {
                path: PathBuf::from("<memory>"),
                source: e,
            },
        }
    }

    pub(crate) fn from_tiff(err: tiff::TiffError) -> Self {
        use tiff::TiffError as E;
        match err {
            E::UnsupportedError(e) => Self::unsupported(format!("tiff: {e}")),
            E::LimitsExceeded => Self::out_of_memory("tiff decoding limits exceeded"),
            E::IoError(e) => Self::Read {
                path: PathBuf::from("<memory>"),
                source: e,
            },
            e => Self::corrupt(format!("tiff: {e}")),
        }
    }

    pub(crate) fn from_png(err: png::EncodingError) -> Self {
        Self::Other(anyhow::anyhow!("encode png: {err}"))
    }
}

/// Stable numeric error codes, mirrored by [`message_for_error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// No error.
    None = 0,
    /// Could not open file.
    Open = 1,
    /// Error reading from file.
    Read = 2,
    /// Error writing to file.
    Write = 3,
    /// Out of memory.
    NoMemory = 4,
    /// Out of color cells.
    NoColor = 5,
    /// Image file is corrupted or invalid.
    BadImageFile = 6,
    /// Image file format is unknown.
    BadFormat = 7,
    /// No such image index in file.
    BadIndex = 8,
    /// Invalid region, coordinates or argument.
    BadArgument = 9,
    /// Should not happen.
    Internal = 128,
}

impl ErrorCode {
    /// Raw numeric value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human readable message for this code.
    pub fn message(self) -> &'static str {
        message_for_error(self)
    }
}

/// Stateless message table for [`ErrorCode`] values.
pub fn message_for_error(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::None => "no error",
        ErrorCode::Open => "could not open file",
        ErrorCode::Read => "error reading from file",
        ErrorCode::Write => "error writing to file",
        ErrorCode::NoMemory => "out of memory",
        ErrorCode::NoColor => "out of color cells",
        ErrorCode::BadImageFile => "invalid or corrupted image file",
        ErrorCode::BadFormat => "image format is not supported",
        ErrorCode::BadIndex => "file does not contain requested image index",
        ErrorCode::BadArgument => "invalid region or argument",
        ErrorCode::Internal => "internal error",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
