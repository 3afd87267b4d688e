use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Debug)]
pub enum MeasureError {
    IoError(std::io::Error),
    FontNotFound(PathBuf),
    FontFormat(ttf_parser::FaceParsingError),
    InvalidSize(f32),
    MissingGlyph(char),
    JsonError(serde_json::Error),
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            MeasureError::IoError(e) => write!(f, "IO error: {}", e),
            MeasureError::FontNotFound(path) => {
                write!(f, "Font not found: {}", path.display())
            }
            MeasureError::FontFormat(e) => write!(f, "Font format error: {}", e),
            MeasureError::InvalidSize(size) => {
                write!(f, "Invalid point size: {} (must be positive)", size)
            }
            MeasureError::MissingGlyph(c) => write!(
                f,
                "No glyph or .notdef advance for {:?} (U+{:04X})",
                c, *c as u32
            ),
            MeasureError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for MeasureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeasureError::IoError(e) => Some(e),
            MeasureError::FontFormat(e) => Some(e),
            MeasureError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeasureError {
    fn from(e: std::io::Error) -> Self {
        MeasureError::IoError(e)
    }
}

impl From<ttf_parser::FaceParsingError> for MeasureError {
    fn from(e: ttf_parser::FaceParsingError) -> Self {
        MeasureError::FontFormat(e)
    }
}

impl From<serde_json::Error> for MeasureError {
    fn from(e: serde_json::Error) -> Self {
        MeasureError::JsonError(e)
    }
}
