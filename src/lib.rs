//! Font advance width measurement
//!
//! This library loads a TrueType/OpenType font at a point size and measures
//! the horizontal advance of every printable ASCII character, producing an
//! ordered character-to-width table that serializes to JSON.

mod error;
mod extract;
mod fonts;
mod types;

// Re-export error type
pub use error::MeasureError;

// Re-export extraction API
pub use extract::{
    DEFAULT_FONT, DEFAULT_SIZE, WidthExtractor, WidthExtractorBuilder, from_bytes, from_path,
    from_reader,
};

// Re-export font handling
pub use fonts::{AdvanceMode, FontResource, resolve_font_path};

// Re-export public types
pub use types::{CharWidth, PRINTABLE_ASCII, WidthTable};
