use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::MeasureError;
use crate::fonts::{AdvanceMode, FontResource, measure_char};
use crate::types::{PRINTABLE_ASCII, WidthTable};

/// Font measured when no path is given.
pub const DEFAULT_FONT: &str = "arial.ttf";

/// Point size used when none is given.
pub const DEFAULT_SIZE: f32 = 12.0;

fn measure_printable_ascii(
    font: &FontResource,
    mode: AdvanceMode,
) -> Result<WidthTable, MeasureError> {
    let face = font.face()?;
    let mut table = WidthTable::with_capacity(PRINTABLE_ASCII.count());

    for ch in PRINTABLE_ASCII {
        let width = measure_char(&face, font.size(), ch, mode)?;
        table.push(ch, width);
    }

    debug!(
        "Measured {} characters at {}px ({:?})",
        table.len(),
        font.size(),
        mode
    );
    Ok(table)
}

/// Builder for configuring width extraction options.
///
/// # Examples
///
/// ```no_run
/// use glyph_widths::{AdvanceMode, WidthExtractor};
///
/// let widths = WidthExtractor::builder()
///     .size(16.0)
///     .advance_mode(AdvanceMode::Rounded)
///     .build()
///     .from_path("DejaVuSans.ttf")?;
/// # Ok::<(), glyph_widths::MeasureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WidthExtractorBuilder {
    size: f32,
    face_index: u32,
    advance_mode: AdvanceMode,
}

impl Default for WidthExtractorBuilder {
    fn default() -> Self {
        WidthExtractorBuilder {
            size: DEFAULT_SIZE,
            face_index: 0,
            advance_mode: AdvanceMode::default(),
        }
    }
}

impl WidthExtractorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the point size, in pixels per em.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Select a face inside a font collection (`.ttc`/`.otc`).
    pub fn face_index(mut self, index: u32) -> Self {
        self.face_index = index;
        self
    }

    /// Choose between precise and whole-pixel advances.
    pub fn advance_mode(mut self, mode: AdvanceMode) -> Self {
        self.advance_mode = mode;
        self
    }

    /// Build the extractor configuration.
    pub fn build(self) -> WidthExtractor {
        WidthExtractor {
            size: self.size,
            face_index: self.face_index,
            advance_mode: self.advance_mode,
        }
    }
}

/// Measures the printable ASCII range of one font.
///
/// # Examples
///
/// ```no_run
/// use glyph_widths::WidthExtractor;
///
/// let widths = WidthExtractor::default().from_path("arial.ttf")?;
/// println!("{}", widths);
///
/// for entry in &widths {
///     println!("{:?}: {:.3}px", entry.ch, entry.width);
/// }
/// # Ok::<(), glyph_widths::MeasureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WidthExtractor {
    size: f32,
    face_index: u32,
    advance_mode: AdvanceMode,
}

impl Default for WidthExtractor {
    fn default() -> Self {
        WidthExtractorBuilder::default().build()
    }
}

impl WidthExtractor {
    /// Create a builder for configuring extraction options.
    pub fn builder() -> WidthExtractorBuilder {
        WidthExtractorBuilder::new()
    }

    /// Measure the font at the given path.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<WidthTable, MeasureError> {
        let font = FontResource::open_face(path, self.face_index, self.size)?;
        self.extract_from_font(&font)
    }

    /// Measure a font held in memory.
    pub fn from_bytes(self, bytes: &[u8]) -> Result<WidthTable, MeasureError> {
        let font = FontResource::from_bytes_face(bytes, self.face_index, self.size)?;
        self.extract_from_font(&font)
    }

    /// Measure a font read from `reader`.
    pub fn from_reader<R: Read>(self, mut reader: R) -> Result<WidthTable, MeasureError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.from_bytes(&bytes)
    }

    /// Measure an already loaded font.
    ///
    /// The font's own size and face index take precedence; only the
    /// builder's advance mode applies.
    pub fn from_font(self, font: &FontResource) -> Result<WidthTable, MeasureError> {
        self.extract_from_font(font)
    }

    fn extract_from_font(self, font: &FontResource) -> Result<WidthTable, MeasureError> {
        measure_printable_ascii(font, self.advance_mode)
    }
}

/// Measure the font at `path` at `size` using default settings.
///
/// This is a convenience function equivalent to
/// `WidthExtractor::builder().size(size).build().from_path(path)`.
///
/// # Examples
///
/// ```no_run
/// let widths = glyph_widths::from_path("arial.ttf", 12.0)?;
/// println!("{}", widths);
/// # Ok::<(), glyph_widths::MeasureError>(())
/// ```
pub fn from_path<P: AsRef<Path>>(path: P, size: f32) -> Result<WidthTable, MeasureError> {
    WidthExtractor::builder().size(size).build().from_path(path)
}

/// Measure an in-memory font at `size` using default settings.
///
/// # Examples
///
/// ```no_run
/// let bytes = std::fs::read("DejaVuSans.ttf")?;
/// let widths = glyph_widths::from_bytes(&bytes, 12.0)?;
/// assert_eq!(widths.len(), 95);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_bytes(bytes: &[u8], size: f32) -> Result<WidthTable, MeasureError> {
    WidthExtractor::builder().size(size).build().from_bytes(bytes)
}

/// Measure a font read from `reader` at `size` using default settings.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// let file = File::open("DejaVuSans.ttf")?;
/// let widths = glyph_widths::from_reader(file, 12.0)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_reader<R: Read>(reader: R, size: f32) -> Result<WidthTable, MeasureError> {
    WidthExtractor::builder().size(size).build().from_reader(reader)
}
