use std::ffi::OsStr;
use std::fmt::{self, Debug};
use std::fs;
use std::path::{Path, PathBuf};

use fontdb::Database;
use tracing::{debug, trace, warn};
use ttf_parser::{Face, GlyphId};

use crate::error::MeasureError;

const NOTDEF: GlyphId = GlyphId(0);

/// How a scaled advance is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Exact `advance * size / units_per_em`.
    #[default]
    Precise,
    /// Rounded to the nearest whole pixel, close to what a hinting rasterizer reports.
    Rounded,
}

/// A parsed font face at a fixed point size.
///
/// The resource owns the raw font bytes; the `ttf_parser::Face` view is
/// re-borrowed from them whenever measurements are taken.
#[derive(Clone)]
pub struct FontResource {
    data: Vec<u8>,
    index: u32,
    size: f32,
    path: Option<PathBuf>,
}

impl Debug for FontResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResource")
            .field("path", &self.path)
            .field("index", &self.index)
            .field("size", &self.size)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontResource {
    /// Open the first face of the font at `path`.
    ///
    /// A path that does not name an existing file is looked up by file name
    /// among the installed system fonts, see [`resolve_font_path`].
    pub fn open<P: AsRef<Path>>(path: P, size: f32) -> Result<FontResource, MeasureError> {
        FontResource::open_face(path, 0, size)
    }

    /// Open face `index` of the font (or font collection) at `path`.
    pub fn open_face<P: AsRef<Path>>(
        path: P,
        index: u32,
        size: f32,
    ) -> Result<FontResource, MeasureError> {
        let requested = path.as_ref();
        let resolved = resolve_font_path(requested)
            .ok_or_else(|| MeasureError::FontNotFound(requested.to_path_buf()))?;

        debug!(
            "Loading font {} (requested {})",
            resolved.display(),
            requested.display()
        );
        let data = fs::read(&resolved)?;
        let mut font = FontResource::from_bytes_face(data, index, size)?;
        font.path = Some(resolved);
        Ok(font)
    }

    /// Parse the first face of an in-memory font.
    pub fn from_bytes(data: impl Into<Vec<u8>>, size: f32) -> Result<FontResource, MeasureError> {
        FontResource::from_bytes_face(data, 0, size)
    }

    /// Parse face `index` of an in-memory font or font collection.
    pub fn from_bytes_face(
        data: impl Into<Vec<u8>>,
        index: u32,
        size: f32,
    ) -> Result<FontResource, MeasureError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(MeasureError::InvalidSize(size));
        }

        let data = data.into();
        if let Some(count) = ttf_parser::fonts_in_collection(&data) {
            debug!("Font collection with {} faces, using face {}", count, index);
        }

        let face = Face::parse(&data, index)?;
        debug!(
            "Parsed face: {} glyphs, {} units per em",
            face.number_of_glyphs(),
            face.units_per_em()
        );
        if face.is_variable() {
            debug!("Variable font, measuring the default instance");
        }

        Ok(FontResource {
            data,
            index,
            size,
            path: None,
        })
    }

    /// Point size the font is measured at (pixels per em).
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Face index inside a font collection, 0 for single-face files.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The file the font was read from, if it was loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn units_per_em(&self) -> Result<u16, MeasureError> {
        Ok(self.face()?.units_per_em())
    }

    pub(crate) fn face(&self) -> Result<Face<'_>, MeasureError> {
        Ok(Face::parse(&self.data, self.index)?)
    }

    /// Precise advance width of `c` in pixels.
    pub fn measure(&self, c: char) -> Result<f64, MeasureError> {
        self.measure_with(c, AdvanceMode::Precise)
    }

    /// Advance width of `c` in pixels, reported according to `mode`.
    pub fn measure_with(&self, c: char, mode: AdvanceMode) -> Result<f64, MeasureError> {
        let face = self.face()?;
        measure_char(&face, self.size, c, mode)
    }
}

pub(crate) fn measure_char(
    face: &Face<'_>,
    size: f32,
    c: char,
    mode: AdvanceMode,
) -> Result<f64, MeasureError> {
    let gid = match face.glyph_index(c) {
        Some(gid) => gid,
        None => {
            warn!("{:?} (U+{:04X}) is not mapped, using .notdef", c, c as u32);
            NOTDEF
        }
    };

    let advance = face
        .glyph_hor_advance(gid)
        .or_else(|| {
            if gid == NOTDEF {
                None
            } else {
                warn!("GID {} for {:?} has no advance, using .notdef", gid.0, c);
                face.glyph_hor_advance(NOTDEF)
            }
        })
        .ok_or(MeasureError::MissingGlyph(c))?;

    let width = scale_advance(advance, face.units_per_em(), size, mode);
    trace!("{:?} -> GID {} advance {} -> {}px", c, gid.0, advance, width);
    Ok(width)
}

// ttf-parser rejects faces whose units_per_em is outside 16..=16384.
fn scale_advance(advance: u16, units_per_em: u16, size: f32, mode: AdvanceMode) -> f64 {
    let width = f64::from(advance) * f64::from(size) / f64::from(units_per_em);
    match mode {
        AdvanceMode::Precise => width,
        AdvanceMode::Rounded => width.round(),
    }
}

/// Resolve a font path the way imaging libraries resolve `truetype("arial.ttf")`.
///
/// An existing file is returned unchanged. Otherwise the file name of `path`
/// is looked up among the installed system fonts. A name without an
/// extension matches any font with that stem, preferring `.ttf`.
pub fn resolve_font_path<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let file_name = path.file_name()?;
    debug!(
        "{} does not exist, searching system fonts for {:?}",
        path.display(),
        file_name
    );

    let mut db = Database::new();
    db.load_system_fonts();
    debug!("Loaded {} system font faces", db.len());

    find_in_database(&db, file_name)
}

pub(crate) fn find_in_database(db: &Database, file_name: &OsStr) -> Option<PathBuf> {
    let has_extension = Path::new(file_name).extension().is_some();

    let mut candidates: Vec<&Path> = db
        .faces()
        .filter_map(|face| match &face.source {
            fontdb::Source::File(path) => Some(path.as_path()),
            _ => None,
        })
        .filter(|path| {
            if has_extension {
                path.file_name() == Some(file_name)
            } else {
                path.file_stem() == Some(file_name)
            }
        })
        .collect();

    // Collections list one face per index; sorting keeps repeated lookups stable.
    candidates.sort();
    candidates.dedup();

    let found = candidates
        .iter()
        .find(|path| has_extension || path.extension() == Some(OsStr::new("ttf")))
        .or_else(|| candidates.first())
        .map(|path| path.to_path_buf());

    match &found {
        Some(path) => debug!("Found font at {}", path.display()),
        None => debug!("Could not find font {:?}", file_name),
    }
    found
}
