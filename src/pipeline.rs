//! End-to-end generation: normalize, validate, colour, rasterize, correct.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coloring::{edge_coloring_simple, DEFAULT_ANGLE_THRESHOLD};
use crate::error::Result;
use crate::render::{
    clash_threshold, correct_errors, write_png, Generator, MsdfBitmap, Projection, SdfBitmap,
    DEFAULT_EDGE_THRESHOLD,
};
use crate::types::Shape;
use crate::validation::{validate_shape, Severity};

/// Kind of field to generate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-channel true signed distance.
    Sdf,
    /// Single-channel signed pseudo-distance.
    Psdf,
    /// Three-channel multi-channel signed distance.
    #[default]
    Msdf,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sdf => write!(f, "sdf"),
            Mode::Psdf => write!(f, "psdf"),
            Mode::Msdf => write!(f, "msdf"),
        }
    }
}

/// Fully resolved parameters for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    /// Distance in shape units covered by the output range [0, 1].
    pub range: f64,
    pub projection: Projection,
    pub angle_threshold: f64,
    pub seed: u64,
    pub edge_threshold: f64,
    pub error_correction: bool,
}

impl GenerateSettings {
    pub fn new(mode: Mode, width: usize, height: usize, range: f64, projection: Projection) -> Self {
        Self {
            mode,
            width,
            height,
            range,
            projection,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            seed: 0,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            error_correction: true,
        }
    }
}

/// A generated field of either channel count.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceField {
    Sdf(SdfBitmap),
    Msdf(MsdfBitmap),
}

impl DistanceField {
    pub fn size(&self) -> (usize, usize) {
        match self {
            DistanceField::Sdf(bitmap) => bitmap.size(),
            DistanceField::Msdf(bitmap) => bitmap.size(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            DistanceField::Sdf(_) => 1,
            DistanceField::Msdf(_) => 3,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            DistanceField::Sdf(bitmap) => bitmap.to_bytes(),
            DistanceField::Msdf(bitmap) => bitmap.to_bytes(),
        }
    }

    /// Write the field as PNG; see [`write_png`] for `bottom_up`.
    pub fn write_png(&self, path: &Path, bottom_up: bool) -> Result<()> {
        match self {
            DistanceField::Sdf(bitmap) => write_png(bitmap, path, bottom_up),
            DistanceField::Msdf(bitmap) => write_png(bitmap, path, bottom_up),
        }
    }
}

/// Generate a distance field for `shape`.
///
/// The input shape is left untouched; normalization and edge colouring work on a copy.
pub fn generate(shape: &Shape, settings: &GenerateSettings) -> Result<DistanceField> {
    let mut shape = shape.clone();
    shape.normalize();

    for d in validate_shape(&shape).iter() {
        if d.severity == Severity::Warning {
            warn!(code = %d.code, "{}", d.message);
        }
    }
    shape.validate()?;

    if settings.mode == Mode::Msdf {
        edge_coloring_simple(&mut shape, settings.angle_threshold, settings.seed);
    }

    let generator = Generator::new(&shape, settings.range, settings.projection)?;
    let (width, height) = (settings.width, settings.height);

    let field = match settings.mode {
        Mode::Sdf => DistanceField::Sdf(generator.generate_sdf(width, height)),
        Mode::Psdf => DistanceField::Sdf(generator.generate_pseudo_sdf(width, height)),
        Mode::Msdf => {
            let mut bitmap = generator.generate_msdf(width, height);
            if settings.error_correction {
                let threshold = clash_threshold(
                    settings.edge_threshold,
                    settings.projection.scale,
                    settings.range,
                );
                let corrected = correct_errors(&mut bitmap, threshold);
                debug!(corrected, "Corrected clashing pixels");
            }
            DistanceField::Msdf(bitmap)
        }
    };

    info!(mode = %settings.mode, width, height, "Generated distance field");
    Ok(field)
}

/// Sidecar describing how to decode a generated field.
///
/// A renderer recovers the distance in shape units as `(sample - 0.5) * range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
    pub mode: Mode,
    pub width: usize,
    pub height: usize,
    pub range: f64,
    pub scale: [f64; 2],
    pub translate: [f64; 2],
    pub inverse_y_axis: bool,
}

impl FieldMetadata {
    pub fn new(name: &str, settings: &GenerateSettings, inverse_y_axis: bool) -> Self {
        let Projection { scale, translate } = settings.projection;
        Self {
            name: name.to_string(),
            mode: settings.mode,
            width: settings.width,
            height: settings.height,
            range: settings.range,
            scale: [scale.x, scale.y],
            translate: [translate.x, translate.y],
            inverse_y_axis,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::error::MsdfError::Render {
            message: format!("Failed to serialize metadata: {}", e),
            help: None,
        })
    }
}
