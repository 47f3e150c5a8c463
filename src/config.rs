//! Generator configuration (msdf.yaml) parsing.
//!
//! Every field has a default, so an empty file is a valid configuration.
//! CLI flags are applied on top of the loaded values before [`Config::resolve`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::coloring::DEFAULT_ANGLE_THRESHOLD;
use crate::error::{MsdfError, Result};
use crate::math::Vector2;
use crate::pipeline::{GenerateSettings, Mode};
use crate::render::{Projection, DEFAULT_EDGE_THRESHOLD};
use crate::types::Shape;

/// Generator configuration loaded from msdf.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,

    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Distance range in pixels; used when `range` is not given.
    pub px_range: f64,

    /// Distance range in shape units.
    pub range: Option<f64>,

    /// Pixels per shape unit. The shape is auto-framed when absent.
    pub scale: Option<f64>,

    /// Shape-space offset applied before scaling.
    pub translate: Option<[f64; 2]>,

    /// Minimum angle, in radians, between edges for a corner.
    pub angle_threshold: f64,

    /// Seed for edge colour selection.
    pub seed: u64,

    /// Clash detection threshold in pixels.
    pub edge_threshold: f64,

    pub error_correction: bool,

    /// Output directory for generated images.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Msdf,
            width: 32,
            height: 32,
            px_range: 4.0,
            range: None,
            scale: None,
            translate: None,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            seed: 0,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            error_correction: true,
            output: PathBuf::from("dist"),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MsdfError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).map_err(|e| MsdfError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check msdf.yaml syntax".to_string()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MsdfError::config(format!(
                "output size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        positive("px_range", self.px_range)?;
        if let Some(range) = self.range {
            positive("range", range)?;
        }
        if let Some(scale) = self.scale {
            positive("scale", scale)?;
        }
        if let Some([x, y]) = self.translate {
            if !(x.is_finite() && y.is_finite()) {
                return Err(MsdfError::config(format!(
                    "translate must be finite, got [{}, {}]",
                    x, y
                )));
            }
        }
        positive("angle_threshold", self.angle_threshold)?;
        positive("edge_threshold", self.edge_threshold)?;
        Ok(())
    }

    /// Turn the configuration into settings for `shape`, framing it if needed.
    ///
    /// Without an explicit scale the shape is fitted inside the bitmap with half
    /// the pixel range free on each side.
    pub fn resolve(&self, shape: &Shape) -> Result<GenerateSettings> {
        self.validate()?;

        let translate = self
            .translate
            .map_or(Vector2::ZERO, |[x, y]| Vector2::new(x, y));
        let projection = match self.scale {
            Some(scale) => Projection::new(Vector2::splat(scale), translate),
            None => {
                let mut fitted =
                    Projection::fit(&shape.bounds(), self.width, self.height, self.px_range / 2.0)?;
                fitted.translate += translate;
                fitted
            }
        };
        let range = self.range.unwrap_or(self.px_range / projection.scale.x);

        let mut settings = GenerateSettings::new(
            self.mode,
            self.width as usize,
            self.height as usize,
            range,
            projection,
        );
        settings.angle_threshold = self.angle_threshold;
        settings.seed = self.seed;
        settings.edge_threshold = self.edge_threshold;
        settings.error_correction = self.error_correction;
        Ok(settings)
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MsdfError::Config {
            message: format!("{} must be a positive number, got {}", name, value),
            help: Some(format!("Set `{}` in msdf.yaml or on the command line", name)),
        })
    }
}
