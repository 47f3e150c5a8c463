//! Generate command implementation.
//!
//! Reads shape files and writes one PNG per shape, plus an optional JSON sidecar.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::error::{MsdfError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_shape_file;
use crate::pipeline::{generate, FieldMetadata, Mode};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "msdf.yaml";

/// Generate distance field images from shape files
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Shape files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (default: msdf.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Kind of field to generate
    #[arg(long, short, value_enum)]
    pub mode: Option<Mode>,

    /// Output width and height in pixels
    #[arg(long, short, conflicts_with_all = ["width", "height"])]
    pub size: Option<u32>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Distance range in pixels
    #[arg(long)]
    pub px_range: Option<f64>,

    /// Distance range in shape units (overrides --px-range)
    #[arg(long)]
    pub range: Option<f64>,

    /// Pixels per shape unit (disables auto-framing)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Shape-space offset applied before scaling
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub translate: Option<Vec<f64>>,

    /// Corner angle threshold in radians
    #[arg(long)]
    pub angle_threshold: Option<f64>,

    /// Edge colouring seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Clash detection threshold in pixels
    #[arg(long)]
    pub edge_threshold: Option<f64>,

    /// Skip multi-channel error correction
    #[arg(long)]
    pub no_error_correction: bool,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write <name>.json with range and framing
    #[arg(long)]
    pub metadata: bool,
}

impl GenerateArgs {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(px_range) = self.px_range {
            config.px_range = px_range;
        }
        if self.range.is_some() {
            config.range = self.range;
        }
        if self.scale.is_some() {
            config.scale = self.scale;
        }
        if let Some([x, y]) = self.translate.as_deref() {
            config.translate = Some([*x, *y]);
        }
        if let Some(angle) = self.angle_threshold {
            config.angle_threshold = angle;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(threshold) = self.edge_threshold {
            config.edge_threshold = threshold;
        }
        if self.no_error_correction {
            config.error_correction = false;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
    }
}

/// Load the explicit config, or msdf.yaml from the working directory, or defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                debug!("Using {}", DEFAULT_CONFIG);
                Config::load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if !config.output.exists() {
        fs::create_dir_all(&config.output).map_err(|e| MsdfError::Io {
            path: config.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    for file in &args.files {
        let (document, shape) = parse_shape_file(file)?;
        let settings = config.resolve(&shape)?;

        printer.status(
            "Generating",
            &format!(
                "{} ({} {}x{})",
                document.name, settings.mode, settings.width, settings.height
            ),
        );

        let field = generate(&shape, &settings)?;
        let png_path = config.output.join(format!("{}.png", document.name));
        field.write_png(&png_path, !shape.inverse_y_axis)?;

        if args.metadata {
            let meta = FieldMetadata::new(&document.name, &settings, shape.inverse_y_axis);
            let json_path = config.output.join(format!("{}.json", document.name));
            fs::write(&json_path, meta.to_json()?).map_err(|e| MsdfError::Io {
                path: json_path.clone(),
                message: format!("Failed to write metadata: {}", e),
            })?;
        }

        printer.info("Wrote", &printer.cyan(&display_path(&png_path)));
    }

    printer.status(
        "Finished",
        &format!(
            "{} in {}",
            plural(args.files.len(), "field", "fields"),
            display_path(&config.output)
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_apply_overrides() {
        let args = GenerateArgs {
            mode: Some(Mode::Sdf),
            size: Some(48),
            translate: Some(vec![1.0, -1.0]),
            no_error_correction: true,
            ..GenerateArgs::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.mode, Mode::Sdf);
        assert_eq!((config.width, config.height), (48, 48));
        assert_eq!(config.translate, Some([1.0, -1.0]));
        assert!(!config.error_correction);
        assert_eq!(config.px_range, 4.0);
    }

    #[test]
    fn test_run_writes_png_and_metadata() {
        let dir = tempdir().unwrap();
        let shape_path = dir.path().join("tri.shape.yaml");
        std::fs::write(&shape_path, "contours: [\"M0 0 L8 0 L4 6 Z\"]").unwrap();
        let out = dir.path().join("out");

        let args = GenerateArgs {
            files: vec![shape_path],
            size: Some(16),
            output: Some(out.clone()),
            metadata: true,
            ..GenerateArgs::default()
        };
        run(args, &Printer::new(true)).unwrap();

        let img = image::open(out.join("tri.png")).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 16));

        let meta: FieldMetadata =
            serde_json::from_str(&std::fs::read_to_string(out.join("tri.json")).unwrap()).unwrap();
        assert_eq!(meta.name, "tri");
        assert_eq!(meta.mode, Mode::Msdf);
        assert!(meta.range > 0.0);
    }

    #[test]
    fn test_run_missing_config() {
        let args = GenerateArgs {
            files: vec![PathBuf::from("unused.shape.yaml")],
            config: Some(PathBuf::from("/nonexistent/msdf.yaml")),
            ..GenerateArgs::default()
        };
        assert!(run(args, &Printer::new(true)).is_err());
    }
}
