//! Shape file (`*.shape.yaml`) parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MsdfError, Result};
use crate::types::Shape;

use super::parse_path;

/// A shape definition as written on disk.
///
/// ```yaml
/// name: notch
/// inverse_y_axis: false
/// contours:
///   - "M 0 0 L 8 0 L 8 8 L 4 5 L 0 8 Z"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDocument {
    /// Output name; defaults to the file stem when loaded from disk.
    #[serde(default)]
    pub name: String,

    /// Whether the shape's y axis points down.
    #[serde(default)]
    pub inverse_y_axis: bool,

    /// Path data strings; each may hold several contours.
    #[serde(default)]
    pub contours: Vec<String>,
}

impl ShapeDocument {
    /// Load a shape document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MsdfError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read shape: {}", e),
        })?;

        let mut document = Self::parse(&content)?;
        if document.name.is_empty() {
            document.name = shape_stem(path);
        }
        Ok(document)
    }

    /// Parse a shape document from YAML.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MsdfError::Parse {
            message: format!("Invalid shape file: {}", e),
            help: Some("A shape file needs a `contours` list of path strings".to_string()),
        })
    }

    /// Build the outline described by this document.
    pub fn to_shape(&self) -> Result<Shape> {
        let mut shape = Shape::default().with_inverse_y_axis(self.inverse_y_axis);
        for data in &self.contours {
            for contour in parse_path(data)? {
                shape.add_contour(contour);
            }
        }
        Ok(shape)
    }
}

/// File name without `.shape.yaml` / `.yaml` style extensions.
fn shape_stem(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    file.split('.').next().unwrap_or_default().to_string()
}

/// Load a shape file and build its outline.
pub fn parse_shape_file(path: &Path) -> Result<(ShapeDocument, Shape)> {
    let document = ShapeDocument::load(path)?;
    let shape = document.to_shape()?;
    Ok((document, shape))
}
