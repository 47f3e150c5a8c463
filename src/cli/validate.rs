//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{MsdfError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_shape_file;
use crate::validation::{print_diagnostics, validate_shape, ValidationResult};

/// Check shape files without generating anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Shape files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut total = ValidationResult::new();

    for file in &args.files {
        let (document, shape) = parse_shape_file(file)?;
        let result = validate_shape(&shape);

        if result.is_ok() {
            printer.status("Checked", &document.name);
        } else {
            printer.warning("Checked", &format!("{} ({})", document.name, display_path(file)));
            print_diagnostics(printer, &result);
        }
        total.merge(result);
    }

    let errors = total.error_count();
    let warnings = total.warning_count();
    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
        return Err(MsdfError::InvalidShape {
            message: format!("{} failed validation", plural(args.files.len(), "file", "files")),
            help: Some("Fix the errors above and run `msdf validate` again".to_string()),
        });
    }

    printer.status(
        "Finished",
        &format!(
            "{} checked, {}",
            plural(args.files.len(), "shape", "shapes"),
            plural(warnings, "warning", "warnings")
        ),
    );
    Ok(())
}
