pub mod completions;
pub mod generate;
pub mod validate;

use clap::{Parser, Subcommand};

/// msdf - Signed and multi-channel signed distance field generator
#[derive(Parser, Debug)]
#[command(name = "msdf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate distance field images from shape files
    Generate(generate::GenerateArgs),

    /// Check shape files without generating anything
    Validate(validate::ValidateArgs),

    /// Print shell completions
    Completions(completions::CompletionsArgs),
}
