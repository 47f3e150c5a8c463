use clap::Parser;
use miette::Result;
use msdf::cli::{Cli, Commands};
use msdf::output::Printer;
use tracing::level_filters::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let printer = Printer::new(cli.quiet);

    match cli.command {
        Commands::Generate(args) => msdf::cli::generate::run(args, &printer)?,
        Commands::Validate(args) => msdf::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => msdf::cli::completions::run(args)?,
    }

    Ok(())
}
