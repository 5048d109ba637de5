use clap::Parser;
use miette::Result;
use drawables::cli::{Cli, Commands};
use drawables::config::Manifest;
use drawables::output::Printer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let printer = Printer::new();

    // Completions run without a manifest.
    let manifest = match &cli.command {
        Commands::Completions(_) => Manifest::default(),
        _ => {
            let cwd = std::env::current_dir().map_err(|e| drawables::DrawError::Io {
                path: ".".into(),
                message: format!("Failed to read working directory: {}", e),
            })?;
            Manifest::resolve(cli.config.as_deref(), &cwd)?
        }
    };

    match cli.command {
        Commands::Export(args) => drawables::cli::export::run(args, &manifest, &printer)?,
        Commands::Command(args) => drawables::cli::command::run(args, &manifest, &printer)?,
        Commands::Single(args) => drawables::cli::single::run(args, &manifest, &printer)?,
        Commands::Icon(args) => drawables::cli::icon::run(args, &manifest, &printer)?,
        Commands::Templates(args) => drawables::cli::templates::run(args, &manifest, &printer)?,
        Commands::Watch(args) => drawables::cli::watch::run(args, &manifest, &printer)?,
        Commands::Completions(args) => drawables::cli::completions::run(args)?,
    }

    Ok(())
}
