use a11y_heuristics::cli::commands::{AnalyzeInput, cmd_analyze, cmd_catalog, cmd_elements};
use a11y_heuristics::cli::config::{Cli, Commands, load_config, resolve_settings};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("A11Y_HEURISTICS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("a11y_heuristics={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match cli.command {
        Commands::Analyze {
            elements,
            description,
            image,
            mime,
            format,
            output,
            date,
        } => {
            let input = AnalyzeInput::from_args(elements, description, image, mime)?;
            cmd_analyze(
                input,
                format,
                output.as_deref(),
                date.as_deref(),
                &settings,
            )?;
        }
        Commands::Catalog => cmd_catalog(),
        Commands::Elements => cmd_elements(),
    }

    Ok(())
}
