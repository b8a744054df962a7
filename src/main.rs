use clap::Parser;
use tracing_subscriber::EnvFilter;
use trackscan::cli::{self, Commands};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trackscan={}", log_level)));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .with_writer(std::io::stderr)
            .init();
    }
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        Commands::Scan(args) => cli::scan::handle_scan(args, cli.quiet).await,
        Commands::Tracks(args) => cli::tracks::handle_tracks(args).await,
        Commands::Components(args) => cli::components::handle_components(args).await,
        Commands::Validate(args) => cli::handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
