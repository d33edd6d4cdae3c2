use std::path::PathBuf;

use wandersync::config::{Config, GOOGLE_CLIENT_ID_VAR};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => match args.next() {
                Some(path) => config.storage_path = PathBuf::from(path),
                None => {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            },
            "--api-url" => match args.next() {
                Some(url) => config.api_url = url,
                None => {
                    eprintln!("Error: --api-url requires a URL argument");
                    std::process::exit(1);
                }
            },
            "--help" | "-h" => {
                println!("WanderSync - group trip planner");
                println!();
                println!("Usage: wandersync [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Session storage file (default: .data/wandersync.db)");
                println!("  --api-url <URL>        Backend base URL (default: $WANDERSYNC_API_URL or http://localhost:5000)");
                println!("  -h, --help             Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    if !config.login_enabled() {
        tracing::warn!("{} is not set, Google login is disabled", GOOGLE_CLIENT_ID_VAR);
        eprintln!("Warning: Google OAuth is not configured.");
        eprintln!("  Set {}=your-client-id.apps.googleusercontent.com to enable login.", GOOGLE_CLIENT_ID_VAR);
    }

    wandersync::cli::run(config);
}
