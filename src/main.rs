use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

use cook::api::Api;
use cook::app::{App, AppEvent, View};
use cook::config::{Config, StartView};

/// Get the config directory path (~/.config/cook/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("cook"))
}

#[derive(Parser, Debug)]
#[command(name = "cook", about = "Browse recipe categories and keep your favourites")]
struct Args {
    /// Base URL of the account backend (overrides config and COOK_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// URL of the category catalog endpoint
    #[arg(long, value_name = "URL")]
    catalog_url: Option<String>,

    /// Config file (default: ~/.config/cook/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.config/cook/cook.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Open on the favourites view
    #[arg(long)]
    favourites: bool,
}

/// Send tracing output to `path`. The terminal belongs to the TUI.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // Set directory permissions on Unix (user-only access); the log may hold account emails
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(&config_dir, std::fs::Permissions::from_mode(0o700))
        {
            eprintln!(
                "Warning: failed to set permissions on {}: {}",
                config_dir.display(),
                e
            );
        }
    }

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| config_dir.join("cook.log"));
    init_logging(&log_path)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    config.apply_env(|key| std::env::var(key).ok());

    // Command-line flags win over everything else
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(url) = args.catalog_url {
        config.catalog_url = url;
    }
    if args.favourites {
        config.start_view = StartView::Favourites;
    }

    let endpoints = config.endpoints().context("Invalid endpoint configuration")?;
    tracing::info!(
        api = %endpoints.api_base,
        catalog = %endpoints.catalog,
        "Starting cook"
    );

    let api =
        Api::new(&endpoints, config.request_timeout()).context("Failed to create HTTP client")?;
    let mut app = App::new(api, View::from(config.start_view));

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    cook::ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
