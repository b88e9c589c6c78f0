//! SilentTalk - Sign language recognition desktop demo
//!
//! Renders a live camera preview and converts signed letters into text and
//! speech. Recognition is currently a randomized stand-in behind a source
//! trait, pending a real gesture model.

mod capture;
mod config;
mod dashboard;
mod output;
mod recognition;
mod shared;

use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::shared::SharedAppState;

/// SilentTalk - Sign language recognition demo
#[derive(Parser, Debug)]
#[command(name = "silent-talk")]
#[command(about = "Convert sign language gestures into text and speech in real-time")]
struct Args {
    /// Capture device index to use (overrides the configured one)
    #[arg(short, long)]
    camera: Option<u32>,

    /// List available cameras and exit
    #[arg(long)]
    list_cameras: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // List cameras mode
    if args.list_cameras {
        println!("Available cameras:");
        let cameras = capture::list_cameras();
        if cameras.is_empty() {
            println!("  No cameras detected");
        } else {
            for camera in &cameras {
                println!("  {}", camera);
            }
        }
        return Ok(());
    }

    info!("SilentTalk starting...");

    // Load or create configuration
    let mut config = load_or_create_config();
    if let Some(index) = args.camera {
        info!("Using camera {} from command line", index);
        config.camera.device_index = index;
    }

    // Create shared state
    let shared_state = Arc::new(RwLock::new(SharedAppState::new(config)));

    // Run the dashboard (blocking)
    if let Err(e) = dashboard::app::run_dashboard(shared_state) {
        tracing::error!("Dashboard error: {}", e);
    }

    info!("SilentTalk shutdown complete");

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config() -> AppConfig {
    if let Ok(config_dir) = config::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}
