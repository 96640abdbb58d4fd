use std::path::PathBuf;

use clap::Parser;

use crate::detection::DetectorMode;
use crate::detection::preprocessing::DEFAULT_TARGET_SIZE;

pub const APP_NAME: &str = "AI Agriculture Assistant";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DISCLAIMER: &str = "Educational and demonstration purposes only";
pub const SCOPE: &str = "Educational Mini Project - Potato & Tomato Only";
pub const SUPPORTED_CROPS: [&str; 2] = ["Potato", "Tomato"];
pub const FUTURE_CROPS: [&str; 6] = ["Rice", "Wheat", "Corn", "Cotton", "Sugarcane", "Onion"];

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:8000",
    "http://localhost:3000",
    "http://127.0.0.1:8000",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "cropcare")]
#[command(version, about = "Crop care backend: leaf disease checks, yield estimates, prices and schemes")]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// SQLite database file, created if missing
    #[arg(long = "database", env = "DATABASE_PATH", default_value = "cropcare.db")]
    pub database: PathBuf,

    /// Allowed browser origins
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_CORS_ORIGINS.map(String::from)
    )]
    pub cors_origins: Vec<String>,

    /// Side length images are resized to before analysis
    #[arg(long, default_value_t = DEFAULT_TARGET_SIZE)]
    pub image_size: u32,

    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, value_enum, default_value_t = DetectorMode::FeatureBased)]
    pub detector_mode: DetectorMode,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "cropcare=debug,tower_http=debug" } else { "cropcare=info" }
}
