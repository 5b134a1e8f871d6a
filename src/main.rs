/// Entry point for the Shamsi habit tracker server
///
/// Sets up logging, parses command line arguments and serves JSON-RPC
/// requests over stdin/stdout until the client disconnects.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use shamsi_habits::HabitTrackerServer;

/// Name of the data directory under each candidate base
const DATA_DIR_NAME: &str = "shamsi_habits";

/// First writable data directory, falling back to the system temp dir
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|home| home.join(format!(".{}", DATA_DIR_NAME))),
        dirs::data_dir().map(|data| data.join(DATA_DIR_NAME)),
        dirs::config_dir().map(|config| config.join(DATA_DIR_NAME)),
        std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(format!(".{}", DATA_DIR_NAME))),
    ];

    if let Some(dir) = candidates.into_iter().flatten().find(|dir| is_writable_dir(dir)) {
        return Ok(dir.join("habits.db"));
    }

    let temp_dir = std::env::temp_dir().join(DATA_DIR_NAME);
    std::fs::create_dir_all(&temp_dir)?;
    tracing::warn!("Using temporary directory for database: {}", temp_dir.display());
    Ok(temp_dir.join("habits.db"))
}

/// Create `dir` if needed and check that a file can be written into it
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let check_file = dir.join(".write_check");
    let writable = std::fs::write(&check_file, b"").is_ok();
    let _ = std::fs::remove_file(&check_file);
    writable
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("shamsi_habits={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Shamsi habit tracker");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = HabitTrackerServer::new(db_path).await?;
    server.run().await?;

    info!("Shutdown complete");
    Ok(())
}
