use clap::Parser;
use shopbot::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shopbot", about = "Terminal shopping assistant")]
struct Args {
    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long)]
    api_url: Option<String>,

    /// JSON file that keeps the logged-in session between runs
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to shopbot.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shopbot.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e.to_string())
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            api_url: args.api_url,
            storage_path: args.storage,
            ephemeral: args.ephemeral,
        },
    );

    log::info!(
        "shopbot starting up: api={}, storage={:?}",
        resolved.api_base_url,
        resolved.storage
    );

    shopbot::tui::run(resolved)
}
