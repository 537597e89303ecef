use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use folio::core::config::{self, CliOverrides, FolioConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "folio", about = "Terminal portfolio with an AI assistant")]
struct Args {
    /// Gemini model id (overrides config and FOLIO_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Portfolio content TOML replacing the built-in content
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Log level written to folio.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to folio.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("folio.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("Folio starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        FolioConfig::default()
    });
    let cli = CliOverrides {
        model: args.model,
        content: args.content,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("Model: {}", resolved.model_name);

    let content = match config::load_content(&resolved) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to load content: {}", e);
            eprintln!("folio: {e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    folio::tui::run(resolved, content)
}
