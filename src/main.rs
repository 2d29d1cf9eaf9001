use clap::Parser;
use luminary::core::config::{self, CliOverrides, LuminaryConfig};
use luminary::core::settings::{Language, Theme};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "luminary", about = "Terminal messaging client")]
struct Args {
    /// Color theme for this session
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Interface language
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Write debug-level entries to luminary.log
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to luminary.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create("luminary.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        LuminaryConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            theme: args.theme,
            language: args.language,
        },
    );

    log::info!(
        "Luminary starting up (theme: {:?}, language: {:?})",
        resolved.settings.theme,
        resolved.settings.language
    );

    luminary::tui::run(resolved)
}
