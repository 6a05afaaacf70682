use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use supportchat::core::config::{CliOverrides, EnvOverrides, load_config, resolve};
use supportchat::tui;

#[derive(Parser)]
#[command(name = "supportchat", about = "Terminal chat with an AI customer support agent")]
struct Args {
    /// Conversation endpoint URL (overrides config and SUPPORTCHAT_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// User id sent with every message (overrides config and SUPPORTCHAT_USER_ID)
    #[arg(short, long)]
    user_id: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "supportchat.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load_config().map_err(|e| {
        log::error!("Failed to load config: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let resolved = resolve(
        &config,
        &EnvOverrides::from_env(),
        &CliOverrides {
            endpoint: args.endpoint,
            user_id: args.user_id,
        },
    );

    log::info!(
        "Supportchat starting up (endpoint={}, user_id={})",
        resolved.endpoint,
        resolved.user_id
    );

    tui::run(resolved)
}
