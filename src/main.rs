mod core;
mod rates;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config::{self, CliOverrides};
use crate::core::currency::Currency;

#[derive(Parser)]
#[command(name = "kurs", about = "Terminal currency converter (Frankfurter rates)")]
struct Args {
    /// Amount to convert
    #[arg(short, long)]
    amount: Option<f64>,

    /// Source currency
    #[arg(short, long, value_enum)]
    from: Option<Currency>,

    /// Target currency
    #[arg(short, long, value_enum)]
    to: Option<Currency>,

    /// Rates API base URL (overrides config and FRANKFURTER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to kurs.log in current directory
    // (stdout belongs to the TUI)
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("kurs.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to defaults: {}", e);
            Default::default()
        }
    };
    let mut resolved = config::resolve(
        &file_config,
        CliOverrides {
            amount: args.amount,
            from: args.from,
            to: args.to,
        },
    );
    if let Some(base_url) = args.base_url {
        resolved.base_url = base_url;
    }

    log::info!(
        "kurs starting up: {} {} -> {} via {}",
        resolved.amount,
        resolved.from,
        resolved.to,
        resolved.base_url
    );

    tui::run(resolved)
}
