use anyhow::Result;
use clap::Parser;

use screenshot_gallery::api::config::ApiConfig;
use screenshot_gallery::api::start_server;
use screenshot_gallery::utils::logger::init_logger;

/// Backend for the screenshot capture-and-gallery web app
#[derive(Debug, Parser)]
#[command(name = "screenshot-gallery", version, about)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Directory holding the screenshot collection file
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Ceiling for an incoming JSON body, in megabytes
    #[arg(long, default_value_t = 50)]
    payload_limit_mb: usize,

    /// Directory for log files; logs to stdout when omitted
    #[arg(long)]
    log_dir: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = init_logger(cli.log_dir.as_deref());

    let config = ApiConfig {
        data_dir: cli.data_dir,
        payload_limit: cli.payload_limit_mb * 1024 * 1024,
    };

    start_server(&cli.host, cli.port, Some(config)).await?;

    Ok(())
}
