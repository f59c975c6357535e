use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initializes the global tracing subscriber.
///
/// Logs to stdout by default; when `log_dir` is given, writes to a
/// timestamped file in that directory instead (created if missing). The
/// filter comes from `RUST_LOG`.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false);

    match log_dir {
        Some(dir) => {
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/gallery_{}.log", dir, timestamp);

            let subscriber = builder
                .with_ansi(false)
                .with_writer(Arc::new(fs::File::create(log_file)?))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    info!("Logger initialized");
    Ok(())
}
