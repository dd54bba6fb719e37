use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::auth::fetch_access_token;
use crate::config::SyncConfig;
use crate::convert::SofficeConverter;
use crate::drive::DriveClient;
use crate::gcs::GcsSink;
use crate::sync::synchronise;

/// CLI for pdf-bucket: archive a Drive folder into a GCS bucket as PDFs.
#[derive(Parser)]
#[clap(
    name = "pdf-bucket",
    version,
    about = "Sync a Google Drive folder into a GCS bucket as PDFs"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one full sync of the source folder into the destination bucket
    Sync {
        /// Source Drive folder id (overrides DRIVE_FOLDER_ID)
        #[clap(long)]
        folder_id: Option<String>,
        /// Destination bucket (overrides GCS_BUCKET)
        #[clap(long)]
        bucket: Option<String>,
        /// Bound each LibreOffice call, in seconds (unbounded when omitted)
        #[clap(long)]
        convert_timeout: Option<u64>,
    },
}

/// Log filter for the process: `RUST_LOG` when set, otherwise `info`, so
/// the per-file progress lines and the empty-folder diagnostic reach the
/// operator on a stock deployment.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Async CLI entrypoint shared by main() and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync {
            folder_id,
            bucket,
            convert_timeout,
        } => {
            let config = SyncConfig::resolve(folder_id, bucket)?;

            let http = reqwest::Client::new();
            let token = fetch_access_token(&http).await?;
            let drive = DriveClient::new(http.clone(), token.clone());
            let sink = GcsSink::new(http, token, config.bucket.clone());
            let mut converter = SofficeConverter::new();
            if let Some(secs) = convert_timeout {
                converter = converter.with_timeout(Duration::from_secs(secs));
            }

            println!("Sync starting...");
            let report = synchronise(&config, &drive, &converter, &sink).await?;
            println!(
                "Sync complete: {} uploaded, {} skipped, {} total",
                report.uploaded_count(),
                report.skipped_count(),
                report.total
            );
            for skip in &report.skipped {
                println!("  skipped {}: {}", skip.name, skip.reason);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::default_env_filter;

    #[test]
    fn filter_falls_back_to_info_when_rust_log_is_unset() {
        std::env::remove_var("RUST_LOG");
        let filter = default_env_filter();
        assert_eq!(filter.to_string(), "info");
    }
}
