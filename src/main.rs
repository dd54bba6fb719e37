use clap::Parser;
use pdf_bucket::cli::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(pdf_bucket::cli::default_env_filter())
        .init();

    let cli = Cli::parse();

    // Per-file failures are reported inside the run; the exit code only
    // reflects whether the run itself completed.
    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("[ERROR] Sync failed: {e:#}");
            std::process::exit(1);
        }
    }
}
