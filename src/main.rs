use std::process::ExitCode;

use fuel_watch::{DeliveryOutcome, WatchConfig, WatchService};
use tower::Service;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // .envがあれば読み込む（既存の環境変数が優先）
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ブラウザ起動前に設定を検証
    let config = match WatchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut service = WatchService::new();
    match service.call(config).await {
        Ok(report) => {
            if let DeliveryOutcome::Rejected { status } = report.delivery {
                info!("Scrape succeeded but delivery is uncertain (status {})", status);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error occurred: {}", e);
            if let Some(hint) = e.remediation() {
                error!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
