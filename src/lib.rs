//! 燃料/CO2価格スクレイパーライブラリ
//!
//! - JavaScriptで描画される価格ページをヘッドレスChromeで読み込む
//! - 現在時刻の燃料価格・CO2価格を抽出
//! - 閾値を下回っていればWebhookに通知
//!
//! 1回実行して終了する。定期実行は外部スケジューラ（cron等）に任せる。
//!
//! # 使用例
//!
//! ```rust,ignore
//! use fuel_watch::{WatchConfig, WatchService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = WatchConfig::from_env().unwrap();
//!     let mut service = WatchService::new();
//!
//!     let report = service.call(config).await.unwrap();
//!     println!("Fuel: {}, CO2: {}", report.reading.fuel, report.reading.co2);
//! }
//! ```
//!
//! # セッションを差し替える
//!
//! ```rust,ignore
//! use fuel_watch::{browser, run_watch, DiscordWebhook, WatchConfig};
//!
//! let config = WatchConfig::new("https://discord.com/api/webhooks/...").with_thresholds(450, 130);
//! let notifier = DiscordWebhook::new(config.webhook_url.clone())?;
//! let mut session = browser::launch(&config).await?;
//! let report = run_watch(&mut session, &notifier, &config).await?;
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod notify;
pub mod prices;
pub mod service;
pub mod traits;

#[cfg(test)]
mod testing;

// 主要な型をリエクスポート
pub use config::{Thresholds, WatchConfig};
pub use error::{ExtractionError, ScraperError};
pub use notify::{DeliveryOutcome, DiscordWebhook};
pub use prices::{Decision, Reading};
pub use service::{run_watch, WatchReport, WatchService};
pub use traits::{BrowserSession, Notifier};
