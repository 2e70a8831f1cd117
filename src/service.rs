use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use base64::Engine;
use tower::Service;
use tracing::{debug, error, info, warn};

use crate::browser::{self, ClockOverride};
use crate::config::WatchConfig;
use crate::error::ScraperError;
use crate::notify::{notify, DeliveryOutcome, DiscordWebhook};
use crate::prices::{evaluate, extract, wait_for_text, Decision, Reading};
use crate::traits::{BrowserSession, Notifier};

/// 1回の実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchReport {
    pub reading: Reading,
    pub decision: Decision,
    pub delivery: DeliveryOutcome,
}

/// ナビゲーション → 時計上書き → 待機 → 抽出 → 判定 → 通知
///
/// 成功・失敗に関わらず最後に必ず `session.quit()` を呼ぶ。
/// 終了処理の失敗はログのみで、元の結果を上書きしない。
pub async fn run_watch<S, N>(
    session: &mut S,
    notifier: &N,
    config: &WatchConfig,
) -> Result<WatchReport, ScraperError>
where
    S: BrowserSession + ?Sized,
    N: Notifier + ?Sized,
{
    let result = scrape_and_notify(session, notifier, config).await;

    if let Err(e) = session.quit().await {
        warn!("Browser teardown failed: {}", e);
    }

    result
}

async fn scrape_and_notify<S, N>(
    session: &mut S,
    notifier: &N,
    config: &WatchConfig,
) -> Result<WatchReport, ScraperError>
where
    S: BrowserSession + ?Sized,
    N: Notifier + ?Sized,
{
    session.navigate(&config.source_url).await?;

    ClockOverride::new(config.utc_offset).apply(session).await?;

    let text = match wait_for_text(session, &config.selector, config.wait_timeout).await {
        Ok(text) => text,
        Err(e) => {
            if config.debug {
                dump_screenshot(session).await;
            }
            return Err(e);
        }
    };

    let reading = extract(&text).map_err(|e| {
        error!("Could not find the three data elements: {}", e);
        error!("Content of {} element:\n{}", config.selector, e.raw_text());
        e
    })?;

    info!("Time: {}", reading.timestamp);
    info!("Fuel Price: {}", reading.fuel);
    info!("CO2 Price: {}", reading.co2);

    let decision = evaluate(&reading, &config.thresholds);
    debug!(
        "Decision: fuel_low={} co2_low={} (thresholds {}/{})",
        decision.fuel_low, decision.co2_low, config.thresholds.fuel, config.thresholds.co2
    );

    let delivery = notify(&decision, &reading, notifier).await?;

    Ok(WatchReport {
        reading,
        decision,
        delivery,
    })
}

/// タイムアウト時のページ状態をログに出す（デバッグモードのみ）
async fn dump_screenshot<S: BrowserSession + ?Sized>(session: &mut S) {
    match session.screenshot().await {
        Ok(png) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
            debug!("Timeout screenshot: data:image/png;base64,{}", encoded);
        }
        Err(e) => debug!("Failed to capture screenshot: {}", e),
    }
}

/// tower::Serviceを実装した価格監視サービス
///
/// 1回の `call` でブラウザを起動し、実行が終わると必ず閉じる。
#[derive(Debug, Clone, Default)]
pub struct WatchService {}

impl WatchService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<WatchConfig> for WatchService {
    type Response = WatchReport;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, config: WatchConfig) -> Self::Future {
        info!(
            "Price watch started: fuel<{} co2<{}",
            config.thresholds.fuel, config.thresholds.co2
        );

        Box::pin(async move {
            // Webhookクライアントはブラウザ起動前に用意する
            let notifier = DiscordWebhook::new(config.webhook_url.clone())?;
            let mut session = browser::launch(&config).await?;

            let report = run_watch(&mut session, &notifier, &config).await?;

            info!("Price watch completed: {:?}", report.delivery);
            Ok(report)
        })
    }
}
