//! Webhook通知

mod message;
mod webhook;

use tracing::{info, warn};

use crate::error::ScraperError;
use crate::prices::{Decision, Reading};
use crate::traits::Notifier;

pub use message::compose;
pub use webhook::{DiscordWebhook, WebhookPayload};

/// 通知の配送結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// low が無いので送信しなかった
    Skipped,
    /// 204 を受信
    Delivered,
    /// 204 以外（実行自体は成功扱い）
    Rejected { status: u16 },
}

/// 判定結果に応じて通知を最大1回送信する
pub async fn notify<N: Notifier + ?Sized>(
    decision: &Decision,
    reading: &Reading,
    notifier: &N,
) -> Result<DeliveryOutcome, ScraperError> {
    let Some(message) = compose(decision, reading) else {
        info!("Prices are above thresholds. No notification sent.");
        return Ok(DeliveryOutcome::Skipped);
    };

    let outcome = notifier.send(&message).await?;
    match outcome {
        DeliveryOutcome::Delivered => info!("Notification sent successfully."),
        DeliveryOutcome::Rejected { status } => {
            warn!("Failed to send notification. Status code: {}", status)
        }
        DeliveryOutcome::Skipped => {}
    }
    Ok(outcome)
}
