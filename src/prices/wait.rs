use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::ScraperError;
use crate::traits::BrowserSession;

/// DOMポーリング間隔
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 要素が現れ、かつテキストが空でなくなるまで待機する
///
/// 両方の条件で1つのタイムアウトを共有する。返すテキストは前後の空白を除去済み。
pub async fn wait_for_text<S: BrowserSession + ?Sized>(
    session: &mut S,
    selector: &str,
    timeout: Duration,
) -> Result<String, ScraperError> {
    info!("Waiting for {} (timeout {:?})...", selector, timeout);
    let start = Instant::now();
    let mut present = false;
    let mut polls: u32 = 0;
    let mut last_error: Option<ScraperError> = None;

    loop {
        polls += 1;
        match session.element_text(selector).await {
            Ok(Some(text)) => {
                if !present {
                    debug!("{} present after {:?}", selector, start.elapsed());
                    present = true;
                }
                let trimmed = text.trim();
                last_error = None;
                if !trimmed.is_empty() {
                    info!("{} populated after {:?}", selector, start.elapsed());
                    return Ok(trimmed.to_string());
                }
            }
            Ok(None) => last_error = None,
            Err(e) => {
                debug!("Element poll error: {}", e);
                last_error = Some(e);
            }
        }

        if start.elapsed() >= timeout {
            let phase = if present {
                "text stayed empty"
            } else {
                "element never appeared"
            };
            let mut message = format!("{}: {} within {}s", selector, phase, timeout.as_secs());
            if let Some(e) = last_error {
                message.push_str(&format!(" (last error: {})", e));
            }
            return Err(ScraperError::Timeout(message));
        }

        if polls % 10 == 0 {
            debug!("Still waiting for {}... ({:?})", selector, start.elapsed());
        }
        sleep(POLL_INTERVAL).await;
    }
}
