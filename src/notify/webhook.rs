use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::error::ScraperError;
use crate::traits::Notifier;

use super::DeliveryOutcome;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Discord互換Webhookのリクエストボディ
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub content: &'a str,
}

/// Webhookへ JSON を POST する通知先（204 を成功とみなす）
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("fuel-watch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send(&self, content: &str) -> Result<DeliveryOutcome, ScraperError> {
        debug!("Posting webhook ({} bytes)", content.len());

        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            Ok(DeliveryOutcome::Delivered)
        } else {
            Ok(DeliveryOutcome::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// 1リクエストだけ受け付けて固定ステータスを返すサーバー
    async fn one_shot_server(status_line: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let body = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break String::new();
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    let body = &text[header_end + 4..];
                    if body.len() >= content_length {
                        break body.to_string();
                    }
                }
            };

            let response = format!("HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(body);
        });

        (format!("http://{}/api/webhooks/1/token", addr), rx)
    }

    #[tokio::test]
    async fn test_204_is_delivered() {
        let (url, body_rx) = one_shot_server("204 No Content").await;
        let webhook = DiscordWebhook::new(url).unwrap();

        let outcome = webhook.send("Fuel price is low: 350\n").await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Delivered);

        let body: serde_json::Value = serde_json::from_str(&body_rx.await.unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "Fuel price is low: 350\n" }));
    }

    #[tokio::test]
    async fn test_500_is_rejected_not_error() {
        let (url, _body_rx) = one_shot_server("500 Internal Server Error").await;
        let webhook = DiscordWebhook::new(url).unwrap();

        let outcome = webhook.send("CO2 price is low: 90\n").await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected { status: 500 });
    }

    #[tokio::test]
    async fn test_200_is_rejected() {
        // Discordは ?wait=true のときだけ 200 を返す。成功扱いにしない
        let (url, _body_rx) = one_shot_server("200 OK").await;
        let webhook = DiscordWebhook::new(url).unwrap();

        let outcome = webhook.send("x").await.unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected { status: 200 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let webhook = DiscordWebhook::new(format!("http://{}/hook", addr)).unwrap();
        let err = webhook.send("x").await.unwrap_err();
        assert!(matches!(err, ScraperError::Webhook(_)));
    }
}
