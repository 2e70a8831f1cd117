use async_trait::async_trait;

use crate::error::ScraperError;
use crate::notify::DeliveryOutcome;

/// 1ページを操作するブラウザセッション
#[async_trait]
pub trait BrowserSession: Send {
    /// URLへ遷移
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// ページコンテキストでスクリプトを実行
    async fn inject_script(&mut self, script: &str) -> Result<(), ScraperError>;

    /// セレクタに一致する要素の表示テキスト（要素が無ければ `None`）
    async fn element_text(&mut self, selector: &str) -> Result<Option<String>, ScraperError>;

    /// デバッグ用のページ全体スクリーンショット（PNG）
    async fn screenshot(&mut self) -> Result<Vec<u8>, ScraperError> {
        Err(ScraperError::BrowserInit(
            "screenshot not supported by this session".into(),
        ))
    }

    /// リソース解放
    async fn quit(&mut self) -> Result<(), ScraperError>;
}

/// 通知の送信先
#[async_trait]
pub trait Notifier: Send + Sync {
    /// メッセージを1回送信
    async fn send(&self, content: &str) -> Result<DeliveryOutcome, ScraperError>;
}
