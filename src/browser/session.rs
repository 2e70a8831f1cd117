use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ScraperError;
use crate::traits::BrowserSession;

/// 要素の innerText を取得するスクリプト（要素が無ければ null）
const ELEMENT_TEXT_SCRIPT: &str = r#"
(function() {
    var el = document.querySelector(__SELECTOR__);
    if (el === null) {
        return null;
    }
    return el.innerText;
})()
"#;

/// chromiumoxide のブラウザ1つとページ1枚を所有するセッション
pub struct ChromeSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    profile: Option<TempDir>,
}

impl ChromeSession {
    pub(crate) fn new(
        browser: Browser,
        page: Page,
        handler: JoinHandle<()>,
        profile: TempDir,
    ) -> Self {
        Self {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler),
            profile: Some(profile),
        }
    }

    fn get_page(&self) -> Result<&Page, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザは既に終了しています".into()))
    }
}

/// 実行ごとのChromeプロファイル用ディレクトリ
pub(crate) fn create_profile_dir() -> Result<TempDir, ScraperError> {
    tempfile::Builder::new()
        .prefix("fuel-watch-")
        .tempdir()
        .map_err(|e| ScraperError::BrowserInit(format!("プロファイル作成エラー: {}", e)))
}

pub(crate) fn remove_profile_dir(profile: TempDir) {
    let path = profile.path().to_path_buf();
    match profile.close() {
        Ok(()) => debug!("Removed browser profile {:?}", path),
        Err(e) => warn!("Failed to remove browser profile {:?}: {}", path, e),
    }
}

/// innerText の空行を詰め、WebDriver の `.text` と同じ1行1フィールドにする
pub(crate) fn normalize_inner_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn element_text_script(selector: &str) -> String {
    // serde_json で JS 文字列リテラルとしてエスケープ
    let literal = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    ELEMENT_TEXT_SCRIPT.replace("__SELECTOR__", &literal)
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        let page = self.get_page()?;
        info!("Navigating to {}", url);

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        debug!("Navigation complete");
        Ok(())
    }

    async fn inject_script(&mut self, script: &str) -> Result<(), ScraperError> {
        self.get_page()?
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        Ok(())
    }

    async fn element_text(&mut self, selector: &str) -> Result<Option<String>, ScraperError> {
        let script = element_text_script(selector);
        let result = self
            .get_page()?
            .evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        Ok(result
            .into_value::<Option<String>>()
            .unwrap_or(None)
            .map(|text| normalize_inner_text(&text)))
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, ScraperError> {
        self.get_page()?
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| ScraperError::JavaScript(format!("screenshot: {}", e)))
    }

    async fn quit(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");

        self.page = None;

        let mut result = Ok(());
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Browser close failed: {}", e);
                result = Err(ScraperError::BrowserInit(format!("close: {}", e)));
            }
            if let Err(e) = browser.wait().await {
                debug!("Browser process wait failed: {}", e);
            }
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        // プロセス終了後にプロファイルを削除
        if let Some(profile) = self.profile.take() {
            remove_profile_dir(profile);
        }

        info!("Browser closed");
        result
    }
}
