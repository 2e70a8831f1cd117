use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::browser::session::{create_profile_dir, ChromeSession};
use crate::config::WatchConfig;
use crate::error::ScraperError;

pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const LOCALE: &str = "en-IN";
/// ブラウザプロセスのタイムゾーン。ページ内時計は UTC + オフセットで対象地域の時刻になる
pub const BROWSER_TZ: &str = "UTC";

/// ディスプレイや権限の無いサーバーで再現性を保つための固定フラグ
pub fn capability_args() -> Vec<String> {
    vec![
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--disable-web-security".to_string(),
        "--disable-features=VizDisplayCompositor".to_string(),
        format!("--lang={}", LOCALE),
        format!("--user-agent={}", USER_AGENT),
    ]
}

/// ブラウザプロセスに渡す環境変数
pub fn launch_env() -> Vec<(&'static str, &'static str)> {
    vec![("TZ", BROWSER_TZ)]
}

pub fn headless_mode(headless: bool) -> HeadlessMode {
    if headless {
        HeadlessMode::New
    } else {
        HeadlessMode::False
    }
}

/// ブラウザを起動してセッションを返す
///
/// 1. ローカルにインストールされたChrome/Chromium（`CHROME_PATH` または自動検出）
/// 2. 失敗した場合、chromiumoxide の fetcher で Chromium をダウンロード
///
/// 両方失敗した場合は [`ScraperError::BrowserUnavailable`]。
pub async fn launch(config: &WatchConfig) -> Result<ChromeSession, ScraperError> {
    launch_with_fallback(
        || launch_with(config, config.chrome_path.clone()),
        || async {
            let executable = fetch_managed_chromium(&config.download_path).await?;
            launch_with(config, Some(executable)).await
        },
    )
    .await
}

/// 2段階の取得戦略: A を試し、失敗したら B、両方失敗なら BrowserUnavailable
pub async fn launch_with_fallback<T, A, FA, B, FB>(local: A, managed: B) -> Result<T, ScraperError>
where
    A: FnOnce() -> FA,
    FA: Future<Output = Result<T, ScraperError>>,
    B: FnOnce() -> FB,
    FB: Future<Output = Result<T, ScraperError>>,
{
    let local_err = match local().await {
        Ok(session) => return Ok(session),
        Err(e) => e,
    };
    warn!(
        "Failed to use system Chrome, trying managed Chromium download: {}",
        local_err
    );

    match managed().await {
        Ok(session) => Ok(session),
        Err(managed_err) => Err(ScraperError::BrowserUnavailable {
            local: local_err.to_string(),
            managed: managed_err.to_string(),
        }),
    }
}

async fn launch_with(
    config: &WatchConfig,
    executable: Option<PathBuf>,
) -> Result<ChromeSession, ScraperError> {
    info!("Launching browser (executable: {:?})...", executable);

    // 同時起動時のプロファイル衝突を避けるため実行ごとに一時ディレクトリを使う
    let profile = create_profile_dir()?;

    let mut builder = BrowserConfig::builder()
        .user_data_dir(profile.path())
        .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .no_sandbox()
        .request_timeout(Duration::from_secs(60));

    if let Some(path) = executable {
        builder = builder.chrome_executable(path);
    }

    builder = match headless_mode(config.headless) {
        HeadlessMode::False => builder.with_head(),
        _ => builder.new_headless_mode(),
    };

    for (key, value) in launch_env() {
        builder = builder.env(key, value);
    }

    for arg in capability_args() {
        builder = builder.arg(arg);
    }

    if config.debug {
        builder = builder.arg("--enable-logging=stderr").arg("--v=1");
    }

    let browser_config = builder
        .build()
        .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

    // ブラウザイベントハンドラをバックグラウンドで実行
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!("Browser event error: {:?}", e);
            }
        }
    });

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            let mut browser = browser;
            if let Err(close_err) = browser.close().await {
                debug!("Cleanup after failed page creation: {}", close_err);
            }
            let _ = browser.wait().await;
            handler_task.abort();
            return Err(ScraperError::BrowserInit(e.to_string()));
        }
    };

    info!("Browser launched");
    Ok(ChromeSession::new(browser, page, handler_task, profile))
}

/// chromiumoxide の fetcher で Chromium を取得し、実行ファイルのパスを返す
async fn fetch_managed_chromium(download_path: &Path) -> Result<PathBuf, ScraperError> {
    info!("Fetching managed Chromium into {:?}...", download_path);

    tokio::fs::create_dir_all(download_path)
        .await
        .map_err(|e| ScraperError::BrowserInit(format!("ダウンロード先作成エラー: {}", e)))?;

    let options = BrowserFetcherOptions::builder()
        .with_path(download_path)
        .build()
        .map_err(|e| ScraperError::BrowserInit(format!("fetcher設定エラー: {}", e)))?;

    let installation = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| ScraperError::BrowserInit(format!("Chromiumダウンロードエラー: {}", e)))?;

    info!("Managed Chromium ready: {:?}", installation.executable_path);
    Ok(installation.executable_path)
}
