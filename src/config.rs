use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::ScraperError;

pub const PRICES_URL: &str = "https://am4-helper.web.app/tabs/prices";
pub const CURRENT_HOUR_SELECTOR: &str = ".current-hour";

pub const DEFAULT_FUEL_THRESHOLD: i64 = 400;
pub const DEFAULT_CO2_THRESHOLD: i64 = 120;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 20;
/// IST (UTC+05:30)
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const ENV_FUEL_THRESHOLD: &str = "FUEL_PRICE_THRESHOLD";
pub const ENV_CO2_THRESHOLD: &str = "CO2_PRICE_THRESHOLD";

/// 価格の閾値（これ未満なら「安い」）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub fuel: i64,
    pub co2: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fuel: DEFAULT_FUEL_THRESHOLD,
            co2: DEFAULT_CO2_THRESHOLD,
        }
    }
}

/// 1回の実行に使う設定（起動時に一度だけ読み込む）
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub webhook_url: String,
    pub thresholds: Thresholds,
    pub source_url: String,
    pub selector: String,
    pub wait_timeout: Duration,
    pub utc_offset: FixedOffset,
    pub headless: bool,
    /// 明示的なChrome実行ファイル（未指定ならchromiumoxideの自動検出）
    pub chrome_path: Option<PathBuf>,
    /// Chromium自動ダウンロード先
    pub download_path: PathBuf,
    pub debug: bool,
}

impl WatchConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            thresholds: Thresholds::default(),
            source_url: PRICES_URL.to_string(),
            selector: CURRENT_HOUR_SELECTOR.to_string(),
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            utc_offset: default_offset(),
            headless: true,
            chrome_path: None,
            download_path: PathBuf::from("./chromium"),
            debug: false,
        }
    }

    /// プロセス環境変数から読み込む
    pub fn from_env() -> Result<Self, ScraperError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から読み込む
    ///
    /// `DISCORD_WEBHOOK_URL` が無い・空の場合はブラウザを起動する前にエラーになる。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScraperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空文字は未設定扱い
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let webhook_url = get(ENV_WEBHOOK_URL).ok_or_else(|| {
            ScraperError::Config(format!("{} not found in environment variables", ENV_WEBHOOK_URL))
        })?;

        let mut config = Self::new(webhook_url);

        config.thresholds = Thresholds {
            fuel: parse_or(get(ENV_FUEL_THRESHOLD), ENV_FUEL_THRESHOLD, DEFAULT_FUEL_THRESHOLD)?,
            co2: parse_or(get(ENV_CO2_THRESHOLD), ENV_CO2_THRESHOLD, DEFAULT_CO2_THRESHOLD)?,
        };

        config.debug = parse_flag(get("SCRAPER_DEBUG"), "SCRAPER_DEBUG", false)?;

        config.chrome_path = get("CHROME_PATH")
            .or_else(|| get("CHROMIUM_PATH"))
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn with_thresholds(mut self, fuel: i64, co2: i64) -> Self {
        self.thresholds = Thresholds { fuel, co2 };
        self
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60).expect("IST offset is within ±24h")
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, ScraperError> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| ScraperError::Config(format!("{} is not a valid integer: {:?}", key, raw))),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, key: &str, default: bool) -> Result<bool, ScraperError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ScraperError::Config(format!(
            "{} must be a boolean: {:?}",
            key, other
        ))),
    }
}
