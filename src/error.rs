use thiserror::Error;

/// ブラウザ未検出時に表示する対処方法
pub const BROWSER_INSTALL_HINT: &str = "Please ensure Chrome/Chromium is installed on your Linux server:\n  \
     Ubuntu/Debian: sudo apt-get update && sudo apt-get install -y chromium-browser\n  \
     CentOS/RHEL: sudo yum install -y chromium";

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ブラウザが利用できません (ローカル: {local} / ダウンロード: {managed})")]
    BrowserUnavailable { local: String, managed: String },

    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("価格抽出エラー: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Webhook送信エラー: {0}")]
    Webhook(String),
}

/// `.current-hour` 要素テキストの解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("フィールド数不足: 3件必要ですが{found}件しかありません")]
    InsufficientFields { found: usize, raw: String },

    #[error("フィールド{field}が数値ではありません: {value:?}")]
    NonNumericField {
        field: usize,
        value: String,
        raw: String,
    },
}

impl ExtractionError {
    /// デバッグ用の要素テキスト（生データ）
    pub fn raw_text(&self) -> &str {
        match self {
            Self::InsufficientFields { raw, .. } | Self::NonNumericField { raw, .. } => raw,
        }
    }
}

impl ScraperError {
    /// オペレーター向けの対処方法（ある場合）
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::BrowserUnavailable { .. } => Some(BROWSER_INSTALL_HINT),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        ScraperError::Webhook(e.to_string())
    }
}
