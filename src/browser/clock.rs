use chrono::{FixedOffset, Utc};
use tracing::info;

use crate::error::ScraperError;
use crate::traits::BrowserSession;

/// ページの Date を固定オフセット分ずらすスクリプト
///
/// 引数なしの `new Date()` と `Date.now()` だけをずらし、それ以外の生成方法は元の Date に委譲する。
const CLOCK_OVERRIDE_SCRIPT: &str = r#"
(function() {
    var OriginalDate = window.Date;
    var offsetMs = __OFFSET_MS__;
    function ShiftedDate() {
        if (arguments.length === 0) {
            return new OriginalDate(OriginalDate.now() + offsetMs);
        }
        var args = Array.prototype.slice.call(arguments);
        return new (Function.prototype.bind.apply(OriginalDate, [null].concat(args)))();
    }
    ShiftedDate.now = function() {
        return OriginalDate.now() + offsetMs;
    };
    ShiftedDate.prototype = OriginalDate.prototype;
    Object.setPrototypeOf(ShiftedDate, OriginalDate);
    window.Date = ShiftedDate;
    return true;
})()
"#;

/// ページ内の時計を対象タイムゾーンに合わせる
///
/// ホストのシステム時計には影響せず、セッション終了とともに破棄される。
#[derive(Debug, Clone, Copy)]
pub struct ClockOverride {
    offset: FixedOffset,
}

impl ClockOverride {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset_millis(&self) -> i64 {
        i64::from(self.offset.local_minus_utc()) * 1000
    }

    pub fn script(&self) -> String {
        CLOCK_OVERRIDE_SCRIPT.replace("__OFFSET_MS__", &self.offset_millis().to_string())
    }

    /// ナビゲーション直後、待機の前に1回だけ実行する
    pub async fn apply<S: BrowserSession + ?Sized>(&self, session: &mut S) -> Result<(), ScraperError> {
        let target_now = Utc::now().with_timezone(&self.offset);
        info!(
            "Overriding page clock to UTC{} (target time {})",
            self.offset,
            target_now.format("%Y-%m-%d %H:%M")
        );
        session.inject_script(&self.script()).await
    }
}
