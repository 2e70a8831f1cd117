//! 価格関連の型定義

/// `.current-hour` 要素から読み取った1時間分の価格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// 時刻ラベル（解析しない）
    pub timestamp: String,
    pub fuel: i64,
    pub co2: i64,
}

/// 閾値判定の結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decision {
    pub fuel_low: bool,
    pub co2_low: bool,
}

impl Decision {
    pub fn any(&self) -> bool {
        self.fuel_low || self.co2_low
    }
}
