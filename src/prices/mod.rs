//! 価格の待機・抽出・閾値判定

mod evaluate;
mod extract;
mod types;
mod wait;

pub use evaluate::evaluate;
pub use extract::{extract, REQUIRED_FIELDS};
pub use types::{Decision, Reading};
pub use wait::{wait_for_text, POLL_INTERVAL};
