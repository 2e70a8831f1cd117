//! ヘッドレスChromeの起動・ページ操作
//!
//! ローカルのChromeを優先し、無ければChromiumをダウンロードして起動する。

mod clock;
mod launcher;
mod session;

pub use clock::ClockOverride;
pub use launcher::{capability_args, launch, launch_with_fallback, USER_AGENT};
pub use session::ChromeSession;
