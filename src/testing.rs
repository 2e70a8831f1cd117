//! テスト用のフェイク実装

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::notify::DeliveryOutcome;
use crate::traits::{BrowserSession, Notifier};

/// ポーリング結果を順番に返すセッション
#[derive(Default)]
pub struct FakeSession {
    responses: VecDeque<Option<String>>,
    repeat_last: bool,
    last: Option<String>,
    polls: usize,
    pub fail_navigation: bool,
    /// element_text が常にエラーを返す
    pub fail_polls: bool,
    pub navigated: Vec<String>,
    pub scripts: Vec<String>,
    pub quit_calls: usize,
}

impl FakeSession {
    pub fn with_polls(responses: Vec<Option<&str>>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|r| r.map(str::to_string))
                .collect(),
            ..Default::default()
        }
    }

    /// 最初のポーリングでテキストが揃っているページ
    pub fn with_text(text: &str) -> Self {
        Self::with_polls(vec![Some(text)])
    }

    /// 応答を使い切った後、最後の応答を返し続ける
    pub fn repeat_last(mut self) -> Self {
        self.repeat_last = true;
        self
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        if self.fail_navigation {
            return Err(ScraperError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()));
        }
        self.navigated.push(url.to_string());
        Ok(())
    }

    async fn inject_script(&mut self, script: &str) -> Result<(), ScraperError> {
        self.scripts.push(script.to_string());
        Ok(())
    }

    async fn element_text(&mut self, _selector: &str) -> Result<Option<String>, ScraperError> {
        self.polls += 1;
        if self.fail_polls {
            return Err(ScraperError::JavaScript("Target closed".into()));
        }
        match self.responses.pop_front() {
            Some(response) => {
                self.last = response.clone();
                Ok(response)
            }
            None if self.repeat_last => Ok(self.last.clone()),
            None => Ok(None),
        }
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, ScraperError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn quit(&mut self) -> Result<(), ScraperError> {
        self.quit_calls += 1;
        Ok(())
    }
}

/// 送信内容を記録する通知先
pub struct FakeNotifier {
    response: Result<DeliveryOutcome, String>,
    sent: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn responding(outcome: DeliveryOutcome) -> Self {
        Self {
            response: Ok(outcome),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, content: &str) -> Result<DeliveryOutcome, ScraperError> {
        self.sent.lock().unwrap().push(content.to_string());
        self.response.clone().map_err(ScraperError::Webhook)
    }
}
