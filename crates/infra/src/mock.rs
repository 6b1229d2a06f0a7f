//! # テスト用モック配信機構
//!
//! 通知クライアントのテストで使用するインメモリの配信テストダブル。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tireflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tireflow_domain::notification::{DeliveryError, SendResponse, TemplateParams};

use crate::delivery::DeliverySender;

/// 送信されたメッセージの記録
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub service_id:  String,
    pub template_id: String,
    pub params:      TemplateParams,
}

/// 1 回の `send` 呼び出しに対するスクリプト化された結果
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// 指定ステータスで解決する
    Respond(SendResponse),
    /// 配信エラーで失敗する
    Fail(DeliveryError),
}

#[derive(Default)]
struct MockState {
    init_keys: Vec<String>,
    sent:      Vec<SentMessage>,
    script:    VecDeque<MockOutcome>,
}

/// モック配信送信
///
/// `init` 呼び出しと送信メッセージをすべて記録する。
/// `enqueue_*` で呼び出しごとの結果をスクリプトでき、
/// スクリプトが空の場合はステータス 200 で解決する。
#[derive(Clone, Default)]
pub struct MockDeliverySender {
    state: Arc<Mutex<MockState>>,
}

impl MockDeliverySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の `send` が指定ステータスで解決するようにする
    pub fn enqueue_status(&self, status: u16) {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(MockOutcome::Respond(SendResponse { status, text: None }));
    }

    /// 次の `send` が指定ステータスと本文で解決するようにする
    pub fn enqueue_response(&self, status: u16, text: &str) {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(MockOutcome::Respond(SendResponse {
                status,
                text: Some(text.to_string()),
            }));
    }

    /// 次の `send` が配信エラーで失敗するようにする
    pub fn enqueue_failure(&self, error: DeliveryError) {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(MockOutcome::Fail(error));
    }

    /// `init` が呼ばれた回数
    pub fn init_count(&self) -> usize {
        self.state.lock().unwrap().init_keys.len()
    }

    /// `init` に渡された公開鍵の一覧
    pub fn init_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().init_keys.clone()
    }

    /// 記録された送信メッセージの一覧
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.state.lock().unwrap().sent.clone()
    }
}

#[async_trait]
impl DeliverySender for MockDeliverySender {
    async fn init(&self, public_key: &str) -> Result<(), DeliveryError> {
        self.state
            .lock()
            .unwrap()
            .init_keys
            .push(public_key.to_string());
        Ok(())
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendResponse, DeliveryError> {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.sent.push(SentMessage {
                service_id:  service_id.to_string(),
                template_id: template_id.to_string(),
                params:      params.clone(),
            });
            state.script.pop_front()
        };

        match outcome {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::Fail(error)) => Err(error),
            None => Ok(SendResponse {
                status: 200,
                text:   None,
            }),
        }
    }
}
