//! # 通知
//!
//! 配信境界の入出力型と、通知操作のエラー分類を定義する。
//!
//! ## 設計方針
//!
//! - **型付き結果**: 元実装の「握りつぶして boolean を返す」方針を置き換え、
//!   呼び出し側が設定エラーとネットワークエラーを区別できるようにする
//! - **エラーは決して投げない**: ステージ操作は panic せず、すべての失敗を
//!   [`NotifyError`] のいずれかのバリアントに写像する
//! - **リトライなし**: 各送信は fire-once。1 回の失敗はその呼び出しで確定する

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// テンプレートパラメータ
///
/// 配信サービスに渡すフラットな文字列キーのペイロード。
/// EmailJS リクエストボディの `template_params` オブジェクトとして
/// そのままシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(BTreeMap<String, String>);

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// パラメータを設定する
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// パラメータを取得する
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// キーが存在するかどうか
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 配信サービスが解決したレスポンス
///
/// 外部サービスの `send(...) -> {status, text?}` 契約をそのまま写す。
/// 非成功ステータスの解釈は通知クライアント側の責務。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    /// HTTP ステータスコード
    pub status: u16,
    /// レスポンスボディ（空の場合は None）
    pub text:   Option<String>,
}

impl SendResponse {
    /// 成功ステータス（2xx）かどうか
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 配信境界で発生するエラー
///
/// 外部呼び出しがレスポンスを解決できなかった場合のみ使用する。
/// 解決したが非成功ステータスだった場合は [`SendResponse`] で返る。
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// 配信機構が初期化されていない（公開鍵未設定）
    #[error("配信機構が初期化されていません")]
    NotInitialized,

    /// ネットワーク障害・リクエスト構築失敗など
    #[error("配信呼び出しに失敗: {0}")]
    Transport(String),
}

/// 通知操作のエラー
///
/// ステージ操作の型付き結果。spec の分類に対応する:
/// (a) 配信機構の欠如 → `NotConfigured`、
/// (b) 外部呼び出しの失敗 → `Network`、
/// (c) 非成功ステータスでの解決 → `Rejected`。
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// 配信機構が使用可能な状態にない
    #[error("通知クライアントが設定されていません")]
    NotConfigured,

    /// 外部呼び出しが失敗した（ネットワーク障害など）
    #[error("通知送信に失敗: {0}")]
    Network(String),

    /// 外部サービスが非成功ステータスを返した
    #[error("配信サービスが拒否しました (status={status})")]
    Rejected {
        /// 外部サービスの HTTP ステータスコード
        status: u16,
        /// エラーメッセージ本文（あれば）
        text:   Option<String>,
    },
}

impl From<DeliveryError> for NotifyError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::NotInitialized => NotifyError::NotConfigured,
            DeliveryError::Transport(msg) => NotifyError::Network(msg),
        }
    }
}
