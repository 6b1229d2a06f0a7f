//! # 配信機構
//!
//! 通知メッセージの実際の送信を担当する外部サービスとの境界。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `DeliverySender` trait で配信機構を抽象化し、
//!   通知クライアントにはコンストラクタ引数として注入する
//!   （元実装のグローバル束縛の参照を明示的な依存性注入に置き換える）
//! - **2 つの実装**: EmailJS REST（本番）、Noop（無効化・開発用）。
//!   テストダブルは `test-utils` feature の [`crate::mock`] が提供する
//! - **ステータス解釈は呼び出し側**: `send` は解決したステータスと本文を
//!   そのまま返し、成功・失敗の判定は通知クライアントが行う

mod emailjs;
mod noop;

use async_trait::async_trait;
pub use emailjs::EmailJsSender;
pub use noop::NoopDeliverySender;
use tireflow_domain::notification::{DeliveryError, SendResponse, TemplateParams};

/// 配信送信トレイト
///
/// 外部配信サービスの `init(publicKey)` / `send(serviceId, templateId,
/// payload)` 契約を写す。`send` はレスポンスが解決できた場合は
/// 非成功ステータスでも `Ok` を返し、解決できなかった場合のみ
/// [`DeliveryError`] を返す。
#[async_trait]
pub trait DeliverySender: Send + Sync {
    /// 公開鍵で配信機構を初期化する
    async fn init(&self, public_key: &str) -> Result<(), DeliveryError>;

    /// メッセージを 1 件送信する
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendResponse, DeliveryError>;
}
