//! Noop 配信実装
//!
//! メッセージを実際に送信せず、ログ出力のみ行う。
//! 通知無効化時や開発環境で使用する。

use async_trait::async_trait;
use tireflow_domain::notification::{DeliveryError, SendResponse, TemplateParams};

use super::DeliverySender;

/// Noop 配信送信（ログ出力のみ、常に成功ステータスを報告する）
#[derive(Debug, Clone)]
pub struct NoopDeliverySender;

#[async_trait]
impl DeliverySender for NoopDeliverySender {
    async fn init(&self, _public_key: &str) -> Result<(), DeliveryError> {
        tracing::info!("Noop: 配信機構の初期化をスキップ");
        Ok(())
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendResponse, DeliveryError> {
        tracing::info!(
            service_id,
            template_id,
            to_email = params.get("to_email").unwrap_or_default(),
            subject = params.get("subject").unwrap_or_default(),
            "Noop: メッセージ送信をスキップ"
        );
        Ok(SendResponse {
            status: 200,
            text:   None,
        })
    }
}
