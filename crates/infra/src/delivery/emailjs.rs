//! EmailJS 配信実装
//!
//! EmailJS の REST API（`POST /api/v1.0/email/send`）を使用してメールを送信する。
//! ブラウザ常駐の EmailJS ウィジェットと同じサービス ID・テンプレート ID・
//! 公開鍵の組で動作する。

use async_trait::async_trait;
use serde::Serialize;
use tireflow_domain::notification::{DeliveryError, SendResponse, TemplateParams};
use tokio::sync::RwLock;

use super::DeliverySender;

const DEFAULT_API_BASE: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

/// EmailJS リクエストボディ
///
/// `user_id` は EmailJS の公開鍵。`template_params` はテンプレート変数の
/// フラットなオブジェクトになる。
#[derive(Serialize)]
struct SendEmailBody<'a> {
    service_id:      &'a str,
    template_id:     &'a str,
    user_id:         &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS 配信送信
///
/// `reqwest::Client` をラップする。公開鍵は `init` で渡されるまで保持されず、
/// 未初期化のまま `send` を呼ぶと [`DeliveryError::NotInitialized`] になる。
pub struct EmailJsSender {
    client:     reqwest::Client,
    base_url:   String,
    public_key: RwLock<Option<String>>,
}

impl EmailJsSender {
    /// 本番の EmailJS API を指す送信インスタンスを作成する
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// ベース URL を指定して作成する（テストサーバー向け）
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client:     reqwest::Client::new(),
            base_url:   base_url.trim_end_matches('/').to_string(),
            public_key: RwLock::new(None),
        }
    }
}

impl Default for EmailJsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliverySender for EmailJsSender {
    async fn init(&self, public_key: &str) -> Result<(), DeliveryError> {
        *self.public_key.write().await = Some(public_key.to_string());
        tracing::debug!("EmailJS 配信機構を初期化");
        Ok(())
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendResponse, DeliveryError> {
        let public_key = self
            .public_key
            .read()
            .await
            .clone()
            .ok_or(DeliveryError::NotInitialized)?;

        let body = SendEmailBody {
            service_id,
            template_id,
            user_id: &public_key,
            template_params: params,
        };

        let url = format!("{}{SEND_PATH}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.ok().filter(|t| !t.is_empty());

        Ok(SendResponse { status, text })
    }
}
