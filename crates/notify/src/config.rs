//! # 通知クライアント設定
//!
//! EmailJS の資格情報、ステージごとのテンプレート ID、役割メールボックスを
//! 保持する。設定値は埋め込み側アプリケーションからプログラム的に供給され、
//! 環境変数・ファイル・CLI は使用しない。
//!
//! ## 設計方針
//!
//! - **プレースホルダ既定値**: 未設定状態は元実装と同じプレースホルダ文字列で
//!   表現し、[`NotifyConfig::is_configured`] で判定する
//! - **部分更新**: [`NotifyConfigPatch`] の `Some` フィールドのみをマージする

use std::time::Duration;

use serde::Serialize;
use tireflow_domain::stage::ApprovalStage;

/// 未設定のサービス ID を表すプレースホルダ
pub const PLACEHOLDER_SERVICE_ID: &str = "service_xxxxxxx";
/// 未設定のテンプレート ID を表すプレースホルダ
pub const PLACEHOLDER_TEMPLATE_ID: &str = "template_xxxxxxx";
/// 未設定の公開鍵を表すプレースホルダ
pub const PLACEHOLDER_PUBLIC_KEY: &str = "your_public_key_here";

/// ステージごとのテンプレート ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTemplates {
    pub manager:           String,
    pub transport_officer: String,
    pub engineer:          String,
    pub user_final:        String,
}

impl StageTemplates {
    /// ステージに対応するテンプレート ID を返す
    pub fn for_stage(&self, stage: ApprovalStage) -> &str {
        match stage {
            ApprovalStage::Manager => &self.manager,
            ApprovalStage::TransportOfficer => &self.transport_officer,
            ApprovalStage::Engineer => &self.engineer,
            ApprovalStage::UserFinal => &self.user_final,
        }
    }

    /// いずれかのテンプレート ID がプレースホルダのままかどうか
    fn has_placeholder(&self) -> bool {
        [
            &self.manager,
            &self.transport_officer,
            &self.engineer,
            &self.user_final,
        ]
        .iter()
        .any(|t| t.as_str() == PLACEHOLDER_TEMPLATE_ID)
    }
}

impl Default for StageTemplates {
    fn default() -> Self {
        Self {
            manager:           PLACEHOLDER_TEMPLATE_ID.to_string(),
            transport_officer: PLACEHOLDER_TEMPLATE_ID.to_string(),
            engineer:          PLACEHOLDER_TEMPLATE_ID.to_string(),
            user_final:        PLACEHOLDER_TEMPLATE_ID.to_string(),
        }
    }
}

/// 通知クライアント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// EmailJS サービス ID
    pub service_id: String,
    /// EmailJS 公開鍵
    pub public_key: String,
    /// ステージごとのテンプレート ID
    pub templates: StageTemplates,
    /// マネージャーの役割メールボックス
    pub manager_email: String,
    /// TTO の役割メールボックス
    pub tto_email: String,
    /// エンジニアの役割メールボックス
    pub engineer_email: String,
    /// 送信者表示名
    pub from_name: String,
    /// ダッシュボードリンク用のフロントエンド URL
    pub frontend_url: String,
    /// ワークフローテストのステージ間待機時間
    pub workflow_step_delay: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            service_id: PLACEHOLDER_SERVICE_ID.to_string(),
            public_key: PLACEHOLDER_PUBLIC_KEY.to_string(),
            templates: StageTemplates::default(),
            manager_email: "slthrmanager@gmail.com".to_string(),
            tto_email: "tto@slt.lk".to_string(),
            engineer_email: "engineer@slt.lk".to_string(),
            from_name: "Tire Management System".to_string(),
            frontend_url: "https://tire-slt.vercel.app".to_string(),
            workflow_step_delay: Duration::from_secs(1),
        }
    }
}

impl NotifyConfig {
    /// 資格情報がすべて設定済みかどうか
    ///
    /// サービス ID・公開鍵・4 つのテンプレート ID のいずれかが
    /// プレースホルダのままなら false。
    pub fn is_configured(&self) -> bool {
        self.service_id != PLACEHOLDER_SERVICE_ID
            && self.public_key != PLACEHOLDER_PUBLIC_KEY
            && !self.templates.has_placeholder()
    }

    /// 設定状態の読み取り専用スナップショットを返す
    pub fn status(&self) -> ConfigStatus {
        ConfigStatus {
            configured:     self.is_configured(),
            service_id:     self.service_id.clone(),
            public_key_set: self.public_key != PLACEHOLDER_PUBLIC_KEY,
            manager_email:  self.manager_email.clone(),
        }
    }

    /// パッチの `Some` フィールドをマージする
    pub fn apply(&mut self, patch: NotifyConfigPatch) {
        if let Some(service_id) = patch.service_id {
            self.service_id = service_id;
        }
        if let Some(public_key) = patch.public_key {
            self.public_key = public_key;
        }
        if let Some(templates) = patch.templates {
            self.templates = templates;
        }
        if let Some(manager_email) = patch.manager_email {
            self.manager_email = manager_email;
        }
        if let Some(tto_email) = patch.tto_email {
            self.tto_email = tto_email;
        }
        if let Some(engineer_email) = patch.engineer_email {
            self.engineer_email = engineer_email;
        }
        if let Some(from_name) = patch.from_name {
            self.from_name = from_name;
        }
        if let Some(frontend_url) = patch.frontend_url {
            self.frontend_url = frontend_url;
        }
        if let Some(delay) = patch.workflow_step_delay {
            self.workflow_step_delay = delay;
        }
    }
}

/// 設定の部分更新
///
/// `Some` のフィールドのみが既存設定を上書きする。
#[derive(Debug, Clone, Default)]
pub struct NotifyConfigPatch {
    pub service_id: Option<String>,
    pub public_key: Option<String>,
    pub templates: Option<StageTemplates>,
    pub manager_email: Option<String>,
    pub tto_email: Option<String>,
    pub engineer_email: Option<String>,
    pub from_name: Option<String>,
    pub frontend_url: Option<String>,
    pub workflow_step_delay: Option<Duration>,
}

/// 設定状態のスナップショット
///
/// 埋め込み側アプリケーションが設定画面などで参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigStatus {
    /// すべての資格情報が置き換え済みかどうか
    pub configured:     bool,
    /// 現在のサービス ID
    pub service_id:     String,
    /// 公開鍵が設定済みかどうか（値そのものは出さない）
    pub public_key_set: bool,
    /// マネージャーの役割メールボックス
    pub manager_email:  String,
}
