//! # 通知クライアント
//!
//! 4 段階承認フローの各ステージで 1 回ずつ外部配信サービスを呼び出す。
//!
//! ## 設計方針
//!
//! - **fire-once**: リトライ・バックオフ・冪等性キーは持たない。
//!   1 回の失敗はその呼び出しで確定する
//! - **panic させない**: すべての失敗は型付きの [`NotifyError`] として返し、
//!   呼び出し側がユーザー向けメッセージを決められるようにする
//! - **依存性注入**: 配信機構（[`DeliverySender`]）と時刻（[`Clock`]）は
//!   コンストラクタで注入し、テストダブルに差し替え可能にする
//! - **逐次実行のみ**: ワークフローテストは固定待機を挟んだ逐次 await で、
//!   ステージ間に並行性もキャンセルもない

use std::sync::Arc;

use tireflow_domain::{
    clock::{Clock, SystemClock},
    notification::{NotifyError, TemplateParams},
    request::TireRequest,
    stage::ApprovalStage,
};
use tireflow_infra::delivery::DeliverySender;
use tireflow_shared::{event_log::event, log_business_event};

use crate::{
    config::{ConfigStatus, NotifyConfig, NotifyConfigPatch},
    payload,
};

/// 通知クライアント
///
/// 設定と配信機構を保持し、ステージごとの通知操作を公開する。
pub struct TireNotifier {
    config: NotifyConfig,
    sender: Arc<dyn DeliverySender>,
    clock:  Arc<dyn Clock>,
}

impl TireNotifier {
    /// 新しい通知クライアントを作成し、配信機構を初期化する
    pub async fn new(config: NotifyConfig, sender: Arc<dyn DeliverySender>) -> Self {
        Self::with_clock(config, sender, Arc::new(SystemClock)).await
    }

    /// 時刻プロバイダを指定して作成する（テスト用）
    pub async fn with_clock(
        config: NotifyConfig,
        sender: Arc<dyn DeliverySender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notifier = Self {
            config,
            sender,
            clock,
        };
        notifier.initialize().await;
        notifier
    }

    /// 配信機構を公開鍵で初期化する
    ///
    /// 失敗はログに記録するのみで、呼び出し側には伝播しない
    /// （設定エラーは後続の送信時に [`NotifyError`] として現れる）。
    pub async fn initialize(&self) {
        if !self.config.is_configured() {
            tracing::warn!(
                service_id = %self.config.service_id,
                "通知設定にプレースホルダが残っています"
            );
        }

        match self.sender.init(&self.config.public_key).await {
            Ok(()) => tracing::info!("配信機構を初期化"),
            Err(e) => tracing::error!(error = %e, "配信機構の初期化に失敗"),
        }
    }

    /// ステージ 1: 新規申請をマネージャーに通知する
    pub async fn notify_manager(&self, request: &TireRequest) -> Result<(), NotifyError> {
        self.notify_stage(ApprovalStage::Manager, request, None)
            .await
    }

    /// ステージ 2: マネージャー承認を TTO に通知する
    pub async fn notify_tto(
        &self,
        request: &TireRequest,
        approved_by: &str,
    ) -> Result<(), NotifyError> {
        self.notify_stage(ApprovalStage::TransportOfficer, request, Some(approved_by))
            .await
    }

    /// ステージ 3: TTO 承認をエンジニアに通知する
    pub async fn notify_engineer(
        &self,
        request: &TireRequest,
        approved_by: &str,
    ) -> Result<(), NotifyError> {
        self.notify_stage(ApprovalStage::Engineer, request, Some(approved_by))
            .await
    }

    /// ステージ 4: 最終承認を申請者本人に通知する
    pub async fn notify_user_final(
        &self,
        request: &TireRequest,
        approved_by: &str,
    ) -> Result<(), NotifyError> {
        self.notify_stage(ApprovalStage::UserFinal, request, Some(approved_by))
            .await
    }

    /// 固定サンプル値で設定を検証する
    ///
    /// マネージャー用テンプレートでテストメッセージを 1 件送信する。
    /// 成功・失敗の契約はステージ操作と同じ。
    pub async fn test_connection(&self) -> Result<(), NotifyError> {
        let params = payload::connection_test(&self.config, self.clock.now());
        let template_id = self.config.templates.manager.clone();

        tracing::info!("配信設定の接続テストを実行");
        self.dispatch("connection_test", &template_id, &params)
            .await
    }

    /// 4 ステージを正規の順序で逐次実行する
    ///
    /// ステージ間には `workflow_step_delay` の固定待機を挟む。
    /// 各ステージの結果と全体の成否をレポートとして返す。
    pub async fn test_complete_workflow(
        &self,
        request: &TireRequest,
        approved_by: &str,
    ) -> WorkflowTestReport {
        tracing::info!("ワークフローテストを開始");
        let delay = self.config.workflow_step_delay;

        let manager = self.notify_manager(request).await;
        tokio::time::sleep(delay).await;

        let transport_officer = self.notify_tto(request, approved_by).await;
        tokio::time::sleep(delay).await;

        let engineer = self.notify_engineer(request, approved_by).await;
        tokio::time::sleep(delay).await;

        let user_final = self.notify_user_final(request, approved_by).await;

        let report = WorkflowTestReport {
            manager,
            transport_officer,
            engineer,
            user_final,
        };

        let result_label = if report.overall() {
            event::result::SUCCESS
        } else {
            event::result::FAILURE
        };
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::WORKFLOW_TEST_COMPLETED,
            event.result = result_label,
            "ワークフローテスト完了"
        );

        report
    }

    /// 設定の部分更新を適用し、配信機構を再初期化する
    pub async fn update_config(&mut self, patch: NotifyConfigPatch) {
        self.config.apply(patch);
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::CONFIG_UPDATED,
            event.result = event::result::SUCCESS,
            service_id = %self.config.service_id,
            "通知設定を更新"
        );
        self.initialize().await;
    }

    /// 設定状態の読み取り専用スナップショットを返す
    pub fn status(&self) -> ConfigStatus {
        self.config.status()
    }

    async fn notify_stage(
        &self,
        stage: ApprovalStage,
        request: &TireRequest,
        approved_by: Option<&str>,
    ) -> Result<(), NotifyError> {
        let params = payload::build(stage, &self.config, request, approved_by, self.clock.now());
        let template_id = self.config.templates.for_stage(stage).to_string();
        let stage_label: &'static str = stage.into();

        tracing::info!(
            stage = stage_label,
            request_id = params.get("request_id").unwrap_or_default(),
            to_email = params.get("to_email").unwrap_or_default(),
            "ステージ通知を送信"
        );

        self.dispatch(stage_label, &template_id, &params).await
    }

    /// 送信 1 件を実行し、レスポンスを型付き結果に解釈する
    ///
    /// 成功ステータス → `Ok`、非成功ステータス → `Rejected`、
    /// 呼び出し自体の失敗 → `Network` / `NotConfigured`。
    async fn dispatch(
        &self,
        stage_label: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), NotifyError> {
        let recipient = params.get("to_email").unwrap_or_default();
        let request_id = params.get("request_id").unwrap_or_default();

        let response = match self
            .sender
            .send(&self.config.service_id, template_id, params)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let error: NotifyError = e.into();
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.stage = stage_label,
                    notification.recipient = recipient,
                    notification.request_id = request_id,
                    error = %error,
                    "通知送信が失敗"
                );
                return Err(error);
            }
        };

        if response.is_success() {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.result = event::result::SUCCESS,
                notification.stage = stage_label,
                notification.recipient = recipient,
                notification.request_id = request_id,
                status = response.status,
                "通知送信成功"
            );
            return Ok(());
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_FAILED,
            event.result = event::result::FAILURE,
            notification.stage = stage_label,
            notification.recipient = recipient,
            notification.request_id = request_id,
            status = response.status,
            text = response.text.as_deref().unwrap_or_default(),
            "配信サービスが非成功ステータスを返却"
        );
        Err(NotifyError::Rejected {
            status: response.status,
            text:   response.text,
        })
    }
}

/// ワークフローテストの結果レポート
///
/// 各ステージの型付き結果を保持する。元実装の boolean 契約が必要な
/// 呼び出し側は `is_ok()` / [`overall`](Self::overall) を使う。
#[derive(Debug)]
pub struct WorkflowTestReport {
    pub manager:           Result<(), NotifyError>,
    pub transport_officer: Result<(), NotifyError>,
    pub engineer:          Result<(), NotifyError>,
    pub user_final:        Result<(), NotifyError>,
}

impl WorkflowTestReport {
    /// 4 ステージすべてが成功した場合のみ true
    pub fn overall(&self) -> bool {
        self.manager.is_ok()
            && self.transport_officer.is_ok()
            && self.engineer.is_ok()
            && self.user_final.is_ok()
    }
}
