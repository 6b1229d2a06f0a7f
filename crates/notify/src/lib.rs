//! # TireFlow 通知クライアント
//!
//! タイヤ交換申請の 4 段階承認フロー（マネージャー → TTO → エンジニア →
//! 申請者本人）の各ステージで、外部配信サービス経由の通知を 1 件ずつ送信する。
//!
//! ## モジュール構成
//!
//! - [`config`] - EmailJS 資格情報・役割メールボックス・部分更新
//! - [`payload`] - ステージメタデータによるテンプレートパラメータ構築
//! - [`service`] - 通知クライアント本体とワークフローテスト
//!
//! ## 使用例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tireflow_domain::request::TireRequest;
//! use tireflow_infra::EmailJsSender;
//! use tireflow_notify::{NotifyConfig, NotifyConfigPatch, TireNotifier};
//!
//! # async fn example() {
//! let config = NotifyConfig {
//!     service_id: "service_abc123".to_string(),
//!     public_key: "pk_live_123".to_string(),
//!     ..NotifyConfig::default()
//! };
//! let notifier = TireNotifier::new(config, Arc::new(EmailJsSender::new())).await;
//!
//! let request = TireRequest {
//!     id: Some("R1".to_string()),
//!     vehicle_no: Some("AB-1234".to_string()),
//!     ..TireRequest::default()
//! };
//! if let Err(e) = notifier.notify_manager(&request).await {
//!     eprintln!("通知失敗: {e}");
//! }
//! # }
//! ```

pub mod config;
pub mod payload;
pub mod service;

pub use config::{ConfigStatus, NotifyConfig, NotifyConfigPatch, StageTemplates};
pub use service::{TireNotifier, WorkflowTestReport};
