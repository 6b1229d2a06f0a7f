//! # TireFlow ドメイン層
//!
//! タイヤ交換申請の承認通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは I/O を一切持たない純粋なモデル層として、以下を提供する:
//!
//! - **申請レコード**: 埋め込み側アプリケーションから渡される読み取り専用の
//!   フラットレコード（[`request::TireRequest`]）
//! - **承認ステージ**: 4 段階承認フローの各段階（[`stage::ApprovalStage`]）
//! - **エラー型**: 配信境界・通知操作のエラー分類（[`notification`]）
//! - **時刻プロバイダ**: テストで固定時刻を注入するための抽象化（[`clock`]）
//!
//! ## 依存関係の方向
//!
//! ```text
//! notify → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（HTTP、外部サービス）には一切依存しない。

pub mod clock;
pub mod notification;
pub mod request;
pub mod stage;

pub use notification::NotifyError;
