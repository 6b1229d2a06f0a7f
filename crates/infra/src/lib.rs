//! # TireFlow インフラ層
//!
//! 外部の配信サービスとの通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **配信境界の抽象化**: [`delivery::DeliverySender`] trait で
//!   `init(public_key)` / `send(service_id, template_id, payload)` を抽象化
//! - **EmailJS REST 実装**: ブラウザ常駐ウィジェットの代わりに
//!   EmailJS の REST API をサーバーサイドから直接呼び出す
//! - **Noop 実装**: 通知無効化時・開発時のログ出力のみの実装
//! - **Mock 実装**: `test-utils` feature 有効時にテストダブルを提供
//!
//! ## 依存関係
//!
//! ```text
//! notify → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。ドメイン層はインフラ層に依存しない。

pub mod delivery;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use delivery::{DeliverySender, EmailJsSender, NoopDeliverySender};
