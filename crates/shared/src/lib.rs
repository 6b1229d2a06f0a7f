//! # TireFlow 共有ユーティリティ
//!
//! クレート横断で使用する構造化ログのヘルパーを提供する。
//!
//! - [`event_log`] - ビジネスイベントログのマクロとフィールド定数

pub mod event_log;
