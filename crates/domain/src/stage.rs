//! # 承認ステージ
//!
//! 4 段階承認フローの各段階を定義する。
//!
//! ## ドメイン用語
//!
//! | バリアント | 通知先 | タイミング |
//! |-----------|--------|-----------|
//! | `Manager` | マネージャー | 申請者が新規申請を提出したとき |
//! | `TransportOfficer` | 輸送担当官（TTO） | マネージャーが承認したとき |
//! | `Engineer` | エンジニア | TTO が承認したとき |
//! | `UserFinal` | 申請者本人 | エンジニアが最終承認したとき |
//!
//! ステージ間に状態機械はない。各通知は独立した 1 回きりの送信であり、
//! 順序はワークフローテストの逐次呼び出しでのみ表現される。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// 承認ステージ
///
/// ログフィールドには snake_case 文字列（`manager` など）で出力される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ApprovalStage {
    /// ステージ 1: 新規申請 → マネージャーに送信
    Manager,
    /// ステージ 2: マネージャー承認 → TTO に送信
    TransportOfficer,
    /// ステージ 3: TTO 承認 → エンジニアに送信
    Engineer,
    /// ステージ 4: エンジニア承認 → 申請者本人に送信
    UserFinal,
}

impl ApprovalStage {
    /// 承認フローの正規の順序（manager → TTO → engineer → user-final）
    pub const SEQUENCE: [Self; 4] = [
        Self::Manager,
        Self::TransportOfficer,
        Self::Engineer,
        Self::UserFinal,
    ];

    /// 承認者名を必要とするステージかどうか
    ///
    /// 最初のステージ（Manager）は申請提出そのものの通知なので承認者を持たない。
    /// 以降のステージは「誰が前段を承認したか」をペイロードに含める。
    pub fn requires_approver(self) -> bool {
        !matches!(self, Self::Manager)
    }

    /// 申請者本人宛のステージかどうか
    ///
    /// true の場合、宛先は固定の役割メールボックスではなく
    /// 申請レコードの `email` フィールドから取られる。
    pub fn addresses_requester(self) -> bool {
        matches!(self, Self::UserFinal)
    }
}
