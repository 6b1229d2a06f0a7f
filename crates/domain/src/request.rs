//! # タイヤ交換申請レコード
//!
//! 埋め込み側アプリケーションから渡される申請データ。
//! このコンポーネントからは読み取り専用で、変更も永続化もしない。
//!
//! ## 設計方針
//!
//! - **全フィールド Option**: 欠損フィールドはペイロード構築時に
//!   プレースホルダへ置換される（このレコード自体は欠損を保持する）
//! - **camelCase マッピング**: フロントエンドの JSON 表現をそのまま受け取る

use serde::{Deserialize, Serialize};

/// タイヤ交換申請レコード
///
/// 外部から供給されるフラットレコード。欠損フィールドの補完は
/// ペイロード構築側の責務であり、ここでは `None` のまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TireRequest {
    /// 申請 ID
    pub id:                 Option<String>,
    /// 車両番号
    pub vehicle_no:         Option<String>,
    /// 申請者の所属部門
    pub user_section:       Option<String>,
    /// タイヤサイズ（例: "205/55R16"）
    pub tire_size:          Option<String>,
    /// 現在装着しているタイヤのメーカー
    pub existing_make:      Option<String>,
    /// 交換本数
    pub no_of_tires:        Option<String>,
    /// コストセンター
    pub cost_center:        Option<String>,
    /// 担当者のサービス番号
    pub officer_service_no: Option<String>,
    /// 申請者のメールアドレス（最終ステージの宛先）
    pub email:              Option<String>,
    /// 自由記述コメント
    pub comments:           Option<String>,
}
