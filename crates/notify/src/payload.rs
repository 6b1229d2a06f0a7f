//! # ペイロード構築
//!
//! 申請レコードとステージメタデータから、配信サービスに渡す
//! フラットなテンプレートパラメータを組み立てる。
//!
//! ## 設計方針
//!
//! - **1 テーブル + 1 関数**: 元実装でステージごとに複製されていた
//!   ペイロード構築を、ステージ別のメタデータ（宛先・件名・リンク・追加
//!   フィールド）で分岐する単一の [`build`] に集約する
//! - **プレースホルダ置換**: 欠損フィールドはキーを欠落させず
//!   センチネル文字列で埋める

use chrono::{DateTime, Utc};
use tireflow_domain::{
    notification::TemplateParams,
    request::TireRequest,
    stage::ApprovalStage,
};

use crate::config::NotifyConfig;

/// 欠損フィールドのセンチネル
pub const MISSING_FIELD: &str = "N/A";
/// コメント欠損時のセンチネル
pub const MISSING_COMMENTS: &str = "No comments";
/// 申請 ID 欠損時のセンチネル
pub const PENDING_REQUEST_ID: &str = "PENDING";
/// 最終ステージの配送目安
pub const ESTIMATED_DELIVERY: &str = "7-10 business days";

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_FIELD)
}

/// ステージごとのダッシュボードパス
fn dashboard_path(stage: ApprovalStage) -> &'static str {
    match stage {
        ApprovalStage::Manager => "/manager",
        ApprovalStage::TransportOfficer => "/tto",
        ApprovalStage::Engineer => "/engineer",
        ApprovalStage::UserFinal => "/orders",
    }
}

/// ステージごとの件名を構築する
pub fn subject(stage: ApprovalStage, request: &TireRequest) -> String {
    let vehicle_no = field(&request.vehicle_no);
    match stage {
        ApprovalStage::Manager => format!("New Tire Request - {vehicle_no}"),
        ApprovalStage::TransportOfficer => {
            format!("Manager Approved - TTO Review Required - {vehicle_no}")
        }
        ApprovalStage::Engineer => {
            format!("TTO Approved - Engineering Review Required - {vehicle_no}")
        }
        ApprovalStage::UserFinal => {
            format!("Tire Request Approved - Order Processing - {vehicle_no}")
        }
    }
}

/// ステージごとの宛先を選択する
///
/// 最終ステージのみ申請レコードの `email` を使い、
/// それ以外は設定の役割メールボックスを使う。
pub fn recipient(stage: ApprovalStage, config: &NotifyConfig, request: &TireRequest) -> String {
    match stage {
        ApprovalStage::Manager => config.manager_email.clone(),
        ApprovalStage::TransportOfficer => config.tto_email.clone(),
        ApprovalStage::Engineer => config.engineer_email.clone(),
        ApprovalStage::UserFinal => field(&request.email).to_string(),
    }
}

/// ステージ通知のテンプレートパラメータを構築する
///
/// # 引数
///
/// - `approved_by`: 前段を承認した担当者の表示名。
///   承認者を必要としないステージ（Manager）では無視される
/// - `now`: 申請日時・承認日時フィールドの元になる現在時刻
pub fn build(
    stage: ApprovalStage,
    config: &NotifyConfig,
    request: &TireRequest,
    approved_by: Option<&str>,
    now: DateTime<Utc>,
) -> TemplateParams {
    let mut params = TemplateParams::new();

    params.insert("to_email", recipient(stage, config, request));
    params.insert("from_name", &config.from_name);
    params.insert("subject", subject(stage, request));

    params.insert("vehicle_no", field(&request.vehicle_no));
    params.insert("user_section", field(&request.user_section));
    params.insert("tire_size", field(&request.tire_size));
    params.insert("existing_make", field(&request.existing_make));
    params.insert("no_of_tires", field(&request.no_of_tires));
    params.insert("cost_center", field(&request.cost_center));
    params.insert("officer_service_no", field(&request.officer_service_no));
    params.insert("email", field(&request.email));
    params.insert(
        "comments",
        request.comments.as_deref().unwrap_or(MISSING_COMMENTS),
    );

    params.insert(
        "request_id",
        request.id.as_deref().unwrap_or(PENDING_REQUEST_ID),
    );
    params.insert("request_date", now.format("%Y-%m-%d").to_string());
    params.insert("request_time", now.format("%H:%M:%S").to_string());
    params.insert(
        "dashboard_link",
        format!("{}{}", config.frontend_url, dashboard_path(stage)),
    );

    if stage.requires_approver() {
        params.insert("approved_by", approved_by.unwrap_or(MISSING_FIELD));
        params.insert("approval_date", now.format("%Y-%m-%d").to_string());
    }
    if stage.addresses_requester() {
        params.insert("estimated_delivery", ESTIMATED_DELIVERY);
    }

    params
}

/// 接続テスト用の固定値ペイロードを構築する
///
/// 設定の検証が目的なので、申請レコードではなくサンプル値を使う。
pub fn connection_test(config: &NotifyConfig, now: DateTime<Utc>) -> TemplateParams {
    let mut params = TemplateParams::new();

    params.insert("to_email", &config.manager_email);
    params.insert("from_name", format!("{} - Test", config.from_name));
    params.insert("subject", "EmailJS Connection Test");
    params.insert("vehicle_no", "TEST-VEHICLE-001");
    params.insert("user_section", "IT Department");
    params.insert("tire_size", "205/55R16");
    params.insert("request_id", format!("TEST-{}", now.timestamp_millis()));
    params.insert("request_date", now.format("%Y-%m-%d").to_string());
    params.insert("request_time", now.format("%H:%M:%S").to_string());
    params.insert(
        "dashboard_link",
        format!("{}/manager", config.frontend_url),
    );
    params.insert(
        "comments",
        "This is a test message to verify the delivery configuration is working properly.",
    );

    params
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tireflow_domain::clock::{Clock, FixedClock};

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        FixedClock::parse("2025-06-01T09:30:15Z").now()
    }

    fn full_request() -> TireRequest {
        TireRequest {
            id:                 Some("R1".to_string()),
            vehicle_no:         Some("AB-1234".to_string()),
            user_section:       Some("IT".to_string()),
            tire_size:          Some("205/55R16".to_string()),
            existing_make:      Some("Michelin".to_string()),
            no_of_tires:        Some("4".to_string()),
            cost_center:        Some("CC-778".to_string()),
            officer_service_no: Some("SVC-0042".to_string()),
            email:              Some("user@example.com".to_string()),
            comments:           Some("前輪のみ摩耗".to_string()),
        }
    }

    #[test]
    fn 全フィールドが揃った申請のペイロードを構築できる() {
        let config = NotifyConfig::default();
        let params = build(
            ApprovalStage::Manager,
            &config,
            &full_request(),
            None,
            fixed_now(),
        );

        assert_eq!(params.get("to_email"), Some("slthrmanager@gmail.com"));
        assert_eq!(params.get("from_name"), Some("Tire Management System"));
        assert_eq!(params.get("subject"), Some("New Tire Request - AB-1234"));
        assert_eq!(params.get("vehicle_no"), Some("AB-1234"));
        assert_eq!(params.get("user_section"), Some("IT"));
        assert_eq!(params.get("tire_size"), Some("205/55R16"));
        assert_eq!(params.get("existing_make"), Some("Michelin"));
        assert_eq!(params.get("no_of_tires"), Some("4"));
        assert_eq!(params.get("cost_center"), Some("CC-778"));
        assert_eq!(params.get("officer_service_no"), Some("SVC-0042"));
        assert_eq!(params.get("email"), Some("user@example.com"));
        assert_eq!(params.get("comments"), Some("前輪のみ摩耗"));
        assert_eq!(params.get("request_id"), Some("R1"));
        assert_eq!(params.get("request_date"), Some("2025-06-01"));
        assert_eq!(params.get("request_time"), Some("09:30:15"));
        assert_eq!(
            params.get("dashboard_link"),
            Some("https://tire-slt.vercel.app/manager")
        );
        // Manager ステージは承認者フィールドを持たない
        assert!(!params.contains("approved_by"));
        assert!(!params.contains("estimated_delivery"));
    }

    #[test]
    fn 欠損フィールドはプレースホルダに置換される() {
        let config = NotifyConfig::default();
        let params = build(
            ApprovalStage::Manager,
            &config,
            &TireRequest::default(),
            None,
            fixed_now(),
        );

        assert_eq!(params.get("vehicle_no"), Some(MISSING_FIELD));
        assert_eq!(params.get("cost_center"), Some(MISSING_FIELD));
        assert_eq!(params.get("comments"), Some(MISSING_COMMENTS));
        assert_eq!(params.get("request_id"), Some(PENDING_REQUEST_ID));
        assert_eq!(params.get("subject"), Some("New Tire Request - N/A"));
    }

    #[rstest]
    #[case(ApprovalStage::TransportOfficer)]
    #[case(ApprovalStage::Engineer)]
    #[case(ApprovalStage::UserFinal)]
    fn 後続ステージは承認者と承認日を含む(#[case] stage: ApprovalStage) {
        let config = NotifyConfig::default();
        let params = build(stage, &config, &full_request(), Some("佐藤部長"), fixed_now());

        assert_eq!(params.get("approved_by"), Some("佐藤部長"));
        assert_eq!(params.get("approval_date"), Some("2025-06-01"));
    }

    #[test]
    fn 最終ステージのみ配送目安を含む() {
        let config = NotifyConfig::default();
        let request = full_request();

        let final_params = build(
            ApprovalStage::UserFinal,
            &config,
            &request,
            Some("山田"),
            fixed_now(),
        );
        assert_eq!(
            final_params.get("estimated_delivery"),
            Some(ESTIMATED_DELIVERY)
        );

        let engineer_params = build(
            ApprovalStage::Engineer,
            &config,
            &request,
            Some("山田"),
            fixed_now(),
        );
        assert!(!engineer_params.contains("estimated_delivery"));
    }

    #[rstest]
    #[case(ApprovalStage::Manager, "slthrmanager@gmail.com", "/manager")]
    #[case(ApprovalStage::TransportOfficer, "tto@slt.lk", "/tto")]
    #[case(ApprovalStage::Engineer, "engineer@slt.lk", "/engineer")]
    #[case(ApprovalStage::UserFinal, "user@example.com", "/orders")]
    fn 宛先とダッシュボードリンクはステージごとに選択される(
        #[case] stage: ApprovalStage,
        #[case] expected_to: &str,
        #[case] expected_path: &str,
    ) {
        let config = NotifyConfig::default();
        let request = full_request();

        assert_eq!(recipient(stage, &config, &request), expected_to);

        let params = build(stage, &config, &request, Some("山田"), fixed_now());
        assert_eq!(
            params.get("dashboard_link"),
            Some(format!("https://tire-slt.vercel.app{expected_path}").as_str())
        );
    }

    #[test]
    fn 申請者メール欠損時の最終ステージ宛先はプレースホルダになる() {
        let config = NotifyConfig::default();
        let request = TireRequest::default();

        assert_eq!(
            recipient(ApprovalStage::UserFinal, &config, &request),
            MISSING_FIELD
        );
    }

    #[test]
    fn 接続テストペイロードは固定サンプル値を持つ() {
        let config = NotifyConfig::default();
        let params = connection_test(&config, fixed_now());

        assert_eq!(params.get("to_email"), Some("slthrmanager@gmail.com"));
        assert_eq!(
            params.get("from_name"),
            Some("Tire Management System - Test")
        );
        assert_eq!(params.get("vehicle_no"), Some("TEST-VEHICLE-001"));
        assert_eq!(params.get("tire_size"), Some("205/55R16"));
        assert!(params.get("request_id").unwrap().starts_with("TEST-"));
    }
}
