//! 입력 레코드 로더: 기본값 보충, 구 스키마 변환, 파일 형식별 로드.
use std::fs;

use capex_roi::inputs::{FinalPaymentTerms, RoiInputs};
use capex_roi::schema::{self, SchemaError, CURRENT_SCHEMA_VERSION};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn legacy_milestone_list_is_migrated() {
    let legacy = json!({
        "equipmentCost": 900000,
        "milestones": [
            { "name": "Downpayment", "percentage": 0.3, "month": 0 },
            { "name": "Drawings", "percentage": 0.2, "month": 2 },
            { "name": "Progress", "percentage": 0.2, "month": 4 },
            { "name": "Pre-shipment", "percentage": 0.2, "month": 6 },
            { "name": "Final", "percentage": 0.1, "month": 9 }
        ]
    });
    let loaded = schema::decode_inputs(legacy).unwrap();
    assert_eq!(loaded.source_version, 1);
    let schedule = &loaded.inputs.payment_schedule;
    assert_eq!(schedule.downpayment_percent, 0.3);
    assert_eq!(schedule.optional_milestones.len(), 2);
    assert_eq!(schedule.optional_milestones[0].id, "1");
    assert_eq!(schedule.optional_milestones[1].name, "Progress");
    assert_eq!(schedule.pre_shipment_percent, 0.2);
    assert_eq!(schedule.pre_shipment_month, 6.0);
    assert_eq!(schedule.final_payment_percent, 0.1);
    assert_eq!(schedule.final_payment_terms, FinalPaymentTerms::Net30);
    assert_eq!(loaded.inputs.equipment_cost, 900_000.0);
    assert!(loaded.notes.is_empty());
}

#[test]
fn legacy_record_with_too_many_milestones_keeps_first_four() {
    let milestones: Vec<_> = (0..8)
        .map(|i| json!({ "name": format!("m{i}"), "percentage": 0.125, "month": i }))
        .collect();
    let loaded = schema::decode_inputs(json!({ "schemaVersion": 1, "milestones": milestones }))
        .unwrap();
    let schedule = &loaded.inputs.payment_schedule;
    assert_eq!(schedule.optional_milestones.len(), 4);
    assert_eq!(schedule.optional_milestones[3].name, "m4");
    assert_eq!(schedule.pre_shipment_month, 6.0);
    assert_eq!(loaded.notes.len(), 1);
}

#[test]
fn short_legacy_list_keeps_defaults() {
    let loaded = schema::decode_inputs(json!({
        "milestones": [{ "name": "All", "percentage": 1.0, "month": 0 }]
    }))
    .unwrap();
    let schedule = &loaded.inputs.payment_schedule;
    let defaults = RoiInputs::default().payment_schedule;
    assert_eq!(schedule.downpayment_percent, 1.0);
    assert_eq!(schedule.final_payment_percent, defaults.final_payment_percent);
    assert_eq!(loaded.notes.len(), 1);
}

#[test]
fn invalid_terms_are_rejected() {
    let err = schema::decode_inputs(json!({
        "paymentSchedule": { "finalPaymentTerms": 45 }
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn partial_payment_schedule_is_filled_from_defaults() {
    let loaded = schema::decode_inputs(json!({
        "paymentSchedule": { "downpaymentPercent": 0.5, "finalPaymentTerms": 60 }
    }))
    .unwrap();
    let schedule = &loaded.inputs.payment_schedule;
    assert_eq!(schedule.downpayment_percent, 0.5);
    assert_eq!(schedule.final_payment_terms, FinalPaymentTerms::Net60);
    assert_eq!(schedule.pre_shipment_month, 6.9);
    assert_eq!(schedule.optional_milestones.len(), 2);
}

#[test]
fn save_then_load_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inputs.json");
    let mut inputs = RoiInputs::default();
    inputs.commissioning_month = 10.0;
    inputs.payment_schedule.optional_milestones.clear();

    schema::save_inputs(&path, &inputs).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["schemaVersion"], json!(CURRENT_SCHEMA_VERSION));
    assert_eq!(raw["paymentSchedule"]["finalPaymentTerms"], json!(30));

    let loaded = schema::load_inputs(&path).unwrap();
    assert_eq!(loaded.inputs, inputs);
    assert_eq!(loaded.source_version, CURRENT_SCHEMA_VERSION);
}

#[test]
fn toml_records_are_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inputs.toml");
    fs::write(
        &path,
        r#"
equipmentCost = 750000
annualDiscountRate = 0.08

[paymentSchedule]
downpaymentPercent = 0.5
optionalMilestones = []
preShipmentPercent = 0.4
preShipmentMonth = 5
finalPaymentPercent = 0.1
finalPaymentTerms = 60
"#,
    )
    .unwrap();
    let loaded = schema::load_inputs(&path).unwrap();
    assert_eq!(loaded.inputs.equipment_cost, 750_000.0);
    assert_eq!(loaded.inputs.annual_discount_rate, 0.08);
    assert!(loaded.inputs.payment_schedule.optional_milestones.is_empty());
    assert_eq!(
        loaded.inputs.payment_schedule.final_payment_terms,
        FinalPaymentTerms::Net60
    );
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let loaded = schema::load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded.inputs, RoiInputs::default());
}

#[test]
fn malformed_json_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(schema::load_inputs(&path), Err(SchemaError::Json(_))));
}
