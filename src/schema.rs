//! 저장된 입력 레코드 로더. 버전을 판별해 구 스키마를 현재 스키마로 옮기고,
//! 빠진 필드는 기본 입력값으로 채운다. 계산 엔진과는 독립적이다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::inputs::{
    FinalPaymentTerms, OptionalMilestone, PaymentSchedule, RoiInputs, MAX_OPTIONAL_MILESTONES,
};

/// 현재 입력 레코드 스키마 버전.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// 입력 레코드 로드/저장 오류.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 파싱 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML 파싱 오류: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("지원하지 않는 스키마 버전: {0}")]
    UnsupportedVersion(u64),
    #[error("입력 레코드는 객체여야 합니다")]
    NotAnObject,
}

/// 로더 결과. 마이그레이션 중 생긴 메모를 함께 돌려준다.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub inputs: RoiInputs,
    /// 읽어 들인 원본 스키마 버전
    pub source_version: u32,
    pub notes: Vec<String>,
}

/// 버전 1 레코드의 평면 마일스톤.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyMilestone {
    #[serde(default)]
    name: String,
    #[serde(default)]
    percentage: f64,
    #[serde(default)]
    month: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord<'a> {
    schema_version: u32,
    #[serde(flatten)]
    inputs: &'a RoiInputs,
}

fn detect_version(obj: &serde_json::Map<String, Value>) -> Result<u32, SchemaError> {
    match obj.get("schemaVersion").and_then(Value::as_u64) {
        Some(1) => Ok(1),
        Some(2) => Ok(2),
        Some(other) => Err(SchemaError::UnsupportedVersion(other)),
        None if obj.contains_key("milestones") => Ok(1),
        None => Ok(CURRENT_SCHEMA_VERSION),
    }
}

/// 평면 마일스톤 목록을 구조화된 지급 일정으로 옮긴다.
///
/// 첫 항목은 계약금, 마지막 항목은 최종 지급(Net 30), 그 앞 항목은 선적 전
/// 지급, 나머지는 선택 마일스톤이 된다. 3개 미만이면 빠진 자리는 기본값을 쓴다.
fn migrate_milestones(legacy: &[LegacyMilestone], notes: &mut Vec<String>) -> PaymentSchedule {
    let mut schedule = PaymentSchedule {
        final_payment_terms: FinalPaymentTerms::Net30,
        ..PaymentSchedule::default()
    };

    let Some((first, rest)) = legacy.split_first() else {
        notes.push("legacy record had no milestones; default payment schedule kept".into());
        return schedule;
    };
    schedule.downpayment_percent = first.percentage;

    let Some((last, middle)) = rest.split_last() else {
        notes.push("legacy record had a single milestone; remaining slots use defaults".into());
        return schedule;
    };
    schedule.final_payment_percent = last.percentage;

    let Some((pre_shipment, optional)) = middle.split_last() else {
        notes.push("legacy record had no pre-shipment milestone; default kept".into());
        return schedule;
    };
    schedule.pre_shipment_percent = pre_shipment.percentage;
    schedule.pre_shipment_month = pre_shipment.month;

    schedule.optional_milestones = optional
        .iter()
        .take(MAX_OPTIONAL_MILESTONES)
        .enumerate()
        .map(|(i, m)| OptionalMilestone {
            id: (i + 1).to_string(),
            name: m.name.clone(),
            percentage: m.percentage,
            month: m.month,
        })
        .collect();
    if optional.len() > MAX_OPTIONAL_MILESTONES {
        notes.push(format!(
            "legacy record had {} intermediate milestones; only the first {MAX_OPTIONAL_MILESTONES} were kept",
            optional.len()
        ));
    }
    schedule
}

/// JSON 값을 입력 레코드로 해석한다. 빠진 필드는 기본 입력값으로 채운다.
pub fn decode_inputs(value: Value) -> Result<LoadedInputs, SchemaError> {
    let Value::Object(mut obj) = value else {
        return Err(SchemaError::NotAnObject);
    };
    let source_version = detect_version(&obj)?;
    obj.remove("schemaVersion");

    let mut notes = Vec::new();
    let legacy = if source_version == 1 {
        obj.remove("milestones")
    } else {
        None
    };
    if source_version == 1 {
        // 구 레코드의 지급 일정은 마일스톤 목록에서 다시 만든다
        obj.remove("paymentSchedule");
    }

    let mut inputs: RoiInputs = serde_json::from_value(Value::Object(obj))?;

    if let Some(raw) = legacy {
        let milestones: Vec<LegacyMilestone> = serde_json::from_value(raw)?;
        inputs.payment_schedule = migrate_milestones(&milestones, &mut notes);
        info!(
            milestones = milestones.len(),
            "migrated legacy input record to schema v{CURRENT_SCHEMA_VERSION}"
        );
    }

    Ok(LoadedInputs {
        inputs,
        source_version,
        notes,
    })
}

/// 파일에서 입력 레코드를 읽는다. `.toml` 확장자는 TOML, 그 외는 JSON으로 본다.
pub fn load_inputs(path: &Path) -> Result<LoadedInputs, SchemaError> {
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    let value = if is_toml {
        let table: toml::Value = toml::from_str(&content)?;
        serde_json::to_value(table)?
    } else {
        serde_json::from_str(&content)?
    };
    decode_inputs(value)
}

/// 파일이 있으면 읽고, 없으면 기본 입력값을 돌려준다.
pub fn load_or_default(path: &Path) -> Result<LoadedInputs, SchemaError> {
    if path.exists() {
        load_inputs(path)
    } else {
        Ok(LoadedInputs {
            inputs: RoiInputs::default(),
            source_version: CURRENT_SCHEMA_VERSION,
            notes: Vec::new(),
        })
    }
}

/// 현재 스키마 버전을 붙여 JSON으로 저장한다.
pub fn save_inputs(path: &Path, inputs: &RoiInputs) -> Result<(), SchemaError> {
    let record = StoredRecord {
        schema_version: CURRENT_SCHEMA_VERSION,
        inputs,
    };
    let content = serde_json::to_string_pretty(&record)?;
    fs::write(path, content)?;
    Ok(())
}
