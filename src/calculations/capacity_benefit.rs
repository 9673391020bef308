use serde::Serialize;

use crate::inputs::RoiInputs;

/// 생산능력 증대 효과 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityBenefitResult {
    /// 시간당 생산량 변화 [units/h] (음수 가능)
    pub delta_units_per_hour: f64,
    pub operating_hours_per_year: f64,
    pub incremental_units_per_year: f64,
    /// 연간 공헌이익 증가분 [$/년]
    pub annual_benefit: f64,
    pub monthly_benefit: f64,
}

/// 처리량 증가분에 단위당 공헌이익을 곱해 월간 효과를 계산한다.
pub fn compute(inputs: &RoiInputs) -> CapacityBenefitResult {
    let delta_units_per_hour = inputs.proposed_units_per_hour - inputs.baseline_units_per_hour;
    let operating_hours_per_year = inputs.operating_hours_per_year();
    let incremental_units_per_year = delta_units_per_hour * operating_hours_per_year;
    let annual_benefit = incremental_units_per_year * inputs.contribution_margin_per_unit;
    CapacityBenefitResult {
        delta_units_per_hour,
        operating_hours_per_year,
        incremental_units_per_year,
        annual_benefit,
        monthly_benefit: annual_benefit / 12.0,
    }
}
