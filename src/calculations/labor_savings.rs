use serde::Serialize;

use crate::inputs::RoiInputs;

/// 인건비 절감 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborSavingsResult {
    /// 연간 절감 시간 [h/년]
    pub annual_hours_saved: f64,
    /// 부대비용 포함 시급 [$/h]
    pub burdened_rate: f64,
    /// 연간 절감액 [$/년]
    pub annual_savings: f64,
    /// 월간 절감액 [$/월]
    pub monthly_savings: f64,
}

/// 감축 인원과 운전 프로파일로 인건비 절감액을 계산한다.
///
/// 음수 감축 인원도 그대로 계산되어 음의 절감액이 된다.
pub fn compute(inputs: &RoiInputs) -> LaborSavingsResult {
    let annual_hours_saved = inputs.labor_units_reduced
        * inputs.shifts_per_day
        * inputs.hours_per_shift
        * inputs.operating_days_per_year;
    let burdened_rate = inputs.base_wage * inputs.burden_multiplier;
    let annual_savings = annual_hours_saved * burdened_rate;
    LaborSavingsResult {
        annual_hours_saved,
        burdened_rate,
        annual_savings,
        monthly_savings: annual_savings / 12.0,
    }
}
