use serde::Serialize;
use tracing::debug;

use super::capacity_benefit::{self, CapacityBenefitResult};
use super::cashflow::{self, MonthlyCashflow, ANALYSIS_HORIZON_MONTHS};
use super::labor_savings::{self, LaborSavingsResult};
use crate::inputs::RoiInputs;

/// 커미셔닝 이후 회수 기준 개월 수.
pub const PAYBACK_THRESHOLD_MONTHS: f64 = 24.0;

/// 24개월 이내 회수 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaybackStatus {
    Yes,
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl PaybackStatus {
    fn from_months_after_commissioning(months: Option<f64>) -> Self {
        match months {
            None => PaybackStatus::NotApplicable,
            Some(m) if m <= PAYBACK_THRESHOLD_MONTHS => PaybackStatus::Yes,
            Some(_) => PaybackStatus::No,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackStatus::Yes => "Yes",
            PaybackStatus::No => "No",
            PaybackStatus::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for PaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 차트용 누적 시계열 한 점.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub month: u32,
    pub cumulative_costs: f64,
    pub cumulative_benefits: f64,
    pub cumulative_net: f64,
}

impl From<&MonthlyCashflow> for ChartDataPoint {
    fn from(cf: &MonthlyCashflow) -> Self {
        Self {
            month: cf.month,
            cumulative_costs: cf.cumulative_costs,
            cumulative_benefits: cf.cumulative_benefits,
            cumulative_net: cf.cumulative_net,
        }
    }
}

/// ROI 계산 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiOutputs {
    /// 누적 순편익이 처음 0 이상이 되는 프로젝트 월
    pub break_even_project_month: Option<u32>,
    /// 커미셔닝 기준 손익분기 월 (음수 가능)
    pub break_even_after_commissioning: Option<f64>,
    pub payback_within_24_months: PaybackStatus,

    pub monthly_labor_savings: f64,
    pub monthly_capacity_benefit: f64,
    pub monthly_operating_margin: f64,

    pub total_installed_cost: f64,
    pub operating_hours_per_year: f64,
    pub npv_at_60_months: f64,

    pub chart_data: Vec<ChartDataPoint>,
    pub cashflows: Vec<MonthlyCashflow>,
}

/// 누적 순편익(할인 미적용)이 처음 0 이상이 되는 월을 찾는다.
pub fn find_break_even(cashflows: &[MonthlyCashflow]) -> Option<u32> {
    cashflows
        .iter()
        .find(|cf| cf.cumulative_net >= 0.0)
        .map(|cf| cf.month)
}

/// 입력 레코드로부터 ROI 결과 전체를 계산한다. 순수 함수이며 실패하지 않는다.
pub fn calculate_roi(inputs: &RoiInputs) -> RoiOutputs {
    let labor: LaborSavingsResult = labor_savings::compute(inputs);
    let capacity: CapacityBenefitResult = capacity_benefit::compute(inputs);
    debug!(
        monthly_labor = labor.monthly_savings,
        monthly_capacity = capacity.monthly_benefit,
        "recurring benefits computed"
    );

    let cashflows = cashflow::generate(inputs, &labor, &capacity);

    let break_even_project_month = find_break_even(&cashflows);
    let break_even_after_commissioning =
        break_even_project_month.map(|m| f64::from(m) - inputs.commissioning_month);
    let payback_within_24_months =
        PaybackStatus::from_months_after_commissioning(break_even_after_commissioning);

    let npv_at_60_months = cashflows
        .get(ANALYSIS_HORIZON_MONTHS as usize)
        .map_or(0.0, |cf| cf.cumulative_discounted_cash_flow);
    debug!(
        break_even = ?break_even_project_month,
        npv = npv_at_60_months,
        "cashflow aggregated"
    );

    let chart_data = cashflows.iter().map(ChartDataPoint::from).collect();

    RoiOutputs {
        break_even_project_month,
        break_even_after_commissioning,
        payback_within_24_months,
        monthly_labor_savings: labor.monthly_savings,
        monthly_capacity_benefit: capacity.monthly_benefit,
        monthly_operating_margin: labor.monthly_savings + capacity.monthly_benefit,
        total_installed_cost: inputs.equipment_cost + inputs.installation_cost,
        operating_hours_per_year: capacity.operating_hours_per_year,
        npv_at_60_months,
        chart_data,
        cashflows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payback_classification() {
        assert_eq!(
            PaybackStatus::from_months_after_commissioning(None),
            PaybackStatus::NotApplicable
        );
        assert_eq!(
            PaybackStatus::from_months_after_commissioning(Some(24.0)),
            PaybackStatus::Yes
        );
        assert_eq!(
            PaybackStatus::from_months_after_commissioning(Some(-3.0)),
            PaybackStatus::Yes
        );
        assert_eq!(
            PaybackStatus::from_months_after_commissioning(Some(25.0)),
            PaybackStatus::No
        );
    }

    #[test]
    fn payback_serializes_as_spreadsheet_labels() {
        let json = serde_json::to_string(&PaybackStatus::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
    }

    #[test]
    fn exported_keys_are_camel_case() {
        let value = serde_json::to_value(calculate_roi(&RoiInputs::default())).unwrap();
        assert!(value.get("paybackWithin24Months").is_some());
        assert!(value.get("npvAt60Months").is_some());
        assert!(value.get("breakEvenProjectMonth").is_some());
    }
}
