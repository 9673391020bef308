use serde::Serialize;

use super::capacity_benefit::CapacityBenefitResult;
use super::labor_savings::LaborSavingsResult;
use super::payment_schedule::{self, PaymentEvent};
use crate::inputs::RoiInputs;

/// 분석 기간 마지막 월. 0~60개월(61행)로 고정.
pub const ANALYSIS_HORIZON_MONTHS: u32 = 60;

/// 월별 현금흐름 한 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCashflow {
    pub month: u32,
    pub capex_out: f64,
    pub labor_savings: f64,
    pub capacity_benefit: f64,
    pub total_benefit: f64,
    pub one_time_loss: f64,
    /// CAPEX + 일회성 손실
    pub investment_out: f64,
    pub net_cash_flow: f64,
    pub discount_factor: f64,
    pub discounted_cash_flow: f64,
    pub cumulative_discounted_cash_flow: f64,
    pub cumulative_costs: f64,
    pub cumulative_benefits: f64,
    /// 누적 편익 - 누적 비용 (할인 미적용)
    pub cumulative_net: f64,
}

/// 지급 월을 정수 월로 반올림한다. 0.5는 항상 위쪽(+∞ 방향)으로 올리므로
/// 2.5는 3, -0.5는 0이 된다.
fn disbursement_month(month: f64) -> f64 {
    (month + 0.5).floor()
}

/// 해당 월의 CAPEX 지출. 마일스톤 월은 반올림 후 비교하므로 2.8개월 지급은
/// 3개월에 전액 반영된다. 설치비는 설치 월과 정확히 같을 때만 더한다.
fn capex_out(inputs: &RoiInputs, events: &[PaymentEvent], month: u32) -> f64 {
    let m = f64::from(month);
    let milestones: f64 = events
        .iter()
        .filter(|e| disbursement_month(e.month) == m)
        .map(|e| inputs.equipment_cost * e.percentage)
        .sum();
    if m == inputs.installation_month {
        milestones + inputs.installation_cost
    } else {
        milestones
    }
}

/// 연 할인율을 월 인덱스에 그대로 지수로 적용한다 (월 실효이율로 환산하지 않음).
pub fn discount_factor(annual_rate: f64, month: u32) -> f64 {
    1.0 / (1.0 + annual_rate).powf(f64::from(month))
}

/// 0~60개월 월별 현금흐름을 생성한다.
pub fn generate(
    inputs: &RoiInputs,
    labor: &LaborSavingsResult,
    capacity: &CapacityBenefitResult,
) -> Vec<MonthlyCashflow> {
    let events = payment_schedule::expand(&inputs.payment_schedule, inputs.commissioning_month);
    let mut rows = Vec::with_capacity(ANALYSIS_HORIZON_MONTHS as usize + 1);

    let mut cumulative_costs = 0.0;
    let mut cumulative_benefits = 0.0;
    let mut cumulative_discounted_cash_flow = 0.0;

    for month in 0..=ANALYSIS_HORIZON_MONTHS {
        let m = f64::from(month);
        let capex_out = capex_out(inputs, &events, month);

        // 편익은 커미셔닝 월부터 발생
        let commissioned = m >= inputs.commissioning_month;
        let labor_savings = if commissioned { labor.monthly_savings } else { 0.0 };
        let capacity_benefit = if commissioned {
            capacity.monthly_benefit
        } else {
            0.0
        };
        let total_benefit = labor_savings + capacity_benefit;

        let one_time_loss = if m == inputs.lost_production_month {
            inputs.lost_production_cost
        } else {
            0.0
        };

        let investment_out = capex_out + one_time_loss;
        let net_cash_flow = total_benefit - investment_out;
        let discount_factor = discount_factor(inputs.annual_discount_rate, month);
        let discounted_cash_flow = net_cash_flow * discount_factor;

        cumulative_discounted_cash_flow += discounted_cash_flow;
        cumulative_costs += investment_out;
        cumulative_benefits += total_benefit;

        rows.push(MonthlyCashflow {
            month,
            capex_out,
            labor_savings,
            capacity_benefit,
            total_benefit,
            one_time_loss,
            investment_out,
            net_cash_flow,
            discount_factor,
            discounted_cash_flow,
            cumulative_discounted_cash_flow,
            cumulative_costs,
            cumulative_benefits,
            cumulative_net: cumulative_benefits - cumulative_costs,
        });
    }

    rows
}
