use serde::Serialize;

/// 대화형 화면에서 허용하는 최대 지연 개월 수.
pub const MAX_DELAY_MONTHS: u32 = 18;

/// 프로젝트 지연에 따른 기회비용.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCostResult {
    pub delay_months: u32,
    pub monthly_operating_margin: f64,
    /// 지연 개월 × 월간 운영 마진
    pub lost_revenue: f64,
}

/// 지연된 개월 동안 얻지 못한 운영 마진을 계산한다.
pub fn opportunity_cost(monthly_operating_margin: f64, delay_months: u32) -> OpportunityCostResult {
    OpportunityCostResult {
        delay_months,
        monthly_operating_margin,
        lost_revenue: f64::from(delay_months) * monthly_operating_margin,
    }
}
