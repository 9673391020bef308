use serde::{Deserialize, Serialize};

/// 선택 마일스톤 최대 개수 (계약금과 선적 전 지급 사이).
pub const MAX_OPTIONAL_MILESTONES: usize = 4;

/// 계약금과 선적 전 지급 사이에 추가되는 선택 마일스톤.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalMilestone {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// 장비비 대비 비율(0~1, 0.2면 20%)
    pub percentage: f64,
    /// 지급 월 (소수 허용)
    pub month: f64,
}

/// 최종 지급 조건(커미셔닝 이후 Net 30/60일).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FinalPaymentTerms {
    #[default]
    Net30,
    Net60,
}

impl FinalPaymentTerms {
    pub fn days(self) -> u32 {
        match self {
            FinalPaymentTerms::Net30 => 30,
            FinalPaymentTerms::Net60 => 60,
        }
    }

    /// 커미셔닝 월에 더해지는 개월 수 (일수 / 30).
    pub fn offset_months(self) -> f64 {
        f64::from(self.days()) / 30.0
    }
}

impl TryFrom<u32> for FinalPaymentTerms {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(FinalPaymentTerms::Net30),
            60 => Ok(FinalPaymentTerms::Net60),
            other => Err(format!("지급 조건은 30 또는 60일이어야 합니다: {other}")),
        }
    }
}

impl From<FinalPaymentTerms> for u32 {
    fn from(value: FinalPaymentTerms) -> Self {
        value.days()
    }
}

/// 장비 대금 지급 일정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSchedule {
    /// 계약금 비율 (0개월 고정)
    pub downpayment_percent: f64,
    pub optional_milestones: Vec<OptionalMilestone>,
    pub pre_shipment_percent: f64,
    pub pre_shipment_month: f64,
    pub final_payment_percent: f64,
    pub final_payment_terms: FinalPaymentTerms,
}

impl PaymentSchedule {
    /// 모든 지급 비율의 합. 1.0이 정상이지만 계산 엔진은 강제하지 않는다.
    pub fn total_percent(&self) -> f64 {
        self.downpayment_percent
            + self
                .optional_milestones
                .iter()
                .map(|m| m.percentage)
                .sum::<f64>()
            + self.pre_shipment_percent
            + self.final_payment_percent
    }
}

impl Default for PaymentSchedule {
    fn default() -> Self {
        Self {
            downpayment_percent: 0.40,
            optional_milestones: vec![
                OptionalMilestone {
                    id: "1".into(),
                    name: "Engineered Drawings Approved".into(),
                    percentage: 0.20,
                    month: 2.8,
                },
                OptionalMilestone {
                    id: "2".into(),
                    name: "Progress Milestone (24 weeks)".into(),
                    percentage: 0.15,
                    month: 5.5,
                },
            ],
            pre_shipment_percent: 0.15,
            pre_shipment_month: 6.9,
            final_payment_percent: 0.10,
            final_payment_terms: FinalPaymentTerms::Net30,
        }
    }
}

/// ROI 계산 입력 레코드. 계산 호출마다 불변으로 취급한다.
///
/// 월 단위 필드는 모두 `f64`이며 소수 월도 표현할 수 있다. 다만 설치비와
/// 일회성 손실은 정수 월과 정확히 일치할 때만 반영된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoiInputs {
    // CAPEX
    pub equipment_cost: f64,
    pub installation_cost: f64,
    pub payment_schedule: PaymentSchedule,

    // 운전 프로파일
    pub shifts_per_day: f64,
    pub hours_per_shift: f64,
    pub operating_days_per_year: f64,

    // 인건비 절감
    /// 부대비용 적용 전 시급
    pub base_wage: f64,
    /// 복리후생/세금 할증 배수 (기본 1.35)
    pub burden_multiplier: f64,
    /// 교대당 감축 인원
    pub labor_units_reduced: f64,

    // 생산능력 증대
    pub baseline_units_per_hour: f64,
    pub proposed_units_per_hour: f64,
    pub contribution_margin_per_unit: f64,

    // 일정
    pub commissioning_month: f64,
    pub installation_month: f64,
    pub lost_production_cost: f64,
    pub lost_production_month: f64,

    /// 연 할인율 (NPV 참고용)
    pub annual_discount_rate: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            equipment_cost: 1_139_475.0,
            installation_cost: 76_200.0,
            payment_schedule: PaymentSchedule::default(),
            shifts_per_day: 3.0,
            hours_per_shift: 8.0,
            operating_days_per_year: 320.0,
            // BLS 식품 제조업(NAICS 311) 평균 시급
            base_wage: 22.48,
            burden_multiplier: 1.35,
            labor_units_reduced: 2.0,
            baseline_units_per_hour: 1600.0,
            proposed_units_per_hour: 1650.0,
            contribution_margin_per_unit: 1.75,
            commissioning_month: 8.0,
            installation_month: 8.0,
            lost_production_cost: 34_000.0,
            lost_production_month: 8.0,
            annual_discount_rate: 0.12,
        }
    }
}

impl RoiInputs {
    /// 연간 운전 시간 = 교대수 × 교대시간 × 연간 가동일.
    pub fn operating_hours_per_year(&self) -> f64 {
        self.shifts_per_day * self.hours_per_shift * self.operating_days_per_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_sums_to_one() {
        let total = PaymentSchedule::default().total_percent();
        assert!((total - 1.0).abs() < 1e-12, "total={total}");
    }

    #[test]
    fn terms_reject_unknown_days() {
        assert_eq!(FinalPaymentTerms::try_from(60), Ok(FinalPaymentTerms::Net60));
        assert!(FinalPaymentTerms::try_from(45).is_err());
        assert_eq!(FinalPaymentTerms::Net60.offset_months(), 2.0);
    }
}
