//! 입력 레코드에 대한 권고 검사. 계산을 막지 않고 경고 목록만 돌려준다.

use crate::calculations::ANALYSIS_HORIZON_MONTHS;
use crate::inputs::{RoiInputs, MAX_OPTIONAL_MILESTONES};

/// 지급 비율 합이 100%인지 판정할 때의 허용 오차.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.001;

/// 권고 경고.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// 지급 비율 합이 100%가 아님
    PaymentPercentSum { total: f64 },
    /// 선택 마일스톤이 4개를 초과
    TooManyMilestones { count: usize },
    /// 마일스톤 월이 앞선 지급보다 이름
    MilestoneOutOfOrder {
        name: String,
        month: f64,
        previous_month: f64,
    },
    /// 마일스톤이 선적 전 지급 이후에 위치
    MilestoneAfterPreShipment { name: String, month: f64 },
    /// 운전 프로파일 값이 0 이하
    NonPositiveOperatingProfile { field: &'static str, value: f64 },
    BurdenBelowOne { value: f64 },
    NegativeLaborUnits { value: f64 },
    /// 분석 기간(0~60개월) 밖의 월
    MonthOutsideHorizon { field: &'static str, month: f64 },
    /// 정수가 아닌 월이라 해당 항목이 반영되지 않음
    FractionalTriggerMonth { field: &'static str, month: f64 },
    /// 할인율 -1 이하에서는 할인계수가 정의되지 않음
    DiscountRateOutOfDomain { rate: f64 },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::PaymentPercentSum { total } => write!(
                f,
                "payment percentages total {:.1}% (should equal 100%)",
                total * 100.0
            ),
            ValidationWarning::TooManyMilestones { count } => write!(
                f,
                "{count} optional milestones configured (at most {MAX_OPTIONAL_MILESTONES})"
            ),
            ValidationWarning::MilestoneOutOfOrder {
                name,
                month,
                previous_month,
            } => write!(
                f,
                "milestone '{name}' at month {month} precedes the previous payment at month {previous_month}"
            ),
            ValidationWarning::MilestoneAfterPreShipment { name, month } => write!(
                f,
                "milestone '{name}' at month {month} falls after the pre-shipment payment"
            ),
            ValidationWarning::NonPositiveOperatingProfile { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            ValidationWarning::BurdenBelowOne { value } => {
                write!(f, "burden multiplier {value} is below 1.0")
            }
            ValidationWarning::NegativeLaborUnits { value } => {
                write!(f, "labor units reduced is negative ({value})")
            }
            ValidationWarning::MonthOutsideHorizon { field, month } => write!(
                f,
                "{field} = {month} lies outside the 0-{ANALYSIS_HORIZON_MONTHS} month horizon"
            ),
            ValidationWarning::FractionalTriggerMonth { field, month } => write!(
                f,
                "{field} = {month} is not a whole month and will never be applied"
            ),
            ValidationWarning::DiscountRateOutOfDomain { rate } => {
                write!(f, "annual discount rate {rate} must be greater than -1")
            }
        }
    }
}

/// 입력 레코드를 검사해 권고 경고 목록을 돌려준다.
pub fn validate(inputs: &RoiInputs) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let schedule = &inputs.payment_schedule;

    let total = schedule.total_percent();
    if (total - 1.0).abs() >= PERCENT_SUM_TOLERANCE {
        warnings.push(ValidationWarning::PaymentPercentSum { total });
    }

    let count = schedule.optional_milestones.len();
    if count > MAX_OPTIONAL_MILESTONES {
        warnings.push(ValidationWarning::TooManyMilestones { count });
    }

    let mut previous_month = 0.0;
    for m in &schedule.optional_milestones {
        if m.month < previous_month {
            warnings.push(ValidationWarning::MilestoneOutOfOrder {
                name: m.name.clone(),
                month: m.month,
                previous_month,
            });
        }
        if m.month > schedule.pre_shipment_month {
            warnings.push(ValidationWarning::MilestoneAfterPreShipment {
                name: m.name.clone(),
                month: m.month,
            });
        }
        previous_month = m.month;
    }

    for (field, value) in [
        ("shiftsPerDay", inputs.shifts_per_day),
        ("hoursPerShift", inputs.hours_per_shift),
        ("operatingDaysPerYear", inputs.operating_days_per_year),
    ] {
        if value <= 0.0 {
            warnings.push(ValidationWarning::NonPositiveOperatingProfile { field, value });
        }
    }

    if inputs.burden_multiplier < 1.0 {
        warnings.push(ValidationWarning::BurdenBelowOne {
            value: inputs.burden_multiplier,
        });
    }
    if inputs.labor_units_reduced < 0.0 {
        warnings.push(ValidationWarning::NegativeLaborUnits {
            value: inputs.labor_units_reduced,
        });
    }

    let horizon = f64::from(ANALYSIS_HORIZON_MONTHS);
    for (field, month) in [
        ("commissioningMonth", inputs.commissioning_month),
        ("installationMonth", inputs.installation_month),
        ("lostProductionMonth", inputs.lost_production_month),
        ("preShipmentMonth", schedule.pre_shipment_month),
    ] {
        if !(0.0..=horizon).contains(&month) {
            warnings.push(ValidationWarning::MonthOutsideHorizon { field, month });
        }
    }

    for (field, month) in [
        ("installationMonth", inputs.installation_month),
        ("lostProductionMonth", inputs.lost_production_month),
    ] {
        if month.fract() != 0.0 {
            warnings.push(ValidationWarning::FractionalTriggerMonth { field, month });
        }
    }

    if inputs.annual_discount_rate <= -1.0 {
        warnings.push(ValidationWarning::DiscountRateOutOfDomain {
            rate: inputs.annual_discount_rate,
        });
    }

    warnings
}
