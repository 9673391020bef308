//! ROI 계산 엔진 모듈 모음. 입출력 없이 입력 레코드만으로 결과를 만든다.

pub mod capacity_benefit;
pub mod cashflow;
pub mod engine;
pub mod labor_savings;
pub mod opportunity_cost;
pub mod payment_schedule;

pub use capacity_benefit::CapacityBenefitResult;
pub use cashflow::{MonthlyCashflow, ANALYSIS_HORIZON_MONTHS};
pub use engine::*;
pub use labor_savings::LaborSavingsResult;
pub use opportunity_cost::{opportunity_cost, OpportunityCostResult, MAX_DELAY_MONTHS};
pub use payment_schedule::PaymentEvent;
