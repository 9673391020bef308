//! 설비 투자(CAPEX) ROI 계산 로직을 라이브러리로 분리하여 CLI 외의 호출자도 쓸 수 있게 한다.

pub mod app;
pub mod calculations;
pub mod config;
pub mod format;
pub mod i18n;
pub mod inputs;
pub mod schema;
pub mod ui_cli;
pub mod validation;

pub use calculations::{calculate_roi, RoiOutputs};
pub use inputs::RoiInputs;
