//! 설정 파일, 권고 검사, 기회비용 계산.
use capex_roi::calculations::{calculate_roi, opportunity_cost};
use capex_roi::config::{self, Config};
use capex_roi::inputs::{OptionalMilestone, RoiInputs};
use capex_roi::validation::{validate, ValidationWarning};
use tempfile::tempdir;

#[test]
fn config_is_created_then_reloaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let created = config::load_or_default_at(&path).unwrap();
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut changed = created.clone();
    changed.language = "ko".into();
    changed.currency_decimals = 2;
    changed.save_to(&path).unwrap();
    assert_eq!(config::load_or_default_at(&path).unwrap(), changed);
}

#[test]
fn default_inputs_have_no_warnings() {
    assert!(validate(&RoiInputs::default()).is_empty());
}

#[test]
fn percent_sum_warning_uses_ui_tolerance() {
    let mut inputs = RoiInputs::default();
    inputs.payment_schedule.final_payment_percent = 0.1005;
    assert!(validate(&inputs).is_empty());

    inputs.payment_schedule.final_payment_percent = 0.2;
    let warnings = validate(&inputs);
    assert_eq!(warnings.len(), 1);
    match &warnings[0] {
        ValidationWarning::PaymentPercentSum { total } => assert!((total - 1.1).abs() < 1e-9),
        other => panic!("unexpected warning {other:?}"),
    }
}

#[test]
fn schedule_ordering_and_trigger_months_are_flagged() {
    let mut inputs = RoiInputs::default();
    inputs.payment_schedule.optional_milestones[1].month = 1.0;
    inputs.payment_schedule.optional_milestones.push(OptionalMilestone {
        id: "3".into(),
        name: "Late".into(),
        percentage: 0.0,
        month: 7.5,
    });
    inputs.lost_production_month = 8.5;
    inputs.annual_discount_rate = -1.0;

    let warnings = validate(&inputs);
    assert!(warnings.contains(&ValidationWarning::MilestoneOutOfOrder {
        name: "Progress Milestone (24 weeks)".into(),
        month: 1.0,
        previous_month: 2.8,
    }));
    assert!(warnings.contains(&ValidationWarning::MilestoneAfterPreShipment {
        name: "Late".into(),
        month: 7.5,
    }));
    assert!(warnings.contains(&ValidationWarning::FractionalTriggerMonth {
        field: "lostProductionMonth",
        month: 8.5,
    }));
    assert!(warnings.contains(&ValidationWarning::DiscountRateOutOfDomain { rate: -1.0 }));
}

#[test]
fn warnings_never_block_calculation() {
    let inputs = RoiInputs {
        shifts_per_day: 0.0,
        burden_multiplier: 0.5,
        commissioning_month: 72.0,
        ..RoiInputs::default()
    };
    let warnings = validate(&inputs);
    assert!(warnings.len() >= 3);
    let out = calculate_roi(&inputs);
    assert_eq!(out.cashflows.len(), 61);
    assert!(out.cashflows.iter().all(|r| r.total_benefit == 0.0));
}

#[test]
fn delay_cost_scales_with_operating_margin() {
    let out = calculate_roi(&RoiInputs::default());
    let cost = opportunity_cost(out.monthly_operating_margin, 6);
    assert!((cost.lost_revenue - 6.0 * 94_845.44).abs() < 1e-6);
    assert_eq!(opportunity_cost(out.monthly_operating_margin, 0).lost_revenue, 0.0);
}
