//! 기본 입력 레코드(스프레드시트 기준값) 회귀 테스트와 경계 조건 테스트.
use approx::assert_relative_eq;
use capex_roi::calculations::{
    calculate_roi, capacity_benefit, labor_savings, payment_schedule, PaybackStatus,
    ANALYSIS_HORIZON_MONTHS,
};
use capex_roi::inputs::{PaymentSchedule, RoiInputs};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn default_inputs_reproduce_reference_margins() {
    let out = calculate_roi(&RoiInputs::default());
    let labor = 2.0 * 3.0 * 8.0 * 320.0 * (22.48 * 1.35) / 12.0;
    let capacity = 50.0 * 7680.0 * 1.75 / 12.0;
    assert_relative_eq!(out.monthly_labor_savings, labor, max_relative = 1e-12);
    assert_relative_eq!(out.monthly_capacity_benefit, capacity, max_relative = 1e-12);
    assert_close("labor", out.monthly_labor_savings, 38_845.44, 1e-6);
    assert_close("capacity", out.monthly_capacity_benefit, 56_000.0, 1e-6);
    assert_close("margin", out.monthly_operating_margin, 94_845.44, 1e-6);
    assert_close("installed", out.total_installed_cost, 1_215_675.0, 1e-9);
    assert_eq!(out.operating_hours_per_year, 7680.0);
}

#[test]
fn default_inputs_break_even_at_month_21() {
    // 총 지출 1,249,675 / 월 94,845.44 -> 커미셔닝(8월)부터 14개월째인 21월에 회수
    let out = calculate_roi(&RoiInputs::default());
    assert_eq!(out.break_even_project_month, Some(21));
    assert_eq!(out.break_even_after_commissioning, Some(13.0));
    assert_eq!(out.payback_within_24_months, PaybackStatus::Yes);
    assert!(out.cashflows[20].cumulative_net < 0.0);
    assert!(out.cashflows[21].cumulative_net >= 0.0);
}

#[test]
fn default_schedule_disbursements() {
    let out = calculate_roi(&RoiInputs::default());
    let cf = &out.cashflows;
    assert_close("m0", cf[0].capex_out, 455_790.0, 1e-6);
    assert_close("m3", cf[3].capex_out, 227_895.0, 1e-6);
    assert_close("m6", cf[6].capex_out, 170_921.25, 1e-6);
    assert_close("m7", cf[7].capex_out, 170_921.25, 1e-6);
    // 설치비만 8월, 최종 지급(Net 30)은 9월
    assert_close("m8", cf[8].capex_out, 76_200.0, 1e-6);
    assert_close("m9", cf[9].capex_out, 113_947.5, 1e-6);
    assert_eq!(cf[8].one_time_loss, 34_000.0);
    assert_close("m8 invest", cf[8].investment_out, 110_200.0, 1e-6);
    assert_eq!(cf[7].total_benefit, 0.0);
    assert_close("m8 benefit", cf[8].total_benefit, 94_845.44, 1e-6);

    let total_capex: f64 = cf.iter().map(|r| r.capex_out).sum();
    assert_close("total capex", total_capex, out.total_installed_cost, 1e-6);
}

#[test]
fn cashflow_has_61_rows_and_consistent_totals() {
    let out = calculate_roi(&RoiInputs::default());
    assert_eq!(out.cashflows.len(), ANALYSIS_HORIZON_MONTHS as usize + 1);
    assert_eq!(out.chart_data.len(), out.cashflows.len());
    for (i, row) in out.cashflows.iter().enumerate() {
        assert_eq!(row.month as usize, i);
        assert_eq!(out.chart_data[i].cumulative_net, row.cumulative_net);
    }
    let last = &out.cashflows[60];
    assert_eq!(last.cumulative_net, last.cumulative_benefits - last.cumulative_costs);
    assert_eq!(out.npv_at_60_months, last.cumulative_discounted_cash_flow);
}

#[test]
fn npv_discounts_with_annual_rate_per_month() {
    let out = calculate_roi(&RoiInputs::default());
    assert_eq!(out.cashflows[0].discount_factor, 1.0);
    assert_close("dcf0", out.cashflows[0].discounted_cash_flow, -455_790.0, 1e-6);
    let expected: f64 = out
        .cashflows
        .iter()
        .map(|r| r.net_cash_flow / 1.12f64.powi(r.month as i32))
        .sum();
    assert_relative_eq!(out.npv_at_60_months, expected, max_relative = 1e-9);
}

#[test]
fn lower_proposed_throughput_gives_negative_benefit_and_no_break_even() {
    let inputs = RoiInputs {
        proposed_units_per_hour: 1500.0,
        ..RoiInputs::default()
    };
    let capacity = capacity_benefit::compute(&inputs);
    assert_eq!(capacity.delta_units_per_hour, -100.0);
    assert!(capacity.monthly_benefit < 0.0);

    let out = calculate_roi(&inputs);
    assert_eq!(out.break_even_project_month, None);
    assert_eq!(out.break_even_after_commissioning, None);
    assert_eq!(out.payback_within_24_months, PaybackStatus::NotApplicable);
}

#[test]
fn labor_only_payback_exceeds_24_months() {
    let inputs = RoiInputs {
        proposed_units_per_hour: 1600.0,
        ..RoiInputs::default()
    };
    let out = calculate_roi(&inputs);
    assert_eq!(out.monthly_capacity_benefit, 0.0);
    assert_eq!(out.break_even_project_month, Some(40));
    assert_eq!(out.break_even_after_commissioning, Some(32.0));
    assert_eq!(out.payback_within_24_months, PaybackStatus::No);
}

#[test]
fn break_even_before_commissioning_is_negative() {
    let inputs = RoiInputs {
        equipment_cost: 0.0,
        installation_cost: 0.0,
        lost_production_cost: 0.0,
        ..RoiInputs::default()
    };
    let out = calculate_roi(&inputs);
    assert_eq!(out.break_even_project_month, Some(0));
    assert_eq!(out.break_even_after_commissioning, Some(-8.0));
    assert_eq!(out.payback_within_24_months, PaybackStatus::Yes);
}

#[test]
fn zero_optional_milestones_yield_three_events() {
    let schedule = PaymentSchedule {
        optional_milestones: Vec::new(),
        ..PaymentSchedule::default()
    };
    let events = payment_schedule::expand(&schedule, 8.0);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].month, 0.0);
    assert_eq!(events[1].month, 6.9);
    assert_eq!(events[2].month, 9.0);
}

#[test]
fn off_hundred_percent_schedule_is_computed_through() {
    let mut inputs = RoiInputs::default();
    inputs.payment_schedule.final_payment_percent = 0.30;
    let out = calculate_roi(&inputs);
    let total_capex: f64 = out.cashflows.iter().map(|r| r.capex_out).sum();
    assert_close(
        "capex 120%",
        total_capex,
        1_139_475.0 * 1.2 + 76_200.0,
        1e-6,
    );
}

#[test]
fn negative_labor_units_yield_negative_savings() {
    let inputs = RoiInputs {
        labor_units_reduced: -1.0,
        ..RoiInputs::default()
    };
    let labor = labor_savings::compute(&inputs);
    assert!(labor.monthly_savings < 0.0);
    assert_close("burdened", labor.burdened_rate, 30.348, 1e-9);
}

#[test]
fn milestones_beyond_horizon_are_never_disbursed() {
    let mut inputs = RoiInputs::default();
    inputs.payment_schedule.optional_milestones[0].month = 75.0;
    let out = calculate_roi(&inputs);
    let total_capex: f64 = out.cashflows.iter().map(|r| r.capex_out).sum();
    assert_close("missing 20%", total_capex, 1_215_675.0 - 227_895.0, 1e-6);
}
