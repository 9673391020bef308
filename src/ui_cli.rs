use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::calculations::{
    opportunity_cost, OpportunityCostResult, RoiOutputs, MAX_DELAY_MONTHS,
};
use crate::config::Config;
use crate::format::{
    format_currency, format_number, format_percent, parse_currency, parse_number, parse_percent,
};
use crate::i18n::{self, keys, Translator};
use crate::inputs::{FinalPaymentTerms, OptionalMilestone, RoiInputs, MAX_OPTIONAL_MILESTONES};
use crate::validation::ValidationWarning;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EditInputs,
    Summary,
    Cashflow,
    Chart,
    DelayCost,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
/// 입력이 끝나면(EOF) 종료를 선택한 것으로 본다.
pub fn main_menu(tr: &Translator, reader: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_EDIT_INPUTS,
        keys::MAIN_MENU_SUMMARY,
        keys::MAIN_MENU_CASHFLOW,
        keys::MAIN_MENU_CHART,
        keys::MAIN_MENU_DELAY,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line(reader, tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit);
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::EditInputs),
            "2" => return Ok(MenuChoice::Summary),
            "3" => return Ok(MenuChoice::Cashflow),
            "4" => return Ok(MenuChoice::Chart),
            "5" => return Ok(MenuChoice::DelayCost),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 결과 요약을 출력한다.
pub fn print_summary(tr: &Translator, cfg: &Config, outputs: &RoiOutputs) {
    let money = |v: f64| format_currency(v, cfg.currency_decimals);
    println!("{}", tr.t(keys::SUMMARY_HEADING));
    let break_even = outputs
        .break_even_project_month
        .map_or_else(|| tr.t(keys::NOT_REACHED).to_string(), |m| m.to_string());
    let after = outputs
        .break_even_after_commissioning
        .map_or_else(|| tr.t(keys::NOT_REACHED).to_string(), |m| format_number(m, 1));
    println!("{} {break_even}", tr.t(keys::SUMMARY_BREAK_EVEN_PROJECT));
    println!("{} {after}", tr.t(keys::SUMMARY_BREAK_EVEN_AFTER));
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_PAYBACK),
        outputs.payback_within_24_months
    );
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_MONTHLY_LABOR),
        money(outputs.monthly_labor_savings)
    );
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_MONTHLY_CAPACITY),
        money(outputs.monthly_capacity_benefit)
    );
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_MONTHLY_MARGIN),
        money(outputs.monthly_operating_margin)
    );
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_TOTAL_INSTALLED),
        money(outputs.total_installed_cost)
    );
    println!(
        "{} {}",
        tr.t(keys::SUMMARY_OPERATING_HOURS),
        format_number(outputs.operating_hours_per_year, 0)
    );
    println!("{} {}", tr.t(keys::SUMMARY_NPV), money(outputs.npv_at_60_months));
}

/// 월별 현금흐름 표를 출력한다.
pub fn print_cashflow(tr: &Translator, cfg: &Config, outputs: &RoiOutputs) {
    let money = |v: f64| format_currency(v, cfg.currency_decimals);
    println!("{}", tr.t(keys::CASHFLOW_HEADING));
    println!("{}", tr.t(keys::CASHFLOW_COLUMNS));
    for cf in &outputs.cashflows {
        println!(
            "{:>2} | {:>12} | {:>10} | {:>10} | {:>12} | {:.4} | {:>12} | {:>13}",
            cf.month,
            money(cf.capex_out),
            money(cf.total_benefit),
            money(cf.one_time_loss),
            money(cf.net_cash_flow),
            cf.discount_factor,
            money(cf.discounted_cash_flow),
            money(cf.cumulative_net),
        );
    }
}

/// 차트용 누적 시계열을 출력하고 손익분기 월에 표시를 붙인다.
pub fn print_chart_data(tr: &Translator, cfg: &Config, outputs: &RoiOutputs) {
    let money = |v: f64| format_currency(v, cfg.currency_decimals);
    println!("{}", tr.t(keys::CHART_HEADING));
    println!("{}", tr.t(keys::CHART_COLUMNS));
    for point in &outputs.chart_data {
        let marker = if outputs.break_even_project_month == Some(point.month) {
            tr.t(keys::CHART_BREAK_EVEN_MARKER)
        } else {
            ""
        };
        println!(
            "{:>2} | {:>13} | {:>13} | {:>13} {marker}",
            point.month,
            money(point.cumulative_costs),
            money(point.cumulative_benefits),
            money(point.cumulative_net),
        );
    }
}

/// 권고 경고를 출력한다.
pub fn print_warnings(tr: &Translator, warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        println!("{}", tr.t(keys::WARNINGS_NONE));
        return;
    }
    println!("{}", tr.t(keys::WARNINGS_HEADING));
    for w in warnings {
        println!("  - {w}");
    }
}

/// 지연 기회비용 결과를 출력한다.
pub fn print_opportunity_cost(tr: &Translator, cfg: &Config, result: &OpportunityCostResult) {
    println!("{}", tr.t(keys::DELAY_HEADING));
    println!(
        "{} {} ({} × {}/mo)",
        tr.t(keys::DELAY_RESULT),
        format_currency(result.lost_revenue, cfg.currency_decimals),
        result.delay_months,
        format_currency(result.monthly_operating_margin, cfg.currency_decimals),
    );
}

/// 지연 개월 수를 입력받아 기회비용을 출력한다.
pub fn handle_delay_cost(
    tr: &Translator,
    cfg: &Config,
    outputs: &RoiOutputs,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    let months = loop {
        let s = read_line(reader, tr.t(keys::PROMPT_DELAY_MONTHS))?;
        match s.trim().parse::<u32>() {
            Ok(v) if v <= MAX_DELAY_MONTHS => break v,
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let result = opportunity_cost(outputs.monthly_operating_margin, months);
    print_opportunity_cost(tr, cfg, &result);
    Ok(())
}

/// 입력값 편집 메뉴를 처리한다.
pub fn handle_edit_inputs(
    tr: &Translator,
    inputs: &mut RoiInputs,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    loop {
        println!("{}", tr.t(keys::EDIT_HEADING));
        println!("{}", tr.t(keys::EDIT_OPTIONS));
        let sel = read_line(reader, tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                edit_f64(
                    tr,
                    keys::FIELD_EQUIPMENT_COST,
                    FieldKind::Currency,
                    &mut inputs.equipment_cost,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_INSTALLATION_COST,
                    FieldKind::Currency,
                    &mut inputs.installation_cost,
                    reader,
                )?;
            }
            "2" => handle_payment_schedule(tr, inputs, reader)?,
            "3" => {
                edit_f64(
                    tr,
                    keys::FIELD_SHIFTS,
                    FieldKind::Number,
                    &mut inputs.shifts_per_day,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_HOURS,
                    FieldKind::Number,
                    &mut inputs.hours_per_shift,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_DAYS,
                    FieldKind::Number,
                    &mut inputs.operating_days_per_year,
                    reader,
                )?;
            }
            "4" => {
                edit_f64(
                    tr,
                    keys::FIELD_BASE_WAGE,
                    FieldKind::Currency,
                    &mut inputs.base_wage,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_BURDEN,
                    FieldKind::Number,
                    &mut inputs.burden_multiplier,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_LABOR_UNITS,
                    FieldKind::Number,
                    &mut inputs.labor_units_reduced,
                    reader,
                )?;
            }
            "5" => {
                edit_f64(
                    tr,
                    keys::FIELD_BASELINE_UPH,
                    FieldKind::Number,
                    &mut inputs.baseline_units_per_hour,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_PROPOSED_UPH,
                    FieldKind::Number,
                    &mut inputs.proposed_units_per_hour,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_MARGIN_PER_UNIT,
                    FieldKind::Currency,
                    &mut inputs.contribution_margin_per_unit,
                    reader,
                )?;
            }
            "6" => {
                edit_f64(
                    tr,
                    keys::FIELD_COMMISSIONING,
                    FieldKind::Number,
                    &mut inputs.commissioning_month,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_INSTALLATION_MONTH,
                    FieldKind::Number,
                    &mut inputs.installation_month,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_LOST_COST,
                    FieldKind::Currency,
                    &mut inputs.lost_production_cost,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_LOST_MONTH,
                    FieldKind::Number,
                    &mut inputs.lost_production_month,
                    reader,
                )?;
            }
            "7" => edit_f64(
                tr,
                keys::FIELD_DISCOUNT_RATE,
                FieldKind::Percent,
                &mut inputs.annual_discount_rate,
                reader,
            )?,
            "8" => {
                *inputs = RoiInputs::default();
                println!("{}", tr.t(keys::EDIT_RESET_DONE));
            }
            "0" | "" => return Ok(()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION)),
        }
    }
}

fn handle_payment_schedule(
    tr: &Translator,
    inputs: &mut RoiInputs,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    loop {
        let schedule = &mut inputs.payment_schedule;
        println!("{}", tr.t(keys::SCHEDULE_HEADING));
        println!(
            "  0) {:>6} @ 0",
            format_percent(schedule.downpayment_percent, 1)
        );
        for (i, m) in schedule.optional_milestones.iter().enumerate() {
            println!(
                "  {}) {:>6} @ {} {}",
                i + 1,
                format_percent(m.percentage, 1),
                m.month,
                m.name
            );
        }
        println!(
            "  -) {:>6} @ {} / {:>6} @ +{}d",
            format_percent(schedule.pre_shipment_percent, 1),
            schedule.pre_shipment_month,
            format_percent(schedule.final_payment_percent, 1),
            schedule.final_payment_terms.days()
        );
        println!(
            "{} {}",
            tr.t(keys::SCHEDULE_SUM),
            format_percent(schedule.total_percent(), 1)
        );
        println!("{}", tr.t(keys::SCHEDULE_OPTIONS));

        let sel = read_line(reader, tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                if schedule.optional_milestones.len() >= MAX_OPTIONAL_MILESTONES {
                    println!("{}", tr.t(keys::SCHEDULE_LIMIT_REACHED));
                    continue;
                }
                let mut milestone = OptionalMilestone {
                    id: next_milestone_id(&schedule.optional_milestones),
                    name: format!("Milestone {}", schedule.optional_milestones.len() + 1),
                    percentage: 0.0,
                    month: schedule.pre_shipment_month,
                };
                edit_milestone(tr, &mut milestone, reader)?;
                schedule.optional_milestones.push(milestone);
            }
            "2" | "3" => {
                if schedule.optional_milestones.is_empty() {
                    println!("{}", tr.t(keys::SCHEDULE_EMPTY));
                    continue;
                }
                let Some(index) = read_milestone_index(tr, schedule.optional_milestones.len(), reader)?
                else {
                    println!("{}", tr.t(keys::INVALID_SELECTION));
                    continue;
                };
                if sel.trim() == "2" {
                    edit_milestone(tr, &mut schedule.optional_milestones[index], reader)?;
                } else {
                    schedule.optional_milestones.remove(index);
                }
            }
            "4" => {
                edit_f64(
                    tr,
                    keys::FIELD_DOWNPAYMENT,
                    FieldKind::Percent,
                    &mut schedule.downpayment_percent,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_PRE_SHIPMENT_PERCENT,
                    FieldKind::Percent,
                    &mut schedule.pre_shipment_percent,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_PRE_SHIPMENT_MONTH,
                    FieldKind::Number,
                    &mut schedule.pre_shipment_month,
                    reader,
                )?;
                edit_f64(
                    tr,
                    keys::FIELD_FINAL_PERCENT,
                    FieldKind::Percent,
                    &mut schedule.final_payment_percent,
                    reader,
                )?;
                schedule.final_payment_terms =
                    read_terms(tr, schedule.final_payment_terms, reader)?;
            }
            "0" | "" => return Ok(()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION)),
        }
    }
}

fn next_milestone_id(existing: &[OptionalMilestone]) -> String {
    let max = existing
        .iter()
        .filter_map(|m| m.id.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

fn edit_milestone(
    tr: &Translator,
    milestone: &mut OptionalMilestone,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    let prompt = format!(
        "{} [{}] {}: ",
        tr.t(keys::FIELD_MILESTONE_NAME),
        milestone.name,
        tr.t(keys::PROMPT_KEEP_CURRENT)
    );
    let name = read_line(reader, &prompt)?;
    if !name.trim().is_empty() {
        milestone.name = name.trim().to_string();
    }
    edit_f64(
        tr,
        keys::FIELD_MILESTONE_PERCENT,
        FieldKind::Percent,
        &mut milestone.percentage,
        reader,
    )?;
    edit_f64(tr, keys::FIELD_MILESTONE_MONTH, FieldKind::Number, &mut milestone.month, reader)?;
    Ok(())
}

fn read_milestone_index(
    tr: &Translator,
    len: usize,
    reader: &mut impl BufRead,
) -> Result<Option<usize>, AppError> {
    let s = read_line(reader, tr.t(keys::PROMPT_MILESTONE_INDEX))?;
    Ok(s.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1))
}

fn read_terms(
    tr: &Translator,
    current: FinalPaymentTerms,
    reader: &mut impl BufRead,
) -> Result<FinalPaymentTerms, AppError> {
    let prompt = format!(
        "{} [{}] {}: ",
        tr.t(keys::FIELD_FINAL_TERMS),
        current.days(),
        tr.t(keys::PROMPT_KEEP_CURRENT)
    );
    loop {
        let s = read_line(reader, &prompt)?;
        if s.trim().is_empty() {
            return Ok(current);
        }
        match s.trim().parse::<u32>().ok().map(FinalPaymentTerms::try_from) {
            Some(Ok(terms)) => return Ok(terms),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} language={} ({}), currency_decimals={}, show_warnings={}",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.language,
        tr.language_code(),
        cfg.currency_decimals,
        cfg.show_warnings
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(reader, tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let lang = read_line(reader, tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let lang = lang.trim();
            if lang.eq_ignore_ascii_case("auto") {
                cfg.language = "auto".into();
            } else {
                cfg.language = i18n::resolve_language(lang, Some(cfg.language.as_str()));
            }
        }
        "2" => {
            let s = read_line(reader, tr.t(keys::SETTINGS_PROMPT_DECIMALS))?;
            match s.trim().parse::<usize>() {
                Ok(d) if d <= 2 => cfg.currency_decimals = d,
                _ => {
                    println!("{}", tr.t(keys::INVALID_SELECTION));
                    return Ok(());
                }
            }
        }
        "3" => cfg.show_warnings = !cfg.show_warnings,
        _ => return Ok(()),
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 입력 필드의 표기 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// `$1,500,000`
    Currency,
    /// `1,650`
    Number,
    /// `40%` 또는 `0.4`
    Percent,
}

impl FieldKind {
    fn parse(self, s: &str) -> f64 {
        match self {
            FieldKind::Currency => parse_currency(s),
            FieldKind::Number => parse_number(s),
            FieldKind::Percent => parse_percent(s),
        }
    }

    fn show(self, value: f64) -> String {
        match self {
            FieldKind::Currency => format_currency(value, 2),
            FieldKind::Number => value.to_string(),
            FieldKind::Percent => format_percent(value, 1),
        }
    }
}

fn edit_f64(
    tr: &Translator,
    label_key: &str,
    kind: FieldKind,
    value: &mut f64,
    reader: &mut impl BufRead,
) -> Result<(), AppError> {
    let prompt = format!(
        "{} [{}] {}: ",
        tr.t(label_key),
        kind.show(*value),
        tr.t(keys::PROMPT_KEEP_CURRENT)
    );
    if let Some(v) = read_f64_or_keep(tr, &prompt, kind, reader)? {
        *value = v;
    }
    Ok(())
}

fn read_line(reader: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        println!();
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

/// 빈 입력이면 None(현재값 유지), 숫자가 없으면 다시 묻는다.
fn read_f64_or_keep(
    tr: &Translator,
    prompt: &str,
    kind: FieldKind,
    reader: &mut impl BufRead,
) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(reader, prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        let v = kind.parse(s);
        if s.chars().any(|c| c.is_ascii_digit()) && v.is_finite() {
            return Ok(Some(v));
        }
        println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr() -> Translator {
        Translator::new("en")
    }

    #[test]
    fn main_menu_exits_when_input_ends() {
        let mut reader: &[u8] = b"";
        assert_eq!(main_menu(&tr(), &mut reader).unwrap(), MenuChoice::Exit);

        let mut reader: &[u8] = b"9\n";
        assert_eq!(main_menu(&tr(), &mut reader).unwrap(), MenuChoice::Exit);

        let mut reader: &[u8] = b"x\n3\n";
        assert_eq!(main_menu(&tr(), &mut reader).unwrap(), MenuChoice::Cashflow);
    }

    #[test]
    fn prompts_fail_instead_of_retrying_at_end_of_input() {
        let outputs = crate::calculate_roi(&RoiInputs::default());
        let mut reader: &[u8] = b"abc\n";
        let err = handle_delay_cost(&tr(), &Config::default(), &outputs, &mut reader).unwrap_err();
        assert!(matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn editor_accepts_formatted_currency_and_percent() {
        let mut inputs = RoiInputs::default();
        let mut reader: &[u8] = b"1\n$1,500,000\n\n2\n4\n30%\n\n\n\n\n0\n0\n";
        handle_edit_inputs(&tr(), &mut inputs, &mut reader).unwrap();

        assert_eq!(inputs.equipment_cost, 1_500_000.0);
        assert_eq!(inputs.installation_cost, 76_200.0);
        assert!((inputs.payment_schedule.downpayment_percent - 0.30).abs() < 1e-12);
        assert_eq!(inputs.payment_schedule.pre_shipment_percent, 0.15);
    }

    #[test]
    fn editor_rejects_entries_without_digits() {
        let mut value = 12.0;
        let mut reader: &[u8] = b"abc\n1,650 units\n";
        edit_f64(&tr(), keys::FIELD_BASELINE_UPH, FieldKind::Number, &mut value, &mut reader)
            .unwrap();
        assert_eq!(value, 1650.0);

        assert_eq!(FieldKind::Percent.parse("40"), 0.4);
        assert_eq!(FieldKind::Currency.parse("$76,200.50"), 76_200.5);
    }
}
