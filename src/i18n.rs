use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const NOT_REACHED: &str = "general.not_reached";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EDIT_INPUTS: &str = "main_menu.edit_inputs";
    pub const MAIN_MENU_SUMMARY: &str = "main_menu.summary";
    pub const MAIN_MENU_CASHFLOW: &str = "main_menu.cashflow";
    pub const MAIN_MENU_CHART: &str = "main_menu.chart";
    pub const MAIN_MENU_DELAY: &str = "main_menu.delay";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_KEEP_CURRENT: &str = "prompt.keep_current";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_SELECTION: &str = "error.invalid_selection";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_OPTIONS: &str = "edit.options";
    pub const EDIT_RESET_DONE: &str = "edit.reset_done";

    pub const FIELD_EQUIPMENT_COST: &str = "field.equipment_cost";
    pub const FIELD_INSTALLATION_COST: &str = "field.installation_cost";
    pub const FIELD_DOWNPAYMENT: &str = "field.downpayment";
    pub const FIELD_PRE_SHIPMENT_PERCENT: &str = "field.pre_shipment_percent";
    pub const FIELD_PRE_SHIPMENT_MONTH: &str = "field.pre_shipment_month";
    pub const FIELD_FINAL_PERCENT: &str = "field.final_percent";
    pub const FIELD_FINAL_TERMS: &str = "field.final_terms";
    pub const FIELD_MILESTONE_NAME: &str = "field.milestone_name";
    pub const FIELD_MILESTONE_PERCENT: &str = "field.milestone_percent";
    pub const FIELD_MILESTONE_MONTH: &str = "field.milestone_month";
    pub const FIELD_SHIFTS: &str = "field.shifts";
    pub const FIELD_HOURS: &str = "field.hours";
    pub const FIELD_DAYS: &str = "field.days";
    pub const FIELD_BASE_WAGE: &str = "field.base_wage";
    pub const FIELD_BURDEN: &str = "field.burden";
    pub const FIELD_LABOR_UNITS: &str = "field.labor_units";
    pub const FIELD_BASELINE_UPH: &str = "field.baseline_uph";
    pub const FIELD_PROPOSED_UPH: &str = "field.proposed_uph";
    pub const FIELD_MARGIN_PER_UNIT: &str = "field.margin_per_unit";
    pub const FIELD_COMMISSIONING: &str = "field.commissioning";
    pub const FIELD_INSTALLATION_MONTH: &str = "field.installation_month";
    pub const FIELD_LOST_COST: &str = "field.lost_cost";
    pub const FIELD_LOST_MONTH: &str = "field.lost_month";
    pub const FIELD_DISCOUNT_RATE: &str = "field.discount_rate";

    pub const SCHEDULE_HEADING: &str = "schedule.heading";
    pub const SCHEDULE_OPTIONS: &str = "schedule.options";
    pub const SCHEDULE_LIMIT_REACHED: &str = "schedule.limit_reached";
    pub const SCHEDULE_EMPTY: &str = "schedule.empty";
    pub const SCHEDULE_SUM: &str = "schedule.sum";
    pub const PROMPT_MILESTONE_INDEX: &str = "prompt.milestone_index";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const SUMMARY_BREAK_EVEN_PROJECT: &str = "summary.break_even_project";
    pub const SUMMARY_BREAK_EVEN_AFTER: &str = "summary.break_even_after";
    pub const SUMMARY_PAYBACK: &str = "summary.payback";
    pub const SUMMARY_MONTHLY_LABOR: &str = "summary.monthly_labor";
    pub const SUMMARY_MONTHLY_CAPACITY: &str = "summary.monthly_capacity";
    pub const SUMMARY_MONTHLY_MARGIN: &str = "summary.monthly_margin";
    pub const SUMMARY_TOTAL_INSTALLED: &str = "summary.total_installed";
    pub const SUMMARY_OPERATING_HOURS: &str = "summary.operating_hours";
    pub const SUMMARY_NPV: &str = "summary.npv";

    pub const CASHFLOW_HEADING: &str = "cashflow.heading";
    pub const CASHFLOW_COLUMNS: &str = "cashflow.columns";
    pub const CHART_HEADING: &str = "chart.heading";
    pub const CHART_COLUMNS: &str = "chart.columns";
    pub const CHART_BREAK_EVEN_MARKER: &str = "chart.break_even_marker";

    pub const DELAY_HEADING: &str = "delay.heading";
    pub const PROMPT_DELAY_MONTHS: &str = "prompt.delay_months";
    pub const DELAY_RESULT: &str = "delay.result";

    pub const WARNINGS_HEADING: &str = "warnings.heading";
    pub const WARNINGS_NONE: &str = "warnings.none";
    pub const MIGRATION_NOTE: &str = "inputs.migration_note";
    pub const INPUTS_SAVED: &str = "inputs.saved";
    pub const OUTPUT_WRITTEN: &str = "output.written";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_DECIMALS: &str = "settings.prompt_decimals";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 내장 문자열 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        NOT_REACHED => "N/A",
        MAIN_MENU_TITLE => "\n=== CAPEX ROI Projection ===",
        MAIN_MENU_EDIT_INPUTS => "1) 입력값 편집",
        MAIN_MENU_SUMMARY => "2) 결과 요약",
        MAIN_MENU_CASHFLOW => "3) 월별 현금흐름",
        MAIN_MENU_CHART => "4) 누적 차트 데이터",
        MAIN_MENU_DELAY => "5) 지연 기회비용",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 저장 후 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_KEEP_CURRENT => "(엔터: 현재값 유지)",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INVALID_SELECTION => "잘못된 선택입니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        EDIT_HEADING => "\n-- 입력값 편집 --",
        EDIT_OPTIONS => {
            "1) CAPEX  2) 지급 일정  3) 운전 프로파일  4) 인건비  5) 생산능력  6) 일정/일회성 손실  7) 할인율  8) 기본값 복원  0) 돌아가기"
        }
        EDIT_RESET_DONE => "기본 입력값으로 복원했습니다.",
        FIELD_EQUIPMENT_COST => "장비비 [$]",
        FIELD_INSTALLATION_COST => "설치비 [$]",
        FIELD_DOWNPAYMENT => "계약금 비율 (0~1)",
        FIELD_PRE_SHIPMENT_PERCENT => "선적 전 지급 비율 (0~1)",
        FIELD_PRE_SHIPMENT_MONTH => "선적 전 지급 월",
        FIELD_FINAL_PERCENT => "최종 지급 비율 (0~1)",
        FIELD_FINAL_TERMS => "최종 지급 조건 [일] (30/60)",
        FIELD_MILESTONE_NAME => "마일스톤 이름",
        FIELD_MILESTONE_PERCENT => "마일스톤 비율 (0~1)",
        FIELD_MILESTONE_MONTH => "마일스톤 월",
        FIELD_SHIFTS => "일일 교대 수",
        FIELD_HOURS => "교대당 시간 [h]",
        FIELD_DAYS => "연간 가동일",
        FIELD_BASE_WAGE => "기본 시급 [$/h]",
        FIELD_BURDEN => "부대비용 배수 (≥1)",
        FIELD_LABOR_UNITS => "교대당 감축 인원",
        FIELD_BASELINE_UPH => "현재 시간당 생산량 [units/h]",
        FIELD_PROPOSED_UPH => "도입 후 시간당 생산량 [units/h]",
        FIELD_MARGIN_PER_UNIT => "단위당 공헌이익 [$]",
        FIELD_COMMISSIONING => "커미셔닝 월",
        FIELD_INSTALLATION_MONTH => "설치 월",
        FIELD_LOST_COST => "생산 손실 비용 [$]",
        FIELD_LOST_MONTH => "생산 손실 월",
        FIELD_DISCOUNT_RATE => "연 할인율 (0.12 = 12%)",
        SCHEDULE_HEADING => "\n-- 지급 일정 --",
        SCHEDULE_OPTIONS => {
            "1) 마일스톤 추가  2) 마일스톤 편집  3) 마일스톤 삭제  4) 고정 지급 편집  0) 돌아가기"
        }
        SCHEDULE_LIMIT_REACHED => "선택 마일스톤은 최대 4개까지 추가할 수 있습니다.",
        SCHEDULE_EMPTY => "선택 마일스톤이 없습니다.",
        SCHEDULE_SUM => "지급 비율 합계:",
        PROMPT_MILESTONE_INDEX => "마일스톤 번호: ",
        SUMMARY_HEADING => "\n-- ROI 결과 요약 --",
        SUMMARY_BREAK_EVEN_PROJECT => "손익분기 (프로젝트 월):",
        SUMMARY_BREAK_EVEN_AFTER => "손익분기 (커미셔닝 이후 개월):",
        SUMMARY_PAYBACK => "24개월 이내 회수:",
        SUMMARY_MONTHLY_LABOR => "월간 인건비 절감:",
        SUMMARY_MONTHLY_CAPACITY => "월간 생산능력 효과:",
        SUMMARY_MONTHLY_MARGIN => "월간 운영 마진:",
        SUMMARY_TOTAL_INSTALLED => "총 설치 비용:",
        SUMMARY_OPERATING_HOURS => "연간 운전 시간:",
        SUMMARY_NPV => "60개월 NPV:",
        CASHFLOW_HEADING => "\n-- 월별 현금흐름 --",
        CASHFLOW_COLUMNS => "월 | CAPEX | 편익 | 일회성 손실 | 순현금흐름 | 할인계수 | 할인현금흐름 | 누적 순편익",
        CHART_HEADING => "\n-- 누적 차트 데이터 --",
        CHART_COLUMNS => "월 | 누적 비용 | 누적 편익 | 누적 순편익",
        CHART_BREAK_EVEN_MARKER => "◀ 손익분기",
        DELAY_HEADING => "\n-- 지연 기회비용 --",
        PROMPT_DELAY_MONTHS => "지연 개월 수 (0~18): ",
        DELAY_RESULT => "손실 매출:",
        WARNINGS_HEADING => "입력 경고:",
        WARNINGS_NONE => "입력 경고 없음.",
        MIGRATION_NOTE => "입력 레코드 변환:",
        INPUTS_SAVED => "입력값을 저장했습니다:",
        OUTPUT_WRITTEN => "파일을 작성했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_OPTIONS => "1) 언어  2) 통화 소수 자릿수  3) 경고 표시 전환  0) 돌아가기",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/ko/en): ",
        SETTINGS_PROMPT_DECIMALS => "소수 자릿수 (0~2): ",
        SETTINGS_SAVED => "설정을 변경했습니다.",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        NOT_REACHED => "N/A",
        MAIN_MENU_TITLE => "\n=== CAPEX ROI Projection ===",
        MAIN_MENU_EDIT_INPUTS => "1) Edit inputs",
        MAIN_MENU_SUMMARY => "2) Results summary",
        MAIN_MENU_CASHFLOW => "3) Monthly cash flow",
        MAIN_MENU_CHART => "4) Cumulative chart data",
        MAIN_MENU_DELAY => "5) Opportunity cost of delay",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Save and exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_KEEP_CURRENT => "(enter keeps current)",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        INVALID_SELECTION => "Invalid selection.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        EDIT_HEADING => "\n-- Edit inputs --",
        EDIT_OPTIONS => {
            "1) CAPEX  2) Payment schedule  3) Operating profile  4) Labor  5) Capacity  6) Timing & one-time loss  7) Discount rate  8) Restore defaults  0) Back"
        }
        EDIT_RESET_DONE => "Default inputs restored.",
        FIELD_EQUIPMENT_COST => "Equipment cost [$]",
        FIELD_INSTALLATION_COST => "Installation cost [$]",
        FIELD_DOWNPAYMENT => "Down-payment share (0-1)",
        FIELD_PRE_SHIPMENT_PERCENT => "Pre-shipment share (0-1)",
        FIELD_PRE_SHIPMENT_MONTH => "Pre-shipment month",
        FIELD_FINAL_PERCENT => "Final payment share (0-1)",
        FIELD_FINAL_TERMS => "Final payment terms [days] (30/60)",
        FIELD_MILESTONE_NAME => "Milestone name",
        FIELD_MILESTONE_PERCENT => "Milestone share (0-1)",
        FIELD_MILESTONE_MONTH => "Milestone month",
        FIELD_SHIFTS => "Shifts per day",
        FIELD_HOURS => "Hours per shift [h]",
        FIELD_DAYS => "Operating days per year",
        FIELD_BASE_WAGE => "Base wage [$/h]",
        FIELD_BURDEN => "Burden multiplier (>=1)",
        FIELD_LABOR_UNITS => "Labor units reduced per shift",
        FIELD_BASELINE_UPH => "Baseline units per hour",
        FIELD_PROPOSED_UPH => "Proposed units per hour",
        FIELD_MARGIN_PER_UNIT => "Contribution margin per unit [$]",
        FIELD_COMMISSIONING => "Commissioning month",
        FIELD_INSTALLATION_MONTH => "Installation month",
        FIELD_LOST_COST => "Lost production cost [$]",
        FIELD_LOST_MONTH => "Lost production month",
        FIELD_DISCOUNT_RATE => "Annual discount rate (0.12 = 12%)",
        SCHEDULE_HEADING => "\n-- Payment schedule --",
        SCHEDULE_OPTIONS => {
            "1) Add milestone  2) Edit milestone  3) Remove milestone  4) Edit fixed payments  0) Back"
        }
        SCHEDULE_LIMIT_REACHED => "At most 4 optional milestones can be added.",
        SCHEDULE_EMPTY => "No optional milestones.",
        SCHEDULE_SUM => "Payment share total:",
        PROMPT_MILESTONE_INDEX => "Milestone number: ",
        SUMMARY_HEADING => "\n-- ROI summary --",
        SUMMARY_BREAK_EVEN_PROJECT => "Break-even (project month):",
        SUMMARY_BREAK_EVEN_AFTER => "Break-even (months after commissioning):",
        SUMMARY_PAYBACK => "Payback within 24 months:",
        SUMMARY_MONTHLY_LABOR => "Monthly labor savings:",
        SUMMARY_MONTHLY_CAPACITY => "Monthly capacity benefit:",
        SUMMARY_MONTHLY_MARGIN => "Monthly operating margin:",
        SUMMARY_TOTAL_INSTALLED => "Total installed cost:",
        SUMMARY_OPERATING_HOURS => "Operating hours per year:",
        SUMMARY_NPV => "NPV at 60 months:",
        CASHFLOW_HEADING => "\n-- Monthly cash flow --",
        CASHFLOW_COLUMNS => "Mo | CAPEX | Benefit | One-time loss | Net CF | DF | Discounted CF | Cumulative net",
        CHART_HEADING => "\n-- Cumulative chart data --",
        CHART_COLUMNS => "Mo | Cumulative costs | Cumulative benefits | Cumulative net",
        CHART_BREAK_EVEN_MARKER => "◀ break-even",
        DELAY_HEADING => "\n-- Opportunity cost of delay --",
        PROMPT_DELAY_MONTHS => "Months of delay (0-18): ",
        DELAY_RESULT => "Revenue lost:",
        WARNINGS_HEADING => "Input warnings:",
        WARNINGS_NONE => "No input warnings.",
        MIGRATION_NOTE => "Input record migration:",
        INPUTS_SAVED => "Inputs saved to",
        OUTPUT_WRITTEN => "Wrote",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS => "1) Language  2) Currency decimals  3) Toggle warnings  0) Back",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en): ",
        SETTINGS_PROMPT_DECIMALS => "Decimal places (0-2): ",
        SETTINGS_SAVED => "Settings updated.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn translations_follow_language() {
        let tr = Translator::new("en");
        assert_eq!(tr.t(keys::SUMMARY_NPV), "NPV at 60 months:");
        assert_eq!(Translator::new("ko").t(keys::SUMMARY_NPV), "60개월 NPV:");
        assert_eq!(Translator::new("fr").language(), Language::En);
    }

    #[test]
    fn unreached_break_even_reads_as_na() {
        assert_eq!(Translator::new("en").t(keys::NOT_REACHED), "N/A");
        assert_eq!(Translator::new("ko").t(keys::NOT_REACHED), "N/A");
    }
}
