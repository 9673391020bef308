use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::{self, opportunity_cost};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::inputs::RoiInputs;
use crate::schema::{self, SchemaError};
use crate::ui_cli::{self, MenuChoice};
use crate::validation;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 입력 레코드 로드/저장 오류
    #[error("입력 레코드 오류: {0}")]
    Schema(#[from] SchemaError),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI 하위 명령.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 손익분기, 회수 여부, NPV 요약을 출력한다
    Summary,
    /// 0~60개월 월별 현금흐름 표를 출력한다
    Cashflow,
    /// 누적 비용/편익/순편익 시계열을 출력한다
    Chart,
    /// 전체 결과를 JSON으로 내보낸다
    Export {
        /// 출력 파일 (없으면 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 입력 레코드의 권고 경고만 출력한다
    Validate,
    /// 프로젝트 지연에 따른 손실 매출을 계산한다
    Delay {
        /// 지연 개월 수
        #[arg(short, long)]
        months: u32,
    },
    /// 기본 입력 레코드 파일을 생성한다
    Init {
        /// 출력 파일 (없으면 입력 파일 경로)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 메뉴 기반 대화형 모드
    Interactive,
}

fn load_inputs(tr: &Translator, path: &Path) -> Result<RoiInputs, AppError> {
    let loaded = schema::load_or_default(path)?;
    for note in &loaded.notes {
        println!("{} {note}", tr.t(keys::MIGRATION_NOTE));
    }
    info!(
        path = %path.display(),
        version = loaded.source_version,
        "inputs loaded"
    );
    Ok(loaded.inputs)
}

fn report_warnings(tr: &Translator, config: &Config, inputs: &RoiInputs) {
    if !config.show_warnings {
        return;
    }
    let warnings = validation::validate(inputs);
    for w in &warnings {
        debug!(warning = %w, "advisory warning");
    }
    ui_cli::print_warnings(tr, &warnings);
}

/// 하위 명령 하나를 실행한다.
pub fn run(
    command: Command,
    config: &mut Config,
    tr: &mut Translator,
    inputs_path: &Path,
) -> Result<(), AppError> {
    match command {
        Command::Summary => {
            let inputs = load_inputs(tr, inputs_path)?;
            report_warnings(tr, config, &inputs);
            let outputs = calculations::calculate_roi(&inputs);
            ui_cli::print_summary(tr, config, &outputs);
        }
        Command::Cashflow => {
            let inputs = load_inputs(tr, inputs_path)?;
            let outputs = calculations::calculate_roi(&inputs);
            ui_cli::print_cashflow(tr, config, &outputs);
        }
        Command::Chart => {
            let inputs = load_inputs(tr, inputs_path)?;
            let outputs = calculations::calculate_roi(&inputs);
            ui_cli::print_chart_data(tr, config, &outputs);
        }
        Command::Export { output } => {
            let inputs = load_inputs(tr, inputs_path)?;
            let outputs = calculations::calculate_roi(&inputs);
            let json = serde_json::to_string_pretty(&outputs)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("{} {}", tr.t(keys::OUTPUT_WRITTEN), path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Validate => {
            let inputs = load_inputs(tr, inputs_path)?;
            ui_cli::print_warnings(tr, &validation::validate(&inputs));
        }
        Command::Delay { months } => {
            let inputs = load_inputs(tr, inputs_path)?;
            let outputs = calculations::calculate_roi(&inputs);
            let result = opportunity_cost(outputs.monthly_operating_margin, months);
            ui_cli::print_opportunity_cost(tr, config, &result);
        }
        Command::Init { output } => {
            let path = output.unwrap_or_else(|| inputs_path.to_path_buf());
            schema::save_inputs(&path, &RoiInputs::default())?;
            println!("{} {}", tr.t(keys::OUTPUT_WRITTEN), path.display());
        }
        Command::Interactive => run_interactive(config, tr, inputs_path)?,
    }
    Ok(())
}

/// 설정 언어가 바뀌었으면 번역기를 다시 만든다.
fn refresh_translator(tr: &mut Translator, previous_language: &str, config: &Config) {
    if config.language != previous_language {
        *tr = Translator::new(&i18n::resolve_language(&config.language, None));
    }
}

/// 대화형 메인 루프를 실행한다. 종료 시 입력값과 설정을 저장한다.
pub fn run_interactive(
    config: &mut Config,
    tr: &mut Translator,
    inputs_path: &Path,
) -> Result<(), AppError> {
    let mut inputs = load_inputs(tr, inputs_path)?;
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    loop {
        match ui_cli::main_menu(tr, &mut reader)? {
            MenuChoice::EditInputs => {
                ui_cli::handle_edit_inputs(tr, &mut inputs, &mut reader)?;
                report_warnings(tr, config, &inputs);
            }
            MenuChoice::Summary => {
                let outputs = calculations::calculate_roi(&inputs);
                ui_cli::print_summary(tr, config, &outputs);
            }
            MenuChoice::Cashflow => {
                let outputs = calculations::calculate_roi(&inputs);
                ui_cli::print_cashflow(tr, config, &outputs);
            }
            MenuChoice::Chart => {
                let outputs = calculations::calculate_roi(&inputs);
                ui_cli::print_chart_data(tr, config, &outputs);
            }
            MenuChoice::DelayCost => {
                let outputs = calculations::calculate_roi(&inputs);
                ui_cli::handle_delay_cost(tr, config, &outputs, &mut reader)?;
            }
            MenuChoice::Settings => {
                let previous = config.language.clone();
                ui_cli::handle_settings(tr, config, &mut reader)?;
                refresh_translator(tr, &previous, config);
                config.save()?;
            }
            MenuChoice::Exit => {
                schema::save_inputs(inputs_path, &inputs)?;
                println!("{} {}", tr.t(keys::INPUTS_SAVED), inputs_path.display());
                config.save()?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
