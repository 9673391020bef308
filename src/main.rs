use std::path::PathBuf;

use capex_roi::{app, config, i18n};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// 설비 투자 ROI 프로젝션 도구.
#[derive(Debug, Parser)]
#[command(name = "capex_roi", version, about)]
struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,

    /// 입력 레코드 파일 (.json/.toml). 없으면 설정의 inputs_path를 사용한다
    #[arg(short, long)]
    inputs: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<app::Command>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청한 명령을 실행한다.
fn main() {
    // 로그는 stderr로만 보낸다. 레벨은 RUST_LOG (기본 warn)
    FmtSubscriber::builder()
        .with_max_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let lang = i18n::resolve_language(&cli.lang, None);
    let mut tr = i18n::Translator::new(&lang);

    if let Err(err) = try_run(cli, &mut tr) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli, tr: &mut i18n::Translator) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    *tr = i18n::Translator::new(&lang);

    let inputs_path = cli.inputs.unwrap_or_else(|| cfg.inputs_path.clone());
    let command = cli.command.unwrap_or(app::Command::Summary);
    app::run(command, &mut cfg, tr, &inputs_path)
}
