use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use length_unit_converter::{
    app::{self, AppError},
    config, conversion,
    form::ConverterForm,
    i18n::{self, keys, Translator},
    ui_cli::Terminal,
    units::{conversion_table, LengthUnit},
};

/// 길이 단위 변환기 (미터/밀리미터/마일/피트).
#[derive(Debug, Parser)]
#[command(name = "length_unit_converter_cli", version, about)]
struct Cli {
    /// 표시 언어 (auto/ko/en-us/de-de)
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 값 하나를 변환해 출력한다.
    Convert {
        /// 변환할 값
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// 입력 단위 (m, mm, mi, ft ...)
        #[arg(value_parser = parse_unit)]
        from: LengthUnit,
        /// 변환 단위
        #[arg(value_parser = parse_unit)]
        to: LengthUnit,
        /// 결과 소수 자릿수 (기본: 설정값)
        #[arg(short, long)]
        decimals: Option<usize>,
    },
    /// 변환 계수표를 출력한다.
    Units,
}

fn parse_unit(s: &str) -> Result<LengthUnit, conversion::ConversionError> {
    s.parse()
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let lang_arg = cli.lang.clone();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&lang_arg, None));
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default_at(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    log::debug!("language resolved: {lang}");

    match cli.command {
        None => {
            let mut term = Terminal::stdio();
            app::run(&mut term, &mut cfg, &cli.config, &mut tr)
        }
        Some(Command::Convert {
            value,
            from,
            to,
            decimals,
        }) => {
            let mut form = ConverterForm::from_config(&cfg);
            if let Some(d) = decimals {
                cfg.decimals = d;
                form.decimals = cfg.display_decimals();
            }
            form.input = value;
            form.from = from;
            form.to = to;
            form.submit()?;
            if let Some(line) = form.result_label(|u| tr.unit_name(u)) {
                println!("{line}");
            }
            Ok(())
        }
        Some(Command::Units) => {
            for (unit, factor) in conversion_table() {
                let symbol = unit.symbol();
                println!(
                    "{:<12} {symbol:>4}  1 {symbol} = {factor} m",
                    tr.unit_name(unit)
                );
            }
            Ok(())
        }
    }
}
