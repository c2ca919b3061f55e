use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use baffle_silencer_toolbox::acoustics::NoiseMode;
use baffle_silencer_toolbox::app::{self, AppError, Session};
use baffle_silencer_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use baffle_silencer_toolbox::geometry::Geometry;
use baffle_silencer_toolbox::i18n::{self, keys, Translator};
use baffle_silencer_toolbox::sizing::{size_silencer, SizingInput};
use baffle_silencer_toolbox::tables::ReferenceTables;
use baffle_silencer_toolbox::ui_cli;

/// 배플형 소음기 사이징 및 견적 도구.
#[derive(Debug, Parser)]
#[command(name = "baffle_silencer_toolbox", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 참조표 TOML 경로(설정의 tables_path보다 우선)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// 표시 언어(ko, en, auto)
    #[arg(long, global = true)]
    lang: Option<String>,
    /// 로그 상세도(-v: info, -vv: debug). RUST_LOG가 있으면 그 값을 따른다.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 형상과 풍량으로 전체 사이징을 실행한다
    Size(SizeArgs),
    /// 참조표를 출력하거나 TOML로 내보낸다
    Tables {
        /// 참조표를 이 경로에 TOML로 저장
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// 대화형 메뉴
    Interactive,
    /// 기본 설정 파일을 생성한다
    InitConfig {
        /// 기존 파일을 덮어쓴다
        #[arg(long)]
        force: bool,
    },
}

/// 입력이 없으면 설정의 기본 형상을 쓴다. 치수는 mm, 풍량은 m³/h.
#[derive(Debug, Args)]
struct SizeArgs {
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    depth: Option<f64>,
    #[arg(long)]
    thickness: Option<f64>,
    #[arg(long)]
    baffles: Option<u32>,
    #[arg(long)]
    flow: Option<f64>,
    /// 상류 스펙트럼 8개 값(63 Hz ~ 8 kHz), '-'는 값 없음. 예: "85,82,-,78,75,72,70,66"
    #[arg(long, allow_hyphen_values = true)]
    upstream: Option<String>,
    /// 하류 합성에 쓸 자생소음 표현
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// 측벽 배플 면 수
    #[arg(long)]
    lateral_faces: Option<u32>,
    /// 출력 단위(길이 풍량 압력 유속 순, '-'는 설정값 유지). 예: "in cfm inH2O fpm"
    #[arg(long, allow_hyphen_values = true)]
    units: Option<String>,
    /// 결과를 TOML로 출력
    #[arg(long)]
    toml: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Linear,
    AWeighted,
}

impl From<ModeArg> for NoiseMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Linear => NoiseMode::Linear,
            ModeArg::AWeighted => NoiseMode::AWeighted,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정과 참조표를 로드한 뒤 서브커맨드를 실행한다.
fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let command = cli.command.unwrap_or(Command::Interactive);

    if let Command::InitConfig { force } = command {
        if cli.config.exists() && !force {
            log::warn!("{} 파일이 이미 있습니다(--force로 덮어쓰기).", cli.config.display());
            return Ok(());
        }
        let cfg = Config::default();
        cfg.save_to(&cli.config)?;
        let lang = i18n::resolve_language(cli.lang.as_deref(), Some(&cfg.language));
        let tr = Translator::new_with_pack(&lang, None);
        println!("{}: {}", tr.t(keys::CONFIG_WRITTEN), cli.config.display());
        return Ok(());
    }

    let mut cfg = config::load_or_default_at(&cli.config)?;
    let tables_path = cli.tables.or_else(|| cfg.tables_path.clone());
    let tables = ReferenceTables::load_or_default(tables_path.as_deref())?;
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, None);
    log::info!("언어: {lang}, 설정: {}", cli.config.display());

    match command {
        Command::Size(args) => {
            if let Some(mode) = args.mode {
                cfg.noise_mode = mode.into();
            }
            if let Some(faces) = args.lateral_faces {
                cfg.lateral_faces = faces;
            }
            if let Some(units) = args.units.as_deref() {
                cfg.default_units.apply_symbols(units)?;
            }
            let input = size_input(&args, &cfg)?;
            let report = size_silencer(&input, &tables, &cfg);
            if args.toml {
                println!("{}", toml::to_string_pretty(&report)?);
            } else {
                ui_cli::print_report(&tr, &cfg, &report);
            }
        }
        Command::Tables { write } => match write {
            Some(path) => tables.save(&path)?,
            None => ui_cli::print_tables(&tr, &tables),
        },
        Command::Interactive => {
            let mut session = Session {
                config: cfg,
                config_path: cli.config,
                tables,
                tr,
            };
            app::run(&mut session)?;
        }
        Command::InitConfig { .. } => {}
    }
    Ok(())
}

fn size_input(args: &SizeArgs, cfg: &Config) -> Result<SizingInput, AppError> {
    let defaults = &cfg.default_geometry;
    let geometry = Geometry {
        width_mm: args.width.unwrap_or(defaults.width_mm),
        height_mm: args.height.unwrap_or(defaults.height_mm),
        depth_mm: args.depth.unwrap_or(defaults.depth_mm),
        thickness_mm: args.thickness.unwrap_or(defaults.thickness_mm),
        baffle_count: args.baffles.unwrap_or(defaults.baffle_count),
    };
    let upstream = args
        .upstream
        .as_deref()
        .map(ui_cli::parse_spectrum)
        .transpose()?;
    Ok(SizingInput {
        geometry,
        flow_m3_per_h: args.flow.unwrap_or(defaults.flow_m3_per_h),
        upstream,
    })
}
