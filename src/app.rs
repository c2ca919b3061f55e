use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::tables::{ReferenceTables, TableError};
use crate::ui_cli::{self, MenuChoice};
use crate::units::UnitParseError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 참조표 로드 오류
    #[error("참조표 오류: {0}")]
    Table(#[from] TableError),
    /// 단위 해석 오류
    #[error("단위 오류: {0}")]
    Unit(#[from] UnitParseError),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 상류 스펙트럼 입력 오류
    #[error("스펙트럼 입력 오류: {0}")]
    Spectrum(String),
}

/// 대화형 세션 상태. 설정은 종료 시 `config_path`에 저장된다.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tables: ReferenceTables,
    pub tr: Translator,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        let tr = &session.tr;
        match ui_cli::main_menu(tr)? {
            MenuChoice::FullSizing => ui_cli::handle_full_sizing(tr, &session.config, &session.tables)?,
            MenuChoice::Attenuation => ui_cli::handle_attenuation(tr, &session.config, &session.tables)?,
            MenuChoice::PressureLoss => ui_cli::handle_pressure_loss(tr, &session.config, &session.tables)?,
            MenuChoice::RegeneratedNoise => ui_cli::handle_regenerated_noise(tr, &session.config)?,
            MenuChoice::Price => ui_cli::handle_price(tr, &session.config, &session.tables)?,
            MenuChoice::Tables => ui_cli::print_tables(tr, &session.tables),
            MenuChoice::Settings => {
                let language_changed = ui_cli::handle_settings(tr, &mut session.config)?;
                session.config.save_to(&session.config_path)?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                if language_changed {
                    let code = i18n::resolve_language(None, Some(&session.config.language));
                    session.tr = Translator::new_with_pack(&code, None);
                }
            }
            MenuChoice::Exit => {
                session.config.save_to(&session.config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
