use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::acoustics::NoiseMode;
use crate::air::{AeroProfile, PressureLossOptions, ZetaModel};
use crate::geometry::{Geometry, DEFAULT_MAX_VELOCITY_M_PER_S};
use crate::units::*;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력/출력에 쓰는 기본 단위.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub length: LengthUnit,
    pub flow: FlowUnit,
    pub pressure: PressureUnit,
    pub velocity: VelocityUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            length: LengthUnit::Millimeter,
            flow: FlowUnit::CubicMeterPerHour,
            pressure: PressureUnit::Pascal,
            velocity: VelocityUnit::MeterPerSecond,
        }
    }
}

impl DefaultUnits {
    /// 공백으로 구분된 단위 기호(길이 풍량 압력 유속 순)를 적용한다. `-`는 현재 값 유지.
    ///
    /// 잘못된 기호가 하나라도 있으면 아무것도 바꾸지 않는다.
    pub fn apply_symbols(&mut self, text: &str) -> Result<(), UnitParseError> {
        let mut next = self.clone();
        let mut tokens = text.split_whitespace();
        if let Some(t) = tokens.next().filter(|t| *t != "-") {
            next.length = t.parse()?;
        }
        if let Some(t) = tokens.next().filter(|t| *t != "-") {
            next.flow = t.parse()?;
        }
        if let Some(t) = tokens.next().filter(|t| *t != "-") {
            next.pressure = t.parse()?;
        }
        if let Some(t) = tokens.next().filter(|t| *t != "-") {
            next.velocity = t.parse()?;
        }
        *self = next;
        Ok(())
    }
}

/// 계산기 초기 입력값.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
    pub thickness_mm: f64,
    pub baffle_count: u32,
    pub flow_m3_per_h: f64,
}

impl Default for DefaultGeometry {
    fn default() -> Self {
        Self {
            width_mm: 1200.0,
            height_mm: 800.0,
            depth_mm: 1000.0,
            thickness_mm: 200.0,
            baffle_count: 4,
            flow_m3_per_h: 5000.0,
        }
    }
}

impl DefaultGeometry {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            depth_mm: self.depth_mm,
            thickness_mm: self.thickness_mm,
            baffle_count: self.baffle_count,
        }
    }
}

/// 애플리케이션 설정. 관리자가 조정하는 계산 상수도 여기서 명시적으로 전달한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub currency: String,
    pub max_velocity_m_per_s: f64,
    pub zeta_model: ZetaModel,
    pub aero_profile: AeroProfile,
    pub noise_mode: NoiseMode,
    /// 측벽 배플 면 수(0이면 측벽 배플 없음)
    pub lateral_faces: u32,
    /// 참조표 TOML 경로(없으면 내장 기본값)
    pub tables_path: Option<PathBuf>,
    pub default_geometry: DefaultGeometry,
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            currency: "EUR".to_string(),
            max_velocity_m_per_s: DEFAULT_MAX_VELOCITY_M_PER_S,
            zeta_model: ZetaModel::default(),
            aero_profile: AeroProfile::default(),
            noise_mode: NoiseMode::default(),
            lateral_faces: 0,
            tables_path: None,
            default_geometry: DefaultGeometry::default(),
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 돌려준다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::debug!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        log::info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    /// 압력손실 계산 옵션으로 변환한다.
    pub fn pressure_loss_options(&self) -> PressureLossOptions {
        PressureLossOptions {
            model: self.zeta_model,
            aero: self.aero_profile,
            max_velocity_m_per_s: self.max_velocity_m_per_s,
        }
    }
}
