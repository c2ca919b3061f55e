use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UnitParseError;

/// 덕트 정압 손실 단위. 내부 기준은 Pa이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    MilliBar,
    MmH2O,
    InH2O,
}

fn to_pa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value,
        PressureUnit::MilliBar => value * 100.0,
        PressureUnit::MmH2O => value * 9.806_65,
        PressureUnit::InH2O => value * 249.088_9,
    }
}

fn from_pa(value_pa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value_pa,
        PressureUnit::MilliBar => value_pa / 100.0,
        PressureUnit::MmH2O => value_pa / 9.806_65,
        PressureUnit::InH2O => value_pa / 249.088_9,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    from_pa(to_pa(value, from), to)
}

impl PressureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::MilliBar => "mbar",
            PressureUnit::MmH2O => "mmH2O",
            PressureUnit::InH2O => "inH2O",
        }
    }
}

impl FromStr for PressureUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pa" => Ok(PressureUnit::Pascal),
            "mbar" => Ok(PressureUnit::MilliBar),
            "mmh2o" | "mmaq" | "mmwc" => Ok(PressureUnit::MmH2O),
            "inh2o" | "inwc" | "in.wg" => Ok(PressureUnit::InH2O),
            other => Err(UnitParseError::Unknown(other.to_string())),
        }
    }
}
