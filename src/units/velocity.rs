use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UnitParseError;

/// 속도 단위. 내부 기준은 m/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    FootPerMinute,
}

fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::FootPerMinute => value * 0.00508,
    }
}

fn from_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::FootPerMinute => value / 0.00508,
    }
}

/// 속도를 변환한다.
pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    let base = to_mps(value, from);
    from_mps(base, to)
}

impl VelocityUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            VelocityUnit::MeterPerSecond => "m/s",
            VelocityUnit::FootPerMinute => "fpm",
        }
    }
}

impl FromStr for VelocityUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m/s" | "mps" => Ok(VelocityUnit::MeterPerSecond),
            "fpm" | "ft/min" => Ok(VelocityUnit::FootPerMinute),
            other => Err(UnitParseError::Unknown(other.to_string())),
        }
    }
}
