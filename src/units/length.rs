use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UnitParseError;

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

fn to_mm(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value,
        LengthUnit::Centimeter => value * 10.0,
        LengthUnit::Meter => value * 1000.0,
        LengthUnit::Inch => value * 25.4,
        LengthUnit::Foot => value * 304.8,
    }
}

fn from_mm(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Centimeter => value_mm / 10.0,
        LengthUnit::Meter => value_mm / 1000.0,
        LengthUnit::Inch => value_mm / 25.4,
        LengthUnit::Foot => value_mm / 304.8,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    from_mm(to_mm(value, from), to)
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(LengthUnit::Millimeter),
            "cm" => Ok(LengthUnit::Centimeter),
            "m" => Ok(LengthUnit::Meter),
            "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
            "ft" | "foot" | "'" => Ok(LengthUnit::Foot),
            other => Err(UnitParseError::Unknown(other.to_string())),
        }
    }
}
