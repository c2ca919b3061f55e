use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UnitParseError;

/// 체적 유량 단위. 내부 기준은 m³/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    CubicMeterPerHour,
    CubicMeterPerSecond,
    LiterPerSecond,
    /// ft³/min
    Cfm,
}

fn to_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::CubicMeterPerSecond => value * 3600.0,
        FlowUnit::LiterPerSecond => value * 3.6,
        FlowUnit::Cfm => value * 1.699_010_8,
    }
}

fn from_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::CubicMeterPerSecond => value / 3600.0,
        FlowUnit::LiterPerSecond => value / 3.6,
        FlowUnit::Cfm => value / 1.699_010_8,
    }
}

/// 유량을 다른 단위로 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    from_m3_per_h(to_m3_per_h(value, from), to)
}

impl FlowUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            FlowUnit::CubicMeterPerHour => "m3/h",
            FlowUnit::CubicMeterPerSecond => "m3/s",
            FlowUnit::LiterPerSecond => "L/s",
            FlowUnit::Cfm => "cfm",
        }
    }
}

impl FromStr for FlowUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m3/h" | "m³/h" | "cmh" => Ok(FlowUnit::CubicMeterPerHour),
            "m3/s" | "m³/s" => Ok(FlowUnit::CubicMeterPerSecond),
            "l/s" | "lps" => Ok(FlowUnit::LiterPerSecond),
            "cfm" | "ft3/min" => Ok(FlowUnit::Cfm),
            other => Err(UnitParseError::Unknown(other.to_string())),
        }
    }
}
