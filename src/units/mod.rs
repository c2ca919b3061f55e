//! 단위 정의 및 변환 모듈 모음.

pub mod flow;
pub mod length;
pub mod pressure;
pub mod velocity;

pub use flow::{convert_flow, FlowUnit};
pub use length::{convert_length, LengthUnit};
pub use pressure::{convert_pressure, PressureUnit};
pub use velocity::{convert_velocity, VelocityUnit};

use thiserror::Error;

/// 단위 문자열 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitParseError {
    #[error("알 수 없는 단위: {0}")]
    Unknown(String),
}
