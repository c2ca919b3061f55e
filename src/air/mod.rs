//! 공기 측(공력) 계산 모듈 모음.

pub mod pressure_loss;

pub use pressure_loss::*;
