//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 호출자도 같은 모델을 쓰게 한다.

pub mod acoustics;
pub mod air;
pub mod app;
pub mod band;
pub mod config;
pub mod geometry;
pub mod i18n;
pub mod pricing;
pub mod sizing;
pub mod tables;
pub mod ui_cli;
pub mod units;
