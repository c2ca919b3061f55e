//! 형상/유량 입력 하나로 검증 → 삽입손실 → 압력손실 → 자생소음 → 하류 소음 → 판매가를
//! 차례로 계산한다.

use serde::Serialize;

use crate::acoustics::{
    attenuation, downstream_noise, energetic_sum, regenerated_noise, round_to, AttenuationResult,
    DownstreamResult, RegeneratedNoiseResult,
};
use crate::air::{pressure_loss, PressureLossResult};
use crate::band::SpectrumMap;
use crate::config::Config;
use crate::geometry::{check_design, model_code, DesignCheck, Geometry};
use crate::pricing::{price_total, PriceResult};
use crate::tables::ReferenceTables;

/// 사이징 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingInput {
    pub geometry: Geometry,
    pub flow_m3_per_h: f64,
    /// 상류 옥타브 스펙트럼(선택)
    pub upstream: Option<SpectrumMap>,
}

/// 사이징 전체 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingReport {
    pub check: DesignCheck,
    pub model_code: String,
    pub attenuation: AttenuationResult,
    pub pressure_loss: PressureLossResult,
    pub regenerated: RegeneratedNoiseResult,
    /// 상류 스펙트럼이 없으면 None
    pub downstream: Option<DownstreamResult>,
    /// 상류 스펙트럼의 전체 레벨 [dB]
    pub upstream_global: Option<f64>,
    pub price: PriceResult,
}

/// 모든 모델을 한 번에 실행한다. 형상 검증이 실패해도 계산은 계속하며
/// 각 모델의 무효 형상 규칙을 따른다.
pub fn size_silencer(input: &SizingInput, tables: &ReferenceTables, config: &Config) -> SizingReport {
    let geometry = &input.geometry;
    let check = check_design(geometry, input.flow_m3_per_h, config.max_velocity_m_per_s);

    let attenuation = attenuation(geometry, tables);
    let pressure_loss = pressure_loss(
        geometry,
        input.flow_m3_per_h,
        tables,
        &config.pressure_loss_options(),
    );
    let regenerated = regenerated_noise(geometry, input.flow_m3_per_h);

    let downstream = input.upstream.as_ref().and_then(|upstream| {
        downstream_noise(
            upstream,
            &attenuation.bands,
            &regenerated.bands,
            config.noise_mode,
        )
    });
    let upstream_global = input
        .upstream
        .as_ref()
        .filter(|upstream| upstream.has_nonzero())
        .map(|upstream| round_to(energetic_sum(upstream.defined_levels()), 1));

    let price = price_total(
        geometry,
        &tables.box_prices,
        tables.baffle_prices(),
        config.lateral_faces,
    );

    log::info!(
        "사이징 완료: {} / Δp {} Pa / 판매가 {:.2} {}",
        model_code(geometry),
        pressure_loss.delta_p_pa,
        price.total,
        config.currency
    );

    SizingReport {
        check,
        model_code: model_code(geometry),
        attenuation,
        pressure_loss,
        regenerated,
        downstream,
        upstream_global,
        price,
    }
}
