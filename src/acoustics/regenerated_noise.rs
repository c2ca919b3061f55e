use serde::Serialize;

use crate::acoustics::level::{energetic_sum, round_to};
use crate::band::{BandMap, FrequencyBand};
use crate::geometry::Geometry;

/// log 인수 하한 유속 [m/s]
const MIN_VELOCITY_M_PER_S: f64 = 0.1;
/// Strouhal 수 하한
const MIN_STROUHAL: f64 = 1e-10;

/// 밴드별 기류 자생소음.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RegeneratedBand {
    /// 옥타브 보정 ΔL_okt [dB]
    pub delta: f64,
    /// 선형 음향파워 레벨 L_w,i [dB]
    pub lw_linear: f64,
    /// A-가중 음향파워 레벨 [dB(A)]
    pub lw_a_weighted: f64,
}

/// 자생소음 계산 결과. 무효 형상/무유량이면 모든 값이 0이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegeneratedNoiseResult {
    /// 전체 음향파워 레벨 L_w [dB]
    pub lw: f64,
    pub bands: BandMap<RegeneratedBand>,
    /// A-가중 전체 레벨 [dB(A)]
    pub lw_a_global: f64,
}

impl RegeneratedNoiseResult {
    pub fn zero() -> Self {
        Self {
            lw: 0.0,
            bands: BandMap::default(),
            lw_a_global: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.lw == 0.0 && self.lw_a_global == 0.0
    }
}

/// 배플 간극 난류에 의한 자생소음(음향파워)을 추정한다.
///
/// - L_w = 57.4·lg(v) + 10·lg(S) − 2.5
/// - ΔL_okt = 7.4 − 14.9·lg St − 1.8·(lg St)² + 2.4·(lg St)³ − 0.5·(lg St)⁴ + K,
///   K = −14.8·lg(v) + 7.4, St = f·d_h / v
/// - 밴드 레벨은 ΔL_okt의 에너지 합으로 정규화해 전체 합이 L_w가 되도록 한다.
///
/// 길이(depth)는 사용하지 않는다.
pub fn regenerated_noise(geometry: &Geometry, flow_m3_per_h: f64) -> RegeneratedNoiseResult {
    let v_s = geometry.gap_velocity_m_per_s(flow_m3_per_h);
    let face_area = geometry.face_area_m2();
    if v_s <= 0.0 || face_area <= 0.0 {
        return RegeneratedNoiseResult::zero();
    }
    let d_h = geometry.hydraulic_diameter_m();
    let v = v_s.max(MIN_VELOCITY_M_PER_S);
    let lg_v = v.log10();

    let lw = 57.4 * lg_v + 10.0 * face_area.log10() - 2.5;
    let k = -14.8 * lg_v + 7.4;

    let deltas = BandMap::from_fn(|band| octave_correction(band, d_h, v, k));
    let delta_total = energetic_sum(deltas.values().copied());

    let linear = deltas.map(|_, delta| lw + delta - delta_total);
    let weighted = linear.map(|band, level| level + band.a_weighting_db());
    let lw_a_global = energetic_sum(weighted.values().copied());

    let bands = BandMap::from_fn(|band| RegeneratedBand {
        delta: round_to(deltas[band], 1),
        lw_linear: round_to(linear[band], 1),
        lw_a_weighted: round_to(weighted[band], 1),
    });
    log::debug!("자생소음: v_s={v_s:.2} m/s, d_h={d_h:.4} m, L_w={lw:.1} dB, L_wA={lw_a_global:.1} dB(A)");

    RegeneratedNoiseResult {
        lw: round_to(lw, 1),
        bands,
        lw_a_global: round_to(lw_a_global, 1),
    }
}

fn octave_correction(band: FrequencyBand, d_h: f64, v: f64, k: f64) -> f64 {
    let strouhal = f64::from(band.hz()) * d_h / v;
    let lg = strouhal.max(MIN_STROUHAL).log10();
    7.4 - 14.9 * lg - 1.8 * lg.powi(2) + 2.4 * lg.powi(3) - 0.5 * lg.powi(4) + k
}
