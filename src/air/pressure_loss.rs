use serde::{Deserialize, Serialize};

use crate::acoustics::level::round_to;
use crate::geometry::{Geometry, DEFAULT_MAX_VELOCITY_M_PER_S};
use crate::tables::{PressureLossConstants, ReferenceTables};

/// 공기 밀도 [kg/m3]
pub const AIR_DENSITY_KG_PER_M3: f64 = 1.2;

/// 기본 공력 프로파일 계수.
pub const DEFAULT_AERO_PROFILE_FACTOR: f64 = 0.5;

/// 저항계수 ζ 상관식 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZetaModel {
    /// ζ = a1·k² + b1·k, k = (s + d_h) / s
    #[default]
    Polynomial,
    /// VDI 2081 4항식: ζ = a1·q^b1 + a2·q^b2·L/d_h, q = s / (s + d)
    ///
    /// 이전 버전의 상관식. 비교용으로만 유지한다.
    Vdi2081,
}

/// 공력 프로파일 보정(배플 앞전 형상). 적용 여부는 설치 현장 설정이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroProfile {
    pub factor: f64,
    pub apply: bool,
}

impl Default for AeroProfile {
    fn default() -> Self {
        Self {
            factor: DEFAULT_AERO_PROFILE_FACTOR,
            apply: false,
        }
    }
}

impl AeroProfile {
    fn correction(&self) -> f64 {
        if self.apply {
            self.factor
        } else {
            1.0
        }
    }
}

/// 압력손실 계산 옵션.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureLossOptions {
    pub model: ZetaModel,
    pub aero: AeroProfile,
    pub max_velocity_m_per_s: f64,
}

impl Default for PressureLossOptions {
    fn default() -> Self {
        Self {
            model: ZetaModel::default(),
            aero: AeroProfile::default(),
            max_velocity_m_per_s: DEFAULT_MAX_VELOCITY_M_PER_S,
        }
    }
}

/// 압력손실 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureLossResult {
    /// 저항계수 ζ (소수 둘째 자리)
    pub zeta: f64,
    /// 정압 손실 [Pa] (정수 반올림)
    pub delta_p_pa: f64,
    /// 간극 유속 [m/s]
    pub velocity_m_per_s: f64,
    pub velocity_valid: bool,
}

impl PressureLossResult {
    fn invalid() -> Self {
        Self {
            zeta: 0.0,
            delta_p_pa: 0.0,
            velocity_m_per_s: 0.0,
            velocity_valid: true,
        }
    }
}

/// 배플 간극을 지나는 기류의 저항계수와 압력손실을 계산한다.
///
/// Δp = ½·ρ·v²·ζ (× 공력 프로파일 계수)
/// - 간극이 0 이하이거나 두께 상수가 없으면 ζ = 0, Δp = 0
pub fn pressure_loss(
    geometry: &Geometry,
    flow_m3_per_h: f64,
    tables: &ReferenceTables,
    options: &PressureLossOptions,
) -> PressureLossResult {
    let s = geometry.gap_m();
    let s_h = geometry.gap_height_m();
    if s <= 0.0 || s_h <= 0.0 {
        return PressureLossResult::invalid();
    }
    let Some(constants) = tables.pressure_loss_constants(geometry.thickness_mm) else {
        log::warn!(
            "두께 {} mm의 압력손실 상수가 없어 0으로 계산합니다.",
            geometry.thickness_mm
        );
        return PressureLossResult::invalid();
    };

    let d_h = geometry.hydraulic_diameter_m();
    let zeta = resistance_coefficient(options.model, constants, geometry, s, d_h);

    let velocity = geometry.gap_velocity_m_per_s(flow_m3_per_h);
    let delta_p = 0.5 * AIR_DENSITY_KG_PER_M3 * velocity * velocity * zeta
        * options.aero.correction();
    log::debug!("압력손실: s={s:.4} m, d_h={d_h:.4} m, v={velocity:.2} m/s, ζ={zeta:.4}");

    PressureLossResult {
        zeta: round_to(zeta, 2),
        delta_p_pa: delta_p.round(),
        velocity_m_per_s: velocity,
        velocity_valid: velocity <= options.max_velocity_m_per_s,
    }
}

fn resistance_coefficient(
    model: ZetaModel,
    c: &PressureLossConstants,
    geometry: &Geometry,
    s: f64,
    d_h: f64,
) -> f64 {
    match model {
        ZetaModel::Polynomial => {
            let k = (s + d_h) / s;
            c.a1 * k * k + c.b1 * k
        }
        ZetaModel::Vdi2081 => {
            let d_k = geometry.thickness_mm / 1000.0;
            let length_m = geometry.depth_mm / 1000.0;
            let q = s / (s + d_k);
            c.a1 * q.powf(c.b1) + c.a2 * q.powf(c.b2) * length_m / d_h
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Geometry {
        Geometry {
            width_mm: 1200.0,
            height_mm: 800.0,
            depth_mm: 1000.0,
            thickness_mm: 200.0,
            baffle_count: 4,
        }
    }

    #[test]
    fn polynomial_reference_case() {
        let res = pressure_loss(
            &reference(),
            5000.0,
            &ReferenceTables::default(),
            &PressureLossOptions::default(),
        );
        // d_h = 0.1778 m, k = 2.778 → ζ ≈ 2.00, Δp ≈ 22.6 Pa
        assert!((res.zeta - 2.0).abs() < 1e-9, "zeta={}", res.zeta);
        assert_eq!(res.delta_p_pa, 23.0);
        assert!(res.velocity_valid);
    }

    #[test]
    fn aero_profile_factor_scales_drop() {
        let opts = PressureLossOptions {
            aero: AeroProfile {
                factor: 0.5,
                apply: true,
            },
            ..PressureLossOptions::default()
        };
        let res = pressure_loss(&reference(), 5000.0, &ReferenceTables::default(), &opts);
        assert_eq!(res.delta_p_pa, 11.0);
        assert!((res.zeta - 2.0).abs() < 1e-9);
    }

    #[test]
    fn vdi_variant_is_selectable() {
        let opts = PressureLossOptions {
            model: ZetaModel::Vdi2081,
            ..PressureLossOptions::default()
        };
        let res = pressure_loss(&reference(), 5000.0, &ReferenceTables::default(), &opts);
        assert!(res.zeta > 0.0);
        assert!(res.delta_p_pa > 0.0);
    }

    #[test]
    fn blocked_width_returns_zero() {
        let g = Geometry {
            baffle_count: 6,
            ..reference()
        };
        let res = pressure_loss(&g, 5000.0, &ReferenceTables::default(), &PressureLossOptions::default());
        assert_eq!(res.zeta, 0.0);
        assert_eq!(res.delta_p_pa, 0.0);
    }

    #[test]
    fn unsupported_thickness_returns_zero() {
        let g = Geometry {
            thickness_mm: 120.0,
            ..reference()
        };
        let res = pressure_loss(&g, 5000.0, &ReferenceTables::default(), &PressureLossOptions::default());
        assert_eq!(res.zeta, 0.0);
        assert_eq!(res.delta_p_pa, 0.0);
    }
}
