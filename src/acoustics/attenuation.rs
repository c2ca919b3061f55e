use serde::Serialize;

use crate::acoustics::level::{energetic_sum, round_to};
use crate::band::{BandMap, FrequencyBand};
use crate::geometry::{Geometry, ThicknessClass};
use crate::tables::ReferenceTables;

/// 간극비 보정 다항식 계수: ΔD_r = a·x⁴ + b·x³ + c·x² + d·x (x = r − 0.5).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolyCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PolyCoeffs {
    const fn quad(c: f64, d: f64) -> Self {
        Self { a: 0.0, b: 0.0, c, d }
    }

    const fn quartic(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.a * x.powi(4) + self.b * x.powi(3) + self.c * x.powi(2) + self.d * x
    }
}

/// 밴드별 삽입손실 계산 내역 [dB].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AttenuationBand {
    /// 기준 삽입손실 D_ref
    pub d_ref: f64,
    /// 간극비 보정 ΔD_r
    pub delta: f64,
    /// D_corr = D_ref + ΔD_r
    pub d_corr: f64,
    /// 길이 환산 추정치 D_est
    pub d_est: f64,
}

/// 삽입손실 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttenuationResult {
    pub bands: BandMap<AttenuationBand>,
    /// 양수 D_est의 에너지 합산값
    pub global_est: f64,
}

/// 두께 등급과 밴드에 해당하는 보정 계수. 비표준 두께는 계수가 없어 보정 0이 된다.
pub fn coefficients(thickness_mm: f64, band: FrequencyBand) -> Option<PolyCoeffs> {
    let class = ThicknessClass::from_mm(thickness_mm)?;
    let table = match class {
        ThicknessClass::T100 => &COEFFS_100,
        ThicknessClass::T200 => &COEFFS_200,
        ThicknessClass::T300 => &COEFFS_300,
    };
    Some(table[band as usize])
}

/// 배플 두께·개수·길이로 밴드별 삽입손실을 추정한다.
///
/// D_est = (D_ref + ΔD_r) × L[m]. 전체값은 D_est > 0인 밴드만 에너지 합산한다.
pub fn attenuation(geometry: &Geometry, tables: &ReferenceTables) -> AttenuationResult {
    let x = geometry.gap_ratio() - 0.5;
    let length_m = geometry.depth_mm / 1000.0;

    let mut positive = Vec::with_capacity(FrequencyBand::ALL.len());
    let bands = BandMap::from_fn(|band| {
        let d_ref = tables.reference_attenuation(geometry.thickness_mm, band);
        let delta = coefficients(geometry.thickness_mm, band)
            .map(|c| c.eval(x))
            .unwrap_or(0.0);
        let d_corr = d_ref + delta;
        let d_est = d_corr * length_m;
        if d_est > 0.0 {
            positive.push(d_est);
        }
        AttenuationBand {
            d_ref,
            delta: round_to(delta, 2),
            d_corr: round_to(d_corr, 2),
            d_est: round_to(d_est, 2),
        }
    });

    let global_est = if positive.is_empty() {
        0.0
    } else {
        round_to(energetic_sum(positive), 1)
    };
    log::debug!(
        "삽입손실: r={:.3}, L={length_m} m, 전체 {global_est} dB",
        geometry.gap_ratio()
    );
    AttenuationResult { bands, global_est }
}

const COEFFS_100: [PolyCoeffs; 8] = [
    PolyCoeffs::quad(-0.8036, 0.7098),
    PolyCoeffs::quad(0.3571, -1.8393),
    PolyCoeffs::quad(1.9107, -7.3259),
    PolyCoeffs::quad(8.0893, -22.4598),
    PolyCoeffs::quad(6.1964, -23.683),
    PolyCoeffs::quad(5.75, -29.9554),
    PolyCoeffs::quad(7.9821, -31.7366),
    PolyCoeffs::quad(14.8929, -33.3839),
];

const COEFFS_200: [PolyCoeffs; 8] = [
    PolyCoeffs::quad(-0.1218, -2.3),
    PolyCoeffs::quad(3.0158, -7.251),
    PolyCoeffs::quad(5.2872, -16.143),
    PolyCoeffs::quad(16.071, -34.5978),
    PolyCoeffs::quad(15.8194, -40.0386),
    PolyCoeffs::quartic(-11.4974, 11.9951, 26.8754, -57.9855),
    PolyCoeffs::quad(16.068, -36.8284),
    PolyCoeffs::quartic(25.6734, -75.0144, 77.3008, -39.1424),
];

const COEFFS_300: [PolyCoeffs; 8] = [
    PolyCoeffs::quartic(28.3058, -50.6217, 22.4839, -2.0197),
    PolyCoeffs::quartic(23.8514, -37.7475, 15.5151, -5.6454),
    PolyCoeffs::quartic(-1.1672, 2.9277, 7.0134, -17.8556),
    PolyCoeffs::quartic(-15.4007, 22.9673, 2.7267, -30.2921),
    PolyCoeffs::quartic(-5.3642, 1.3338, 25.4208, -41.3978),
    PolyCoeffs::quartic(-12.2478, 10.4128, 21.6397, -39.766),
    PolyCoeffs::quartic(9.6818, -11.612, 12.2798, -24.3045),
    PolyCoeffs::quartic(-3.0933, 8.58, -2.8214, -11.7115),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(thickness_mm: f64, baffle_count: u32, depth_mm: f64) -> Geometry {
        Geometry {
            width_mm: 1200.0,
            height_mm: 800.0,
            depth_mm,
            thickness_mm,
            baffle_count,
        }
    }

    #[test]
    fn reference_gap_ratio_matches_half_thickness() {
        // s = 100 mm, d = 200 mm → r = 0.5, x = 0: 보정 없음
        let res = attenuation(&geometry(200.0, 4, 1000.0), &ReferenceTables::default());
        let band = res.bands[FrequencyBand::Hz1000];
        assert_eq!(band.d_ref, 35.0);
        assert!(band.delta.abs() < 1e-9);
        assert_eq!(band.d_est, 35.0);
    }

    #[test]
    fn d_est_scales_with_depth() {
        let tables = ReferenceTables::default();
        let short = attenuation(&geometry(100.0, 4, 500.0), &tables);
        let long = attenuation(&geometry(100.0, 4, 1500.0), &tables);
        for band in FrequencyBand::ALL {
            let ratio_target = short.bands[band].d_corr * 1.5;
            assert!((long.bands[band].d_est - ratio_target).abs() < 0.02);
        }
    }

    #[test]
    fn unsupported_thickness_without_reference_data_is_zero() {
        let res = attenuation(&geometry(150.0, 4, 1000.0), &ReferenceTables::default());
        for (_, band) in res.bands.iter() {
            assert_eq!(band.d_est, 0.0);
        }
        assert_eq!(res.global_est, 0.0);
    }

    #[test]
    fn zero_baffles_do_not_divide_by_zero() {
        let res = attenuation(&geometry(200.0, 0, 1000.0), &ReferenceTables::default());
        // x = -0.5 → 다항식 값은 유한해야 한다.
        assert!(res.bands.values().all(|b| b.d_est.is_finite()));
        assert!(res.global_est.is_finite());
    }

    #[test]
    fn global_is_energetic_sum_of_positive_bands() {
        let res = attenuation(&geometry(200.0, 4, 1000.0), &ReferenceTables::default());
        let expected = energetic_sum(
            res.bands
                .values()
                .map(|b| b.d_est)
                .filter(|v| *v > 0.0),
        );
        assert!((res.global_est - round_to(expected, 1)).abs() < 0.051);
    }
}
